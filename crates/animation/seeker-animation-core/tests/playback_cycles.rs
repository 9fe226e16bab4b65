use seeker_animation_core::{
    construct, construct_with_sequence, AnimationConfig, AnimationDefinition, AnimationError,
    AnimationHandle, CallbackTarget, Direction, KeyframeDescriptor, KeyframeSequence,
    PlaybackEvent, PlaybackStatus, PropertyMap, PropertyValue, Repeat, TargetError,
};

fn linear_x(config: AnimationConfig) -> AnimationDefinition {
    AnimationDefinition::new(
        config,
        vec![KeyframeDescriptor::new(1.0).with("x", 1.0).with_ease("none")],
    )
}

fn x_of(handle: &AnimationHandle<PropertyMap>) -> f64 {
    handle
        .target()
        .get("x")
        .and_then(PropertyValue::as_number)
        .expect("x applied")
}

/// Tick until completion; returns the number of ticks and every event seen.
fn run_to_end(
    handle: &mut AnimationHandle<PropertyMap>,
    dt: f64,
    max_ticks: usize,
) -> (usize, Vec<PlaybackEvent>) {
    let mut events = Vec::new();
    for n in 1..=max_ticks {
        let out = handle.tick(dt).unwrap();
        events.extend(out.events);
        if handle.is_complete() {
            return (n, events);
        }
    }
    panic!("animation did not complete within {max_ticks} ticks");
}

#[test]
fn finite_repeat_runs_n_plus_one_cycles() {
    let config = AnimationConfig::new(1.0).with_repeat(Repeat::Count(2));
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();

    let (ticks, events) = run_to_end(&mut handle, 0.25, 100);
    assert_eq!(ticks, 12);
    assert_eq!(
        events,
        vec![
            PlaybackEvent::CycleCompleted { cycle_index: 0 },
            PlaybackEvent::CycleCompleted { cycle_index: 1 },
            PlaybackEvent::Completed,
        ]
    );
    assert_eq!(x_of(&handle), 1.0);
    assert!(handle.controller().state().is_none());

    // Further ticks are no-ops.
    let out = handle.tick(1.0).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.status, PlaybackStatus::Completed);
}

#[test]
fn infinite_repeat_never_completes() {
    let config = AnimationConfig::new(2.0).with_repeat(Repeat::Infinite);
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();
    assert_eq!(handle.controller().total_duration(), None);

    // 5.5 cycles of 2 seconds.
    for _ in 0..88 {
        let out = handle.tick(0.125).unwrap();
        assert!(!out.completed());
    }
    let controller = handle.controller();
    assert_eq!(handle.status(), PlaybackStatus::Running);
    assert_eq!(controller.cycle_index(), Some(5));
    assert_eq!(controller.direction(), Some(Direction::Forward));
    assert_eq!(controller.elapsed(), Some(1.0));
    assert_eq!(controller.local_time(), Some(1.0));
    assert_eq!(x_of(&handle), 0.5);

    assert_eq!(handle.cancel(), Some(PlaybackEvent::Cancelled));
    assert!(handle.tick(0.125).unwrap().is_empty());
}

#[test]
fn yoyo_reverse_cycle_mirrors_forward_cycle() {
    let config = AnimationConfig::new(1.0)
        .with_repeat(Repeat::Count(1))
        .with_yoyo(true);
    let definition = AnimationDefinition::new(
        config,
        vec![KeyframeDescriptor::new(1.0)
            .with("x", 8.0)
            .with_ease("power2.out")],
    );
    let mut handle = construct(PropertyMap::new(), definition).unwrap();
    handle.play();

    let mut samples = Vec::new();
    for _ in 0..7 {
        handle.tick(0.25).unwrap();
        samples.push(x_of(&handle));
    }
    // Ticks 1..3 run forward at 0.25, 0.5, 0.75; ticks 5..7 run back over the same points.
    assert_eq!(samples[4], samples[2]);
    assert_eq!(samples[5], samples[1]);
    assert_eq!(samples[6], samples[0]);
    assert_eq!(samples[3], 8.0);

    let out = handle.tick(0.25).unwrap();
    assert!(out.completed());
    // An odd number of yoyo cycles ends where it started.
    assert_eq!(x_of(&handle), 0.0);
}

#[test]
fn start_delay_defers_first_sample() {
    let config = AnimationConfig::new(1.0).with_delay(0.5);
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();

    let out = handle.tick(0.25).unwrap();
    assert_eq!(out.applied, 0);
    assert!(handle.target().get("x").is_none());

    let out = handle.tick(0.5).unwrap();
    assert_eq!(out.applied, 1);
    assert_eq!(x_of(&handle), 0.25);
}

#[test]
fn repeat_delay_holds_end_frame() {
    let config = AnimationConfig::new(1.0)
        .with_repeat(Repeat::Count(1))
        .with_repeat_delay(0.5);
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();
    assert_eq!(handle.controller().total_duration(), Some(2.5));

    for _ in 0..3 {
        handle.tick(0.25).unwrap();
    }
    let out = handle.tick(0.25).unwrap();
    assert_eq!(
        out.events,
        vec![PlaybackEvent::CycleCompleted { cycle_index: 0 }]
    );
    assert_eq!(out.applied, 1);
    assert_eq!(x_of(&handle), 1.0);

    let out = handle.tick(0.25).unwrap();
    assert_eq!(out.applied, 0);
    assert_eq!(x_of(&handle), 1.0);

    // Delay consumed exactly; the second cycle starts from its first frame.
    handle.tick(0.25).unwrap();
    assert_eq!(x_of(&handle), 0.0);
    assert_eq!(handle.controller().cycle_index(), Some(1));

    let (ticks, _) = run_to_end(&mut handle, 0.25, 100);
    assert_eq!(ticks, 4);
}

#[test]
fn large_tick_crosses_several_cycles() {
    let config = AnimationConfig::new(1.0).with_repeat(Repeat::Count(3));
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();

    let out = handle.tick(2.5).unwrap();
    assert_eq!(
        out.events,
        vec![
            PlaybackEvent::CycleCompleted { cycle_index: 0 },
            PlaybackEvent::CyclesSkipped { first: 1, count: 1 },
        ]
    );
    assert_eq!(handle.controller().cycle_index(), Some(2));
    assert_eq!(x_of(&handle), 0.5);

    let out = handle.tick(10.0).unwrap();
    assert_eq!(
        out.events,
        vec![
            PlaybackEvent::CycleCompleted { cycle_index: 2 },
            PlaybackEvent::Completed,
        ]
    );
    assert_eq!(x_of(&handle), 1.0);
}

#[test]
fn multi_period_tick_with_yoyo_and_repeat_delay() {
    // Cycles of 1s separated by 0.5s: cycle 3 runs over [4.5, 5.5].
    let config = AnimationConfig::new(1.0)
        .with_repeat(Repeat::Count(10))
        .with_repeat_delay(0.5)
        .with_yoyo(true);

    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();
    let out = handle.tick(4.75).unwrap();
    assert_eq!(
        out.events,
        vec![
            PlaybackEvent::CycleCompleted { cycle_index: 0 },
            PlaybackEvent::CyclesSkipped { first: 1, count: 2 },
        ]
    );
    let controller = handle.controller();
    assert_eq!(controller.cycle_index(), Some(3));
    assert_eq!(controller.direction(), Some(Direction::Reverse));
    assert_eq!(controller.elapsed(), Some(0.25));
    assert_eq!(controller.local_time(), Some(0.75));
    assert_eq!(x_of(&handle), 0.75);

    // Landing inside the delay after cycle 2 holds cycle 2's end frame.
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();
    handle.tick(4.25).unwrap();
    let state = handle.controller().state().expect("still running");
    assert_eq!(state.cycle_index, 3);
    assert_eq!(state.direction, Direction::Reverse);
    assert_eq!(state.delay_remaining, 0.25);
    assert_eq!(handle.controller().local_time(), Some(1.0));
    assert_eq!(x_of(&handle), 1.0);
}

#[test]
fn huge_tick_with_infinite_repeat_returns() {
    let config = AnimationConfig::new(2.0)
        .with_repeat(Repeat::Infinite)
        .with_yoyo(true);
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();

    let out = handle.tick(1e17).unwrap();
    assert!(!out.completed());
    let controller = handle.controller();
    assert_eq!(controller.cycle_index(), Some(50_000_000_000_000_000));
    assert_eq!(controller.direction(), Some(Direction::Forward));
    assert_eq!(controller.local_time(), Some(0.0));

    handle.tick(1.0).unwrap();
    assert_eq!(handle.controller().local_time(), Some(1.0));
    assert_eq!(x_of(&handle), 0.5);

    // 2^41 cycles of 0.5s plus a quarter second: an even count keeps yoyo forward.
    let config = AnimationConfig::new(0.5)
        .with_repeat(Repeat::Infinite)
        .with_yoyo(true);
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();
    handle.tick(2f64.powi(40) + 0.25).unwrap();
    let controller = handle.controller();
    assert_eq!(controller.cycle_index(), Some(1u64 << 41));
    assert_eq!(controller.direction(), Some(Direction::Forward));
    assert_eq!(controller.local_time(), Some(0.25));
    assert_eq!(handle.status(), PlaybackStatus::Running);
}

#[test]
fn huge_tick_with_finite_repeat_completes() {
    let config = AnimationConfig::new(1.0)
        .with_repeat(Repeat::Count(3))
        .with_repeat_delay(0.25)
        .with_yoyo(true);
    let mut handle = construct(PropertyMap::new(), linear_x(config)).unwrap();
    handle.play();

    let out = handle.tick(1e12).unwrap();
    assert_eq!(
        out.events,
        vec![
            PlaybackEvent::CycleCompleted { cycle_index: 0 },
            PlaybackEvent::CyclesSkipped { first: 1, count: 2 },
            PlaybackEvent::Completed,
        ]
    );
    assert!(handle.is_complete());
    // Four yoyo cycles end on the reverse pass, back at the start value.
    assert_eq!(x_of(&handle), 0.0);
}

#[test]
fn base_value_comes_from_target_at_play() {
    let mut element = PropertyMap::new().with("x", 3.0);
    let mut handle = construct(&mut element, linear_x(AnimationConfig::new(1.0))).unwrap();
    handle.target_mut().set("x", 5.0);
    handle.play();
    handle.tick(0.5).unwrap();
    assert_eq!(
        handle.controller().timeline().base_value("x"),
        Some(&PropertyValue::Number(5.0))
    );
    assert_eq!(handle.target().get("x"), Some(&PropertyValue::Number(3.0)));
}

#[test]
fn target_errors_propagate_and_keep_running() {
    let mut calls = 0;
    let target = CallbackTarget::new(|property: &str, _value: &PropertyValue| {
        calls += 1;
        if calls == 2 {
            Err(TargetError::new(property, "element detached"))
        } else {
            Ok(())
        }
    });
    let mut handle = construct(target, linear_x(AnimationConfig::new(1.0))).unwrap();
    handle.play();

    handle.tick(0.25).unwrap();
    let err = handle.tick(0.25).unwrap_err();
    assert_eq!(
        err,
        AnimationError::Target(TargetError::new("x", "element detached"))
    );
    assert_eq!(err.category(), "target");
    assert_eq!(handle.status(), PlaybackStatus::Running);

    // The failed tick still advanced time; the next one continues from there.
    handle.tick(0.25).unwrap();
    assert_eq!(handle.controller().elapsed(), Some(0.75));
}

#[test]
fn pause_and_cancel_are_idempotent() {
    let target = PropertyMap::new().with("x", 0.0);
    let mut handle = construct(target, linear_x(AnimationConfig::new(1.0))).unwrap();
    handle.play();
    handle.tick(0.5).unwrap();

    assert!(handle.pause().is_some());
    assert!(handle.pause().is_none());
    handle.tick(0.25).unwrap();
    assert_eq!(handle.controller().elapsed(), Some(0.5));

    assert_eq!(handle.cancel(), Some(PlaybackEvent::Cancelled));
    assert_eq!(handle.cancel(), None);
    assert!(handle.play().is_none());
    assert_eq!(handle.status(), PlaybackStatus::Cancelled);
    // Applied values stay in place.
    assert_eq!(x_of(&handle), 0.5);
}

#[test]
fn shared_sequence_drives_independent_instances() {
    let sequence = KeyframeSequence::from_descriptors(vec![
        KeyframeDescriptor::new(0.5).with("x", 2.0).with_ease("none"),
        KeyframeDescriptor::new(0.5).with("x", 4.0).with_ease("none"),
    ])
    .unwrap();

    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    assert_send_sync(&sequence);

    let mut fast = construct_with_sequence(
        PropertyMap::new(),
        AnimationConfig::new(1.0),
        sequence.clone(),
    )
    .unwrap();
    let mut slow =
        construct_with_sequence(PropertyMap::new(), AnimationConfig::new(4.0), sequence).unwrap();
    fast.play();
    slow.play();

    fast.tick(0.5).unwrap();
    slow.tick(0.5).unwrap();
    assert_eq!(fast.target().get("x"), Some(&PropertyValue::Number(2.0)));
    assert_eq!(slow.target().get("x"), Some(&PropertyValue::Number(0.5)));

    fast.tick(0.5).unwrap();
    assert!(fast.is_complete());
    assert_eq!(fast.target().get("x"), Some(&PropertyValue::Number(4.0)));
    assert_eq!(slow.status(), PlaybackStatus::Running);
}

#[test]
fn single_keyframe_completes_on_exact_target() {
    let definition = AnimationDefinition::new(
        AnimationConfig::new(0.3),
        vec![KeyframeDescriptor::new(0.1).with("rotate", "90deg")],
    );
    let mut handle = construct(PropertyMap::new(), definition).unwrap();
    handle.play();
    let out = handle.tick(1.0).unwrap();
    assert!(out.completed());
    assert_eq!(
        handle.target().get("rotate"),
        Some(&PropertyValue::dimension(90.0, "deg"))
    );
}
