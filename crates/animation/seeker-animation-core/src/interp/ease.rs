//! Named easing curves.
//!
//! Names follow the `family.mode` convention used by preset tables
//! (`"power2.inOut"`, `"back.out"`, `"none"`), plus CSS keywords
//! (`"ease-in-out"`), `"steps(n)"` and `"cubic-bezier(x1, y1, x2, y2)"`.
//! A family without a mode defaults to `out`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;
use crate::interp::functions::cubic_bezier_ease;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

impl EaseMode {
    fn suffix(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inOut",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Ease {
    /// Linear progress.
    None,
    /// Polynomial of degree `degree + 1` (power1 = quad ... power4 = quint).
    Power { degree: u8, mode: EaseMode },
    Sine(EaseMode),
    Expo(EaseMode),
    Circ(EaseMode),
    Back(EaseMode),
    Elastic(EaseMode),
    Bounce(EaseMode),
    CubicBezier([f64; 4]),
    Steps(u32),
}

impl Default for Ease {
    /// Keyframes without an explicit ease run linearly.
    fn default() -> Self {
        Self::None
    }
}

const BACK_OVERSHOOT: f64 = 1.70158;

fn bounce_out(p: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if p < 1.0 / D1 {
        N1 * p * p
    } else if p < 2.0 / D1 {
        let p = p - 1.5 / D1;
        N1 * p * p + 0.75
    } else if p < 2.5 / D1 {
        let p = p - 2.25 / D1;
        N1 * p * p + 0.9375
    } else {
        let p = p - 2.625 / D1;
        N1 * p * p + 0.984375
    }
}

/// Derive a mode from the family's ease-in curve.
#[inline]
fn with_mode(mode: EaseMode, p: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    match mode {
        EaseMode::In => ease_in(p),
        EaseMode::Out => 1.0 - ease_in(1.0 - p),
        EaseMode::InOut => {
            if p < 0.5 {
                ease_in(2.0 * p) / 2.0
            } else {
                1.0 - ease_in(2.0 * (1.0 - p)) / 2.0
            }
        }
    }
}

impl Ease {
    /// Map linear progress in `[0, 1]` to an interpolation weight.
    /// Endpoints are exact: `apply(0) == 0`, `apply(1) == 1`.
    pub fn apply(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let p = progress;
        match *self {
            Self::None => p,
            Self::Power { degree, mode } => with_mode(mode, p, |x| x.powi(i32::from(degree) + 1)),
            Self::Sine(mode) => with_mode(mode, p, |x| 1.0 - (x * PI / 2.0).cos()),
            Self::Expo(mode) => with_mode(mode, p, |x| {
                if x <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * x - 10.0)
                }
            }),
            Self::Circ(mode) => with_mode(mode, p, |x| 1.0 - (1.0 - x * x).max(0.0).sqrt()),
            Self::Back(mode) => with_mode(mode, p, |x| {
                (BACK_OVERSHOOT + 1.0) * x * x * x - BACK_OVERSHOOT * x * x
            }),
            Self::Elastic(mode) => with_mode(mode, p, |x| {
                if x <= 0.0 {
                    0.0
                } else if x >= 1.0 {
                    1.0
                } else {
                    -(2f64.powf(10.0 * x - 10.0)) * ((10.0 * x - 10.75) * (2.0 * PI / 3.0)).sin()
                }
            }),
            Self::Bounce(mode) => with_mode(mode, p, |x| 1.0 - bounce_out(1.0 - x)),
            Self::CubicBezier([x1, y1, x2, y2]) => cubic_bezier_ease(p, x1, y1, x2, y2),
            Self::Steps(n) => {
                let n = f64::from(n.max(1));
                (p * n).floor() / n
            }
        }
    }

    fn family(name: &str) -> Option<fn(EaseMode) -> Self> {
        let f: fn(EaseMode) -> Self = match name {
            "power1" | "quad" => |mode| Self::Power { degree: 1, mode },
            "power2" | "cubic" => |mode| Self::Power { degree: 2, mode },
            "power3" | "quart" => |mode| Self::Power { degree: 3, mode },
            "power4" | "quint" | "strong" => |mode| Self::Power { degree: 4, mode },
            "sine" => Self::Sine,
            "expo" => Self::Expo,
            "circ" => Self::Circ,
            "back" => Self::Back,
            "elastic" => Self::Elastic,
            "bounce" => Self::Bounce,
            _ => return None,
        };
        Some(f)
    }
}

fn parse_args(inner: &str) -> Option<Vec<f64>> {
    inner
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect()
}

impl FromStr for Ease {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim();
        let unknown = || ConfigError::UnknownEase {
            name: raw.to_string(),
        };

        match name {
            "none" | "linear" | "power0" => return Ok(Self::None),
            "ease" => return Ok(Self::CubicBezier([0.25, 0.1, 0.25, 1.0])),
            "ease-in" => return Ok(Self::CubicBezier([0.42, 0.0, 1.0, 1.0])),
            "ease-out" => return Ok(Self::CubicBezier([0.0, 0.0, 0.58, 1.0])),
            "ease-in-out" => return Ok(Self::CubicBezier([0.42, 0.0, 0.58, 1.0])),
            _ => {}
        }

        if let Some(inner) = name.strip_prefix("steps(").and_then(|s| s.strip_suffix(')')) {
            return match inner.trim().parse::<u32>() {
                Ok(n) if n > 0 => Ok(Self::Steps(n)),
                _ => Err(unknown()),
            };
        }

        if let Some(inner) = name
            .strip_prefix("cubic-bezier(")
            .and_then(|s| s.strip_suffix(')'))
        {
            return match parse_args(inner).as_deref() {
                Some(&[x1, y1, x2, y2])
                    if (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2) =>
                {
                    Ok(Self::CubicBezier([x1, y1, x2, y2]))
                }
                _ => Err(unknown()),
            };
        }

        let (family, mode) = match name.split_once('.') {
            Some((family, "in")) => (family, EaseMode::In),
            Some((family, "out")) => (family, EaseMode::Out),
            Some((family, "inOut")) => (family, EaseMode::InOut),
            Some(_) => return Err(unknown()),
            None => (name, EaseMode::Out),
        };
        Self::family(family).map(|f| f(mode)).ok_or_else(unknown)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Power { degree, mode } => write!(f, "power{degree}.{}", mode.suffix()),
            Self::Sine(mode) => write!(f, "sine.{}", mode.suffix()),
            Self::Expo(mode) => write!(f, "expo.{}", mode.suffix()),
            Self::Circ(mode) => write!(f, "circ.{}", mode.suffix()),
            Self::Back(mode) => write!(f, "back.{}", mode.suffix()),
            Self::Elastic(mode) => write!(f, "elastic.{}", mode.suffix()),
            Self::Bounce(mode) => write!(f, "bounce.{}", mode.suffix()),
            Self::CubicBezier([x1, y1, x2, y2]) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            Self::Steps(n) => write!(f, "steps({n})"),
        }
    }
}

impl Serialize for Ease {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9, "left={a} right={b}");
    }

    #[test]
    fn parses_names() {
        assert_eq!("none".parse::<Ease>().unwrap(), Ease::None);
        assert_eq!(
            "power2.inOut".parse::<Ease>().unwrap(),
            Ease::Power {
                degree: 2,
                mode: EaseMode::InOut
            }
        );
        assert_eq!("bounce".parse::<Ease>().unwrap(), Ease::Bounce(EaseMode::Out));
        assert_eq!("steps(4)".parse::<Ease>().unwrap(), Ease::Steps(4));
        assert_eq!(
            "cubic-bezier(0.1, 0.7, 1.0, 0.1)".parse::<Ease>().unwrap(),
            Ease::CubicBezier([0.1, 0.7, 1.0, 0.1])
        );
    }

    #[test]
    fn rejects_unknown_names() {
        for bad in ["wobble", "power2.sideways", "steps(0)", "cubic-bezier(2, 0, 1, 1)"] {
            let err = bad.parse::<Ease>().unwrap_err();
            assert_eq!(
                err,
                ConfigError::UnknownEase {
                    name: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn endpoints_are_exact_for_every_family() {
        let eases = [
            Ease::None,
            Ease::default(),
            Ease::Sine(EaseMode::InOut),
            Ease::Expo(EaseMode::In),
            Ease::Circ(EaseMode::Out),
            Ease::Back(EaseMode::InOut),
            Ease::Elastic(EaseMode::Out),
            Ease::Bounce(EaseMode::In),
            Ease::Steps(3),
            Ease::CubicBezier([0.42, 0.0, 0.58, 1.0]),
        ];
        for ease in eases {
            assert_eq!(ease.apply(0.0), 0.0, "{ease}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease}");
        }
    }

    #[test]
    fn curves_have_expected_shape() {
        approx(Ease::None.apply(0.3), 0.3);
        approx(Ease::default().apply(0.5), 0.5);
        approx("power1.out".parse::<Ease>().unwrap().apply(0.5), 0.75);
        approx(
            Ease::Power {
                degree: 1,
                mode: EaseMode::In,
            }
            .apply(0.5),
            0.25,
        );
        approx(Ease::Sine(EaseMode::InOut).apply(0.5), 0.5);
        approx(Ease::Steps(4).apply(0.3), 0.25);
        assert!(Ease::Back(EaseMode::In).apply(0.2) < 0.0, "back.in dips below zero");
        approx(Ease::Bounce(EaseMode::Out).apply(1.0 / 2.75), 1.0);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for name in ["none", "power3.in", "elastic.inOut", "steps(5)"] {
            let ease: Ease = name.parse().unwrap();
            assert_eq!(ease.to_string(), name);
        }
    }
}
