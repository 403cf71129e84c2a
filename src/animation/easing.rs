use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Maps normalized progress in `[0, 1]` to an eased value.
pub type EasingFunction = fn(f64) -> f64;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

impl Easing {
    pub fn function(self) -> EasingFunction {
        match self {
            Self::Linear => linear,
            Self::EaseInQuad => ease_in_quad,
            Self::EaseOutQuad => ease_out_quad,
            Self::EaseInOutQuad => ease_in_out_quad,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
            Self::EaseInOutCubic => ease_in_out_cubic,
            Self::EaseInQuart => ease_in_quart,
            Self::EaseOutQuart => ease_out_quart,
            Self::EaseInOutQuart => ease_in_out_quart,
            Self::EaseInQuint => ease_in_quint,
            Self::EaseOutQuint => ease_out_quint,
            Self::EaseInOutQuint => ease_in_out_quint,
            Self::EaseInSine => ease_in_sine,
            Self::EaseOutSine => ease_out_sine,
            Self::EaseInOutSine => ease_in_out_sine,
            Self::EaseInExpo => ease_in_expo,
            Self::EaseOutExpo => ease_out_expo,
            Self::EaseInOutExpo => ease_in_out_expo,
            Self::EaseInCirc => ease_in_circ,
            Self::EaseOutCirc => ease_out_circ,
            Self::EaseInOutCirc => ease_in_out_circ,
            Self::EaseInElastic => ease_in_elastic,
            Self::EaseOutElastic => ease_out_elastic,
            Self::EaseInOutElastic => ease_in_out_elastic,
            Self::EaseInBack => ease_in_back,
            Self::EaseOutBack => ease_out_back,
            Self::EaseInOutBack => ease_in_out_back,
            Self::EaseInBounce => ease_in_bounce,
            Self::EaseOutBounce => ease_out_bounce,
            Self::EaseInOutBounce => ease_in_out_bounce,
        }
    }

    /// Evaluates the curve, pinning the endpoints to exactly 0 and 1.
    ///
    /// Interior values of the elastic, back and bounce families may leave
    /// `[0, 1]`.
    pub fn ease(self, progress: f64) -> f64 {
        if progress <= 0.0 {
            0.0
        } else if progress >= 1.0 {
            1.0
        } else {
            (self.function())(progress)
        }
    }

    /// Monotone families never overshoot `[0, 1]`.
    pub fn is_monotone(self) -> bool {
        !matches!(
            self,
            Self::EaseInElastic
                | Self::EaseOutElastic
                | Self::EaseInOutElastic
                | Self::EaseInBack
                | Self::EaseOutBack
                | Self::EaseInOutBack
                | Self::EaseInBounce
                | Self::EaseOutBounce
                | Self::EaseInOutBounce
        )
    }
}

/// Either a named curve or a caller-supplied function.
#[derive(Debug, Clone, Copy)]
pub enum EasingFn {
    Named(Easing),
    Custom(EasingFunction),
}

impl EasingFn {
    pub fn ease(&self, progress: f64) -> f64 {
        match self {
            Self::Named(easing) => easing.ease(progress),
            Self::Custom(f) => f(progress),
        }
    }
}

impl From<Easing> for EasingFn {
    fn from(easing: Easing) -> Self {
        Self::Named(easing)
    }
}

impl From<EasingFunction> for EasingFn {
    fn from(f: EasingFunction) -> Self {
        Self::Custom(f)
    }
}

const BACK_OVERSHOOT: f64 = 1.70158;
const ELASTIC_PERIOD: f64 = 0.3;

pub fn linear(p: f64) -> f64 {
    p
}

pub fn ease_in_quad(p: f64) -> f64 {
    p * p
}

pub fn ease_out_quad(p: f64) -> f64 {
    -p * (p - 2.0)
}

pub fn ease_in_out_quad(p: f64) -> f64 {
    let position = p * 2.0;
    if position < 1.0 {
        return 0.5 * position * position;
    }
    -0.5 * ((position - 1.0) * (position - 3.0) - 1.0)
}

pub fn ease_in_cubic(p: f64) -> f64 {
    p.powi(3)
}

pub fn ease_out_cubic(p: f64) -> f64 {
    (p - 1.0).powi(3) + 1.0
}

pub fn ease_in_out_cubic(p: f64) -> f64 {
    let position = p * 2.0;
    if position < 1.0 {
        return 0.5 * position.powi(3);
    }
    0.5 * ((position - 2.0).powi(3) + 2.0)
}

pub fn ease_in_quart(p: f64) -> f64 {
    p.powi(4)
}

pub fn ease_out_quart(p: f64) -> f64 {
    -((p - 1.0).powi(4) - 1.0)
}

pub fn ease_in_out_quart(p: f64) -> f64 {
    let position = p * 2.0;
    if position < 1.0 {
        return 0.5 * position.powi(4);
    }
    -0.5 * ((position - 2.0).powi(4) - 2.0)
}

pub fn ease_in_quint(p: f64) -> f64 {
    p.powi(5)
}

pub fn ease_out_quint(p: f64) -> f64 {
    (p - 1.0).powi(5) + 1.0
}

pub fn ease_in_out_quint(p: f64) -> f64 {
    let position = p * 2.0;
    if position < 1.0 {
        return 0.5 * position.powi(5);
    }
    0.5 * ((position - 2.0).powi(5) + 2.0)
}

pub fn ease_in_sine(p: f64) -> f64 {
    1.0 - (p * PI / 2.0).cos()
}

pub fn ease_out_sine(p: f64) -> f64 {
    (p * PI / 2.0).sin()
}

pub fn ease_in_out_sine(p: f64) -> f64 {
    -0.5 * ((PI * p).cos() - 1.0)
}

pub fn ease_in_expo(p: f64) -> f64 {
    if p <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * (p - 1.0))
    }
}

pub fn ease_out_expo(p: f64) -> f64 {
    if p >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * p)
    }
}

pub fn ease_in_out_expo(p: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let position = p * 2.0;
    if position < 1.0 {
        return 0.5 * 2f64.powf(10.0 * (position - 1.0));
    }
    0.5 * (2.0 - 2f64.powf(-10.0 * (position - 1.0)))
}

pub fn ease_in_circ(p: f64) -> f64 {
    1.0 - (1.0 - p * p).sqrt()
}

pub fn ease_out_circ(p: f64) -> f64 {
    let position = p - 1.0;
    (1.0 - position * position).sqrt()
}

pub fn ease_in_out_circ(p: f64) -> f64 {
    let position = p * 2.0;
    if position < 1.0 {
        return -0.5 * ((1.0 - position * position).sqrt() - 1.0);
    }
    let position = position - 2.0;
    0.5 * ((1.0 - position * position).sqrt() + 1.0)
}

fn elastic_shift(period: f64) -> f64 {
    period / (2.0 * PI) * 1f64.asin()
}

pub fn ease_in_elastic(p: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let position = p - 1.0;
    let s = elastic_shift(ELASTIC_PERIOD);
    -(2f64.powf(10.0 * position) * ((position - s) * (2.0 * PI) / ELASTIC_PERIOD).sin())
}

pub fn ease_out_elastic(p: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let s = elastic_shift(ELASTIC_PERIOD);
    2f64.powf(-10.0 * p) * ((p - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

pub fn ease_in_out_elastic(p: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let period = ELASTIC_PERIOD * 1.5;
    let s = elastic_shift(period);
    let position = p * 2.0 - 1.0;
    let wave = ((position - s) * (2.0 * PI) / period).sin();
    if position < 0.0 {
        -0.5 * 2f64.powf(10.0 * position) * wave
    } else {
        2f64.powf(-10.0 * position) * wave * 0.5 + 1.0
    }
}

pub fn ease_in_back(p: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    p * p * ((s + 1.0) * p - s)
}

pub fn ease_out_back(p: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    let position = p - 1.0;
    position * position * ((s + 1.0) * position + s) + 1.0
}

pub fn ease_in_out_back(p: f64) -> f64 {
    let s = BACK_OVERSHOOT * 1.525;
    let position = p * 2.0;
    if position < 1.0 {
        return 0.5 * (position * position * ((s + 1.0) * position - s));
    }
    let position = position - 2.0;
    0.5 * (position * position * ((s + 1.0) * position + s) + 2.0)
}

pub fn ease_in_bounce(p: f64) -> f64 {
    1.0 - ease_out_bounce(1.0 - p)
}

pub fn ease_out_bounce(p: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if p < 1.0 / D {
        N * p * p
    } else if p < 2.0 / D {
        let position = p - 1.5 / D;
        N * position * position + 0.75
    } else if p < 2.5 / D {
        let position = p - 2.25 / D;
        N * position * position + 0.9375
    } else {
        let position = p - 2.625 / D;
        N * position * position + 0.984375
    }
}

pub fn ease_in_out_bounce(p: f64) -> f64 {
    if p < 0.5 {
        ease_in_bounce(p * 2.0) * 0.5
    } else {
        ease_out_bounce(p * 2.0 - 1.0) * 0.5 + 0.5
    }
}
