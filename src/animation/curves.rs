//! Easing curves.
//!
//! A closed set of normalized-time shaping functions. Every curve maps
//! `0 -> 0` and `1 -> 1`; back and elastic curves leave `[0, 1]` in between.
//!
//! Curves carry a stable integer index (family-major: sine, quad, cubic,
//! quart, quint, expo, circ, back, elastic, bounce; each in/out/in-out)
//! so UI selections and saved settings can refer to them by number.

use std::f32::consts::PI;
use std::fmt;

/// Lower bound of the value range used when plotting a curve preview.
pub const PLOT_MIN: f32 = -0.24;
/// Upper bound of the value range used when plotting a curve preview.
pub const PLOT_MAX: f32 = 1.25;
/// Sample count of the debug UI's curve preview.
pub const PLOT_SAMPLES: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveKind {
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
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
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    /// Identity curve. Not part of the numbered easing table's 30 entries.
    #[default]
    Linear,
}

impl CurveKind {
    /// Every curve, in index order.
    pub const ALL: [CurveKind; 31] = [
        Self::EaseInSine,
        Self::EaseOutSine,
        Self::EaseInOutSine,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInQuart,
        Self::EaseOutQuart,
        Self::EaseInOutQuart,
        Self::EaseInQuint,
        Self::EaseOutQuint,
        Self::EaseInOutQuint,
        Self::EaseInExpo,
        Self::EaseOutExpo,
        Self::EaseInOutExpo,
        Self::EaseInCirc,
        Self::EaseOutCirc,
        Self::EaseInOutCirc,
        Self::EaseInBack,
        Self::EaseOutBack,
        Self::EaseInOutBack,
        Self::EaseInElastic,
        Self::EaseOutElastic,
        Self::EaseInOutElastic,
        Self::EaseInBounce,
        Self::EaseOutBounce,
        Self::EaseInOutBounce,
        Self::Linear,
    ];

    /// Looks a curve up by its table index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, as shown in curve pickers.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EaseInSine => "EaseInSine",
            Self::EaseOutSine => "EaseOutSine",
            Self::EaseInOutSine => "EaseInOutSine",
            Self::EaseInQuad => "EaseInQuad",
            Self::EaseOutQuad => "EaseOutQuad",
            Self::EaseInOutQuad => "EaseInOutQuad",
            Self::EaseInCubic => "EaseInCubic",
            Self::EaseOutCubic => "EaseOutCubic",
            Self::EaseInOutCubic => "EaseInOutCubic",
            Self::EaseInQuart => "EaseInQuart",
            Self::EaseOutQuart => "EaseOutQuart",
            Self::EaseInOutQuart => "EaseInOutQuart",
            Self::EaseInQuint => "EaseInQuint",
            Self::EaseOutQuint => "EaseOutQuint",
            Self::EaseInOutQuint => "EaseInOutQuint",
            Self::EaseInExpo => "EaseInExpo",
            Self::EaseOutExpo => "EaseOutExpo",
            Self::EaseInOutExpo => "EaseInOutExpo",
            Self::EaseInCirc => "EaseInCirc",
            Self::EaseOutCirc => "EaseOutCirc",
            Self::EaseInOutCirc => "EaseInOutCirc",
            Self::EaseInBack => "EaseInBack",
            Self::EaseOutBack => "EaseOutBack",
            Self::EaseInOutBack => "EaseInOutBack",
            Self::EaseInElastic => "EaseInElastic",
            Self::EaseOutElastic => "EaseOutElastic",
            Self::EaseInOutElastic => "EaseInOutElastic",
            Self::EaseInBounce => "EaseInBounce",
            Self::EaseOutBounce => "EaseOutBounce",
            Self::EaseInOutBounce => "EaseInOutBounce",
            Self::Linear => "Linear",
        }
    }

    /// Evaluates the curve at normalized time `t`.
    ///
    /// `t` is clamped to `[0, 1]` first; the result is not clamped.
    #[must_use]
    pub fn ease(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::EaseInSine => sine_in(t),
            Self::EaseOutSine => sine_out(t),
            Self::EaseInOutSine => sine_in_out(t),
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutQuad => poly_in_out(t, 2),
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => poly_in_out(t, 3),
            Self::EaseInQuart => t * t * t * t,
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Self::EaseInOutQuart => poly_in_out(t, 4),
            Self::EaseInQuint => t * t * t * t * t,
            Self::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Self::EaseInOutQuint => poly_in_out(t, 5),
            Self::EaseInExpo => expo_in(t),
            Self::EaseOutExpo => expo_out(t),
            Self::EaseInOutExpo => expo_in_out(t),
            Self::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::EaseInOutCirc => circ_in_out(t),
            Self::EaseInBack => back_in(t),
            Self::EaseOutBack => back_out(t),
            Self::EaseInOutBack => back_in_out(t),
            Self::EaseInElastic => elastic_in(t),
            Self::EaseOutElastic => elastic_out(t),
            Self::EaseInOutElastic => elastic_in_out(t),
            Self::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Self::EaseOutBounce => bounce_out(t),
            Self::EaseInOutBounce => bounce_in_out(t),
            Self::Linear => t,
        }
    }

    /// Samples the curve at `n / samples` for `n in 0..samples`, for preview plots.
    #[must_use]
    pub fn plot(self, samples: usize) -> Vec<f32> {
        (0..samples)
            .map(|n| self.ease(n as f32 / samples as f32))
            .collect()
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Polynomial
// ============================================================================

#[inline]
fn poly_in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        2.0_f32.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

// ============================================================================
// Sine
// ============================================================================

#[inline]
fn sine_in(t: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    1.0 - (t * PI / 2.0).cos()
}

#[inline]
fn sine_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

#[inline]
fn sine_in_out(t: f32) -> f32 {
    -((t * PI).cos() - 1.0) / 2.0
}

// ============================================================================
// Exponential
// ============================================================================

#[inline]
fn expo_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * t - 10.0)
    }
}

#[inline]
fn expo_out(t: f32) -> f32 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

#[inline]
fn expo_in_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        2.0_f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

// ============================================================================
// Circular
// ============================================================================

#[inline]
fn circ_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

// ============================================================================
// Back (overshoot)
// ============================================================================

const BACK_C1: f32 = 1.701_58;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

#[inline]
fn back_in(t: f32) -> f32 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

#[inline]
fn back_out(t: f32) -> f32 {
    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}

#[inline]
fn back_in_out(t: f32) -> f32 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

// ============================================================================
// Elastic
// ============================================================================

const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

#[inline]
fn elastic_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

#[inline]
fn elastic_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

#[inline]
fn elastic_in_out(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        (2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0 + 1.0
    }
}

// ============================================================================
// Bounce
// ============================================================================

const BOUNCE_N1: f32 = 7.5625;
const BOUNCE_D1: f32 = 2.75;

#[inline]
fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984_375
    }
}

#[inline]
fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}
