//! Response curves mapping a normalized raw score onto a weighted final score.
//!
//! Every curve takes an input in [0, 1] (inputs outside are clamped) and returns a value in
//! [0, 1]. Curves are monotonically non-decreasing so that ranking by raw score and ranking
//! by curved score agree.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Monotonic easing function applied to combined heuristic scores.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ResponseCurve {
    /// Identity.
    Linear,
    /// Cubic Hermite from (0, 0) to (1, 1) with flat tangents at both ends.
    #[default]
    EaseInOut,
    /// `t^exponent`.
    Power { exponent: f32 },
    /// Hermite smoothstep between two input edges.
    SmoothStep { edge0: f32, edge1: f32 },
    /// Piecewise-linear keys `(input, output)`, sorted by input.
    Keyframes(Vec<(f32, f32)>),
}

impl ResponseCurve {
    /// Evaluates the curve at `t`, clamped to [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let v = match self {
            ResponseCurve::Linear => t,
            ResponseCurve::EaseInOut => smoothstep01(0.0, 1.0, t),
            ResponseCurve::Power { exponent } => t.powf(*exponent),
            ResponseCurve::SmoothStep { edge0, edge1 } => smoothstep01(*edge0, *edge1, t),
            ResponseCurve::Keyframes(keys) => evaluate_keys(keys, t),
        };
        v.clamp(0.0, 1.0)
    }

    /// Rejects curves that are not finite or not monotonically non-decreasing.
    pub fn validate(&self) -> Result<()> {
        match self {
            ResponseCurve::Linear | ResponseCurve::EaseInOut => Ok(()),
            ResponseCurve::Power { exponent } => {
                if !exponent.is_finite() || *exponent <= 0.0 {
                    return Err(Error::InvalidConfig(
                        "power curve exponent must be finite and > 0".into(),
                    ));
                }
                Ok(())
            }
            ResponseCurve::SmoothStep { edge0, edge1 } => {
                if !edge0.is_finite() || !edge1.is_finite() || edge0 > edge1 {
                    return Err(Error::InvalidConfig(
                        "smoothstep edges must be finite with edge0 <= edge1".into(),
                    ));
                }
                Ok(())
            }
            ResponseCurve::Keyframes(keys) => {
                if keys.is_empty() {
                    return Err(Error::InvalidConfig(
                        "keyframe curve needs at least one key".into(),
                    ));
                }
                if keys.iter().any(|(t, v)| !t.is_finite() || !v.is_finite()) {
                    return Err(Error::InvalidConfig(
                        "keyframe curve contains non-finite keys".into(),
                    ));
                }
                for pair in keys.windows(2) {
                    let ((t0, v0), (t1, v1)) = (pair[0], pair[1]);
                    if t1 < t0 {
                        return Err(Error::InvalidConfig(
                            "keyframes must be sorted by input".into(),
                        ));
                    }
                    if v1 < v0 {
                        return Err(Error::InvalidConfig(
                            "keyframe outputs must be non-decreasing".into(),
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

fn smoothstep01(e0: f32, e1: f32, x: f32) -> f32 {
    let denom = e1 - e0;
    if denom.abs() <= f32::EPSILON {
        return if x >= e1 { 1.0 } else { 0.0 };
    }
    let t = ((x - e0) / denom).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn evaluate_keys(keys: &[(f32, f32)], t: f32) -> f32 {
    let (Some(&(first_t, first_v)), Some(&(last_t, last_v))) = (keys.first(), keys.last()) else {
        return t;
    };
    if t <= first_t {
        return first_v;
    }
    if t >= last_t {
        return last_v;
    }
    for pair in keys.windows(2) {
        let ((t0, v0), (t1, v1)) = (pair[0], pair[1]);
        if t >= t0 && t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * ((t - t0) / span);
        }
    }
    last_v
}
