//! View blend параметры (duration / curve / exponent)
//!
//! Core только передаёт их host'у вместе с activate request.
//! `ViewBlend::weight_at` — для host'ов без своей blend анимации.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Кривая view-target blend'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum BlendCurve {
    #[default]
    Linear,
    /// Hermite без касательных: 3a² − 2a³
    Cubic,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Host сам уже смешал — вес сразу 1
    PreBlended,
}

impl BlendCurve {
    /// Вес нового view для нормализованного времени `alpha` ∈ [0, 1]
    pub fn apply(self, alpha: f32, exponent: f32) -> f32 {
        let a = alpha.clamp(0.0, 1.0);
        match self {
            BlendCurve::Linear => a,
            BlendCurve::Cubic => a * a * (3.0 - 2.0 * a),
            BlendCurve::EaseIn => a.powf(exponent),
            BlendCurve::EaseOut => 1.0 - (1.0 - a).powf(exponent),
            BlendCurve::EaseInOut => {
                if a < 0.5 {
                    0.5 * (2.0 * a).powf(exponent)
                } else {
                    1.0 - 0.5 * (2.0 * (1.0 - a)).powf(exponent)
                }
            }
            BlendCurve::PreBlended => 1.0,
        }
    }
}

/// Параметры перехода на камеру
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewBlend {
    /// Секунды; 0 = мгновенный cut
    pub duration: f32,
    pub curve: BlendCurve,
    pub exponent: f32,
}

impl Default for ViewBlend {
    fn default() -> Self {
        Self::CUT
    }
}

impl ViewBlend {
    /// Мгновенное переключение (activate on play)
    pub const CUT: Self = Self {
        duration: 0.0,
        curve: BlendCurve::Linear,
        exponent: 2.0,
    };

    pub fn new(duration: f32, curve: BlendCurve, exponent: f32) -> Self {
        Self {
            duration,
            curve,
            exponent,
        }
    }

    pub fn is_cut(&self) -> bool {
        self.duration <= 0.0
    }

    /// Вес нового view через `elapsed` секунд после activate
    pub fn weight_at(&self, elapsed: f32) -> f32 {
        if self.is_cut() {
            return 1.0;
        }
        self.curve.apply(elapsed / self.duration, self.exponent)
    }
}
