//! Fixed camera config (неизменяемый per camera instance)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::CameraConfigError;

/// Тип камеры: стоит на месте или едет по rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum CameraType {
    #[default]
    Static,
    Rail,
}

/// Что камера отслеживает ориентацией каждый step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum FocusMode {
    /// Ориентация заморожена
    #[default]
    None,
    FocusPlayer,
    FocusTarget,
    /// Slerp(initial orientation → look at player, midpoint_alpha)
    MidPlayerAndInitialFocus,
    /// Slerp(look at target → look at player, midpoint_alpha)
    MidPlayerAndTarget,
}

impl FocusMode {
    pub fn requires_target(&self) -> bool {
        matches!(self, FocusMode::FocusTarget | FocusMode::MidPlayerAndTarget)
    }
}

/// Параметры камеры
///
/// Инварианты (проверяются в `validate` при старте, fail fast):
/// - Rail → rail reference обязателен
/// - FocusTarget / MidPlayerAndTarget → focus target обязателен
/// - rail_travel_distance > 0, smooth speeds ≥ 0, midpoint_alpha ∈ [0, 1]
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCameraConfig {
    pub camera_type: CameraType,
    pub focus_mode: FocusMode,
    /// Дистанция игрока (от камеры), на которой камера доезжает до конца rail
    pub rail_travel_distance: f32,
    pub smooth_movement: bool,
    pub movement_smooth_speed: f32,
    pub smooth_rotation: bool,
    pub rotation_smooth_speed: f32,
    pub midpoint_alpha: f32,
    /// Выключать tick после deactivate (иначе pose продолжает обновляться)
    pub auto_deactivate_on_exit: bool,
    /// Сразу становится active view после старта
    pub activate_on_play: bool,
}

impl Default for FixedCameraConfig {
    fn default() -> Self {
        Self {
            camera_type: CameraType::Static,
            focus_mode: FocusMode::None,
            rail_travel_distance: 2000.0,
            smooth_movement: true,
            movement_smooth_speed: 3.0,
            smooth_rotation: true,
            rotation_smooth_speed: 3.0,
            midpoint_alpha: 0.25,
            auto_deactivate_on_exit: false,
            activate_on_play: false,
        }
    }
}

impl FixedCameraConfig {
    pub fn static_camera(focus_mode: FocusMode) -> Self {
        Self {
            focus_mode,
            ..default()
        }
    }

    pub fn rail_camera(rail_travel_distance: f32, focus_mode: FocusMode) -> Self {
        Self {
            camera_type: CameraType::Rail,
            focus_mode,
            rail_travel_distance,
            ..default()
        }
    }

    /// Проверка config + наличия references (rail / focus target)
    pub fn validate(&self, rail_assigned: bool, target_assigned: bool) -> Result<(), CameraConfigError> {
        if self.camera_type == CameraType::Rail {
            if !rail_assigned {
                return Err(CameraConfigError::MissingRail);
            }
            if !(self.rail_travel_distance > 0.0) {
                return Err(CameraConfigError::InvalidRailTravelDistance(self.rail_travel_distance));
            }
        }

        if self.focus_mode.requires_target() && !target_assigned {
            return Err(CameraConfigError::MissingFocusTarget {
                mode: self.focus_mode,
            });
        }

        if self.movement_smooth_speed < 0.0 {
            return Err(CameraConfigError::NegativeSmoothSpeed { which: "movement" });
        }
        if self.rotation_smooth_speed < 0.0 {
            return Err(CameraConfigError::NegativeSmoothSpeed { which: "rotation" });
        }

        if !(0.0..=1.0).contains(&self.midpoint_alpha) {
            return Err(CameraConfigError::MidpointAlphaOutOfRange(self.midpoint_alpha));
        }

        Ok(())
    }
}
