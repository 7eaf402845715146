//! Fixed camera controller — state machine + per-step pose update
//!
//! Состояния: Uninitialized → Idle ⇄ Active
//! - start(): валидация config, посадка на rail, захват initial orientation
//! - activate(): Idle → Active, включает tick (host получает view request)
//! - deactivate(): Active → Idle, tick выключается только при auto_deactivate_on_exit
//! - step(): rail движение + focus ориентация + сглаживание
//!
//! Сглаживание — per-frame lerp (`delta_time * speed`).
//! Это зависит от частоты кадров; alpha клампится в [0, 1], чтобы большой delta не давал overshoot.

use bevy::prelude::*;

use super::blend::ViewBlend;
use super::config::{CameraType, FixedCameraConfig, FocusMode};
use super::error::{CameraConfigError, CameraStateError};
use crate::rail::RailPath;

/// Квадрат минимальной дистанции для lookAt (ближе — держим прошлую ориентацию)
pub const LOOK_AT_EPSILON: f32 = 1e-8;

/// Фаза state machine камеры
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CameraPhase {
    #[default]
    Uninitialized,
    Idle,
    Active,
}

/// Mutable состояние камеры (пересчитывается каждый step при tick_enabled)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CameraRuntimeState {
    pub current_position: Vec3,
    pub current_orientation: Quat,
    /// Захватывается один раз в start(), до любого rotation smoothing
    pub initial_orientation: Quat,
    pub phase: CameraPhase,
    pub tick_enabled: bool,
}

/// Результат start()
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartOutcome {
    Idle,
    /// activate_on_play: сразу Active, view request с этим blend
    Activated(ViewBlend),
    AlreadyStarted,
}

/// Почему step ничего не сделал (восстанавливается сам на следующем tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotTicking,
    /// Игрок ещё не существует — ждём
    PlayerUnavailable,
    /// Rail entity пропал после старта
    RailUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Updated,
    Skipped(SkipReason),
}

/// Fixed/rail камера
///
/// Config неизменяем, состояние меняется только через методы state machine.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct FixedCamera {
    config: FixedCameraConfig,
    state: CameraRuntimeState,
}

impl FixedCamera {
    /// Камера в позе, поставленной при authoring (Uninitialized, tick выключен)
    pub fn new(config: FixedCameraConfig, position: Vec3, orientation: Quat) -> Self {
        Self {
            config,
            state: CameraRuntimeState {
                current_position: position,
                current_orientation: orientation,
                initial_orientation: orientation,
                phase: CameraPhase::Uninitialized,
                tick_enabled: false,
            },
        }
    }

    pub fn from_transform(config: FixedCameraConfig, transform: &Transform) -> Self {
        Self::new(config, transform.translation, transform.rotation)
    }

    pub fn config(&self) -> &FixedCameraConfig {
        &self.config
    }

    pub fn state(&self) -> &CameraRuntimeState {
        &self.state
    }

    pub fn phase(&self) -> CameraPhase {
        self.state.phase
    }

    pub fn is_active(&self) -> bool {
        self.state.phase == CameraPhase::Active
    }

    pub fn tick_enabled(&self) -> bool {
        self.state.tick_enabled
    }

    pub fn position(&self) -> Vec3 {
        self.state.current_position
    }

    pub fn orientation(&self) -> Quat {
        self.state.current_orientation
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.state.current_position).with_rotation(self.state.current_orientation)
    }

    /// Uninitialized → Idle (или сразу Active при activate_on_play)
    ///
    /// При ошибке камера остаётся Uninitialized.
    pub fn start(
        &mut self,
        rail: Option<&dyn RailPath>,
        target_assigned: bool,
    ) -> Result<StartOutcome, CameraConfigError> {
        if self.state.phase != CameraPhase::Uninitialized {
            return Ok(StartOutcome::AlreadyStarted);
        }

        self.config.validate(rail.is_some(), target_assigned)?;

        if self.config.camera_type == CameraType::Rail {
            if let Some(rail) = rail {
                self.state.current_position = rail.initial_point();
            }
        }

        self.state.initial_orientation = self.state.current_orientation;
        self.state.phase = CameraPhase::Idle;
        self.state.tick_enabled = false;

        if self.config.activate_on_play {
            self.state.phase = CameraPhase::Active;
            self.state.tick_enabled = true;
            return Ok(StartOutcome::Activated(ViewBlend::CUT));
        }

        Ok(StartOutcome::Idle)
    }

    /// Idle → Active. Повторный вызов на Active камере — тот же state, снова Ok.
    pub fn activate(&mut self, blend: ViewBlend) -> Result<ViewBlend, CameraStateError> {
        if self.state.phase == CameraPhase::Uninitialized {
            return Err(CameraStateError::NotStarted);
        }

        self.state.phase = CameraPhase::Active;
        self.state.tick_enabled = true;
        Ok(blend)
    }

    /// Active → Idle. Возвращает true если камера была active.
    ///
    /// Без auto_deactivate_on_exit tick остаётся включённым: pose продолжает
    /// обновляться и при повторной активации нет скачка.
    pub fn deactivate(&mut self) -> bool {
        if self.state.phase == CameraPhase::Uninitialized {
            return false;
        }

        let was_active = self.state.phase == CameraPhase::Active;
        self.state.phase = CameraPhase::Idle;
        if self.config.auto_deactivate_on_exit {
            self.state.tick_enabled = false;
        }
        was_active
    }

    /// Один simulation step
    ///
    /// `focus_target` нужен только focus mode'ам с target; если его нет — ориентация держится.
    pub fn step(
        &mut self,
        delta_time: f32,
        player: Option<Vec3>,
        focus_target: Option<Vec3>,
        rail: Option<&dyn RailPath>,
    ) -> StepOutcome {
        if !self.state.tick_enabled {
            return StepOutcome::Skipped(SkipReason::NotTicking);
        }

        let Some(player) = player else {
            return StepOutcome::Skipped(SkipReason::PlayerUnavailable);
        };

        // 1. Позиция (только Rail)
        if self.config.camera_type == CameraType::Rail {
            let Some(rail) = rail else {
                return StepOutcome::Skipped(SkipReason::RailUnavailable);
            };

            let travel = rail_travel_fraction(player, self.state.current_position, self.config.rail_travel_distance);
            let target_position = rail.point_at_distance(travel * rail.length());

            self.state.current_position = if self.config.smooth_movement {
                self.state.current_position.lerp(
                    target_position,
                    smoothing_alpha(delta_time, self.config.movement_smooth_speed),
                )
            } else {
                target_position
            };
        }

        // 2. Целевая ориентация (None → ориентация заморожена)
        let Some(target_orientation) = self.target_orientation(player, focus_target) else {
            return StepOutcome::Updated;
        };

        // 3. Ориентация
        self.state.current_orientation = if self.config.smooth_rotation {
            self.state.current_orientation.lerp(
                target_orientation,
                smoothing_alpha(delta_time, self.config.rotation_smooth_speed),
            )
        } else {
            target_orientation
        };

        StepOutcome::Updated
    }

    /// Ориентация, к которой тянется камера в текущей позиции
    pub fn target_orientation(&self, player: Vec3, focus_target: Option<Vec3>) -> Option<Quat> {
        let from = self.state.current_position;
        let previous = self.state.current_orientation;
        let alpha = self.config.midpoint_alpha;

        match self.config.focus_mode {
            FocusMode::None => None,
            FocusMode::FocusPlayer => Some(look_at(from, player, previous)),
            FocusMode::FocusTarget => focus_target.map(|target| look_at(from, target, previous)),
            FocusMode::MidPlayerAndInitialFocus => {
                let towards_player = look_at(from, player, previous);
                Some(self.state.initial_orientation.slerp(towards_player, alpha))
            }
            FocusMode::MidPlayerAndTarget => focus_target.map(|target| {
                let towards_target = look_at(from, target, previous);
                let towards_player = look_at(from, player, previous);
                towards_target.slerp(towards_player, alpha)
            }),
        }
    }
}

/// Ориентация, у которой forward (−Z) смотрит из `from` в `to`
///
/// `from == to` → возвращает `fallback` (без NaN).
pub fn look_at(from: Vec3, to: Vec3, fallback: Quat) -> Quat {
    let direction = to - from;
    if !(direction.length_squared() > LOOK_AT_EPSILON) {
        return fallback;
    }

    Transform::from_translation(from).looking_to(direction, Dir3::Y).rotation
}

/// Доля пройденного rail ∈ [0, 1] по дистанции игрок ↔ камера
pub fn rail_travel_fraction(player: Vec3, camera: Vec3, rail_travel_distance: f32) -> f32 {
    if !(rail_travel_distance > 0.0) {
        return 1.0;
    }
    (player.distance(camera) / rail_travel_distance).clamp(0.0, 1.0)
}

/// Per-frame lerp alpha
pub fn smoothing_alpha(delta_time: f32, speed: f32) -> f32 {
    (delta_time * speed).clamp(0.0, 1.0)
}
