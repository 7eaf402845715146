//! Camera errors
//!
//! Только конфигурационные ошибки пересекают границу host'а.
//! Per-frame условия (нет игрока, вырожденный lookAt) — это `StepOutcome`, не ошибки.

use thiserror::Error;

use super::config::FocusMode;

/// Конфигурация камеры невалидна — фатально для этой камеры, не ретраится
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraConfigError {
    #[error("rail camera has no rail reference assigned")]
    MissingRail,

    #[error("rail reference does not point to a camera rail")]
    RailNotFound,

    #[error("focus mode {mode:?} requires a focus target reference")]
    MissingFocusTarget { mode: FocusMode },

    #[error("rail travel distance must be > 0, got {0}")]
    InvalidRailTravelDistance(f32),

    #[error("{which} smooth speed must be >= 0")]
    NegativeSmoothSpeed { which: &'static str },

    #[error("midpoint alpha must be in [0, 1], got {0}")]
    MidpointAlphaOutOfRange(f32),
}

/// Переход state machine недопустим
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraStateError {
    #[error("camera was never started (still uninitialized)")]
    NotStarted,
}
