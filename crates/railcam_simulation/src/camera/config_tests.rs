//! Tests for fixed camera config.

#[cfg(test)]
mod tests {
    use crate::camera::{CameraConfigError, CameraType, FixedCameraConfig, FocusMode};

    #[test]
    fn test_config_defaults() {
        let config = FixedCameraConfig::default();

        assert_eq!(config.camera_type, CameraType::Static);
        assert_eq!(config.focus_mode, FocusMode::None);
        assert_eq!(config.rail_travel_distance, 2000.0);
        assert!(config.smooth_movement);
        assert_eq!(config.movement_smooth_speed, 3.0);
        assert!(config.smooth_rotation);
        assert_eq!(config.rotation_smooth_speed, 3.0);
        assert_eq!(config.midpoint_alpha, 0.25);
        assert!(!config.auto_deactivate_on_exit);
        assert!(!config.activate_on_play);
    }

    #[test]
    fn test_focus_modes_requiring_target() {
        assert!(FocusMode::FocusTarget.requires_target());
        assert!(FocusMode::MidPlayerAndTarget.requires_target());
        assert!(!FocusMode::None.requires_target());
        assert!(!FocusMode::FocusPlayer.requires_target());
        assert!(!FocusMode::MidPlayerAndInitialFocus.requires_target());
    }

    #[test]
    fn test_static_camera_needs_no_rail() {
        let config = FixedCameraConfig::static_camera(FocusMode::FocusPlayer);
        assert_eq!(config.validate(false, false), Ok(()));
    }

    #[test]
    fn test_rail_camera_needs_rail() {
        let config = FixedCameraConfig::rail_camera(500.0, FocusMode::FocusPlayer);

        assert_eq!(config.validate(false, false), Err(CameraConfigError::MissingRail));
        assert_eq!(config.validate(true, false), Ok(()));
    }

    #[test]
    fn test_rail_travel_distance_must_be_positive() {
        let config = FixedCameraConfig::rail_camera(0.0, FocusMode::None);

        assert_eq!(
            config.validate(true, false),
            Err(CameraConfigError::InvalidRailTravelDistance(0.0))
        );
    }

    #[test]
    fn test_negative_smooth_speed_rejected() {
        let config = FixedCameraConfig {
            rotation_smooth_speed: -1.0,
            ..FixedCameraConfig::default()
        };

        assert_eq!(
            config.validate(false, false),
            Err(CameraConfigError::NegativeSmoothSpeed { which: "rotation" })
        );
    }

    #[test]
    fn test_midpoint_alpha_range() {
        for alpha in [0.0, 0.5, 1.0] {
            let config = FixedCameraConfig {
                midpoint_alpha: alpha,
                ..FixedCameraConfig::default()
            };
            assert!(config.validate(false, false).is_ok(), "alpha {}", alpha);
        }

        let config = FixedCameraConfig {
            midpoint_alpha: 1.5,
            ..FixedCameraConfig::default()
        };
        assert_eq!(
            config.validate(false, false),
            Err(CameraConfigError::MidpointAlphaOutOfRange(1.5))
        );
    }

    #[test]
    fn test_config_from_ron_fills_defaults() {
        let config: FixedCameraConfig =
            ron::from_str("(camera_type: Rail, focus_mode: FocusPlayer, rail_travel_distance: 800.0)").unwrap();

        assert_eq!(config.camera_type, CameraType::Rail);
        assert_eq!(config.focus_mode, FocusMode::FocusPlayer);
        assert_eq!(config.rail_travel_distance, 800.0);
        assert_eq!(config.movement_smooth_speed, 3.0); // default
    }

    #[test]
    fn test_error_messages() {
        let error = CameraConfigError::MissingFocusTarget {
            mode: FocusMode::FocusTarget,
        };
        assert_eq!(
            error.to_string(),
            "focus mode FocusTarget requires a focus target reference"
        );
    }
}
