//! Tests for camera rail sampling.

#[cfg(test)]
mod tests {
    use crate::rail::{CameraRail, RailError, RailPath};
    use bevy::prelude::*;

    fn straight_rail() -> CameraRail {
        CameraRail::new([Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_rail_requires_two_points() {
        let err = CameraRail::new([Vec3::ONE]).unwrap_err();
        assert_eq!(err, RailError::NotEnoughControlPoints { given: 1 });

        assert!(CameraRail::new(Vec::<Vec3>::new()).is_err());
    }

    #[test]
    fn test_straight_rail_length() {
        let rail = straight_rail();
        assert!((rail.length() - 10.0).abs() < 1e-3, "length = {}", rail.length());
    }

    #[test]
    fn test_point_at_distance_on_straight_rail() {
        let rail = straight_rail();

        let mid = rail.point_at_distance(5.0);
        assert!(mid.distance(Vec3::new(5.0, 0.0, 0.0)) < 1e-3, "mid = {:?}", mid);

        let quarter = rail.point_at_distance(2.5);
        assert!(quarter.distance(Vec3::new(2.5, 0.0, 0.0)) < 1e-3, "quarter = {:?}", quarter);
    }

    #[test]
    fn test_point_at_distance_out_of_range_returns_ends() {
        let rail = straight_rail();

        // Без экстраполяции за концы
        assert!(rail.point_at_distance(-50.0).distance(Vec3::ZERO) < 1e-3);
        assert!(rail.point_at_distance(500.0).distance(Vec3::new(10.0, 0.0, 0.0)) < 1e-3);
    }

    #[test]
    fn test_initial_point_is_first_control_point() {
        let rail = CameraRail::new([
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 2.0, 3.0),
            Vec3::new(4.0, 2.0, 9.0),
        ])
        .unwrap();

        assert_eq!(rail.initial_point(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rail.control_points().len(), 3);
    }

    #[test]
    fn test_curved_rail_passes_through_endpoints() {
        let start = Vec3::ZERO;
        let corner = Vec3::new(10.0, 0.0, 0.0);
        let end = Vec3::new(10.0, 0.0, 10.0);
        let rail = CameraRail::new([start, corner, end]).unwrap();

        // Дуга не короче хорды start → end
        assert!(rail.length() >= start.distance(end));

        assert!(rail.point_at_distance(0.0).distance(start) < 1e-3);
        assert!(rail.point_at_distance(rail.length()).distance(end) < 1e-2);
    }

    #[test]
    fn test_arc_length_progress_is_monotonic() {
        let rail = CameraRail::new([
            Vec3::ZERO,
            Vec3::new(5.0, 0.0, 2.0),
            Vec3::new(10.0, 0.0, -2.0),
            Vec3::new(15.0, 0.0, 0.0),
        ])
        .unwrap();

        let mut previous_x = f32::MIN;
        for i in 0..=20 {
            let distance = rail.length() * i as f32 / 20.0;
            let point = rail.point_at_distance(distance);
            assert!(point.x >= previous_x - 1e-3, "x went back at step {}", i);
            previous_x = point.x;
        }
    }
}
