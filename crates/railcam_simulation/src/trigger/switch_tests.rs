//! Tests for trigger switch (occupancy + hysteresis).

#[cfg(test)]
mod tests {
    use crate::camera::{BlendCurve, ViewBlend};
    use crate::trigger::{
        CameraHandoff, HandoffDecision, TriggerSwitch, TriggerSwitchLayout, ZoneBinding, ZoneOccupancy, ZoneSide,
    };
    use bevy::prelude::*;

    fn entities<const N: usize>() -> [Entity; N] {
        let mut world = World::new();
        [(); N].map(|_| world.spawn_empty().id())
    }

    fn blend_a() -> ViewBlend {
        ViewBlend::new(0.5, BlendCurve::EaseIn, 2.0)
    }

    fn blend_b() -> ViewBlend {
        ViewBlend::new(1.0, BlendCurve::Cubic, 3.0)
    }

    #[test]
    fn test_zone_side_sibling() {
        assert_eq!(ZoneSide::A.sibling(), ZoneSide::B);
        assert_eq!(ZoneSide::B.sibling(), ZoneSide::A);
        assert_ne!(ZoneSide::A.index(), ZoneSide::B.index());
    }

    #[test]
    fn test_occupancy_insert_remove() {
        let [actor, other] = entities::<2>();
        let mut occupancy = ZoneOccupancy::default();

        assert!(occupancy.insert(actor));
        assert!(!occupancy.insert(actor)); // повторный enter не дублирует
        assert!(occupancy.insert(other));
        assert_eq!(occupancy.len(), 2);

        assert!(occupancy.remove(actor));
        assert!(!occupancy.remove(actor));
        assert!(!occupancy.contains(actor));
        assert!(occupancy.contains(other));
    }

    /// A enter → B enter → A exit (в B) → B exit: ровно один handoff, на камеру B
    #[test]
    fn test_crossing_produces_single_handoff() {
        let [camera_a, camera_b, actor] = entities::<3>();
        let mut switch = TriggerSwitch::new(ZoneBinding::new(camera_a, blend_a()), ZoneBinding::new(camera_b, blend_b()));
        let mut handoffs = Vec::new();

        switch.on_enter(ZoneSide::A, actor);
        switch.on_enter(ZoneSide::B, actor);

        let decision = switch.on_exit(ZoneSide::A, actor, None);
        assert_eq!(decision, HandoffDecision::Deferred);

        if let HandoffDecision::Switch(handoff) = switch.on_exit(ZoneSide::B, actor, None) {
            handoffs.push(handoff);
        }

        assert_eq!(
            handoffs,
            vec![CameraHandoff {
                activate: camera_b,
                deactivate: Some(camera_a),
                blend: blend_b(),
            }]
        );
        assert!(switch.occupancy(ZoneSide::A).is_empty());
        assert!(switch.occupancy(ZoneSide::B).is_empty());
    }

    #[test]
    fn test_enter_never_switches() {
        let [camera_a, camera_b, actor] = entities::<3>();
        let mut switch = TriggerSwitch::new(ZoneBinding::new(camera_a, blend_a()), ZoneBinding::new(camera_b, blend_b()));

        assert!(switch.on_enter(ZoneSide::A, actor));
        assert!(switch.occupancy(ZoneSide::A).contains(actor));
        assert!(!switch.occupancy(ZoneSide::B).contains(actor));
    }

    #[test]
    fn test_backing_out_activates_own_zone_camera() {
        let [camera_a, camera_b, actor] = entities::<3>();
        let mut switch = TriggerSwitch::new(ZoneBinding::new(camera_a, blend_a()), ZoneBinding::new(camera_b, blend_b()));

        switch.on_enter(ZoneSide::A, actor);
        let decision = switch.on_exit(ZoneSide::A, actor, None);

        assert_eq!(
            decision,
            HandoffDecision::Switch(CameraHandoff {
                activate: camera_a,
                deactivate: Some(camera_b),
                blend: blend_a(),
            })
        );
    }

    #[test]
    fn test_host_sibling_occupancy_overrides_tracking() {
        let [camera_a, camera_b, actor] = entities::<3>();
        let mut switch = TriggerSwitch::new(ZoneBinding::new(camera_a, blend_a()), ZoneBinding::new(camera_b, blend_b()));

        // Host говорит "ещё в B", хотя Entered(B) мы не видели
        switch.on_enter(ZoneSide::A, actor);
        assert_eq!(switch.on_exit(ZoneSide::A, actor, Some(true)), HandoffDecision::Deferred);

        // И наоборот: occupancy говорит "в A", host — нет
        switch.on_enter(ZoneSide::A, actor);
        switch.on_enter(ZoneSide::B, actor);
        assert!(matches!(
            switch.on_exit(ZoneSide::B, actor, Some(false)),
            HandoffDecision::Switch(CameraHandoff { activate, .. }) if activate == camera_b
        ));
    }

    #[test]
    fn test_other_actor_in_sibling_does_not_defer() {
        let [camera_a, camera_b, actor, bystander] = entities::<4>();
        let mut switch = TriggerSwitch::new(ZoneBinding::new(camera_a, blend_a()), ZoneBinding::new(camera_b, blend_b()));

        switch.on_enter(ZoneSide::B, bystander);
        switch.on_enter(ZoneSide::A, actor);

        assert!(matches!(switch.on_exit(ZoneSide::A, actor, None), HandoffDecision::Switch(_)));
    }

    #[test]
    fn test_missing_zone_camera_is_noop() {
        let [camera_b, actor] = entities::<2>();
        let mut switch = TriggerSwitch::new(ZoneBinding::default(), ZoneBinding::new(camera_b, blend_b()));

        switch.on_enter(ZoneSide::A, actor);
        assert_eq!(
            switch.on_exit(ZoneSide::A, actor, None),
            HandoffDecision::MissingCamera { side: ZoneSide::A }
        );
    }

    #[test]
    fn test_missing_sibling_camera_still_activates() {
        let [camera_b, actor] = entities::<2>();
        let mut switch = TriggerSwitch::new(ZoneBinding::default(), ZoneBinding::new(camera_b, blend_b()));

        switch.on_enter(ZoneSide::B, actor);
        assert_eq!(
            switch.on_exit(ZoneSide::B, actor, None),
            HandoffDecision::Switch(CameraHandoff {
                activate: camera_b,
                deactivate: None,
                blend: blend_b(),
            })
        );
    }

    #[test]
    fn test_layout_zone_centers() {
        let layout = TriggerSwitchLayout::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));

        let [a, b] = layout.zone_centers();
        assert!(a.abs_diff_eq(Vec3::new(9.0, 0.0, 0.0), 1e-6));
        assert!(b.abs_diff_eq(Vec3::new(11.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_layout_zone_contains() {
        let layout = TriggerSwitchLayout::new(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 2.0, 2.0));

        assert!(layout.zone_contains(ZoneSide::A, Vec3::new(-1.5, 0.0, 0.0)));
        assert!(!layout.zone_contains(ZoneSide::B, Vec3::new(-1.5, 0.0, 0.0)));
        assert!(layout.zone_contains(ZoneSide::B, Vec3::new(1.5, 1.0, -1.0)));
        assert!(!layout.zone_contains(ZoneSide::B, Vec3::new(2.5, 0.0, 0.0)));
        assert!(!layout.zone_contains(ZoneSide::A, Vec3::new(-1.0, 3.0, 0.0)));
    }

    #[test]
    fn test_layout_rotated_axis() {
        // Switch вдоль +Z: зона A со стороны −Z
        let layout = TriggerSwitchLayout::new(Vec3::ZERO, Vec3::Z, Vec3::new(1.0, 2.0, 0.5));

        assert!(layout.zone_contains(ZoneSide::A, Vec3::new(0.25, 0.0, -1.5)));
        assert!(layout.zone_contains(ZoneSide::B, Vec3::new(-0.25, 0.0, 1.5)));
        assert!(!layout.zone_contains(ZoneSide::B, Vec3::new(0.9, 0.0, 1.0)));
    }

    #[test]
    fn test_layout_degenerate_axis_falls_back_to_x() {
        let layout = TriggerSwitchLayout::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
        assert_eq!(layout.direction(), Vec3::X);
    }
}
