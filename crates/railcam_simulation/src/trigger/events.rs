//! Trigger events (host/physics → core)

use bevy::prelude::*;

use super::switch::ZoneSide;

/// Overlap изменился для зоны switch'а
///
/// Источники: host engine напрямую, `poll_zone_volumes` (TriggerSwitchLayout),
/// или rapier sensor bridge. В пределах одного tick'а Entered идут раньше Exited.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOverlapEvent {
    Entered {
        switch: Entity,
        side: ZoneSide,
        actor: Entity,
    },
    Exited {
        switch: Entity,
        side: ZoneSide,
        actor: Entity,
        /// Host знает точнее (physics overlap query); None → своя occupancy
        sibling_occupied: Option<bool>,
    },
}

impl ZoneOverlapEvent {
    pub fn entered(switch: Entity, side: ZoneSide, actor: Entity) -> Self {
        Self::Entered { switch, side, actor }
    }

    pub fn exited(switch: Entity, side: ZoneSide, actor: Entity) -> Self {
        Self::Exited {
            switch,
            side,
            actor,
            sibling_occupied: None,
        }
    }

    pub fn switch(&self) -> Entity {
        match *self {
            ZoneOverlapEvent::Entered { switch, .. } | ZoneOverlapEvent::Exited { switch, .. } => switch,
        }
    }
}
