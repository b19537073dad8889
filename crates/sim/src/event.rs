//! Events the core reports to presentation, and the sink contract they go through.

use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::error::SimError;
use crate::types::{Direction, EntityId, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SimEvent {
    EntityMoved { entity: EntityId, is_player: bool, from: Pos, to: Pos, dir: Direction },
    EntityHit { attacker: EntityId, target: EntityId, damage: i32 },
    EntityDied { entity: EntityId, is_player: bool },
    DoorToggled { door: EntityId, open: bool },
}

/// Receives simulation events. Failures are returned, never dropped.
pub trait EventSink {
    fn send_event(&mut self, event: SimEvent) -> Result<(), SimError>;
}

impl EventSink for Vec<SimEvent> {
    fn send_event(&mut self, event: SimEvent) -> Result<(), SimError> {
        self.push(event);
        Ok(())
    }
}

impl EventSink for Sender<SimEvent> {
    fn send_event(&mut self, event: SimEvent) -> Result<(), SimError> {
        self.send(event).map_err(|_| SimError::EventSinkClosed)
    }
}
