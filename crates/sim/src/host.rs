//! The host contract: input, event delivery, level swaps and presentation pacing.

use std::collections::VecDeque;

use tracing::info;

use crate::error::SimError;
use crate::event::{EventSink, SimEvent};
use crate::types::{Button, EntityId, LadderDirection};
use crate::world::World;

pub trait Host: EventSink {
    /// Returns at most one buffered button per call.
    fn poll_button(&mut self) -> Result<Option<Button>, SimError>;

    /// Replaces the current level. The resolver stops iterating right after this call.
    fn change_level(
        &mut self,
        world: &mut World,
        ladder: EntityId,
        direction: LadderDirection,
    ) -> Result<(), SimError>;

    fn animations_in_flight(&self) -> bool {
        false
    }
}

/// Headless host fed from a fixed button queue; records everything it is sent.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub buttons: VecDeque<Button>,
    pub events: Vec<SimEvent>,
    pub level_changes: Vec<(EntityId, LadderDirection)>,
    pub animating: bool,
}

impl ScriptedHost {
    pub fn new(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self { buttons: buttons.into_iter().collect(), ..Self::default() }
    }

    pub fn push(&mut self, button: Button) {
        self.buttons.push_back(button);
    }
}

impl EventSink for ScriptedHost {
    fn send_event(&mut self, event: SimEvent) -> Result<(), SimError> {
        self.events.send_event(event)
    }
}

impl Host for ScriptedHost {
    fn poll_button(&mut self) -> Result<Option<Button>, SimError> {
        Ok(self.buttons.pop_front())
    }

    fn change_level(
        &mut self,
        world: &mut World,
        ladder: EntityId,
        direction: LadderDirection,
    ) -> Result<(), SimError> {
        world.depth = match direction {
            LadderDirection::Down => world.depth + 1,
            LadderDirection::Up => world.depth.saturating_sub(1).max(1),
        };
        info!(depth = world.depth, ?direction, "level_changed");
        self.level_changes.push((ladder, direction));
        Ok(())
    }

    fn animations_in_flight(&self) -> bool {
        self.animating
    }
}
