//! Focus cursor and the quick action bound to the confirm button.
//! Candidate selection is first match in store order over the 3×3 window around
//! the player, not a nearest-distance search.

use tracing::trace;

use super::*;
use crate::nav::Region;

/// The default action the player would take on `target`, if any.
pub fn quick_action_for(world: &World, target: EntityId) -> Result<Option<Action>, SimError> {
    let player_pos = world.player_pos()?;
    let speed = world.player_speed()?;
    if world.is_player(target) {
        return Ok(Some(Action::new(ActionKind::Wait, speed)));
    }
    let Some(target_pos) = world.position(target) else {
        return Ok(None);
    };
    let adjacent = player_pos.is_adjacent(target_pos);

    if adjacent
        && world.healths.contains_key(target)
        && let Some(weapon) = world.weapons.get(world.player)
    {
        return Ok(Some(Action::new(ActionKind::Hit(target), weapon.cost)));
    }
    if adjacent
        && player_pos != target_pos
        && let Some(door) = world.doors.get(target)
    {
        let kind = if door.open { ActionKind::Close(target) } else { ActionKind::Open(target) };
        return Ok(Some(Action::new(kind, speed)));
    }
    if player_pos == target_pos && world.ladders.contains_key(target) {
        return Ok(Some(Action::new(ActionKind::MoveToLevel(target), speed)));
    }
    Ok(None)
}

impl<B: NpcBrain> Game<B> {
    pub(super) fn update_focus(&mut self) -> Result<(), SimError> {
        if let Some(target) = self.focus
            && let Some(action) = quick_action_for(&self.world, target)?
        {
            self.quick_action = action;
            return Ok(());
        }
        self.focus = None;

        let center = self.world.player_pos()?;
        let window = Region::new(
            Pos { y: (center.y - 1).max(1), x: (center.x - 1).max(1) },
            Pos { y: center.y + 1, x: center.x + 1 },
        );
        let candidates: Vec<EntityId> = self
            .world
            .placed()
            .filter(|(id, pos)| !self.world.is_player(*id) && window.contains(*pos))
            .map(|(id, _)| id)
            .collect();
        for candidate in candidates {
            if let Some(action) = quick_action_for(&self.world, candidate)? {
                trace!(focus = ?candidate, action = ?action.kind, "focus_changed");
                self.focus = Some(candidate);
                self.quick_action = action;
                return Ok(());
            }
        }

        self.quick_action = Action::new(ActionKind::Wait, self.world.player_speed()?);
        Ok(())
    }
}
