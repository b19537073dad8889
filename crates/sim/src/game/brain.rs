//! NPC decision making. A brain attaches at most one intent per call and reports
//! how many move points that intent cost; zero means the NPC did nothing.

use super::*;

pub trait NpcBrain {
    fn melee_move(
        &mut self,
        world: &mut World,
        field: &VectorField,
        entity: EntityId,
        budget: u32,
    ) -> Result<u32, SimError>;
}

/// Closes in on the player along the shared vector field and attacks when adjacent.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeleeBrain;

impl NpcBrain for MeleeBrain {
    fn melee_move(
        &mut self,
        world: &mut World,
        field: &VectorField,
        entity: EntityId,
        budget: u32,
    ) -> Result<u32, SimError> {
        let Some(pos) = world.position(entity) else {
            return Ok(0);
        };
        if world.actions.contains_key(entity) || world.dead.contains_key(world.player) {
            return Ok(0);
        }

        let player_pos = world.player_pos()?;
        if pos.is_adjacent(player_pos)
            && let Some(weapon) = world.weapons.get(entity).copied()
        {
            if weapon.cost == 0 || weapon.cost > budget {
                return Ok(0);
            }
            world.attach_action(entity, Action::new(ActionKind::Hit(world.player), weapon.cost))?;
            return Ok(weapon.cost);
        }

        let Some(speed) = world.speeds.get(entity).copied() else {
            return Ok(0);
        };
        if speed == 0 || speed > budget {
            return Ok(0);
        }
        let Some(step) = field.get(pos) else {
            return Ok(0);
        };
        let kind = ActionKind::Move { dir: step.direction, keep_moving: false };
        world.attach_action(entity, Action::new(kind, speed))?;
        Ok(speed)
    }
}
