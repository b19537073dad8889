//! Move-target classification and the pass that turns collision facts into follow-up intents.

use tracing::trace;

use super::*;

/// Why a move into `at` would be blocked, or `None` when the cell is passable.
pub fn classify_move(world: &World, at: Pos) -> Option<Obstacle> {
    match world.dungeon.cell_at(at) {
        Cell::Nothing | Cell::Wall => Some(Obstacle::Wall),
        Cell::Door => match world.door_at(at) {
            Some((door, state)) if !state.open => Some(Obstacle::ClosedDoor(door)),
            _ => world.creature_at(at).map(Obstacle::Enemy),
        },
        Cell::Floor => world.creature_at(at).map(Obstacle::Enemy),
    }
}

/// Consumes every pending collision fact. Bumping a closed door opens it; bumps between
/// the player and another creature become hits. Everything else is dropped.
pub fn handle_collisions(world: &mut World) -> Result<(), SimError> {
    let colliding: Vec<EntityId> =
        world.entities().filter(|id| world.collisions.contains_key(*id)).collect();

    for entity in colliding {
        let Some(fact) = world.collisions.remove(entity) else {
            continue;
        };
        if world.actions.contains_key(entity) {
            continue;
        }
        match fact.obstacle {
            Obstacle::Wall => trace!(?entity, at = ?fact.at, "bumped_wall"),
            Obstacle::ClosedDoor(door) => {
                let Some(speed) = world.speeds.get(entity).copied() else {
                    continue;
                };
                world.attach_action(entity, Action::new(ActionKind::Open(door), speed))?;
            }
            Obstacle::Enemy(target) => {
                if !world.is_player(entity) && !world.is_player(target) {
                    continue;
                }
                let Some(weapon) = world.weapons.get(entity).copied() else {
                    continue;
                };
                world.attach_action(entity, Action::new(ActionKind::Hit(target), weapon.cost))?;
            }
        }
    }
    Ok(())
}
