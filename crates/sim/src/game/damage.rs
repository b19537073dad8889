//! Settles health after combat: clamps at zero and retires whatever died.

use tracing::info;

use super::*;
use crate::event::{EventSink, SimEvent};

pub fn handle_damage(world: &mut World, sink: &mut impl EventSink) -> Result<(), SimError> {
    let fallen: Vec<EntityId> = world
        .entities()
        .filter(|id| {
            !world.dead.contains_key(*id)
                && world.healths.get(*id).is_some_and(|health| health.current <= 0)
        })
        .collect();

    for (_, health) in world.healths.iter_mut() {
        health.current = health.current.max(0);
    }

    for entity in fallen {
        let is_player = world.is_player(entity);
        world.dead.insert(entity, ());
        if !is_player {
            // Off the grid and out of the roster; the host decides when to despawn.
            world.positions.remove(entity);
            world.npcs.remove(entity);
            world.actions.remove(entity);
            world.collisions.remove(entity);
        }
        info!(?entity, is_player, "entity_died");
        sink.send_event(SimEvent::EntityDied { entity, is_player })?;
    }
    Ok(())
}
