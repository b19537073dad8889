//! Turns pending intents into world changes. Every observed intent is consumed,
//! whether or not it succeeded.

use rand_chacha::rand_core::Rng;
use tracing::{debug, info, warn};

use super::*;
use crate::event::SimEvent;
use crate::host::Host;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Resolution {
    Completed,
    /// The level was swapped; entities later in the pass were left untouched.
    LevelChanged,
}

impl<B: NpcBrain> Game<B> {
    pub(super) fn resolve_actions<H: Host>(
        &mut self,
        host: &mut H,
    ) -> Result<Resolution, SimError> {
        let pending: Vec<EntityId> = self
            .world
            .entities()
            .filter(|id| {
                self.world.actions.contains_key(*id) && self.world.positions.contains_key(*id)
            })
            .collect();

        for entity in pending {
            let Some(action) = self.world.actions.remove(entity) else {
                continue;
            };
            match action.kind {
                ActionKind::Move { dir, .. } => self.resolve_move(host, entity, dir)?,
                ActionKind::Open(door) => self.resolve_door(host, door, true)?,
                ActionKind::Close(door) => self.resolve_door(host, door, false)?,
                ActionKind::Hit(target) => self.resolve_hit(host, entity, target)?,
                ActionKind::MoveToLevel(ladder) => {
                    let direction = self
                        .world
                        .ladders
                        .get(ladder)
                        .map(|ladder| ladder.direction)
                        .ok_or(SimError::MissingComponent { entity: ladder, component: "Ladder" })?;
                    info!(?ladder, ?direction, "level_transition");
                    host.change_level(&mut self.world, ladder, direction)?;
                    self.on_level_changed();
                    compute_fov(&mut self.world, self.config.fov_radius)?;
                    return Ok(Resolution::LevelChanged);
                }
                ActionKind::Wait => {}
            }
        }
        Ok(Resolution::Completed)
    }

    fn resolve_move<H: Host>(
        &mut self,
        host: &mut H,
        entity: EntityId,
        dir: Direction,
    ) -> Result<(), SimError> {
        let from = self.world.require_position(entity)?;
        let to = from.step(dir);
        if let Some(obstacle) = classify_move(&self.world, to) {
            debug!(?entity, ?obstacle, ?to, "move_blocked");
            self.world.collisions.insert(entity, Collision { entity, obstacle, at: to });
            return Ok(());
        }

        self.world.positions.insert(entity, to);
        let is_player = self.world.is_player(entity);
        host.send_event(SimEvent::EntityMoved { entity, is_player, from, to, dir })?;
        if is_player {
            compute_fov(&mut self.world, self.config.fov_radius)?;
        }
        Ok(())
    }

    fn resolve_door<H: Host>(
        &mut self,
        host: &mut H,
        door: EntityId,
        open: bool,
    ) -> Result<(), SimError> {
        let Some(state) = self.world.doors.get_mut(door) else {
            warn!(?door, "door_action_without_door");
            return Ok(());
        };
        state.open = open;
        host.send_event(SimEvent::DoorToggled { door, open })?;
        if open {
            compute_fov(&mut self.world, self.config.fov_radius)?;
        }
        Ok(())
    }

    fn resolve_hit<H: Host>(
        &mut self,
        host: &mut H,
        attacker: EntityId,
        target: EntityId,
    ) -> Result<(), SimError> {
        let Some(weapon) = self.world.weapons.get(attacker).copied() else {
            return Ok(());
        };
        if self.world.dead.contains_key(target) {
            return Ok(());
        }
        let Some(health) = self.world.healths.get_mut(target) else {
            return Ok(());
        };
        let damage = roll_damage(&mut self.rng, weapon);
        health.current -= damage;
        debug!(?attacker, ?target, damage, remaining = health.current, "hit");
        host.send_event(SimEvent::EntityHit { attacker, target, damage })
    }
}

fn roll_damage(rng: &mut ChaCha8Rng, weapon: MeleeWeapon) -> i32 {
    let span = (weapon.max_damage - weapon.min_damage + 1).max(1) as u64;
    weapon.min_damage + (rng.next_u64() % span) as i32
}
