//! Turn ordering: one player action, then NPC passes until a pass makes no progress.
//! Each `tick` performs at most one unit of work so a host can draw in between.

use tracing::{debug, trace};

use super::resolve::Resolution;
use super::*;
use crate::host::Host;
use crate::nav::Region;

impl<B: NpcBrain> Game<B> {
    pub fn tick<H: Host>(&mut self, host: &mut H) -> Result<TickOutcome, SimError> {
        if host.animations_in_flight() {
            return Ok(TickOutcome::Animating);
        }

        let outcome = match self.turn {
            Turn::Player => {
                if self.mode != Mode::Explore {
                    return Ok(TickOutcome::Suspended);
                }
                let outcome = self.player_turn(host)?;
                if outcome != TickOutcome::PlayerActed {
                    return Ok(outcome);
                }
                outcome
            }
            Turn::Npc { index, moved } => self.npc_turn(host, index, moved)?,
        };

        // Facts produced above (a bump, a hit) may still need a pass of their own.
        self.run_pipeline(host)?;
        if outcome == TickOutcome::PlayerActed {
            self.update_focus()?;
        }
        self.tick += 1;
        Ok(outcome)
    }

    fn player_turn<H: Host>(&mut self, host: &mut H) -> Result<TickOutcome, SimError> {
        let action = match host.poll_button()? {
            Some(button) => {
                self.running = None;
                match button {
                    Button::Direction(dir) => Some(self.move_action(dir, false)?),
                    Button::Run(dir) => Some(self.move_action(dir, true)?),
                    Button::Confirm => Some(self.quick_action),
                    Button::Cancel => {
                        self.mode = Mode::Menu;
                        None
                    }
                }
            }
            None => match self.running {
                Some(dir) => Some(self.move_action(dir, true)?),
                None => None,
            },
        };

        if self.mode != Mode::Explore {
            debug!(mode = ?self.mode, "mode_changed");
            return Ok(TickOutcome::ModeChanged);
        }
        let Some(action) = action else {
            return Ok(TickOutcome::Idle);
        };

        let player = self.world.player;
        self.running = match action.kind {
            ActionKind::Move { dir, keep_moving: true } => Some(dir),
            _ => None,
        };
        self.world.attach_action(player, action)?;
        debug!(action = ?action.kind, cost = action.cost, "player_action");
        self.run_pipeline(host)?;
        if self.running.is_some() && self.npc_in_view() {
            self.running = None;
        }

        self.rebuild_roster(action.cost)?;
        self.turn = Turn::Npc { index: 0, moved: 0 };
        Ok(TickOutcome::PlayerActed)
    }

    fn npc_turn<H: Host>(
        &mut self,
        host: &mut H,
        index: usize,
        moved: usize,
    ) -> Result<TickOutcome, SimError> {
        let Some(entry) = self.roster.get(index).copied() else {
            if moved == 0 {
                debug!(tick = self.tick, "player_turn");
                self.turn = Turn::Player;
                return Ok(TickOutcome::PlayerTurnResumed);
            }
            trace!(moved, "npc_round_restarted");
            self.turn = Turn::Npc { index: 0, moved: 0 };
            return Ok(TickOutcome::RoundRestarted);
        };

        self.attacking = None;
        self.refresh_nav_field()?;
        let spent =
            self.brain.melee_move(&mut self.world, &self.nav_field, entry.entity, entry.budget)?;
        self.roster[index].budget = entry.budget.saturating_sub(spent);
        if self.world.actions.get(entry.entity).is_some_and(Action::is_hit) {
            self.attacking = Some(entry.entity);
        }
        self.resolve_actions(host)?;

        let progressed = spent > 0;
        trace!(entity = ?entry.entity, spent, budget = entry.budget, "npc_step");
        self.turn = Turn::Npc { index: index + 1, moved: moved + usize::from(progressed) };
        Ok(TickOutcome::NpcStepped { entity: entry.entity, progressed })
    }

    /// Resolve, turn collisions into follow-up actions, resolve those, then apply damage.
    fn run_pipeline<H: Host>(&mut self, host: &mut H) -> Result<(), SimError> {
        if self.resolve_actions(host)? == Resolution::LevelChanged {
            return Ok(());
        }
        if self.world.collisions.contains_key(self.world.player) {
            self.running = None;
        }
        handle_collisions(&mut self.world)?;
        if self.resolve_actions(host)? == Resolution::LevelChanged {
            return Ok(());
        }
        handle_damage(&mut self.world, host)
    }

    fn move_action(&self, dir: Direction, keep_moving: bool) -> Result<Action, SimError> {
        Ok(Action::new(ActionKind::Move { dir, keep_moving }, self.world.player_speed()?))
    }

    /// Every NPC shares the budget the player just spent.
    fn rebuild_roster(&mut self, budget: u32) -> Result<(), SimError> {
        self.roster = self
            .world
            .entities()
            .filter(|id| self.world.npcs.contains_key(*id))
            .map(|entity| RosterEntry { entity, budget })
            .collect();
        self.nav_root = None;
        self.refresh_nav_field()
    }

    fn refresh_nav_field(&mut self) -> Result<(), SimError> {
        let root = self.world.player_pos()?;
        if self.nav_root == Some(root) {
            return Ok(());
        }
        let region = Region::around(root, self.config.nav_radius);
        let world = &self.world;
        let blocked = |pos: Pos| !world.is_walkable_terrain(pos);
        self.nav.calculate(&mut self.nav_field, region, &blocked, root);
        self.nav_root = Some(root);
        Ok(())
    }

    fn npc_in_view(&self) -> bool {
        self.world
            .placed()
            .any(|(id, pos)| self.world.npcs.contains_key(id) && self.world.is_visible(pos))
    }

    pub(super) fn on_level_changed(&mut self) {
        self.running = None;
        self.focus = None;
        self.nav_root = None;
    }
}
