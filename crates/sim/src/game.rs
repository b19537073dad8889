//! Turn session: scheduler fields, focus cursor and the collaborators a tick drives.
//! Submodules split the tick into scheduling, action resolution and the
//! collision/damage passes that follow it.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::nav::{NavigationEngine, VectorField};
use crate::types::*;
use crate::world::World;

mod brain;
mod collision;
mod damage;
mod focus;
mod hash;
mod resolve;
mod scheduler;
mod visibility;

#[cfg(test)]
mod test_support;

pub use brain::{MeleeBrain, NpcBrain};
pub use collision::{classify_move, handle_collisions};
pub use damage::handle_damage;
pub use focus::quick_action_for;
pub use visibility::compute_fov;

pub struct Game<B: NpcBrain = MeleeBrain> {
    config: SimConfig,
    rng: ChaCha8Rng,
    world: World,
    brain: B,
    mode: Mode,
    turn: Turn,
    roster: Vec<RosterEntry>,
    // NPC whose last step was a hit, kept for presentation.
    attacking: Option<EntityId>,
    focus: Option<EntityId>,
    quick_action: Action,
    running: Option<Direction>,
    nav: NavigationEngine,
    nav_field: VectorField,
    nav_root: Option<Pos>,
    tick: u64,
}

impl Game {
    pub fn new(config: SimConfig, world: World) -> Result<Self, SimError> {
        Self::with_brain(config, world, MeleeBrain)
    }
}

impl<B: NpcBrain> Game<B> {
    pub fn with_brain(config: SimConfig, world: World, brain: B) -> Result<Self, SimError> {
        config.validate()?;
        let wait = Action::new(ActionKind::Wait, world.player_speed()?);
        let mut game = Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world,
            brain,
            mode: Mode::Explore,
            turn: Turn::Player,
            roster: Vec::new(),
            attacking: None,
            focus: None,
            quick_action: wait,
            running: None,
            nav: NavigationEngine::new(),
            nav_field: VectorField::new(),
            nav_root: None,
            tick: 0,
        };
        compute_fov(&mut game.world, game.config.fov_radius)?;
        game.update_focus()?;
        Ok(game)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Menus and other host screens switch the mode back when they close.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn attacking(&self) -> Option<EntityId> {
        self.attacking
    }

    pub fn focus(&self) -> Option<EntityId> {
        self.focus
    }

    /// Points the focus cursor at `target`; the next player action re-evaluates it.
    pub fn set_focus(&mut self, target: Option<EntityId>) {
        self.focus = target;
    }

    pub fn quick_action(&self) -> Action {
        self.quick_action
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn nav_field(&self) -> &VectorField {
        &self.nav_field
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn brain(&self) -> &B {
        &self.brain
    }
}
