pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod host;
pub mod layout;
pub mod nav;
pub mod types;
pub mod world;

pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use event::{EventSink, SimEvent};
pub use game::{Game, MeleeBrain, NpcBrain, quick_action_for};
pub use host::{Host, ScriptedHost};
pub use nav::{FieldStep, NavigationEngine, Obstacles, Region, VectorField};
pub use types::*;
pub use world::{Dungeon, World};
