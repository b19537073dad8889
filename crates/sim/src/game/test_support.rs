//! Shared layouts and helpers for the `game` submodule test suites.

use super::*;
use crate::layout;

pub(super) const OPEN_ROOM: &str = "\
##########
#........#
#........#
#........#
#........#
#....@...#
#........#
#........#
#........#
##########";

pub(super) const CORRIDOR_WITH_DOOR: &str = "\
#######
#.@+..#
#######";

pub(super) const EDGE_ROOM: &str = "\
@..
...";

pub(super) const PLAYER_BESIDE_GOBLIN: &str = "\
#####
#@g.#
#####";

pub(super) const LADDER_ROOM: &str = "\
######
#@>.g#
######";

pub(super) const TWO_GOBLINS_IN_LINE: &str = "\
#######
#@.gg.#
#######";

pub(super) const THREE_GOBLINS_BEHIND_WALLS: &str = "\
###########
#@.#g#g#g.#
###########";

pub(super) fn game_from(text: &str) -> Game {
    let world = layout::parse(text).expect("layout should parse");
    Game::new(SimConfig::default(), world).expect("game")
}

pub(super) fn npcs(game: &Game) -> Vec<EntityId> {
    game.world.entities().filter(|id| game.world.npcs.contains_key(*id)).collect()
}

pub(super) fn first_npc(game: &Game) -> EntityId {
    npcs(game).first().copied().expect("layout should contain an npc")
}
