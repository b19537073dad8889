//! ASCII level descriptions for fixtures, tools and diagnostics.
//!
//! | glyph | meaning                         |
//! |-------|---------------------------------|
//! | `#`   | wall                            |
//! | `.`   | floor                           |
//! | ` `   | nothing                         |
//! | `+`   | closed door                     |
//! | `'`   | open door                       |
//! | `@`   | player on floor                 |
//! | `g`   | goblin on floor                 |
//! | `>`   | ladder down                     |
//! | `<`   | ladder up                       |
//!
//! Entities are spawned in reading order after the player, which fixes store order.

use crate::error::SimError;
use crate::types::*;
use crate::world::{Dungeon, World};

pub const PLAYER_WEAPON: MeleeWeapon = MeleeWeapon { min_damage: 2, max_damage: 4, cost: 10 };
pub const GOBLIN_WEAPON: MeleeWeapon = MeleeWeapon { min_damage: 1, max_damage: 3, cost: 10 };
pub const GOBLIN_HEALTH: i32 = 6;
pub const GOBLIN_SPEED: u32 = 10;

enum Spawn {
    Door { open: bool },
    Goblin,
    Ladder(LadderDirection),
}

pub fn parse(text: &str) -> Result<World, SimError> {
    let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut dungeon = Dungeon::new(width, rows.len());
    let mut player = None;
    let mut spawns = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        for (x, glyph) in row.iter().copied().enumerate() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let cell = match glyph {
                '#' => Cell::Wall,
                '.' => Cell::Floor,
                ' ' => Cell::Nothing,
                '+' | '\'' => {
                    spawns.push((pos, Spawn::Door { open: glyph == '\'' }));
                    Cell::Door
                }
                '@' if player.is_none() => {
                    player = Some(pos);
                    Cell::Floor
                }
                'g' => {
                    spawns.push((pos, Spawn::Goblin));
                    Cell::Floor
                }
                '>' | '<' => {
                    let direction =
                        if glyph == '>' { LadderDirection::Down } else { LadderDirection::Up };
                    spawns.push((pos, Spawn::Ladder(direction)));
                    Cell::Floor
                }
                _ => return Err(SimError::Layout { line: y + 1, column: x + 1, glyph }),
            };
            dungeon.set_cell(pos, cell);
        }
    }

    let player_pos = player.ok_or(SimError::MissingPlayer)?;
    let mut world = World::new(dungeon, player_pos);
    world.weapons.insert(world.player, PLAYER_WEAPON);

    for (pos, spawn) in spawns {
        let id = world.spawn();
        world.positions.insert(id, pos);
        match spawn {
            Spawn::Door { open } => {
                world.doors.insert(id, Door { open });
            }
            Spawn::Goblin => {
                world.healths.insert(id, Health::full(GOBLIN_HEALTH));
                world.speeds.insert(id, GOBLIN_SPEED);
                world.weapons.insert(id, GOBLIN_WEAPON);
                world.npcs.insert(id, Npc);
            }
            Spawn::Ladder(direction) => {
                world.ladders.insert(id, Ladder { direction });
            }
        }
    }
    Ok(world)
}

/// Draws the world back into layout glyphs; creatures win over doors and ladders.
pub fn render(world: &World) -> String {
    let mut text = String::new();
    for y in 0..world.dungeon.height {
        for x in 0..world.dungeon.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            text.push(glyph_at(world, pos));
        }
        let trimmed = text.trim_end_matches(' ').len();
        text.truncate(trimmed);
        text.push('\n');
    }
    text
}

fn glyph_at(world: &World, pos: Pos) -> char {
    if world.player_pos().is_ok_and(|player| player == pos) {
        return '@';
    }
    if world.creature_at(pos).is_some() {
        return 'g';
    }
    if let Some((_, door)) = world.door_at(pos) {
        return if door.open { '\'' } else { '+' };
    }
    let ladder = world
        .placed()
        .filter(|(_, at)| *at == pos)
        .find_map(|(id, _)| world.ladders.get(id).map(|ladder| ladder.direction));
    match (ladder, world.dungeon.cell_at(pos)) {
        (Some(LadderDirection::Down), _) => '>',
        (Some(LadderDirection::Up), _) => '<',
        (None, Cell::Wall) => '#',
        (None, Cell::Floor | Cell::Door) => '.',
        (None, Cell::Nothing) => ' ',
    }
}
