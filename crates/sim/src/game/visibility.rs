//! Player field of view. Walls, void and closed doors stop sight; the blocking
//! cell itself is still seen.

use super::*;

pub fn compute_fov(world: &mut World, radius: i32) -> Result<(), SimError> {
    let origin = world.player_pos()?;
    world.clear_visible();
    world.set_visible(origin);

    let radius = radius.max(0);
    for y in (origin.y - radius)..=(origin.y + radius) {
        for x in (origin.x - radius)..=(origin.x + radius) {
            let target = Pos { y, x };
            if target != origin
                && world.dungeon.in_bounds(target)
                && has_line_of_sight(world, origin, target)
            {
                world.set_visible(target);
            }
        }
    }
    Ok(())
}

fn has_line_of_sight(world: &World, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let (sx, sy) = (dx.signum(), dy.signum());
    let (span_x, span_y) = (dx.abs(), dy.abs());

    let (mut x, mut y) = (origin.x, origin.y);
    let (mut walked_x, mut walked_y) = (0, 0);
    while walked_x < span_x || walked_y < span_y {
        let lhs = (1 + 2 * walked_x) * span_y;
        let rhs = (1 + 2 * walked_y) * span_x;
        if lhs == rhs {
            x += sx;
            y += sy;
            walked_x += 1;
            walked_y += 1;
        } else if lhs < rhs {
            x += sx;
            walked_x += 1;
        } else {
            y += sy;
            walked_y += 1;
        }

        if x == target.x && y == target.y {
            return true;
        }
        if world.is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn open_room_is_visible_within_radius() {
        let mut game = game_from(OPEN_ROOM);
        compute_fov(&mut game.world, 3).expect("fov");
        assert!(game.world.is_visible(Pos { y: 5, x: 5 }));
        assert!(game.world.is_visible(Pos { y: 5, x: 8 }));
        assert!(game.world.is_visible(Pos { y: 2, x: 2 }));
        assert!(!game.world.is_visible(Pos { y: 1, x: 1 }), "outside radius");
    }

    #[test]
    fn closed_door_hides_the_far_side_but_is_itself_seen() {
        let mut game = game_from(CORRIDOR_WITH_DOOR);
        compute_fov(&mut game.world, 6).expect("fov");
        assert!(game.world.is_visible(Pos { y: 1, x: 3 }));
        assert!(!game.world.is_visible(Pos { y: 1, x: 4 }));
    }

    #[test]
    fn recomputing_drops_cells_no_longer_in_view() {
        let mut game = game_from(CORRIDOR_WITH_DOOR);
        let (door, _) = game.world.door_at(Pos { y: 1, x: 3 }).expect("door");
        game.world.doors[door].open = true;
        compute_fov(&mut game.world, 6).expect("fov");
        assert!(game.world.is_visible(Pos { y: 1, x: 5 }));

        game.world.doors[door].open = false;
        compute_fov(&mut game.world, 6).expect("fov");
        assert!(!game.world.is_visible(Pos { y: 1, x: 5 }));
    }
}
