use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, dir: Direction) -> Pos {
        let (dy, dx) = dir.offset();
        Pos { y: self.y + dy, x: self.x + dx }
    }

    /// Chebyshev distance; 1 means the two cells touch, diagonals included.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.y.abs_diff(other.y).max(self.x.abs_diff(other.x))
    }

    pub fn is_adjacent(self, other: Pos) -> bool {
        self.chebyshev(other) == 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Nothing,
    Wall,
    Floor,
    Door,
}

/// One buffered button event, already classified by the platform layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Direction(Direction),
    Run(Direction),
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Explore,
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LadderDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Move { dir: Direction, keep_moving: bool },
    Open(EntityId),
    Close(EntityId),
    Hit(EntityId),
    MoveToLevel(EntityId),
    Wait,
}

/// A one-shot intent attached to an entity together with its move-point cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub cost: u32,
}

impl Action {
    pub fn new(kind: ActionKind, cost: u32) -> Self {
        Self { kind, cost }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self.kind, ActionKind::Hit(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    ClosedDoor(EntityId),
    Enemy(EntityId),
}

/// Transient record of a blocked move, consumed by the collision pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision {
    pub entity: EntityId,
    pub obstacle: Obstacle,
    pub at: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeleeWeapon {
    pub min_damage: i32,
    pub max_damage: i32,
    pub cost: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ladder {
    pub direction: LadderDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Npc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Player,
    Npc { index: usize, moved: usize },
}

/// Move-point budget an NPC may still spend this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub entity: EntityId,
    pub budget: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Animating,
    Suspended,
    Idle,
    ModeChanged,
    PlayerActed,
    NpcStepped { entity: EntityId, progressed: bool },
    RoundRestarted,
    PlayerTurnResumed,
}
