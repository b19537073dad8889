//! Bounded flood-fill navigation shared by every autonomous actor.
//! One call roots a vector field at a target; each reachable cell of the region
//! learns which way to step and how far the target is.
//! It does not own any movement policy; brains decide what to do with the field.

use crate::types::{Direction, Pos};

/// Neighbour expansion order. Fixed so equal-distance ties resolve identically every run.
const EXPANSION_ORDER: [Direction; 4] =
    [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub min: Pos,
    pub max: Pos,
}

impl Region {
    pub fn new(min: Pos, max: Pos) -> Self {
        Self { min, max }
    }

    /// Square window of `radius` cells on each side of `center`.
    pub fn around(center: Pos, radius: i32) -> Self {
        let radius = radius.max(0);
        Self {
            min: Pos { y: center.y - radius, x: center.x - radius },
            max: Pos { y: center.y + radius, x: center.x + radius },
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.y >= self.min.y && pos.y <= self.max.y && pos.x >= self.min.x && pos.x <= self.max.x
    }

    pub fn width(&self) -> usize {
        (self.max.x - self.min.x + 1).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.max.y - self.min.y + 1).max(0) as usize
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y - self.min.y) as usize * self.width() + (pos.x - self.min.x) as usize
    }

    fn pos_at(&self, index: usize) -> Pos {
        let width = self.width();
        Pos { y: self.min.y + (index / width) as i32, x: self.min.x + (index % width) as i32 }
    }
}

pub trait Obstacles {
    fn is_obstacle(&self, pos: Pos) -> bool;
}

impl<F: Fn(Pos) -> bool> Obstacles for F {
    fn is_obstacle(&self, pos: Pos) -> bool {
        self(pos)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldStep {
    pub direction: Direction,
    pub distance: u32,
}

/// Per-cell step toward the target. A missing entry means unreachable, never distance zero.
#[derive(Clone, Debug)]
pub struct VectorField {
    region: Region,
    target: Option<Pos>,
    cells: Vec<Option<FieldStep>>,
}

impl Default for VectorField {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorField {
    pub fn new() -> Self {
        Self {
            region: Region::new(Pos { y: 0, x: 0 }, Pos { y: -1, x: -1 }),
            target: None,
            cells: Vec::new(),
        }
    }

    fn reset(&mut self, region: Region, target: Pos) {
        self.region = region;
        self.target = Some(target);
        self.cells.clear();
        self.cells.resize(region.area(), None);
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn target(&self) -> Option<Pos> {
        self.target
    }

    pub fn get(&self, pos: Pos) -> Option<FieldStep> {
        if !self.region.contains(pos) {
            return None;
        }
        self.cells[self.region.index(pos)]
    }

    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, FieldStep)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|step| (self.region.pos_at(idx), step)))
    }

    fn set(&mut self, pos: Pos, step: FieldStep) {
        let idx = self.region.index(pos);
        self.cells[idx] = Some(step);
    }
}

/// Reusable flood-fill work list.
#[derive(Debug, Default)]
pub struct NavigationEngine {
    stack: Vec<(Pos, u32)>,
}

impl NavigationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes `field` from scratch for `target` over `region`.
    pub fn calculate(
        &mut self,
        field: &mut VectorField,
        region: Region,
        obstacles: &impl Obstacles,
        target: Pos,
    ) {
        field.reset(region, target);
        self.stack.clear();
        self.stack.push((target, 0));

        while let Some((current, dist)) = self.stack.pop() {
            for dir in EXPANSION_ORDER {
                let neighbor = current.step(dir);
                if !region.contains(neighbor)
                    || neighbor == target
                    || obstacles.is_obstacle(neighbor)
                {
                    continue;
                }
                let candidate = dist + 1;
                let improves = field.get(neighbor).is_none_or(|known| candidate < known.distance);
                if improves {
                    let step = FieldStep { direction: dir.opposite(), distance: candidate };
                    field.set(neighbor, step);
                    self.stack.push((neighbor, candidate));
                }
            }
        }
    }
}
