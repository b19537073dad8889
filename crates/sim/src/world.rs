//! Component store and dungeon geometry the turn core mutates.
//! Queries iterate entities in spawn order so every pass is reproducible
//! regardless of how slots get reused after despawns.

use slotmap::{SecondaryMap, SlotMap};

use crate::error::SimError;
use crate::types::*;

pub const DEFAULT_PLAYER_SPEED: u32 = 10;
pub const DEFAULT_PLAYER_HEALTH: i32 = 20;

#[derive(Clone, Debug)]
pub struct Dungeon {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Dungeon {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::Nothing; width * height] }
    }

    /// A floor room enclosed by a one-cell wall border.
    pub fn walled_room(width: usize, height: usize) -> Self {
        let mut dungeon = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let border = y == 0 || x == 0 || y == height - 1 || x == width - 1;
                dungeon.cells[y * width + x] = if border { Cell::Wall } else { Cell::Floor };
            }
        }
        dungeon
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell_at(&self, pos: Pos) -> Cell {
        if !self.in_bounds(pos) {
            return Cell::Nothing;
        }
        self.cells[self.index(pos)]
    }

    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

pub struct World {
    pub dungeon: Dungeon,
    pub player: EntityId,
    pub depth: u32,
    entities: SlotMap<EntityId, ()>,
    order: Vec<EntityId>,
    pub positions: SecondaryMap<EntityId, Pos>,
    pub healths: SecondaryMap<EntityId, Health>,
    pub speeds: SecondaryMap<EntityId, u32>,
    pub actions: SecondaryMap<EntityId, Action>,
    pub collisions: SecondaryMap<EntityId, Collision>,
    pub doors: SecondaryMap<EntityId, Door>,
    pub weapons: SecondaryMap<EntityId, MeleeWeapon>,
    pub ladders: SecondaryMap<EntityId, Ladder>,
    pub npcs: SecondaryMap<EntityId, Npc>,
    pub dead: SecondaryMap<EntityId, ()>,
    visible: Vec<bool>,
}

impl World {
    /// Creates a world holding only the player, standing at `player_pos`.
    pub fn new(dungeon: Dungeon, player_pos: Pos) -> Self {
        let visible = vec![false; dungeon.width * dungeon.height];
        let mut world = Self {
            dungeon,
            player: EntityId::default(),
            depth: 1,
            entities: SlotMap::with_key(),
            order: Vec::new(),
            positions: SecondaryMap::new(),
            healths: SecondaryMap::new(),
            speeds: SecondaryMap::new(),
            actions: SecondaryMap::new(),
            collisions: SecondaryMap::new(),
            doors: SecondaryMap::new(),
            weapons: SecondaryMap::new(),
            ladders: SecondaryMap::new(),
            npcs: SecondaryMap::new(),
            dead: SecondaryMap::new(),
            visible,
        };
        let player = world.spawn();
        world.positions.insert(player, player_pos);
        world.healths.insert(player, Health::full(DEFAULT_PLAYER_HEALTH));
        world.speeds.insert(player, DEFAULT_PLAYER_SPEED);
        world.player = player;
        world
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = self.entities.insert(());
        self.order.push(id);
        id
    }

    pub fn despawn(&mut self, id: EntityId) {
        if self.entities.remove(id).is_none() {
            return;
        }
        self.order.retain(|other| *other != id);
        self.positions.remove(id);
        self.healths.remove(id);
        self.speeds.remove(id);
        self.actions.remove(id);
        self.collisions.remove(id);
        self.doors.remove(id);
        self.weapons.remove(id);
        self.ladders.remove(id);
        self.npcs.remove(id);
        self.dead.remove(id);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Live entities in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Entities that carry a position, in spawn order.
    pub fn placed(&self) -> impl Iterator<Item = (EntityId, Pos)> + '_ {
        self.entities().filter_map(|id| self.positions.get(id).map(|pos| (id, *pos)))
    }

    pub fn door_at(&self, pos: Pos) -> Option<(EntityId, Door)> {
        self.placed()
            .filter(|(_, at)| *at == pos)
            .find_map(|(id, _)| self.doors.get(id).map(|door| (id, *door)))
    }

    /// First entity at `pos` that has health, i.e. something a mover would bump into.
    pub fn creature_at(&self, pos: Pos) -> Option<EntityId> {
        self.placed()
            .find(|(id, at)| *at == pos && self.healths.contains_key(*id))
            .map(|(id, _)| id)
    }

    pub fn position(&self, id: EntityId) -> Option<Pos> {
        self.positions.get(id).copied()
    }

    pub fn require_position(&self, id: EntityId) -> Result<Pos, SimError> {
        self.position(id).ok_or(SimError::MissingComponent { entity: id, component: "Position" })
    }

    pub fn require_speed(&self, id: EntityId) -> Result<u32, SimError> {
        self.speeds
            .get(id)
            .copied()
            .ok_or(SimError::MissingComponent { entity: id, component: "Speed" })
    }

    pub fn player_pos(&self) -> Result<Pos, SimError> {
        self.require_position(self.player)
    }

    pub fn player_speed(&self) -> Result<u32, SimError> {
        self.require_speed(self.player)
    }

    pub fn is_player(&self, id: EntityId) -> bool {
        id == self.player
    }

    /// Attaches an intent, refusing a second one while the first is still pending.
    pub fn attach_action(&mut self, id: EntityId, action: Action) -> Result<(), SimError> {
        if self.actions.contains_key(id) {
            return Err(SimError::ActionAlreadyPending { entity: id });
        }
        self.actions.insert(id, action);
        Ok(())
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.dungeon.in_bounds(pos) && self.visible[self.dungeon.index(pos)]
    }

    pub(crate) fn clear_visible(&mut self) {
        self.visible.clear();
        self.visible.resize(self.dungeon.width * self.dungeon.height, false);
    }

    pub(crate) fn set_visible(&mut self, pos: Pos) {
        if self.dungeon.in_bounds(pos) {
            let idx = self.dungeon.index(pos);
            self.visible[idx] = true;
        }
    }

    /// Whether sight stops at this cell.
    pub fn is_opaque(&self, pos: Pos) -> bool {
        match self.dungeon.cell_at(pos) {
            Cell::Nothing | Cell::Wall => true,
            Cell::Floor => false,
            Cell::Door => self.door_at(pos).is_some_and(|(_, door)| !door.open),
        }
    }

    /// Whether a cell can ever be walked on, ignoring doors and creatures.
    pub fn is_walkable_terrain(&self, pos: Pos) -> bool {
        matches!(self.dungeon.cell_at(pos), Cell::Floor | Cell::Door)
    }
}
