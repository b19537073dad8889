//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl<B: NpcBrain> Game<B> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.config.seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.world.depth);
        hasher.write_u8(match self.mode {
            Mode::Explore => 0,
            Mode::Menu => 1,
        });
        match self.turn {
            Turn::Player => hasher.write_u8(0),
            Turn::Npc { index, moved } => {
                hasher.write_u8(1);
                hasher.write_usize(index);
                hasher.write_usize(moved);
            }
        }
        for (id, pos) in self.world.placed() {
            hasher.write_i32(pos.y);
            hasher.write_i32(pos.x);
            if let Some(health) = self.world.healths.get(id) {
                hasher.write_i32(health.current);
            }
            if let Some(door) = self.world.doors.get(id) {
                hasher.write_u8(u8::from(door.open));
            }
        }
        hasher.finish()
    }
}
