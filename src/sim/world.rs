/// WorldState: one play session over an ordered list of levels.
///
/// The Field and Player are rebuilt from the level text on every load, so
/// restarting a level resets force fields and the walker together.

use crate::sim::field::Field;
use crate::sim::level::{build_field, LevelDef, LevelError};
use crate::sim::player::Player;

use super::event::GameEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    LevelComplete,
    GameComplete,
}

pub struct WorldState {
    pub levels: Vec<LevelDef>,
    pub current_level: usize,
    pub field: Field,
    pub player: Player,
    pub phase: Phase,
    /// Ticks since the current level was loaded.
    pub tick: u64,
}

impl WorldState {
    /// Start a session at `start_level`. Fails if that level does not load.
    pub fn new(levels: Vec<LevelDef>, start_level: usize) -> Result<Self, LevelError> {
        let def = levels.get(start_level).ok_or(LevelError::NoSuchLevel {
            index: start_level,
            count: levels.len(),
        })?;
        let field = build_field(def)?;
        let player = Player::new(field.start());
        log::info!("level {} \"{}\" loaded", start_level, def.name);
        Ok(WorldState {
            levels,
            current_level: start_level,
            field,
            player,
            phase: Phase::Playing,
            tick: 0,
        })
    }

    pub fn level_name(&self) -> &str {
        self.levels
            .get(self.current_level)
            .map_or("", |def| def.name.as_str())
    }

    pub fn total_levels(&self) -> usize {
        self.levels.len()
    }

    /// Load level `index`, or finish the game when past the last one.
    pub fn load_level(&mut self, index: usize, events: &mut Vec<GameEvent>) -> Result<(), LevelError> {
        let Some(def) = self.levels.get(index) else {
            self.phase = Phase::GameComplete;
            log::info!("all {} levels complete", self.levels.len());
            events.push(GameEvent::GameComplete);
            return Ok(());
        };

        self.field = build_field(def)?;
        self.player = Player::new(self.field.start());
        self.current_level = index;
        self.phase = Phase::Playing;
        self.tick = 0;
        log::info!("level {} \"{}\" loaded", index, def.name);
        events.push(GameEvent::LevelLoaded { index });
        Ok(())
    }
}
