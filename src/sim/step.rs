/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Field update (force fields react to the tap)
///   2. Player update (vertical resolution, goal, lateral, tap-to-reverse)
///   3. Goal check → LevelComplete
///
/// `run_frame` drives several ticks per rendered frame (turbo). The tap edge
/// reaches only the first of them so a single physical tap toggles once.

use crate::domain::input::FrameInput;
use crate::sim::level::LevelError;

use super::event::GameEvent;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: &FrameInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.phase != Phase::Playing {
        return events;
    }
    world.tick += 1;

    world.field.update(input, &mut events);
    world.player.update(&world.field, input, &mut events);

    if world.player.at_goal() {
        world.phase = Phase::LevelComplete;
        log::info!("level {} cleared in {} ticks", world.current_level, world.tick);
    }

    events
}

/// Run `ticks_per_frame` ticks. Stops early once the level is no longer
/// being played.
pub fn run_frame(world: &mut WorldState, input: &FrameInput, ticks_per_frame: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut input = *input;
    for _ in 0..ticks_per_frame.max(1) {
        if world.phase != Phase::Playing {
            break;
        }
        events.extend(step(world, &input));
        input = input.without_tap();
    }
    events
}

/// Move on after a cleared level.
pub fn advance_level(world: &mut WorldState) -> Result<Vec<GameEvent>, LevelError> {
    let mut events = Vec::new();
    let next = world.current_level + 1;
    world.load_level(next, &mut events)?;
    Ok(events)
}

/// Rebuild the current level from its text: walker back at start, force
/// fields off.
pub fn restart_level(world: &mut WorldState) -> Result<Vec<GameEvent>, LevelError> {
    let mut events = Vec::new();
    world.load_level(world.current_level, &mut events)?;
    Ok(events)
}
