/// Events emitted during a simulation step.
/// The driver consumes these for presentation and scene transitions.

use crate::domain::geom::Facing;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    ForceFieldToggled { index: usize, on: bool },
    ClimbStarted,
    FallStarted,
    Landed,
    Turned { facing: Facing },
    TapReversed { facing: Facing },
    GoalReached,
    LevelLoaded { index: usize },
    GameComplete,
}
