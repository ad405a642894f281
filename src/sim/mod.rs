pub mod event;
pub mod field;
pub mod level;
pub mod player;
pub mod step;
pub mod world;
