//! Tap Walk core.
//!
//! An autonomous walker moves along a tile field, turning at walls, falling
//! off ledges and riding elevators. The only input is a tap: on the walker
//! to reverse it, or on a force field to toggle it.
//!
//! - `domain`: geometry, fixed-point positions, level objects, input
//! - `sim`: field queries, the walker state machine, level loading, session stepping
//! - `config`: `config.toml` loading for the driver

pub mod config;
pub mod domain;
pub mod sim;
