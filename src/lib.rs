//! Space Protector: defend the turret at the centre of the screen from
//! aliens closing in from every edge.
//!
//! - `geometry`, `entities`, `difficulty`, `compute`: the simulation
//! - `game`: fixed-tick loop over the backend traits in `backend`
//! - `display`, `input`, `audio`: crossterm terminal backends
//! - `config`, `error`: tuning and failure types

pub mod audio;
pub mod backend;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use game::{Game, Outcome};
