//! # garden-robot
//!
//! A grid garden in which a single robot moves between labeled areas, picks
//! up and puts down mass-bearing objects, and succeeds once every area holds
//! a mass no smaller than the areas labeled before it.
//!
//! The crate is the state machine only: [`format`] reads gardens,
//! [`interpreter`] runs command streams against them, [`Garden::is_sorted`]
//! decides termination and [`generator`] produces random, reproducible
//! gardens. Rendering and pacing are left to the caller through
//! [`Garden`]'s `Display` impl and the [`Observer`] hook.

pub mod error;
pub mod format;
pub mod garden;
pub mod generator;
pub mod interpreter;
pub mod robot;

pub use error::*;
pub use format::{load, parse};
pub use garden::*;
pub use generator::{GeneratorConfig, generate, generate_garden};
pub use interpreter::*;
pub use robot::*;

/// Returns true when `garden` is sorted; see [`Garden::is_sorted`].
pub fn is_sorted(garden: &Garden) -> bool {
    garden.is_sorted()
}
