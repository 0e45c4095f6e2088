//! Random garden generation.
//!
//! All randomness comes from the `Rng` handed in by the caller, so a seeded
//! generator always reproduces the same garden. [`generate`] is the
//! seed-in, text-out shortcut.

use crate::error::{ConfigError, GardenError};
use crate::format;
use crate::garden::{Garden, Label};
use crate::robot::Slot;
use glam::IVec2;
use log::info;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Smallest accepted width or height.
pub const MIN_SIDE: u32 = 4;
/// Largest accepted width or height.
pub const MAX_SIDE: u32 = 128;
pub const MIN_AREAS: u32 = 2;
/// One area per letter `A`-`Z`.
pub const MAX_AREAS: u32 = 26;

/// Validated generator parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    width: u32,
    height: u32,
    area_count: u32,
}

impl GeneratorConfig {
    /// Checks the parameters. Width and height must lie in
    /// `MIN_SIDE..=MAX_SIDE`; the area count in
    /// `MIN_AREAS..=max_area_count(width, height)`.
    pub fn new(width: u32, height: u32, area_count: u32) -> Result<Self, ConfigError> {
        if !(MIN_SIDE..=MAX_SIDE).contains(&width) {
            return Err(ConfigError::Width(width));
        }
        if !(MIN_SIDE..=MAX_SIDE).contains(&height) {
            return Err(ConfigError::Height(height));
        }
        let max = max_area_count(width, height);
        if !(MIN_AREAS..=max).contains(&area_count) {
            return Err(ConfigError::AreaCount {
                count: area_count,
                max,
            });
        }
        Ok(Self {
            width,
            height,
            area_count,
        })
    }

    /// Picks a random size and a random area count that fits it.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (width, height) = random_size(rng);
        // A MIN_SIDE x MIN_SIDE grid already holds more than MIN_AREAS.
        let area_count = rng.gen_range(MIN_AREAS..=max_area_count(width, height));
        Self {
            width,
            height,
            area_count,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area_count(&self) -> u32 {
        self.area_count
    }
}

/// A 16x16 garden with 8 areas.
impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            area_count: 8,
        }
    }
}

/// Largest area count a `width` x `height` grid can hold: every area and the
/// robot need a cell of their own, and labels run out after `Z`.
pub fn max_area_count(width: u32, height: u32) -> u32 {
    width.saturating_mul(height).saturating_sub(1).min(MAX_AREAS)
}

/// Random width and height in `MIN_SIDE..=MAX_SIDE`.
pub fn random_size<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    (
        rng.gen_range(MIN_SIDE..=MAX_SIDE),
        rng.gen_range(MIN_SIDE..=MAX_SIDE),
    )
}

/// Random area count valid for a grid of the given size.
///
/// Fails when the grid has no room for [`MIN_AREAS`] areas and the robot.
pub fn random_area_count<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<u32, ConfigError> {
    let max = max_area_count(width, height);
    if max < MIN_AREAS {
        return Err(ConfigError::AreaCount {
            count: MIN_AREAS,
            max,
        });
    }
    Ok(rng.gen_range(MIN_AREAS..=max))
}

/// Builds a random garden.
///
/// - Labels run contiguously from `A`.
/// - Each mass is a multiple of ten below `area_count * 30`.
/// - Between one and `area_count / 2` distinct areas (at least one) start empty.
/// - Every area and the robot get a cell of their own.
pub fn generate_garden<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Garden, GardenError> {
    let count = config.area_count as usize;

    let mut slots: Vec<Slot> = (0..count)
        .map(|_| Slot::Mass(rng.gen_range(0..config.area_count * 3) * 10))
        .collect();

    let empty_count = rng.gen_range(1..=(count / 2).max(1));
    for i in index::sample(rng, count, empty_count) {
        slots[i] = Slot::Empty;
    }

    // One cell per area plus one for the robot, all distinct.
    let cell_count = (config.width * config.height) as usize;
    let cells: Vec<IVec2> = index::sample(rng, cell_count, count + 1)
        .into_iter()
        .map(|i| {
            let width = config.width as usize;
            IVec2::new((i % width) as i32, (i / width) as i32)
        })
        .collect();

    let mut areas: HashMap<Label, Slot> = HashMap::with_capacity(count);
    let mut locations: HashMap<IVec2, Label> = HashMap::with_capacity(count);
    for (i, slot) in slots.into_iter().enumerate() {
        let label = (b'A' + i as u8) as char;
        areas.insert(label, slot);
        locations.insert(cells[i], label);
    }

    info!(
        "generated {}x{} garden with {} areas ({} empty)",
        config.width, config.height, count, empty_count
    );

    Garden::new(
        IVec2::new(config.width as i32, config.height as i32),
        cells[count],
        areas,
        locations,
    )
}

/// Generates a garden from `seed` and returns it in the garden file format.
///
/// The same arguments always produce the same text.
pub fn generate(
    width: u32,
    height: u32,
    area_count: u32,
    seed: u64,
) -> Result<String, ConfigError> {
    let config = GeneratorConfig::new(width, height, area_count)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let garden = generate_garden(&config, &mut rng)?;
    Ok(format::encode(&garden))
}
