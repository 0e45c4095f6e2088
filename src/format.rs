//! Reading and writing the garden text format.
//!
//! ```text
//! A=30
//! B=
//! C=10
//!
//! A..$
//! ..B.
//! C...
//! ```
//!
//! A header of `label=mass` lines (an empty mass marks an empty area) ends
//! at the first blank line. The grid follows: `$` is the robot, `A`-`Z` are
//! areas and `.` is grass. The first row fixes the width; the grid ends at
//! the first row of any other width.

use crate::error::{LoadError, ParseError, WriteError};
use crate::garden::{Garden, Label};
use crate::robot::Slot;
use glam::IVec2;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

const ROBOT: char = '$';
const GRASS: char = '.';

/// Reads and parses the garden file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Garden, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let garden = parse(&text)?;
    debug!(
        "loaded {}x{} garden with {} areas from {}",
        garden.width(),
        garden.height(),
        garden.area_count(),
        path.display()
    );
    Ok(garden)
}

/// Parses a garden from its text form.
pub fn parse(text: &str) -> Result<Garden, ParseError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .enumerate()
        .map(|(i, l)| (i + 1, l));

    // Header
    let mut areas: HashMap<Label, Slot> = HashMap::new();
    for (line, entry) in lines.by_ref() {
        if entry.is_empty() {
            break;
        }
        let (label, slot) = parse_header_line(entry, line)?;
        if areas.insert(label, slot).is_some() {
            return Err(ParseError::DuplicateDeclaration { line, label });
        }
    }

    // Grid
    let mut width: Option<usize> = None;
    let mut height = 0;
    let mut robot: Option<IVec2> = None;
    let mut locations: HashMap<IVec2, Label> = HashMap::new();
    for (line, row) in lines {
        let row_width = row.chars().count();
        match width {
            Some(w) if w != row_width => break,
            None if row_width == 0 => break,
            _ => width = Some(row_width),
        }

        for (x, cell) in row.chars().enumerate() {
            let pos = IVec2::new(x as i32, height);
            match cell {
                ROBOT => {
                    if robot.replace(pos).is_some() {
                        return Err(ParseError::DuplicateRobot { line });
                    }
                }
                'A'..='Z' => {
                    locations.insert(pos, cell);
                }
                GRASS => {}
                found => return Err(ParseError::InvalidCell { line, found }),
            }
        }
        height += 1;
    }

    let Some(width) = width else {
        return Err(ParseError::EmptyGrid);
    };
    let robot = robot.ok_or(ParseError::MissingRobot)?;

    let garden = Garden::new(IVec2::new(width as i32, height), robot, areas, locations)?;
    Ok(garden)
}

fn parse_header_line(entry: &str, line: usize) -> Result<(Label, Slot), ParseError> {
    let mut parts = entry.split('=');
    let (Some(label), Some(mass), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::MissingSeparator { line });
    };

    let mut chars = label.trim().chars();
    let (Some(label), None) = (chars.next(), chars.next()) else {
        return Err(ParseError::InvalidLabel { line });
    };

    let mass = mass.trim();
    let slot = if mass.is_empty() {
        Slot::Empty
    } else {
        mass.parse::<u32>()
            .map(Slot::Mass)
            .map_err(|_| ParseError::InvalidMass { line })?
    };
    Ok((label, slot))
}

/// Writes `garden` in its text form: header lines in label order, a blank
/// line, then the grid.
///
/// The robot's load is not part of the format; a garden written while the
/// robot carries something reads back with an empty gripper. A robot
/// standing on an area cannot be written at all.
pub fn write(garden: &Garden) -> Result<String, WriteError> {
    let robot = garden.robot().position;
    if let Some(label) = garden.area_at(robot) {
        return Err(WriteError::RobotOnArea(label));
    }
    Ok(encode(garden))
}

/// [`write`] without the robot check; an area under the robot hides it.
pub(crate) fn encode(garden: &Garden) -> String {
    let robot = garden.robot().position;
    let mut out = String::new();
    for area in garden.areas() {
        out.push(area.label);
        out.push('=');
        if let Slot::Mass(m) = area.slot {
            out.push_str(&m.to_string());
        }
        out.push('\n');
    }
    out.push('\n');

    for y in 0..garden.size().y {
        for x in 0..garden.size().x {
            let pos = IVec2::new(x, y);
            let cell = match garden.area_at(pos) {
                Some(label) => label,
                None if pos == robot => ROBOT,
                None => GRASS,
            };
            out.push(cell);
        }
        out.push('\n');
    }
    out
}
