//! Robot state and the command vocabulary it understands.

use crate::error::CommandError;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mass held by an area or by the robot's gripper.
///
/// Empty is a distinct state, not a zero mass: an area holding `Mass(0)`
/// can still be picked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Empty,
    Mass(u32),
}

impl Slot {
    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn mass(self) -> Option<u32> {
        match self {
            Slot::Empty => None,
            Slot::Mass(m) => Some(m),
        }
    }

    /// Moves the content out, leaving `Empty` behind.
    pub fn take(&mut self) -> Slot {
        std::mem::take(self)
    }
}

impl From<Option<u32>> for Slot {
    fn from(mass: Option<u32>) -> Self {
        mass.map_or(Slot::Empty, Slot::Mass)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => f.write_str("empty"),
            Slot::Mass(m) => write!(f, "{m}"),
        }
    }
}

/// The single mobile agent in a garden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    /// Grid cell the robot stands on. `y` grows southwards.
    pub position: IVec2,

    /// What the robot currently carries.
    pub carrying: Slot,
}

impl Robot {
    pub fn new(position: IVec2) -> Self {
        Self {
            position,
            carrying: Slot::Empty,
        }
    }

    pub fn is_carrying(&self) -> bool {
        !self.carrying.is_empty()
    }
}

/// Compass direction of a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Grid offset of one step in this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::NEG_Y,
            Direction::East => IVec2::X,
            Direction::South => IVec2::Y,
            Direction::West => IVec2::NEG_X,
        }
    }
}

/// Operations the robot can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Step one cell (`move-north`, `move-east`, `move-south`, `move-west`).
    Move(Direction),
    /// Lift the mass of the area under the robot (`pick-up`).
    PickUp,
    /// Drop the carried mass into the area under the robot (`put-down`).
    PutDown,
}

impl Command {
    /// Every command paired with its token, in a fixed order.
    pub const ALL: [(&'static str, Command); 6] = [
        ("move-north", Command::Move(Direction::North)),
        ("move-east", Command::Move(Direction::East)),
        ("move-south", Command::Move(Direction::South)),
        ("move-west", Command::Move(Direction::West)),
        ("pick-up", Command::PickUp),
        ("put-down", Command::PutDown),
    ];

    /// The token this command is written as in a command stream.
    pub fn token(self) -> &'static str {
        match self {
            Command::Move(Direction::North) => "move-north",
            Command::Move(Direction::East) => "move-east",
            Command::Move(Direction::South) => "move-south",
            Command::Move(Direction::West) => "move-west",
            Command::PickUp => "pick-up",
            Command::PutDown => "put-down",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Tokens are matched case-sensitively.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, cmd)| *cmd)
            .ok_or_else(|| CommandError::UnknownCommand(token.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One parsed line of a command stream: a command and how often to run it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    pub command: Command,
    pub repeat: u32,
}

impl CommandLine {
    /// Parses `<token> [count]`. Returns `Ok(None)` for a blank line.
    ///
    /// The count must be a positive integer no larger than `max_repeat`.
    pub fn parse(text: &str, max_repeat: u32) -> Result<Option<Self>, CommandError> {
        let mut tokens = text.split_whitespace();
        let Some(token) = tokens.next() else {
            return Ok(None);
        };
        let command: Command = token.parse()?;

        let repeat = match tokens.next() {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 && n <= max_repeat => n,
                _ => return Err(CommandError::InvalidRepeat(raw.to_string())),
            },
        };

        if let Some(extra) = tokens.next() {
            return Err(CommandError::UnexpectedToken(extra.to_string()));
        }

        Ok(Some(Self { command, repeat }))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeat == 1 {
            write!(f, "{}", self.command)
        } else {
            write!(f, "{} {}", self.command, self.repeat)
        }
    }
}
