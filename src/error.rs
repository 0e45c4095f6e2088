//! Error types for loading, interpreting and generating gardens.
//!
//! Errors fall into three classes, each mapped to a process exit code by
//! [`exit_code`](RunError::exit_code) helpers:
//! malformed input (1), rule violations (2) and configuration errors (1).

use thiserror::Error;

/// Exit status for malformed input, usage and configuration errors.
pub const EXIT_MALFORMED: u8 = 1;

/// Exit status for a command that breaks a movement, pick-up or put-down rule.
pub const EXIT_RULE_VIOLATION: u8 = 2;

/// Syntax or structural error in a garden file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A header line does not contain exactly one `=`.
    #[error("syntax error line {line}: expected `label=mass`")]
    MissingSeparator {
        /// 1-based line number.
        line: usize,
    },

    /// The label part of a header line is not a single character.
    #[error("syntax error line {line}: label must be a single character")]
    InvalidLabel {
        /// 1-based line number.
        line: usize,
    },

    /// The mass part of a header line is not a non-negative integer.
    #[error("syntax error line {line}: mass must be a non-negative integer")]
    InvalidMass {
        /// 1-based line number.
        line: usize,
    },

    /// A grid row contains a character other than `$`, `A`-`Z` or `.`.
    #[error("syntax error line {line}: unexpected grid character {found:?}")]
    InvalidCell {
        /// 1-based line number.
        line: usize,
        /// The offending character.
        found: char,
    },

    #[error("garden has no grid")]
    EmptyGrid,

    #[error("garden has no robot")]
    MissingRobot,

    /// More than one `$` in the grid.
    #[error("garden has more than one robot (second one on line {line})")]
    DuplicateRobot {
        /// 1-based line number of the second robot.
        line: usize,
    },

    /// The grid parsed but does not describe a consistent garden.
    #[error(transparent)]
    Invalid(#[from] GardenError),

    /// The same label declared twice in the header.
    #[error("syntax error line {line}: area {label:?} declared twice")]
    DuplicateDeclaration {
        /// 1-based line number.
        line: usize,
        /// The repeated label.
        label: char,
    },
}

/// Parts that do not form a consistent garden, as rejected by
/// [`Garden::new`](crate::Garden::new).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GardenError {
    #[error("robot at {0} is outside the grid")]
    RobotOutOfBounds(glam::IVec2),

    #[error("area {0:?} is outside the grid")]
    AreaOutOfBounds(char),

    /// A grid letter without a header entry.
    #[error("area {0:?} is placed on the grid but not declared")]
    UndeclaredArea(char),

    /// A header entry that never appears on the grid.
    #[error("area {0:?} is declared but not placed on the grid")]
    UnplacedArea(char),

    /// A label placed on more than one cell.
    #[error("area {0:?} is placed on more than one cell")]
    DuplicateArea(char),
}

/// A garden state the text format cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("robot stands on area {0:?}; the garden file cannot show both")]
    RobotOnArea(char),
}

/// Failure to load a garden file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read garden file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid garden file: {0}")]
    Parse(#[from] ParseError),
}

impl LoadError {
    /// Loading failures are always malformed input.
    pub fn exit_code(&self) -> u8 {
        EXIT_MALFORMED
    }
}

/// Malformed line in a command stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The repeat argument is not a positive integer within the allowed range.
    #[error("command repeat argument is not a valid number: {0:?}")]
    InvalidRepeat(String),

    #[error("unexpected token after repeat count: {0:?}")]
    UnexpectedToken(String),
}

/// A command that is well-formed but breaks a rule of the garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("cannot move out of map")]
    OutOfMap,

    #[error("cannot pick up object: robot already carries an object")]
    AlreadyCarrying,

    #[error("cannot pick up object from grass area")]
    PickUpFromGrass,

    #[error("cannot pick up object from empty area")]
    PickUpFromEmpty,

    #[error("cannot place object: robot doesn't carry any object")]
    NotCarrying,

    #[error("cannot place object on grass area")]
    PutOnGrass,

    #[error("cannot place object on occupied area")]
    PutOnOccupied,
}

/// A fatal error that stops an interpreter run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid input line {line}: {source}")]
    Command {
        /// 1-based line number in the command stream.
        line: usize,
        #[source]
        source: CommandError,
    },

    #[error("line {line}: {source}")]
    Rule {
        /// 1-based line number in the command stream.
        line: usize,
        #[source]
        source: RuleViolation,
    },

    #[error("failed to read commands: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Process exit status a front end should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Rule { .. } => EXIT_RULE_VIOLATION,
            Self::Command { .. } | Self::Io(_) => EXIT_MALFORMED,
        }
    }

    /// True for rule violations, false for malformed input.
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, Self::Rule { .. })
    }
}

/// Invalid garden generator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid width {0}: min: {min}, max: {max}", min = crate::generator::MIN_SIDE, max = crate::generator::MAX_SIDE)]
    Width(u32),

    #[error("invalid height {0}: min: {min}, max: {max}", min = crate::generator::MIN_SIDE, max = crate::generator::MAX_SIDE)]
    Height(u32),

    /// Area count outside `2..=max`, where `max` depends on the grid size.
    #[error("invalid area count {count}: min: 2, max: {max}")]
    AreaCount {
        /// Requested number of areas.
        count: u32,
        /// Largest count the grid allows.
        max: u32,
    },

    /// The generated parts failed validation.
    #[error("generated garden is invalid: {0}")]
    Garden(#[from] GardenError),
}

impl ConfigError {
    pub fn exit_code(&self) -> u8 {
        EXIT_MALFORMED
    }
}
