//! Interpreter that drives a [`Garden`] through a command stream.
//!
//! The entry point is [`Interpreter`]. Configure it with an
//! [`InterpreterConfig`], then call [`Interpreter::run`] with a garden, a
//! line-oriented command source and an [`Observer`]. [`execute`] wraps the
//! common case of default settings and no observer.

use crate::error::{RuleViolation, RunError};
use crate::garden::Garden;
use crate::robot::{Command, CommandLine};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Configuration for command interpretation.
#[derive(Clone, Debug)]
pub struct InterpreterConfig {
    /// Stop reading commands as soon as the garden is sorted. When disabled
    /// the whole stream is consumed and sortedness is only reported at the end.
    pub stop_when_sorted: bool,
    /// Largest accepted repeat count on a single command line.
    pub max_repeat: u32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            stop_when_sorted: true,
            max_repeat: u32::MAX,
        }
    }
}

/// Hooks called while a command stream runs.
///
/// Observers only see the garden; they cannot change its state or the
/// outcome of the run. Front ends use them to render and pace execution.
pub trait Observer {
    /// Called after a line is parsed, before its first repetition runs.
    fn before_line(&mut self, _garden: &Garden, _line: &CommandLine) {}

    /// Called after each single repetition of a command, `step` counting from 0.
    fn after_step(&mut self, _garden: &Garden, _line: &CommandLine, _step: u32) {}

    /// Called once all repetitions of a line have run.
    fn after_line(&mut self, _garden: &Garden, _line: &CommandLine) {}
}

/// The silent observer.
impl Observer for () {}

/// Result of a run that ended without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the garden is sorted at the end of the run.
    #[serde(rename = "success")]
    pub sorted: bool,

    /// Number of executed commands, each repetition counted separately.
    #[serde(rename = "commandCount")]
    pub commands: usize,
}

/// Executes command streams against a garden.
#[derive(Clone, Debug, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Applies a single command.
    ///
    /// On error the garden is left exactly as it was.
    pub fn apply(&self, garden: &mut Garden, command: Command) -> Result<(), RuleViolation> {
        match command {
            Command::Move(direction) => garden.move_robot(direction),
            Command::PickUp => garden.pick_up(),
            Command::PutDown => garden.put_down(),
        }
    }

    /// Runs every line of `input` against `garden`.
    ///
    /// Lines have the form `<command> [count]`; blank lines are skipped.
    /// After each complete line the garden is checked and, if it is sorted,
    /// the remaining input is left unread.
    ///
    /// Any error ends the run. The garden keeps the state reached by the
    /// last successful repetition, which for a rule violation is the state
    /// just before the offending step.
    pub fn run<R, O>(
        &self,
        garden: &mut Garden,
        input: R,
        observer: &mut O,
    ) -> Result<Outcome, RunError>
    where
        R: BufRead,
        O: Observer + ?Sized,
    {
        let mut commands = 0;

        for (index, text) in input.lines().enumerate() {
            let line = index + 1;
            let text = text?;
            let parsed = CommandLine::parse(&text, self.config.max_repeat)
                .map_err(|source| RunError::Command { line, source })?;
            let Some(cmd) = parsed else {
                continue;
            };

            debug!("line {line}: {cmd}");
            observer.before_line(garden, &cmd);
            for step in 0..cmd.repeat {
                self.apply(garden, cmd.command)
                    .map_err(|source| RunError::Rule { line, source })?;
                commands += 1;
                trace!(
                    "{} -> robot at {}, carrying {}",
                    cmd.command,
                    garden.robot().position,
                    garden.robot().carrying
                );
                observer.after_step(garden, &cmd, step);
            }
            observer.after_line(garden, &cmd);

            if self.config.stop_when_sorted && garden.is_sorted() {
                info!("garden sorted after {commands} commands (line {line})");
                return Ok(Outcome {
                    sorted: true,
                    commands,
                });
            }
        }

        let sorted = garden.is_sorted();
        if sorted {
            info!("garden sorted after {commands} commands");
        } else {
            warn!("commands exhausted after {commands} commands; garden is not sorted");
        }
        Ok(Outcome { sorted, commands })
    }
}

/// Runs `input` against `garden` with the default configuration.
pub fn execute(garden: &mut Garden, input: impl BufRead) -> Result<Outcome, RunError> {
    Interpreter::default().run(garden, input, &mut ())
}
