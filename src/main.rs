//! Command-line front end: runs a command stream against a garden file, or
//! writes a random garden with `--generate`.

use clap::Parser;
use garden_robot::generator::{self, GeneratorConfig};
use garden_robot::{
    CommandLine, ConfigError, EXIT_MALFORMED, Garden, Interpreter, LoadError, Observer, RunError,
    WriteError, format,
};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Robot garden simulator.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Garden file to run, or to create with --generate.
    #[arg(value_name = "GARDEN_FILE")]
    garden_file: PathBuf,

    /// Generate a random garden into GARDEN_FILE instead of running commands.
    #[arg(long)]
    generate: bool,

    /// Size of the generated garden as WIDTHxHEIGHT (4-128 each) or `random`.
    /// Prompted for when omitted.
    #[arg(long, value_name = "WIDTHxHEIGHT", requires = "generate")]
    size: Option<SizeArg>,

    /// Number of areas to generate (2-26) or `random`. Prompted for when omitted.
    #[arg(long, value_name = "COUNT", requires = "generate")]
    area_count: Option<AreaCountArg>,

    /// Seed for the garden generator.
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// File with commands to run; defaults to stdin.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Disable the delay between steps.
    #[arg(long, conflicts_with = "step")]
    no_delay: bool,

    /// Wait for Enter before every command line.
    #[arg(long, requires = "input")]
    step: bool,

    /// Print only a JSON summary of the run.
    #[arg(long, conflicts_with = "step")]
    json: bool,
}

/// Garden dimensions from `--size`.
#[derive(Clone, Copy, Debug)]
enum SizeArg {
    Random,
    Fixed { width: u32, height: u32 },
}

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "random" {
            return Ok(Self::Random);
        }
        let (width, height) = value
            .split_once('x')
            .ok_or_else(|| "expected format WIDTHxHEIGHT or `random`".to_string())?;
        let width = width
            .trim()
            .parse()
            .map_err(|_| format!("invalid width {width:?}"))?;
        let height = height
            .trim()
            .parse()
            .map_err(|_| format!("invalid height {height:?}"))?;
        Ok(Self::Fixed { width, height })
    }
}

/// Area count from `--area-count`.
#[derive(Clone, Copy, Debug)]
enum AreaCountArg {
    Random,
    Count(u32),
}

impl FromStr for AreaCountArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "random" {
            return Ok(Self::Random);
        }
        value
            .trim()
            .parse()
            .map(Self::Count)
            .map_err(|_| format!("invalid area count {value:?}: not a number"))
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("failed to write {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error("failed to open input file: {0}")]
    Input(io::Error),

    #[error("failed to read from stdin: {0}")]
    Stdin(io::Error),

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Run(err) => err.exit_code(),
            Self::Load(err) => err.exit_code(),
            Self::Config(err) => err.exit_code(),
            _ => EXIT_MALFORMED,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_MALFORMED)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let result = if args.generate {
        generate(&args)
    } else {
        run(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn generate(args: &CliArgs) -> Result<(), CliError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generator seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let (width, height) = match args.size {
        Some(SizeArg::Random) => generator::random_size(&mut rng),
        Some(SizeArg::Fixed { width, height }) => (width, height),
        None => (
            prompt_number("Width (4-128): ", generator::MIN_SIDE, generator::MAX_SIDE)?,
            prompt_number("Height (4-128): ", generator::MIN_SIDE, generator::MAX_SIDE)?,
        ),
    };
    // Reject a bad size before asking for the area count.
    GeneratorConfig::new(width, height, generator::MIN_AREAS)?;

    let area_count = match args.area_count {
        Some(AreaCountArg::Random) => generator::random_area_count(width, height, &mut rng)?,
        Some(AreaCountArg::Count(count)) => count,
        None => {
            let max = generator::max_area_count(width, height);
            prompt_number(
                &format!("Area count (2-{max}): "),
                generator::MIN_AREAS,
                max,
            )?
        }
    };

    let config = GeneratorConfig::new(width, height, area_count)?;
    let garden = generator::generate_garden(&config, &mut rng).map_err(ConfigError::from)?;
    let text = format::write(&garden)?;
    std::fs::write(&args.garden_file, text).map_err(|source| CliError::Output {
        path: args.garden_file.clone(),
        source,
    })?;
    Ok(())
}

/// Asks on stdin until the answer is a number in `min..=max`.
fn prompt_number(prompt: &str, min: u32, max: u32) -> Result<u32, CliError> {
    let stdin = io::stdin();
    loop {
        print!("{prompt}");
        io::stdout().flush().map_err(CliError::Stdin)?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).map_err(CliError::Stdin)? == 0 {
            return Err(CliError::Stdin(io::ErrorKind::UnexpectedEof.into()));
        }
        match answer.trim().parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(n),
            Ok(_) => eprintln!("Value must be between {min} and {max}"),
            Err(_) => eprintln!("Value must be a number"),
        }
    }
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let mut garden = format::load(&args.garden_file)?;
    let animate = !(args.no_delay || args.json);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(CliError::Input)?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut observer: Box<dyn Observer> = if animate || args.step {
        Box::new(Pacer {
            animate,
            step: args.step,
            delay: step_delay(garden.area_count()),
        })
    } else {
        Box::new(())
    };

    if animate {
        draw(&garden);
    }
    let outcome = Interpreter::default().run(&mut garden, input, &mut *observer)?;

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
        return Ok(());
    }

    if animate {
        print!("{CLEAR_SCREEN}");
    }
    println!("{garden}");
    if outcome.sorted {
        println!(
            "Success! The garden is tidy. The robot executed {} commands.",
            outcome.commands
        );
    } else {
        println!("Failure! The objects are not sorted.");
    }
    Ok(())
}

/// Pause between animation frames: shorter for gardens with more areas,
/// never below 10 ms.
fn step_delay(area_count: usize) -> Duration {
    let millis = ((0.5 - 0.065 * area_count as f64) * 1000.0).max(10.0);
    Duration::from_millis(millis as u64)
}

fn draw(garden: &Garden) {
    print!("{CLEAR_SCREEN}");
    println!("{garden}");
}

/// Renders every step and optionally waits for Enter between lines.
struct Pacer {
    animate: bool,
    step: bool,
    delay: Duration,
}

impl Observer for Pacer {
    fn before_line(&mut self, _garden: &Garden, _line: &CommandLine) {
        if !self.step {
            return;
        }
        print!("Press enter to continue...");
        if let Err(err) = io::stdout().flush() {
            warn!("failed to flush stdout: {err}");
        }
        match io::stdin().lock().read_line(&mut String::new()) {
            Ok(0) => {
                warn!("stdin closed, running the remaining commands without pausing");
                self.step = false;
            }
            Ok(_) => {}
            Err(err) => {
                warn!("failed to read from stdin, no longer pausing: {err}");
                self.step = false;
            }
        }
    }

    fn after_step(&mut self, garden: &Garden, _line: &CommandLine, _step: u32) {
        if self.animate {
            draw(garden);
            std::thread::sleep(self.delay);
        }
    }

    fn after_line(&mut self, _garden: &Garden, line: &CommandLine) {
        if self.animate {
            println!("{line}");
        }
    }
}
