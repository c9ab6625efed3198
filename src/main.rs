use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use clap::Parser;
use env_logger::{Env, Target};
use rogue_snake::config::FRAME_INTERVAL;
use rogue_snake::error::AppError;
use rogue_snake::game::GameState;
use rogue_snake::input::{GameInput, InputHandler};
use rogue_snake::renderer;
use rogue_snake::terminal_runtime::TerminalSession;
use rogue_snake::theme::THEME_CLASSIC;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for a reproducible game; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log records here (filter via RUST_LOG, default `info`).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("rogue-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("starting with seed {seed}");

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut state = GameState::new(seed);
    let mut last_frame = Instant::now();

    loop {
        let inputs = input.poll_inputs()?;
        if inputs.contains(&GameInput::Quit) {
            break;
        }

        let now = Instant::now();
        state.update(now - last_frame, &inputs);
        last_frame = now;

        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, &THEME_CLASSIC))?;

        thread::sleep(FRAME_INTERVAL);
    }

    log::info!("quit with score {} on level {}", state.score(), state.level());
    Ok(())
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
