mod config;
mod console;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use tokio::sync::{Mutex, mpsc};
use common::config::Validate;
use common::games::SessionRng;
use common::games::snake::{
    Difficulty, FileHighScoreStore, GameConfig, SessionCommand, SnakeSession, SnakeSessionSettings,
    run_session,
};
use common::{log, logger};

use config::{get_config_manager, get_config_path, resolve_high_score_path};
use console::{ConsoleBroadcaster, HELP, parse_command};

#[derive(Parser)]
#[command(name = "snake_runner")]
struct Args {
    /// YAML game config; created with defaults on first run
    #[arg(long)]
    config: Option<PathBuf>,

    /// easy, medium or hard; overrides the config file
    #[arg(long)]
    difficulty: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    #[arg(long)]
    no_clear: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args.config.unwrap_or_else(get_config_path);
    let config_manager = get_config_manager(&config_path);
    let mut config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load {}: {}. Using defaults", config_path.display(), e);
            GameConfig::default()
        }
    };
    if !config_path.exists()
        && let Err(e) = config_manager.set_config(&config)
    {
        log!("Failed to write default config: {}", e);
    }

    if let Some(name) = args.difficulty {
        config.difficulty =
            Difficulty::parse(&name).ok_or_else(|| format!("Unknown difficulty: {}", name))?;
    }
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Difficulty {}, seed {}, config {}",
        config.difficulty.as_str(),
        rng.seed(),
        config_path.display()
    );

    let high_scores =
        FileHighScoreStore::new(resolve_high_score_path(&config_path, &config.high_score_file));
    let session = Arc::new(Mutex::new(SnakeSession::new(
        SnakeSessionSettings::from(&config),
        rng,
        Box::new(high_scores),
    )));

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_commands(command_tx));

    log!("{}", HELP);
    let last = run_session(
        session,
        command_rx,
        ConsoleBroadcaster::new(!args.no_clear),
        Duration::from_millis(args.frame_ms.max(1)),
    )
    .await;

    log!("Session closed: score {}, best {}", last.score, last.high_score);
    Ok(())
}

fn read_commands(command_tx: mpsc::UnboundedSender<SessionCommand>) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            log!("Unknown command: {}", line.trim());
            continue;
        };
        if command_tx.send(command).is_err() || command == SessionCommand::Quit {
            break;
        }
    }
}
