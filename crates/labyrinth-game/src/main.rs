//! Labyrinth headless driver entry point.

use std::error::Error;
use std::sync::Arc;

use labyrinth_core::clock::SystemClock;
use labyrinth_core::geometry::Pose;
use labyrinth_game::adapters::{LoggingAudio, LoggingWorld, TracingSink};
use labyrinth_game::config::{DriverConfig, LogFormat};
use labyrinth_game::game::Game;
use labyrinth_game::input::ConsoleCommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DriverConfig::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(tick_hz = config.tick_hz, "Starting Labyrinth");

    let loaded = config.load_campaign()?;
    tracing::info!(
        title = %loaded.campaign.title,
        fingerprint = %loaded.fingerprint,
        warnings = loaded.warnings.len(),
        "campaign ready"
    );

    let mut game = Game::new(
        loaded.campaign,
        Arc::new(SystemClock),
        Box::new(LoggingWorld::new(Pose::default())),
        Box::new(LoggingAudio),
        Box::new(TracingSink),
    );
    game.subscribe_mode(|change| {
        tracing::info!(previous = %change.previous, current = %change.current, "mode changed");
    });

    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();

    tracing::info!("type `start` to begin, `quit` to leave");
    loop {
        tokio::select! {
            now = ticker.tick() => {
                let dt = now.duration_since(last_tick).as_secs_f32();
                last_tick = now;
                game.update(dt);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Status) => println!("{}", serde_json::to_string_pretty(&game.view())?),
                    Ok(ConsoleCommand::Input(input)) => {
                        if let Err(err) = game.handle_input(input) {
                            tracing::warn!(%err, "input ignored");
                        }
                    }
                    Err(err) => tracing::warn!(%err, "unrecognised command"),
                }
            }
        }
    }

    tracing::info!(mode = %game.mode(), "Shutting down");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
