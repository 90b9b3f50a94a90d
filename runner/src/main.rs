mod config;
mod renderer;
mod snake_runner;
mod tone;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use common::games::SessionRng;
use common::games::snake::{SnakeBotType, SnakeGameState, SnakeRenderer, SnakeSession};
use common::logger::{self, LogTarget};
use common::replay::{ReplayPlayer, ReplayRecorder, load_replay};
use common::stats::FileStatsStore;
use common::version::VERSION;
use common::{GameId, log};

use renderer::{AsciiRenderer, StatusRenderer};
use snake_runner::{TurnSource, run_game, save_recorded_replay};
use tone::ToneLogger;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BotArg {
    Efficient,
    Random,
}

impl From<BotArg> for SnakeBotType {
    fn from(bot: BotArg) -> Self {
        match bot {
            BotArg::Efficient => SnakeBotType::Efficient,
            BotArg::Random => SnakeBotType::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "mini_arcade_runner", version = VERSION)]
struct Args {
    /// Config file, defaults to mini_arcade_runner_config.yaml next to the binary
    #[arg(long)]
    config: Option<String>,

    /// Seed for food placement and the bot; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Bot at the wheel, overrides the config
    #[arg(long, value_enum)]
    bot: Option<BotArg>,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Draw every frame on stdout, log lines move to stderr
    #[arg(long)]
    render: bool,

    /// Play back a saved replay instead of a bot game
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Forget the stored Snake record before playing
    #[arg(long)]
    reset_stats: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    let target = if args.render { LogTarget::Stderr } else { LogTarget::Stdout };
    logger::init_logger(prefix, target);

    let config = config::get_config_manager(args.config.as_deref()).get_config()?;

    let replay_player = match &args.replay {
        Some(path) => {
            let replay = load_replay(path)?;
            log!(
                "Loaded replay {} (engine {}, {} turns)",
                path.display(),
                replay.engine_version,
                replay.turns.len()
            );
            Some(ReplayPlayer::new(replay))
        }
        None => None,
    };

    let (state, input, mut recorder) = match replay_player {
        Some(player) => (player.new_game()?, TurnSource::Replay(player), None),
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            let bot_type = args.bot.map(SnakeBotType::from).unwrap_or(config.bot);
            log!("Starting {:?} bot game with seed {}", bot_type, seed);

            let state = SnakeGameState::new(config.snake.clone(), SessionRng::new(seed))?;
            let input = TurnSource::Bot {
                bot_type,
                rng: SessionRng::new(seed.wrapping_add(1)),
            };
            let recorder = config
                .replays
                .save
                .then(|| ReplayRecorder::new(VERSION.to_string(), seed, config.snake.clone()));
            (state, input, recorder)
        }
    };

    let renderer: Box<dyn SnakeRenderer> = if args.render {
        Box::new(AsciiRenderer::new(std::io::stdout()))
    } else {
        Box::new(StatusRenderer::default())
    };
    let stats_store = FileStatsStore::from_yaml_file(&config.stats.file);

    let mut session = SnakeSession::new(GameId::snake(), state, renderer, Box::new(stats_store));
    session.add_observer(Box::new(ToneLogger::new(config.audio.clone())));
    if args.reset_stats {
        session.reset_stats();
    }
    log!("Best score so far: {}", session.best_score());

    let summary = run_game(&mut session, input, recorder.as_mut(), args.max_ticks).await;

    log!(
        "Game finished after {} ticks: {:?}, score {}, best {}",
        summary.ticks,
        summary.phase,
        summary.score,
        summary.best_score
    );

    if let Some(recorder) = recorder.as_mut() {
        save_recorded_replay(recorder, &config.replays);
    }

    Ok(())
}
