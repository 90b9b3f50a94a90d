use std::path::{Path, PathBuf};

use common::games::SessionRng;
use common::games::snake::{
    BotController, Direction, SimulationPhase, SnakeBotType, SnakeGameState, SnakeSession, TickOutcome,
};
use common::log;
use common::replay::{ReplayPlayer, ReplayRecorder, generate_replay_filename, save_replay};
use common::version::VERSION;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::config::ReplayConfig;

/// Where direction requests come from.
pub enum TurnSource {
    Bot { bot_type: SnakeBotType, rng: SessionRng },
    Replay(ReplayPlayer),
}

impl TurnSource {
    pub fn next_turns(&mut self, state: &SnakeGameState) -> Vec<Direction> {
        match self {
            TurnSource::Bot { bot_type, rng } => BotController::calculate_move(*bot_type, state, rng)
                .into_iter()
                .collect(),
            TurnSource::Replay(player) => player.turns_for_tick(state.tick()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub best_score: u32,
    pub phase: SimulationPhase,
    pub interrupted: bool,
}

/// Applies the turns for the coming tick and advances the session once.
pub fn step(session: &mut SnakeSession, input: &mut TurnSource, recorder: Option<&mut ReplayRecorder>) -> TickOutcome {
    let tick = session.state().tick();
    let turns = input.next_turns(session.state());

    if let Some(recorder) = recorder {
        for direction in &turns {
            recorder.record_turn(tick, *direction);
        }
    }
    for direction in turns {
        session.turn(direction);
    }

    session.tick()
}

/// Drives the session from a tokio interval until the game ends, `max_ticks` is reached or
/// Ctrl+C arrives. The interval is re-armed whenever the game speeds up.
pub async fn run_game(
    session: &mut SnakeSession,
    mut input: TurnSource,
    mut recorder: Option<&mut ReplayRecorder>,
    max_ticks: Option<u64>,
) -> RunSummary {
    let period = session.state().tick_interval();
    let mut tick_interval_timer = interval_at(Instant::now() + period, period);
    tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listen_for_ctrl_c = true;
    let mut interrupted = false;

    loop {
        tokio::select! {
            _ = tick_interval_timer.tick() => {}
            result = &mut ctrl_c, if listen_for_ctrl_c => {
                match result {
                    Ok(()) => {
                        log!("Shutdown signal received, stopping the game");
                        interrupted = true;
                        break;
                    }
                    Err(e) => {
                        log!("Failed to listen for Ctrl+C: {}", e);
                        listen_for_ctrl_c = false;
                        continue;
                    }
                }
            }
        }

        let outcome = step(session, &mut input, recorder.as_deref_mut());

        if let Some(level) = outcome.level_up {
            log!("Level {} reached, score {}", level, outcome.snapshot.score);
        }
        if let Some(period) = outcome.tick_interval {
            tick_interval_timer = interval_at(Instant::now() + period, period);
            tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        if outcome.is_game_over() {
            break;
        }
        if let Some(max_ticks) = max_ticks
            && session.state().tick() >= max_ticks
        {
            log!("Tick limit {} reached", max_ticks);
            break;
        }
    }

    let state = session.state();
    RunSummary {
        ticks: state.tick(),
        score: state.score(),
        best_score: session.best_score(),
        phase: state.phase(),
        interrupted,
    }
}

/// Writes the replay into the configured directory and returns the file path.
pub fn save_recorded_replay(recorder: &mut ReplayRecorder, replay_config: &ReplayConfig) -> Option<PathBuf> {
    let replay = recorder.finalize();
    let file_name = generate_replay_filename(VERSION);
    let replay_dir = Path::new(&replay_config.location);

    if let Err(e) = std::fs::create_dir_all(replay_dir) {
        log!("Failed to create replay directory: {}", e);
        return None;
    }

    let file_path = replay_dir.join(&file_name);
    match save_replay(&file_path, &replay) {
        Ok(()) => {
            log!("Replay saved to: {}", file_path.display());
            Some(file_path)
        }
        Err(e) => {
            log!("Failed to save replay: {}", e);
            None
        }
    }
}
