use common::games::snake::{SnakeEvent, SnakeObserver};
use common::log;

use crate::config::AudioConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator sweeping from `start_hz` to `end_hz`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneCue {
    pub name: &'static str,
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_ms: u32,
}

pub const MOVE_CUE: ToneCue = ToneCue {
    name: "move",
    waveform: Waveform::Square,
    start_hz: 220.0,
    end_hz: 220.0,
    duration_ms: 30,
};

pub const EAT_CUE: ToneCue = ToneCue {
    name: "eat",
    waveform: Waveform::Sine,
    start_hz: 880.0,
    end_hz: 440.0,
    duration_ms: 200,
};

pub const LEVEL_UP_CUE: ToneCue = ToneCue {
    name: "levelUp",
    waveform: Waveform::Sine,
    start_hz: 440.0,
    end_hz: 880.0,
    duration_ms: 300,
};

pub const GAME_OVER_CUE: ToneCue = ToneCue {
    name: "gameOver",
    waveform: Waveform::Sawtooth,
    start_hz: 440.0,
    end_hz: 110.0,
    duration_ms: 600,
};

pub const WIN_CUE: ToneCue = ToneCue {
    name: "win",
    waveform: Waveform::Sine,
    start_hz: 523.25,
    end_hz: 1046.5,
    duration_ms: 500,
};

pub fn cue_for(event: &SnakeEvent) -> ToneCue {
    match event {
        SnakeEvent::DirectionChanged(_) => MOVE_CUE,
        SnakeEvent::FoodEaten { .. } => EAT_CUE,
        SnakeEvent::LevelUp { .. } => LEVEL_UP_CUE,
        SnakeEvent::GameOver { .. } => GAME_OVER_CUE,
        SnakeEvent::BoardFull { .. } => WIN_CUE,
    }
}

/// Stands in for a sound device: every cue that would be played is logged.
pub struct ToneLogger {
    config: AudioConfig,
    played: Vec<&'static str>,
}

impl ToneLogger {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            played: Vec::new(),
        }
    }

    pub fn played(&self) -> &[&'static str] {
        &self.played
    }
}

impl SnakeObserver for ToneLogger {
    fn on_event(&mut self, event: &SnakeEvent) {
        if !self.config.enabled {
            return;
        }

        let cue = cue_for(event);
        if cue == MOVE_CUE && !self.config.move_cues {
            return;
        }

        log!(
            "Tone {} ({:?} {}Hz -> {}Hz, {}ms)",
            cue.name,
            cue.waveform,
            cue.start_hz,
            cue.end_hz,
            cue.duration_ms
        );
        self.played.push(cue.name);
    }
}
