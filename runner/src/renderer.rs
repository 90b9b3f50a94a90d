use std::io::Write;

use common::games::snake::{SimulationPhase, SnakeRenderer, SnakeSnapshot};
use common::log;

const EMPTY: char = '.';
const FOOD: char = '*';
const BODY: char = 'o';
const HEAD: char = '@';

/// Draws the board as text, one character per cell, rows top to bottom.
pub fn draw_frame(snapshot: &SnakeSnapshot) -> String {
    let width = snapshot.field_size.width;
    let mut grid = vec![vec![EMPTY; width]; snapshot.field_size.height];

    for food in &snapshot.food {
        grid[food.y][food.x] = FOOD;
    }
    for (index, segment) in snapshot.snake.iter().enumerate() {
        grid[segment.y][segment.x] = if index == 0 { HEAD } else { BODY };
    }

    let border = format!("+{}+", "-".repeat(width));
    let mut frame = String::with_capacity((width + 3) * (snapshot.field_size.height + 3));
    frame.push_str(&format!(
        "tick {} | score {} | level {} | {}ms | {}\n",
        snapshot.tick,
        snapshot.score,
        snapshot.level,
        snapshot.tick_interval.as_millis(),
        phase_label(snapshot.phase)
    ));
    frame.push_str(&border);
    frame.push('\n');
    for row in grid {
        frame.push('|');
        frame.extend(row);
        frame.push_str("|\n");
    }
    frame.push_str(&border);
    frame.push('\n');
    frame
}

fn phase_label(phase: SimulationPhase) -> String {
    match phase {
        SimulationPhase::Idle => "ready".to_string(),
        SimulationPhase::Running => "running".to_string(),
        SimulationPhase::Paused => "paused".to_string(),
        SimulationPhase::GameOver(reason) => format!("game over ({:?})", reason),
        SimulationPhase::Won => "board full".to_string(),
    }
}

/// Prints every frame to stdout.
pub struct AsciiRenderer<W: Write> {
    out: W,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SnakeRenderer for AsciiRenderer<W> {
    fn render(&mut self, snapshot: &SnakeSnapshot) {
        let frame = draw_frame(snapshot);
        if let Err(e) = self.out.write_all(frame.as_bytes()).and_then(|_| self.out.flush()) {
            log!("Failed to draw frame: {}", e);
        }
    }
}

/// Logs a line only when the phase or level changes.
#[derive(Default)]
pub struct StatusRenderer {
    last: Option<(SimulationPhase, u32)>,
}

impl SnakeRenderer for StatusRenderer {
    fn render(&mut self, snapshot: &SnakeSnapshot) {
        let current = (snapshot.phase, snapshot.level);
        if self.last == Some(current) {
            return;
        }
        self.last = Some(current);
        log!(
            "tick {}: {} at level {}, score {}, length {}",
            snapshot.tick,
            phase_label(snapshot.phase),
            snapshot.level,
            snapshot.score,
            snapshot.snake.len()
        );
    }
}
