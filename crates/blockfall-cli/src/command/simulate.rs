use std::path::PathBuf;

use blockfall_engine::{GameEngine, GameEvent, PieceSeed};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::util;

/// Random inputs issued between two gravity ticks.
const INPUTS_PER_TICK: usize = 4;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Stop a game after this many locked pieces
    #[arg(long, default_value_t = 500)]
    max_pieces: usize,
    /// Seed (32 hex characters) for a reproducible run
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
}

impl Input {
    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        match rng.random_range(0..10) {
            0..=2 => Input::MoveLeft,
            3..=5 => Input::MoveRight,
            6 | 7 => Input::Rotate,
            8 => Input::SoftDrop,
            _ => Input::HardDrop,
        }
    }

    fn apply(self, engine: &mut GameEngine) {
        match self {
            Input::MoveLeft => {
                engine.move_left();
            }
            Input::MoveRight => {
                engine.move_right();
            }
            Input::Rotate => {
                engine.rotate();
            }
            Input::SoftDrop => {
                engine.move_down();
            }
            Input::HardDrop => {
                engine.hard_drop();
            }
        }
    }
}

/// Sound cues an audio adapter would have played.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
struct CueTally {
    rotate: usize,
    clear: usize,
    game_over: usize,
}

impl CueTally {
    fn consume(&mut self, engine: &mut GameEngine) {
        for event in engine.drain_events() {
            match event {
                GameEvent::RotationAccepted => self.rotate += 1,
                GameEvent::LinesCleared(_) => self.clear += 1,
                GameEvent::GameOverEntered => self.game_over += 1,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct GameReport {
    seed: PieceSeed,
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    is_game_over: bool,
    cues: CueTally,
    board: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    best_score: usize,
    mean_score: f64,
    games: Vec<GameReport>,
}

fn play_game<R>(seed: PieceSeed, max_pieces: usize, rng: &mut R) -> GameReport
where
    R: Rng + ?Sized,
{
    let mut engine = GameEngine::with_seed(seed);
    let mut cues = CueTally::default();
    let mut inputs = 0;

    while !engine.is_game_over() && engine.stats().completed_pieces() < max_pieces {
        Input::random(rng).apply(&mut engine);
        inputs += 1;
        if inputs % INPUTS_PER_TICK == 0 {
            engine.move_down();
        }
        cues.consume(&mut engine);
    }

    let stats = engine.stats();
    GameReport {
        seed,
        score: stats.score(),
        completed_pieces: stats.completed_pieces(),
        total_cleared_lines: stats.total_cleared_lines(),
        line_cleared_counter: *stats.line_cleared_counter(),
        is_game_over: engine.is_game_over(),
        cues,
        board: engine
            .grid()
            .visible_rows()
            .map(|row| row.cells().iter().map(|cell| cell.as_char()).collect())
            .collect(),
    }
}

fn simulate(arg: &SimulateArg, rng: &mut Pcg32) -> SimulationReport {
    let mut games = Vec::with_capacity(arg.games);
    for i in 0..arg.games {
        let seed: PieceSeed = rng.random();
        let report = play_game(seed, arg.max_pieces, rng);
        eprintln!(
            "Game {}/{}: score {}, {} pieces, {} lines{}",
            i + 1,
            arg.games,
            report.score,
            report.completed_pieces,
            report.total_cleared_lines,
            if report.is_game_over { ", game over" } else { "" }
        );
        games.push(report);
    }

    let best_score = games.iter().map(|g| g.score).max().unwrap_or(0);
    #[expect(clippy::cast_precision_loss)]
    let mean_score = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| g.score).sum::<usize>() as f64 / games.len() as f64
    };

    SimulationReport {
        best_score,
        mean_score,
        games,
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let mut rng = match arg.seed {
        Some(seed) => Pcg32::from_seed(seed.to_bytes()),
        None => Pcg32::from_rng(&mut rand::rng()),
    };

    let report = simulate(arg, &mut rng);
    eprintln!(
        "Played {} games: best score {}, mean score {:.1}",
        report.games.len(),
        report.best_score,
        report.mean_score
    );

    util::save_json(&report, arg.output.as_deref())
}
