//! `board3d` - headless driver for the interaction core
//!
//! Replays clicks, drags or moves against a fresh game store and prints the
//! resulting snapshot as JSON. Logs go to stderr.
//!
//! ```text
//! board3d click e2 e4
//! board3d drag g1 0.5 -1.5
//! board3d --fen "8/4P3/8/8/8/8/k7/4K3 w - - 0 1" moves e7e8n
//! ```

use anyhow::{bail, Context, Result};
use board3d_chess::board::{
    all_squares, square_shade, square_to_position, Position3D, Square, SquareShade,
};
use board3d_chess::core::{load_settings, settings_path};
use board3d_chess::game::resources::GameStore;
use board3d_chess::game::types::PieceKind;
use board3d_chess::input::{DragController, SelectionController};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "board3d", version, about = "Drive the 3D chessboard interaction core")]
struct Cli {
    /// Start from this position instead of the configured one
    #[arg(long)]
    fen: Option<String>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Click squares in order
    Click { squares: Vec<String> },
    /// Drag the piece on FROM to the board-space point (X, 0, Z)
    Drag {
        from: Square,
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },
    /// Play moves given as coordinates, e.g. e2e4 or e7e8q
    Moves { moves: Vec<String> },
    /// Take back moves
    Undo {
        #[arg(default_value_t = 1)]
        count: usize,
    },
    /// List every square with its shade and 3D position
    Squares,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_file = cli.settings.clone().unwrap_or_else(settings_path);
    let settings = load_settings(&settings_file);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(GameStore::with_settings(settings));
    if let Some(fen) = &cli.fen {
        store
            .load_position(fen)
            .with_context(|| format!("cannot start from '{fen}'"))?;
    }

    run(&store, cli.command)?;

    let snapshot = store.snapshot();
    if let Some(fault) = &snapshot.engine_fault {
        warn!("[CLI] Engine fault: {}", fault);
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run(store: &Arc<GameStore>, command: Command) -> Result<()> {
    match command {
        Command::Click { squares } => {
            let selection = SelectionController::new(Arc::clone(store));
            for raw in &squares {
                selection.handle_square_click_str(raw);
            }
        }
        Command::Drag { from, x, z } => {
            let mut drag = DragController::new(Arc::clone(store));
            if !drag.start_drag(from, square_to_position(from), Position3D::default()) {
                warn!("[CLI] Nothing to drag on {}", from);
                return Ok(());
            }
            drag.update_drag(Position3D::new(x, 0.0, z));
            drag.flush_frame();
            let moved = drag.end_drag();
            info!("[CLI] Drag from {} to ({}, {}) moved: {}", from, x, z, moved);
        }
        Command::Moves { moves } => {
            for text in &moves {
                let (from, to, promotion) = parse_coordinate_move(text)?;
                if !store.make_move_with_promotion(from, to, promotion) {
                    warn!("[CLI] Illegal move {}", text);
                }
            }
        }
        Command::Undo { count } => {
            for _ in 0..count {
                if !store.undo_move() {
                    warn!("[CLI] Nothing left to undo");
                    break;
                }
            }
        }
        Command::Squares => {
            for square in all_squares() {
                let position = square_to_position(square);
                let shade = match square_shade(square) {
                    SquareShade::Light => "light",
                    SquareShade::Dark => "dark",
                };
                println!("{square} {shade} ({}, {}, {})", position.x, position.y, position.z);
            }
        }
    }
    Ok(())
}

/// Parse `e2e4` / `e7e8q` into squares and an optional promotion piece
fn parse_coordinate_move(text: &str) -> Result<(Square, Square, Option<PieceKind>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        bail!("'{text}' is not a coordinate move like e2e4");
    }
    let from: Square = text[0..2].parse()?;
    let to: Square = text[2..4].parse()?;
    let promotion = match text[4..].chars().next() {
        Some(symbol) => match PieceKind::from_symbol(symbol) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => bail!("'{symbol}' is not a promotion piece"),
        },
        None => None,
    };
    Ok((from, to, promotion))
}
