use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde_json::json;
use tetrobot_engine::{Board, Rotation};
use tetrobot_evaluator::BoardFeatures;
use tetrobot_solver::{PlacementSearch, commit_placement, to_commands};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Board snapshot JSON file; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Also print the chosen placement and resulting board features as JSON
    #[arg(long)]
    explain: bool,
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let mut board = read_snapshot(arg.input.as_deref())?;
    let falling = board.falling_piece();

    let search = PlacementSearch::default();
    let placement = search.best_move(&mut board)?;
    let commands = to_commands(Rotation::R0, falling.anchor.x, &placement);
    println!("{commands}");

    if arg.explain {
        commit_placement(&mut board, falling.kind, &placement);
        let explain = json!({
            "piece": falling.kind,
            "rotation": placement.rotation,
            "anchor": placement.anchor,
            "features": BoardFeatures::from_board(&board),
        });
        println!("{}", serde_json::to_string_pretty(&explain)?);
    }
    Ok(())
}

fn read_snapshot(path: Option<&Path>) -> anyhow::Result<Board> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid board snapshot in {}", path.display()))
        }
        None => serde_json::from_reader(io::stdin().lock()).context("invalid board snapshot"),
    }
}
