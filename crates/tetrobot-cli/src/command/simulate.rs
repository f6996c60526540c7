use rand::{Rng, SeedableRng, rngs::StdRng};
use tetrobot_engine::{Board, Cell, FallingPiece, PieceKind, Point, Rotation};
use tetrobot_solver::{PlacementSearch, commit_placement};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Glass side length
    #[arg(long, default_value_t = 18)]
    size: i32,
    /// Piece limit for the session
    #[arg(long, default_value_t = 500)]
    turns: usize,
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final glass
    #[arg(long)]
    print_glass: bool,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.size > 0, "glass size must be positive");

    let mut rng = match arg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let search = PlacementSearch::default();
    let spawn = Point::new(arg.size / 2, arg.size - 1);
    let mut board = Board::new(
        arg.size,
        FallingPiece {
            kind: rng.random(),
            anchor: spawn,
        },
    );

    let mut pieces_played = 0_usize;
    let mut rows_cleared = 0_usize;
    for _ in 0..arg.turns {
        let kind: PieceKind = rng.random();
        if !spawn_piece(&mut board, kind, spawn) {
            break; // the stack reached the spawn cells
        }

        let Ok(placement) = search.best_move(&mut board) else {
            break; // topped out
        };
        commit_placement(&mut board, kind, &placement);
        rows_cleared += board.clear_complete_rows();
        pieces_played += 1;
    }

    println!("pieces played: {pieces_played}");
    println!("rows cleared:  {rows_cleared}");
    if arg.print_glass {
        println!("{board}");
    }
    Ok(())
}

/// Paints the next piece at its spawn pose, the way the remote game reports
/// a new turn; each solver call then exercises the clear phase too. Returns
/// `false` when the spawn cells are already occupied.
fn spawn_piece(board: &mut Board, kind: PieceKind, spawn: Point) -> bool {
    let cells = kind.predict_cells(Rotation::R0, spawn);
    if cells
        .iter()
        .any(|p| !board.is_out_of_field(p.x, p.y) && !board.is_free(p.x, p.y))
    {
        return false;
    }
    board.set_falling_piece(FallingPiece {
        kind,
        anchor: spawn,
    });
    for p in cells {
        board.set(p.x, p.y, Cell::Piece(kind));
    }
    true
}
