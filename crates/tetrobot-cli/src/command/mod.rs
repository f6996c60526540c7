use clap::{Parser, Subcommand};

use self::{simulate::SimulateArg, solve::SolveArg};

mod simulate;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Solve one board snapshot and print the command sequence
    Solve(#[clap(flatten)] SolveArg),
    /// Play a local self-game to exercise the whole pipeline
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Solve(arg) => solve::run(&arg),
        Mode::Simulate(arg) => simulate::run(&arg),
    }
}
