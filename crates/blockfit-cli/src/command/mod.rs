use blockfit_evaluator::path_policy::{FullEvalPolicy, PathPolicy, PositionalPolicy};
use clap::{Parser, Subcommand};
use serde::Serialize;

use self::{auto_play::AutoPlayArg, suggest::SuggestArg};

mod auto_play;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a seeded game with the search player
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Suggest the placements for a single position
    Suggest(#[clap(flatten)] SuggestArg),
}

/// Strategy used to score and select search paths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PolicyKind {
    /// Positional score on open boards, lookahead survivability on crowded ones
    #[default]
    FullEval,
    /// Positional score only
    Positional,
}

impl PolicyKind {
    pub(crate) fn build(self) -> Box<dyn PathPolicy> {
        match self {
            PolicyKind::FullEval => Box::new(FullEvalPolicy::new()),
            PolicyKind::Positional => Box::new(PositionalPolicy),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Suggest(arg) => suggest::run(&arg)?,
    }
    Ok(())
}
