use std::path::PathBuf;

use blockfit_evaluator::player::{Move, SearchPlayer};

use super::PolicyKind;
use crate::{
    progress::StderrProgress,
    schema::{position::Position, record::Suggestion},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// Position JSON file with the board and the shapes to place
    position: PathBuf,
    /// Strategy used to select placements
    #[arg(long, value_enum, default_value_t)]
    policy: PolicyKind,
    /// Do not print search progress to stderr
    #[arg(long)]
    quiet: bool,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let SuggestArg {
        position,
        policy,
        quiet,
        output,
    } = arg;

    let position: Position = util::read_json_file("position", position)?;
    let board = position.board()?;
    let batch = position.batch();

    let player = SearchPlayer::new(policy.build());
    let mut progress = StderrProgress::new(*quiet);
    let plan = player.plan(&board, &batch, &mut progress);
    let moves = plan
        .iter()
        .flat_map(|path| path.moves().iter().copied().map(Move::from))
        .collect::<Vec<_>>();

    if !quiet && moves.is_empty() {
        eprintln!("No shape of the batch fits on the board");
    }

    let suggestion = Suggestion {
        policy: *policy,
        board,
        batch,
        plan,
        moves,
    };
    util::write_json(&suggestion, output.as_deref())
}
