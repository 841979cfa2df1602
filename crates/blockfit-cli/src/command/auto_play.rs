use std::path::PathBuf;

use anyhow::Context;
use blockfit_engine::{BatchSeed, GameField};
use blockfit_evaluator::player::SearchPlayer;
use chrono::Utc;
use rand::Rng as _;

use super::PolicyKind;
use crate::{
    progress::StderrProgress,
    schema::record::{GameRecord, TurnRecord},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Seed for the batch generator, as 32 hex digits (random when omitted)
    #[arg(long)]
    seed: Option<BatchSeed>,
    /// Stop after this many turns even if the game is not over
    #[arg(long, default_value_t = 100)]
    max_turns: usize,
    /// Strategy used to select placements
    #[arg(long, value_enum, default_value_t)]
    policy: PolicyKind,
    /// Do not print boards and search progress to stderr
    #[arg(long)]
    quiet: bool,
    /// Output file path for the game record (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        seed,
        max_turns,
        policy,
        quiet,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut field = GameField::with_seed(seed);
    let mut player = SearchPlayer::new(policy.build());
    let mut progress = StderrProgress::new(*quiet);
    let played_at = Utc::now();

    if !quiet {
        eprintln!("Seed: {seed}");
    }

    let mut turns = Vec::new();
    let mut game_over = false;
    while !game_over && field.stats().turns() <= *max_turns {
        let turn = field.stats().turns();
        let mut record = TurnRecord {
            turn,
            board_before: *field.board(),
            batch: field.batch().clone(),
            moves: Vec::new(),
        };

        // The field deals a new batch, and starts a new turn, once the last shape is placed.
        while field.stats().turns() == turn {
            let Some(mv) = player.make_move(field.board(), field.batch(), &mut progress) else {
                game_over = true;
                break;
            };
            field
                .place(mv.shape_id, mv.placement)
                .with_context(|| format!("Search player made an invalid move {mv}"))?;
            record.moves.push(mv);
        }

        if !quiet {
            let moves = record
                .moves
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            eprintln!("Turn {turn}: {moves} (score {})", field.board().score());
            eprintln!("{}", field.board());
        }
        turns.push(record);
    }

    let record = GameRecord {
        played_at,
        seed,
        policy: *policy,
        final_score: field.board().score(),
        game_over,
        final_board: *field.board(),
        final_stats: field.stats().clone(),
        turns,
    };

    if !quiet {
        let stats = &record.final_stats;
        eprintln!(
            "{}: score {}, {} pieces, {} lines cleared",
            if game_over { "Game over" } else { "Turn limit reached" },
            record.final_score,
            stats.placed_pieces(),
            stats.total_cleared_lines(),
        );
    }

    util::write_json(&record, output.as_deref())
}
