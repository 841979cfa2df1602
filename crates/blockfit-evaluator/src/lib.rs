//! Move selection for the 8×8 block-placement puzzle.
//!
//! Every turn a batch of shapes has to be placed. The evaluator searches every order and
//! position the batch can be placed in, scores the boards each sequence leads to and
//! picks the sequence to play.
//!
//! # Architecture
//!
//! ```text
//! SearchPlayer (caches the selected path, hands out one move per call)
//!     ↓ uses
//! MoveEnumerator (recursive search over the batch, emits leaf paths)
//!     ↓ calls
//! PathPolicy (step and leaf statistics, path selection)
//!     ↓ uses
//! BoardAnalysis / LookaheadEvaluator (heuristics on a single board)
//! ```
//!
//! # Modules
//!
//! - [`game_path`] - [`Candidate`](game_path::Candidate) placements and the
//!   [`GamePath`](game_path::GamePath) sequences built from them
//! - [`board_analysis`] - Lazily computed static heuristics: positional score, largest
//!   empty rectangle, fragmentation of the empty space
//! - [`lookahead`] - Survivability against the universe of high-risk future batches
//! - [`path_policy`] - Scoring and selection strategies
//! - [`move_enumerator`] - The exhaustive search
//! - [`player`] - Per-turn entry point
//! - [`progress`] - Progress reporting hooks for long searches
//!
//! # Cost
//!
//! The search is exhaustive and explores every ordering of the batch, so a batch of three
//! small shapes on an open board visits hundreds of thousands of leaves. Crowded boards
//! additionally run the lookahead search on every leaf.

pub mod board_analysis;
pub mod game_path;
pub mod lookahead;
pub mod move_enumerator;
pub mod path_policy;
pub mod player;
pub mod progress;
