/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and the rules of Xiangqi.
mod board;

/// Fixed replies for the first moves of a game.
mod book;

/// Command-line arguments and the commands understood by the engine.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Evaluation of Xiangqi positions.
mod eval;

/// A game record: moves played, repetitions, and outcome.
mod game;

/// History and killer heuristics for move ordering.
mod history;

/// Lazily sorted move lists.
mod movepicker;

/// Piece-Square tables.
mod psqt;

/// Numerical scores and mate scores.
mod score;

/// Main engine logic; all search related code.
mod search;

/// Skill levels and choosing the engine's move.
mod selector;

/// Transposition table.
mod ttable;

/// Tunable constants.
mod tune;

pub use board::*;
pub use book::*;
pub use cli::*;
pub use engine::*;
pub use eval::*;
pub use game::*;
pub use history::*;
pub use movepicker::*;
pub use psqt::*;
pub use score::*;
pub use search::*;
pub use selector::*;
pub use ttable::*;
