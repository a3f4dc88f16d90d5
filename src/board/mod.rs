/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Pseudo-legal move generation for every piece kind.
mod movegen;
/// Structs for modeling the movement of a piece on a Xiangqi board.
mod moves;
/// Utility functions for performance testing of move generation.
mod perft;
/// Colors, piece kinds, and pieces.
mod piece;
/// A Xiangqi board, its FEN notation, and its canonical key.
mod position;
/// Check detection, legal move filtering, and terminal states.
mod rules;
/// Squares of the board and the zones (palaces, river) they belong to.
mod square;
/// A generic container with one element per square.
mod table;

pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use rules::*;
pub use square::*;
pub use table::*;
