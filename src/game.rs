/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::HashMap, fmt};

use anyhow::{bail, Result};

use crate::{
    is_checkmate, is_in_check, is_legal, is_stalemate, legal_moves, Color, Move, MoveList, Position,
    PositionKey,
};

/// Number of times a position must occur for the game to be drawn by repetition.
pub const REPETITION_LIMIT: u32 = 3;

/// How a game of Xiangqi ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move is in check and has no legal moves.
    Checkmate { winner: Color },

    /// The side to move is not in check, but has no legal moves. A draw.
    Stalemate,

    /// The same position, with the same side to move, occurred [`REPETITION_LIMIT`] times. A draw.
    Repetition,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(f, "Checkmate! {} wins", winner.name()),
            Self::Stalemate => write!(f, "Stalemate: draw"),
            Self::Repetition => write!(f, "Threefold repetition: draw"),
        }
    }
}

/// A game of Xiangqi in progress.
///
/// Wraps a [`Position`] with whose turn it is, the moves played so far,
/// and how many times each position has occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// The current board.
    position: Position,

    /// Whose turn it is.
    side_to_move: Color,

    /// All moves made since the game began.
    moves: Vec<Move>,

    /// Occurrences of every position reached so far, including the initial one.
    repetitions: HashMap<PositionKey, u32>,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Position`], with `side_to_move` to play first.
    pub fn new(position: Position, side_to_move: Color) -> Self {
        let mut repetitions = HashMap::default();
        repetitions.insert(position.key(side_to_move), 1);

        Self {
            position,
            side_to_move,
            moves: Vec::default(),
            repetitions,
        }
    }

    /// Creates a new [`Game`] from the board field of a FEN string.
    #[inline(always)]
    pub fn from_fen(fen: &str, side_to_move: Color) -> Result<Self> {
        Ok(Self::new(Position::from_fen(fen)?, side_to_move))
    }

    /// Fetch the current [`Position`].
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Moves made so far, oldest first.
    #[inline(always)]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves (plies) made so far. Zero before Red's first move.
    #[inline(always)]
    pub fn move_number(&self) -> usize {
        self.moves.len()
    }

    /// Canonical key of the current position and side to move.
    #[inline(always)]
    pub fn key(&self) -> PositionKey {
        self.position.key(self.side_to_move)
    }

    /// How many times the current position has occurred.
    #[inline(always)]
    pub fn repetitions(&self) -> u32 {
        self.repetitions.get(&self.key()).copied().unwrap_or_default()
    }

    /// Returns `true` if the side to move is in check.
    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.position, self.side_to_move)
    }

    /// All legal moves for the side to move.
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.position, self.side_to_move)
    }

    /// Applies the move, if it is legal to make. If it is not legal, returns an `Err` explaining why.
    pub fn make_move(&mut self, mv: Move) -> Result<()> {
        let Some(piece) = self.position.piece_at(mv.from()) else {
            bail!("No piece on {} to move", mv.from());
        };

        if piece.color() != self.side_to_move {
            bail!("Cannot move {piece} on {}: it is {}'s turn", mv.from(), self.side_to_move);
        }

        if !is_legal(&self.position, mv) {
            bail!("Illegal move {mv} for {piece}");
        }

        self.position.make_move(mv);
        self.side_to_move = self.side_to_move.opponent();
        self.moves.push(mv);
        *self.repetitions.entry(self.key()).or_default() += 1;

        Ok(())
    }

    /// Parses `mv` (such as `b2e2`) and applies it, if it is legal.
    #[inline(always)]
    pub fn make_move_str(&mut self, mv: &str) -> Result<()> {
        self.make_move(mv.parse()?)
    }

    /// Returns the [`Outcome`] of this game, if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        if is_checkmate(&self.position, self.side_to_move) {
            Some(Outcome::Checkmate {
                winner: self.side_to_move.opponent(),
            })
        } else if is_stalemate(&self.position, self.side_to_move) {
            Some(Outcome::Stalemate)
        } else if self.repetitions() >= REPETITION_LIMIT {
            Some(Outcome::Repetition)
        } else {
            None
        }
    }
}

impl Default for Game {
    /// A new game from the standard starting position, with Red to move.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Position::default(), Color::Red)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.position)?;
        write!(f, "{} to move", self.side_to_move.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_moves_are_rejected() {
        let mut game = Game::default();

        // Empty square, wrong side, and a Horse with a blocked leg
        assert!(game.make_move_str("e5e4").is_err());
        assert!(game.make_move_str("b9c7").is_err());
        assert!(game.make_move_str("b0d1").is_err());
        assert_eq!(game.move_number(), 0);

        game.make_move_str("b2e2").unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.move_number(), 1);
        assert_eq!(game.moves(), ["b2e2".parse::<Move>().unwrap()]);
    }

    #[test]
    fn test_repetition_is_a_draw() {
        let mut game = Game::default();
        assert_eq!(game.repetitions(), 1);

        for round in 2..=3 {
            for mv in ["b0c2", "b9c7", "c2b0", "c7b9"] {
                assert_eq!(game.outcome(), None);
                game.make_move_str(mv).unwrap();
            }
            assert_eq!(game.repetitions(), round);
        }

        assert_eq!(game.outcome(), Some(Outcome::Repetition));
    }

    #[test]
    fn test_checkmate_outcome() {
        let game = Game::from_fen("3k5/R8/3R5/9/9/9/9/9/9/4K4", Color::Black).unwrap();
        assert!(game.is_in_check());
        assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Red }));

        let game = Game::from_fen("3k5/5R3/9/9/9/9/9/9/9/2R1K4", Color::Black).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    }
}
