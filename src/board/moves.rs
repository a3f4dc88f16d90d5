/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::Square;

/// Upper bound on the number of moves available in any position reachable with a standard set of pieces.
pub const MAX_NUM_MOVES: usize = 256;

/// Most destinations a single piece can have (a Chariot or Cannon in the middle of an empty board).
pub const MAX_PIECE_MOVES: usize = 17;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// An alias for an [`arrayvec::ArrayVec`] of destination squares for a single piece.
pub type SquareList = arrayvec::ArrayVec<Square, MAX_PIECE_MOVES>;

/// Represents a move made on a Xiangqi board: a piece travelling from one square to another.
///
/// Moves carry no knowledge of the piece being moved or captured; that is looked up on the
/// [`crate::Position`] they are applied to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Creates a new [`Move`] from `(row, col)` coordinate pairs.
    ///
    /// # Example
    /// ```
    /// # use xiangqi::Move;
    /// let mv = Move::from_coords((7, 1), (7, 4)).unwrap();
    /// assert_eq!(mv.to_string(), "b2e2");
    /// ```
    #[inline(always)]
    pub const fn from_coords(from: (u8, u8), to: (u8, u8)) -> Option<Self> {
        match (Square::new(from.0, from.1), Square::new(to.0, to.1)) {
            (Some(from), Some(to)) => Some(Self::new(from, to)),
            _ => None,
        }
    }

    /// Square this move starts from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Square this move lands on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Parses a move in ICCS notation, such as `b2e2` or `b2-e2`.
    pub fn from_iccs(s: &str) -> Result<Self> {
        let s = s.trim();
        let compact = s.replace('-', "");
        if compact.len() != 4 || !compact.is_ascii() {
            bail!("Move must be two ICCS squares, like \"b2e2\". Got {s:?}");
        }

        let from = compact[0..2].parse()?;
        let to = compact[2..4].parse()?;
        if from == to {
            bail!("Move {s:?} does not change squares");
        }

        Ok(Self::new(from, to))
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iccs(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:?} -> {:?})", self.from, self.to)
    }
}

impl PartialEq<&str> for Move {
    #[inline(always)]
    fn eq(&self, other: &&str) -> bool {
        self.to_string().eq(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iccs_moves() {
        let mv: Move = "b2e2".parse().unwrap();
        assert_eq!(mv.from(), Square::at(7, 1));
        assert_eq!(mv.to(), Square::at(7, 4));
        assert_eq!("b2-e2".parse::<Move>().unwrap(), mv);
        assert_eq!(mv, "b2e2");

        assert!("b2".parse::<Move>().is_err());
        assert!("b2b2".parse::<Move>().is_err());
        assert!("z2e2".parse::<Move>().is_err());
    }

    #[test]
    fn test_from_coords_bounds() {
        assert!(Move::from_coords((0, 1), (2, 2)).is_some());
        assert!(Move::from_coords((0, 9), (2, 2)).is_none());
    }
}
