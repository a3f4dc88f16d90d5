/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::Color;

/// Represents a single intersection on a Xiangqi board.
///
/// Squares are addressed by `(row, col)`, both 0-indexed, with row 0 being Black's back rank
/// and row 9 being Red's back rank. Internally, this is stored as `row * 9 + col`.
///
/// When printed, a square uses [ICCS](https://www.xqbase.com/protocol/cchess_move.htm) notation:
/// files `a`-`i` from left to right and ranks `0`-`9` counted from Red's side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Number of rows on the board.
    pub const ROWS: u8 = 10;

    /// Number of columns on the board.
    pub const COLS: u8 = 9;

    /// Number of squares on the board.
    pub const COUNT: usize = (Self::ROWS * Self::COLS) as usize;

    /// Creates a new [`Square`] from a row and column, returning `None` if either is out of bounds.
    ///
    /// # Example
    /// ```
    /// # use xiangqi::Square;
    /// assert!(Square::new(9, 8).is_some());
    /// assert!(Square::new(10, 0).is_none());
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < Self::ROWS && col < Self::COLS {
            Some(Self(row * Self::COLS + col))
        } else {
            None
        }
    }

    /// Creates a new [`Square`] from a row and column without bounds checks.
    ///
    /// # Panics
    /// If `row` or `col` is out of bounds and debug assertions are enabled.
    #[inline(always)]
    pub const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < Self::ROWS && col < Self::COLS);
        Self(row * Self::COLS + col)
    }

    /// Creates a [`Square`] from an index in `[0, 90)`.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// An iterator over all squares, in row-major order starting at `(0, 0)`.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Row of this square, in `[0, 10)`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / Self::COLS
    }

    /// Column of this square, in `[0, 9)`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % Self::COLS
    }

    /// Index of this square, usable for table lookups.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the square offset by `(dr, dc)`, or `None` if that leaves the board.
    #[inline(always)]
    pub const fn offset(&self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// Returns `true` if this square lies within `color`'s palace.
    ///
    /// Each palace is columns 3-5 of its side's back three rows.
    #[inline(always)]
    pub const fn in_palace(&self, color: Color) -> bool {
        let row = self.row();
        let col = self.col();
        let rows_ok = match color {
            Color::Red => row >= 7,
            Color::Black => row <= 2,
        };
        rows_ok && col >= 3 && col <= 5
    }

    /// Returns `true` if this square is on `color`'s side of the river.
    ///
    /// The river lies between rows 4 and 5.
    #[inline(always)]
    pub const fn on_own_side(&self, color: Color) -> bool {
        match color {
            Color::Red => self.row() >= 5,
            Color::Black => self.row() <= 4,
        }
    }

    /// Returns `true` if a `color` piece on this square has crossed the river.
    #[inline(always)]
    pub const fn across_river(&self, color: Color) -> bool {
        !self.on_own_side(color)
    }

    /// Returns the row of this square as seen from `color`'s side, so that tables authored for Red
    /// can be mirrored vertically for Black.
    #[inline(always)]
    pub const fn relative_row(&self, color: Color) -> u8 {
        match color {
            Color::Red => self.row(),
            Color::Black => Self::ROWS - 1 - self.row(),
        }
    }

    /// File letter of this square in ICCS notation.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col()) as char
    }

    /// Rank digit of this square in ICCS notation, counted from Red's back rank.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'0' + (Self::ROWS - 1 - self.row())) as char
    }

    /// Parses a square from ICCS notation, like `e0` (Red's General) or `b7` (Black's left Cannon).
    ///
    /// # Example
    /// ```
    /// # use xiangqi::Square;
    /// let sq = Square::from_iccs("b2").unwrap();
    /// assert_eq!((sq.row(), sq.col()), (7, 1));
    /// ```
    pub fn from_iccs(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be two characters (file a-i, rank 0-9). Got {s:?}");
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='i').contains(&file) {
            bail!("Invalid file {file:?} in square {s:?}: must be between a and i");
        }
        let rank = rank
            .to_digit(10)
            .ok_or_else(|| anyhow!("Invalid rank {rank:?} in square {s:?}: must be between 0 and 9"))?;

        let col = file as u8 - b'a';
        let row = Self::ROWS - 1 - rank as u8;
        Ok(Self::at(row, col))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iccs(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row(), self.col())
    }
}
