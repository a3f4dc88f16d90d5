/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{Color, Move, Piece, PieceKind, Square, Table};

/// FEN board field for the starting position of Xiangqi.
pub const FEN_STARTPOS: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR";

/// Most pieces of each kind a single side may own.
const MAX_PIECES_PER_KIND: [u8; PieceKind::COUNT] = [1, 2, 2, 2, 2, 2, 5];

/// The state of a Xiangqi board: which piece, if any, stands on each of the 90 squares.
///
/// Side-to-move is *not* part of a [`Position`]; it is passed alongside it.
/// Positions are small [`Copy`] values, and applying a move produces a new one,
/// so search branches never observe one another's boards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Table<Option<Piece>>,
}

impl Position {
    /// Creates a [`Position`] with no pieces on it.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            board: Table::splat(None),
        }
    }

    /// Creates a [`Position`] from the board field of a Xiangqi FEN string.
    ///
    /// Rows are listed from Black's back rank (row 0) to Red's (row 9), separated by `/`.
    /// Uppercase letters are Red pieces, lowercase are Black, and digits are runs of empty squares.
    /// Anything after the first whitespace (such as a side-to-move field) is ignored.
    ///
    /// # Example
    /// ```
    /// # use xiangqi::{Position, FEN_STARTPOS};
    /// let pos = Position::from_fen(FEN_STARTPOS).unwrap();
    /// assert_eq!(pos, Position::default());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let Some(placements) = fen.split_whitespace().next() else {
            bail!("Empty FEN string");
        };

        let rows = placements.split('/').collect::<Vec<_>>();
        if rows.len() != Square::ROWS as usize {
            bail!(
                "FEN must have {} rows separated by '/'. Found {} in {fen:?}",
                Square::ROWS,
                rows.len()
            );
        }

        let mut pos = Self::empty();
        let mut counts = [[0u8; PieceKind::COUNT]; Color::COUNT];

        for (row, placement) in rows.into_iter().enumerate() {
            let mut col = 0u8;
            for c in placement.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 {
                        bail!("Row {row} of FEN {fen:?} skips zero squares");
                    }
                    col = col
                        .checked_add(skip as u8)
                        .filter(|&col| col <= Square::COLS)
                        .ok_or_else(|| {
                            anyhow!("Row {row} of FEN {fen:?} has more than {} columns", Square::COLS)
                        })?;
                } else {
                    if col >= Square::COLS {
                        bail!("Row {row} of FEN {fen:?} has more than {} columns", Square::COLS);
                    }
                    let piece = Piece::from_char(c)?;
                    let count = &mut counts[piece.color().index()][piece.kind().index()];
                    *count += 1;
                    if *count > MAX_PIECES_PER_KIND[piece.kind().index()] {
                        bail!("FEN {fen:?} has too many pieces of kind {:?}", piece.name());
                    }
                    pos.place(piece, Square::at(row as u8, col));
                    col += 1;
                }
            }

            if col != Square::COLS {
                bail!(
                    "Row {row} of FEN {fen:?} spans {col} columns instead of {}",
                    Square::COLS
                );
            }
        }

        Ok(pos)
    }

    /// Generates the board field of a FEN string for this position.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(64);

        for row in 0..Square::ROWS {
            let mut empty = 0;
            for col in 0..Square::COLS {
                if let Some(piece) = self.piece_at(Square::at(row, col)) {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row + 1 < Square::ROWS {
                fen.push('/');
            }
        }

        fen
    }

    /// Fetches the piece on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        *self.board.get(square)
    }

    /// Returns `true` if there is any piece on `square`.
    #[inline(always)]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Returns the color of the piece on `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.board.set(square, Some(piece));
    }

    /// Removes and returns the piece on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.board[square].take()
    }

    /// Applies `mv` to this position in place, returning the captured piece, if any.
    ///
    /// Legality is not checked. If there is no piece at `mv.from()`, only the destination is cleared.
    #[inline(always)]
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let moved = self.take(mv.from());
        let captured = self.take(mv.to());
        if let Some(piece) = moved {
            self.place(piece, mv.to());
        }
        captured
    }

    /// Copy-make: returns a new position with `mv` applied, leaving `self` untouched.
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }

    /// Finds the square of `color`'s General, if it is on the board.
    #[inline(always)]
    pub fn general(&self, color: Color) -> Option<Square> {
        let general = Piece::new(color, PieceKind::General);
        self.pieces()
            .find_map(|(square, piece)| (piece == general).then_some(square))
    }

    /// Iterates over every occupied square and its piece, Black's back rank first.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .filter_map(|(square, piece)| piece.map(|piece| (square, piece)))
    }

    /// Iterates over every square occupied by a `color` piece.
    #[inline(always)]
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Number of pieces on the board.
    #[inline(always)]
    pub fn num_pieces(&self) -> usize {
        self.pieces().count()
    }

    /// Computes the canonical [`PositionKey`] of this position with `side_to_move` to play.
    ///
    /// Two positions are repetition-equivalent if and only if their keys are equal.
    #[inline(always)]
    pub fn key(&self, side_to_move: Color) -> PositionKey {
        PositionKey::new(self, side_to_move)
    }
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Self {
        let mut pos = Self::empty();
        let back_rank = [
            PieceKind::Chariot,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Chariot,
        ];

        for (color, back, cannons, soldiers) in [(Color::Black, 0, 2, 3), (Color::Red, 9, 7, 6)] {
            for (col, kind) in back_rank.into_iter().enumerate() {
                pos.place(Piece::new(color, kind), Square::at(back, col as u8));
            }
            for col in [1, 7] {
                pos.place(Piece::new(color, PieceKind::Cannon), Square::at(cannons, col));
            }
            for col in [0, 2, 4, 6, 8] {
                pos.place(Piece::new(color, PieceKind::Soldier), Square::at(soldiers, col));
            }
        }

        pos
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Square::ROWS {
            write!(f, "{} ", Square::ROWS - 1 - row)?;
            for col in 0..Square::COLS {
                let c = self
                    .piece_at(Square::at(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;

            // The river
            if row == 4 {
                writeln!(f, "   ~~~~~~~~~~~~~~~~~")?;
            }
        }
        write!(f, "  ")?;
        for col in 0..Square::COLS {
            write!(f, " {}", (b'a' + col) as char)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// A canonical, byte-for-byte encoding of a position and its side to move.
///
/// The first byte is the side to move (`r` or `b`); each following byte describes one square
/// in row-major order: `.` if empty, otherwise the piece's FEN letter (uppercase for Red).
/// Used for repetition detection and as the transposition table key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey([u8; Square::COUNT + 1]);

impl PositionKey {
    /// Builds the key of `position` with `side_to_move` to play.
    pub fn new(position: &Position, side_to_move: Color) -> Self {
        let mut bytes = [b'.'; Square::COUNT + 1];
        bytes[0] = side_to_move.to_char() as u8;
        for (square, piece) in position.pieces() {
            bytes[square.index() + 1] = piece.char() as u8;
        }
        Self(bytes)
    }

    /// The raw bytes of this key.
    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The side to move encoded in this key.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        if self.0[0] == b'r' {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// The key rendered as a string.
    pub fn as_str(&self) -> &str {
        // Every byte written by `new` is ASCII.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PositionKey({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_fen_roundtrip() {
        let pos = Position::default();
        assert_eq!(pos.to_fen(), FEN_STARTPOS);
        assert_eq!(Position::from_fen(FEN_STARTPOS).unwrap(), pos);
        assert_eq!(pos.num_pieces(), 32);
    }

    #[test]
    fn test_startpos_layout() {
        let pos = Position::default();
        assert_eq!(
            pos.piece_at(Square::at(7, 1)),
            Some(Piece::new(Color::Red, PieceKind::Cannon))
        );
        assert_eq!(
            pos.piece_at(Square::at(0, 1)),
            Some(Piece::new(Color::Black, PieceKind::Horse))
        );
        assert_eq!(pos.general(Color::Red), Some(Square::at(9, 4)));
        assert_eq!(pos.general(Color::Black), Some(Square::at(0, 4)));
        assert_eq!(pos.piece_at(Square::at(4, 4)), None);
    }

    #[test]
    fn test_invalid_fens() {
        // Too few rows
        assert!(Position::from_fen("rnbakabnr/9/9").is_err());
        // Row too long
        assert!(Position::from_fen("rnbakabnr1/9/9/9/9/9/9/9/9/4K4").is_err());
        // Row too short
        assert!(Position::from_fen("rnbakabn/9/9/9/9/9/9/9/9/4K4").is_err());
        // Two Red Generals
        assert!(Position::from_fen("4k4/9/9/9/9/9/9/9/9/3KK4").is_err());
        // Unknown letter
        assert!(Position::from_fen("4q4/9/9/9/9/9/9/9/9/4K4").is_err());
        // A zero-length run of empty squares
        assert!(Position::from_fen("4k04/9/9/9/9/9/9/9/9/4K4").is_err());
    }

    #[test]
    fn test_long_runs_of_digits_are_rejected() {
        // Enough digits to wrap a byte-sized column counter back around to 9
        let wrapping = format!("{}/9/9/9/9/9/9/9/9/4K4", "9".repeat(30));
        assert!(Position::from_fen(&wrapping).is_err());

        let wide = format!("{}/9/9/9/9/9/9/9/9/4K4", "9".repeat(2));
        assert!(Position::from_fen(&wide).is_err());
    }

    #[test]
    fn test_copy_make_leaves_original_untouched() {
        let pos = Position::default();
        let mv = Move::new(Square::at(7, 1), Square::at(7, 4));
        let new = pos.with_move_made(mv);

        assert!(pos.is_occupied(Square::at(7, 1)));
        assert!(!new.is_occupied(Square::at(7, 1)));
        assert_eq!(new.piece_at(Square::at(7, 4)), pos.piece_at(Square::at(7, 1)));
    }

    #[test]
    fn test_key_encodes_side_and_cells() {
        let pos = Position::default();
        let red = pos.key(Color::Red);
        let black = pos.key(Color::Black);

        assert_ne!(red, black);
        assert_eq!(red.side_to_move(), Color::Red);
        assert_eq!(red.as_bytes().len(), 91);
        assert!(red.as_str().starts_with("rrnbakabnr"));
        assert!(black.as_str().starts_with("brnbakabnr"));
        assert!(red.as_str().ends_with("RNBAKABNR"));
    }
}
