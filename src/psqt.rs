/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Piece, PieceKind, Square, Table};

/// Rows are listed from Black's back rank (row 0) to Red's (row 9), as seen by Red.
#[rustfmt::skip]
const SOLDIER: Psqt = Psqt::new(PieceKind::Soldier, [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 0, 0, 0],
    [0, 1, 1, 2, 2, 2, 1, 1, 0],
    [0, 1, 2, 3, 4, 3, 2, 1, 0],
    [0, 0, 1, 2, 3, 2, 1, 0, 0],
    [0, 0, 0, 1, 2, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
]);

#[rustfmt::skip]
const CHARIOT: Psqt = Psqt::new(PieceKind::Chariot, [
    [0, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 2, 2, 2, 2, 2, 2, 2, 0],
    [0, 2, 3, 3, 3, 3, 3, 2, 0],
    [0, 2, 3, 4, 5, 4, 3, 2, 0],
    [0, 2, 3, 4, 6, 4, 3, 2, 0],
    [0, 2, 3, 4, 5, 4, 3, 2, 0],
    [0, 2, 3, 3, 4, 3, 3, 2, 0],
    [0, 2, 2, 2, 2, 2, 2, 2, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
]);

#[rustfmt::skip]
const CANNON: Psqt = Psqt::new(PieceKind::Cannon, [
    [0, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 2, 2, 2, 2, 2, 2, 2, 0],
    [0, 2, 3, 3, 3, 3, 3, 2, 0],
    [0, 2, 3, 4, 4, 4, 3, 2, 0],
    [0, 2, 3, 4, 5, 4, 3, 2, 0],
    [0, 2, 3, 4, 4, 4, 3, 2, 0],
    [0, 2, 3, 3, 3, 3, 3, 2, 0],
    [0, 2, 2, 2, 2, 2, 2, 2, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
]);

#[rustfmt::skip]
const HORSE: Psqt = Psqt::new(PieceKind::Horse, [
    [0, 1, 2, 2, 2, 2, 2, 1, 0],
    [0, 2, 3, 3, 3, 3, 3, 2, 0],
    [0, 3, 4, 5, 5, 5, 4, 3, 0],
    [0, 3, 5, 6, 7, 6, 5, 3, 0],
    [0, 2, 4, 5, 6, 5, 4, 2, 0],
    [0, 2, 3, 4, 5, 4, 3, 2, 0],
    [0, 1, 2, 3, 4, 3, 2, 1, 0],
    [0, 1, 1, 2, 2, 2, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
]);

#[rustfmt::skip]
const ELEPHANT: Psqt = Psqt::new(PieceKind::Elephant, [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 1, 2, 2, 2, 1, 0, 0],
    [0, 0, 2, 3, 3, 3, 2, 0, 0],
    [0, 0, 2, 3, 4, 3, 2, 0, 0],
    [0, 0, 2, 3, 3, 3, 2, 0, 0],
    [0, 0, 1, 2, 2, 2, 1, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
]);

#[rustfmt::skip]
const ADVISOR: Psqt = Psqt::new(PieceKind::Advisor, [
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 2, 1, 0, 0, 0],
    [0, 0, 0, 1, 3, 1, 0, 0, 0],
    [0, 0, 0, 1, 2, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 2, 1, 0, 0, 0],
    [0, 0, 0, 1, 3, 1, 0, 0, 0],
    [0, 0, 0, 1, 2, 1, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
]);

#[rustfmt::skip]
const GENERAL: Psqt = Psqt::new(PieceKind::General, [
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
]);

/// A [Piece-Square Table](https://www.chessprogramming.org/Piece-Square_Tables) for use in evaluation.
///
/// Each entry already includes the material value of the piece, so a lookup yields its full static worth.
#[derive(Debug)]
pub struct Psqt(Table<i32>);

impl Psqt {
    /// Fetch the Piece-Square Table value (material plus placement) for `piece` at `square`.
    ///
    /// Tables are authored for Red; Black pieces are looked up on the vertically mirrored square.
    #[inline(always)]
    pub fn eval(piece: Piece, square: Square) -> i32 {
        Self::get_table_for(piece.kind()).get_relative(square, piece)
    }

    /// Fetch the Piece-Square Table for the provided [`PieceKind`].
    #[inline(always)]
    pub const fn get_table_for(kind: PieceKind) -> &'static Self {
        match kind {
            PieceKind::General => &GENERAL,
            PieceKind::Advisor => &ADVISOR,
            PieceKind::Elephant => &ELEPHANT,
            PieceKind::Horse => &HORSE,
            PieceKind::Chariot => &CHARIOT,
            PieceKind::Cannon => &CANNON,
            PieceKind::Soldier => &SOLDIER,
        }
    }

    /// Creates a new [`Psqt`] for the provided [`PieceKind`] and grid of placement bonuses.
    const fn new(kind: PieceKind, grid: [[i32; Square::COLS as usize]; Square::ROWS as usize]) -> Self {
        let mut values = [0; Square::COUNT];

        let mut row = 0;
        while row < grid.len() {
            let mut col = 0;
            while col < grid[row].len() {
                values[row * Square::COLS as usize + col] = grid[row][col] + kind.value();
                col += 1;
            }
            row += 1;
        }

        Self(Table::new(values))
    }

    /// Get the value of this PSQT at the provided square, as seen by Red.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> i32 {
        *self.0.get(square)
    }

    /// Get the value of this PSQT at the provided square, relative to the color of `piece`.
    #[inline(always)]
    pub const fn get_relative(&self, square: Square, piece: Piece) -> i32 {
        let row = square.relative_row(piece.color());
        self.get(Square::at(row, square.col()))
    }
}

impl fmt::Display for Psqt {
    /// Printing a [`Psqt`] will display it in the same way it is written in the code (Red's perspective).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_eval_is_correct_for_colors() {
        for square in Square::iter() {
            for kind in PieceKind::all() {
                let mirrored = Square::at(square.relative_row(Color::Black), square.col());
                let red = Psqt::eval(Piece::new(Color::Red, kind), square);
                let black = Psqt::eval(Piece::new(Color::Black, kind), mirrored);

                assert_eq!(red, black, "{} on {square}: {red} (red) != {black} (black)", kind.name());
            }
        }
    }

    #[test]
    fn test_tables_include_material() {
        let center = Square::at(4, 4);
        assert_eq!(Psqt::eval(Piece::new(Color::Red, PieceKind::Chariot), center), 106);
        assert_eq!(Psqt::get_table_for(PieceKind::Soldier).get(Square::at(9, 0)), 12);
    }
}
