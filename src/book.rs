/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{is_legal, Color, Move, Position, Square};

/// Red's opening: the central Cannon, `b2e2`.
pub const CENTRAL_CANNON: Move = Move::new(Square::at(7, 1), Square::at(7, 4));

/// Black's reply to the central Cannon: the screen Horse, `b9c7`.
pub const SCREEN_HORSE: Move = Move::new(Square::at(0, 1), Square::at(2, 2));

/// Looks up a book move for `color` at `move_number` (0 for Red's first move, 1 for Black's reply).
///
/// The book only applies while the game has followed it exactly: Red's entry needs the untouched starting position,
/// and Black's entry needs the starting position after [`CENTRAL_CANNON`].
/// Any other position, color, or move number yields `None`, as does a book move that is somehow not legal.
pub fn book_move(position: &Position, color: Color, move_number: usize) -> Option<Move> {
    let (expected, mv) = match (color, move_number) {
        (Color::Red, 0) => (Position::default(), CENTRAL_CANNON),
        (Color::Black, 1) => (Position::default().with_move_made(CENTRAL_CANNON), SCREEN_HORSE),
        _ => return None,
    };

    (*position == expected && is_legal(position, mv)).then_some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_opening() {
        let pos = Position::default();
        assert_eq!(book_move(&pos, Color::Red, 0), Some(CENTRAL_CANNON));
        assert_eq!(CENTRAL_CANNON, "b2e2");

        // Wrong side or wrong move number
        assert_eq!(book_move(&pos, Color::Black, 0), None);
        assert_eq!(book_move(&pos, Color::Red, 2), None);
    }

    #[test]
    fn test_black_reply_requires_book_line() {
        let pos = Position::default().with_move_made(CENTRAL_CANNON);
        assert_eq!(book_move(&pos, Color::Black, 1), Some(SCREEN_HORSE));
        assert_eq!(SCREEN_HORSE, "b9c7");

        // Red opened with the other Cannon instead
        let other = Position::default().with_move_made("h2e2".parse().unwrap());
        assert_eq!(book_move(&other, Color::Black, 1), None);
    }
}
