/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, PieceKind, Position, Square, SquareList};

/// Unit steps along ranks and files.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Unit steps along diagonals.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Horse jumps as `(dr, dc, leg_dr, leg_dc)`: the destination offset followed by the
/// offset of the orthogonally adjacent "leg" square that must be empty.
pub(crate) const HORSE_JUMPS: [(i8, i8, i8, i8); 8] = [
    (-2, -1, -1, 0),
    (-2, 1, -1, 0),
    (-1, -2, 0, -1),
    (-1, 2, 0, 1),
    (1, -2, 0, -1),
    (1, 2, 0, 1),
    (2, -1, 1, 0),
    (2, 1, 1, 0),
];

/// Computes the pseudo-legal destinations of the piece on `square`.
///
/// Pseudo-legal moves follow each piece's movement rules, but may leave the mover's own General in check.
/// Destinations holding a friendly piece are never included.
/// If `square` is empty, the returned list is empty.
///
/// # Example
/// ```
/// # use xiangqi::{pseudo_moves, Position, Square};
/// let pos = Position::default();
/// // The Red Horse on b0 can reach a2 and c2
/// assert_eq!(pseudo_moves(&pos, "b0".parse().unwrap()).len(), 2);
/// ```
pub fn pseudo_moves(position: &Position, square: Square) -> SquareList {
    let mut moves = SquareList::new();
    let Some(piece) = position.piece_at(square) else {
        return moves;
    };
    let color = piece.color();

    match piece.kind() {
        PieceKind::General => general_moves(position, square, color, &mut moves),
        PieceKind::Advisor => advisor_moves(position, square, color, &mut moves),
        PieceKind::Elephant => elephant_moves(position, square, color, &mut moves),
        PieceKind::Horse => horse_moves(position, square, color, &mut moves),
        PieceKind::Chariot => chariot_moves(position, square, color, &mut moves),
        PieceKind::Cannon => cannon_moves(position, square, color, &mut moves),
        PieceKind::Soldier => soldier_moves(position, square, color, &mut moves),
    }

    moves
}

/// Returns `true` if a `color` piece may land on `square`: it is empty or holds an enemy.
#[inline(always)]
fn is_open(position: &Position, square: Square, color: Color) -> bool {
    position.color_at(square) != Some(color)
}

/// Pushes `to` onto `moves` if it exists and is not occupied by a friendly piece.
#[inline(always)]
fn push_if_open(position: &Position, to: Option<Square>, color: Color, moves: &mut SquareList) {
    if let Some(to) = to.filter(|&to| is_open(position, to, color)) {
        moves.push(to);
    }
}

fn general_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    for (dr, dc) in ORTHOGONALS {
        let to = from.offset(dr, dc).filter(|to| to.in_palace(color));
        push_if_open(position, to, color, moves);
    }

    // Flying general: the first piece up or down the file may be the enemy General.
    for dr in [-1, 1] {
        if let Some(to) = first_occupied(position, from, dr, 0) {
            let facing = position
                .piece_at(to)
                .is_some_and(|piece| piece.is_general() && piece.color() != color);

            if facing && !moves.contains(&to) {
                moves.push(to);
            }
        }
    }
}

fn advisor_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    for (dr, dc) in DIAGONALS {
        let to = from.offset(dr, dc).filter(|to| to.in_palace(color));
        push_if_open(position, to, color, moves);
    }
}

fn elephant_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    for (dr, dc) in DIAGONALS {
        let Some(eye) = from.offset(dr, dc) else {
            continue;
        };
        if position.is_occupied(eye) {
            continue;
        }

        let to = from
            .offset(dr * 2, dc * 2)
            .filter(|to| to.on_own_side(color));
        push_if_open(position, to, color, moves);
    }
}

fn horse_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    for (dr, dc, leg_dr, leg_dc) in HORSE_JUMPS {
        let Some(leg) = from.offset(leg_dr, leg_dc) else {
            continue;
        };
        if position.is_occupied(leg) {
            continue;
        }

        push_if_open(position, from.offset(dr, dc), color, moves);
    }
}

fn chariot_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    for (dr, dc) in ORTHOGONALS {
        let mut current = from.offset(dr, dc);
        while let Some(to) = current {
            match position.color_at(to) {
                None => moves.push(to),
                Some(other) => {
                    if other != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            current = to.offset(dr, dc);
        }
    }
}

fn cannon_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    for (dr, dc) in ORTHOGONALS {
        let mut current = from.offset(dr, dc);

        // Quiet moves up to the screen
        let mut screen = None;
        while let Some(to) = current {
            if position.is_occupied(to) {
                screen = Some(to);
                break;
            }
            moves.push(to);
            current = to.offset(dr, dc);
        }

        // Capture the first piece past the screen, if it is an enemy
        let Some(screen) = screen else {
            continue;
        };
        if let Some(target) = first_occupied(position, screen, dr, dc) {
            if position.color_at(target) != Some(color) {
                moves.push(target);
            }
        }
    }
}

fn soldier_moves(position: &Position, from: Square, color: Color, moves: &mut SquareList) {
    push_if_open(position, from.offset(color.forward(), 0), color, moves);

    if from.across_river(color) {
        push_if_open(position, from.offset(0, -1), color, moves);
        push_if_open(position, from.offset(0, 1), color, moves);
    }
}

/// Walks from `from` (exclusive) in direction `(dr, dc)` and returns the first occupied square, if any.
#[inline(always)]
pub(crate) fn first_occupied(position: &Position, from: Square, dr: i8, dc: i8) -> Option<Square> {
    let mut current = from.offset(dr, dc);
    while let Some(sq) = current {
        if position.is_occupied(sq) {
            return Some(sq);
        }
        current = sq.offset(dr, dc);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destinations(fen: &str, square: &str) -> Vec<String> {
        let pos = Position::from_fen(fen).unwrap();
        let mut names = pseudo_moves(&pos, square.parse().unwrap())
            .into_iter()
            .map(|sq| sq.to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        let pos = Position::default();
        assert!(pseudo_moves(&pos, "e5".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_startpos_piece_mobility() {
        let pos = Position::default();
        let count = |sq: &str| pseudo_moves(&pos, sq.parse().unwrap()).len();

        assert_eq!(count("a0"), 2); // Chariot up the a-file
        assert_eq!(count("b0"), 2); // Horse
        assert_eq!(count("c0"), 2); // Elephant
        assert_eq!(count("d0"), 1); // Advisor
        assert_eq!(count("e0"), 1); // General
        assert_eq!(count("a3"), 1); // Soldier
        // Cannon: 6 along the rank, 5 along the file, and capturing the Horse on b9 over a screen
        assert_eq!(count("b2"), 12);
    }

    #[test]
    fn test_horse_leg_blocks() {
        // Red Horse on e4 with its upward leg blocked by a soldier on e5
        let moves = destinations("4k4/9/9/9/4P4/4N4/9/9/9/4K4", "e4");
        assert!(!moves.contains(&"d6".to_string()));
        assert!(!moves.contains(&"f6".to_string()));
        assert!(moves.contains(&"d2".to_string()));
        assert!(moves.contains(&"c5".to_string()));
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn test_elephant_cannot_cross_river() {
        // Red Elephant on e4, right at the river bank
        let moves = destinations("4k4/9/9/9/9/4B4/9/9/9/4K4", "e4");
        assert_eq!(moves, vec!["c2", "g2"]);
    }

    #[test]
    fn test_elephant_eye_blocks() {
        let moves = destinations("4k4/9/9/9/9/9/9/9/3P5/2B1K4", "c0");
        assert_eq!(moves, vec!["a2"]);
    }

    #[test]
    fn test_soldier_moves_sideways_only_after_river() {
        assert_eq!(destinations("4k4/9/9/9/9/9/4P4/9/9/4K4", "e3"), vec!["e4"]);
        assert_eq!(
            destinations("4k4/9/9/9/4P4/9/9/9/9/4K4", "e5"),
            vec!["d5", "e6", "f5"]
        );
        // Black soldier across the river advances towards row 9
        assert_eq!(
            destinations("4k4/9/9/9/9/4p4/9/9/9/3K5", "e4"),
            vec!["d4", "e3", "f4"]
        );
    }

    #[test]
    fn test_general_confined_to_palace() {
        assert_eq!(destinations("3k5/9/9/9/9/9/9/9/9/5K3", "f0"), vec!["e0", "f1"]);
        assert_eq!(destinations("3k5/9/9/9/9/9/9/9/9/5K3", "d9"), vec!["d8", "e9"]);
    }

    #[test]
    fn test_flying_general_destination() {
        let moves = destinations("4k4/9/9/9/9/9/9/9/9/4K4", "e0");
        assert!(moves.contains(&"e9".to_string()));

        // Blocked file
        let moves = destinations("4k4/9/9/9/4p4/9/9/9/9/4K4", "e0");
        assert!(!moves.contains(&"e9".to_string()));
    }

    #[test]
    fn test_cannon_needs_exactly_one_screen() {
        // Red Cannon on a0, screen on a3, enemy Chariot on a6, another enemy behind it on a9
        let moves = destinations("r3k4/9/9/r8/9/9/P8/9/9/C3K4", "a0");
        assert!(moves.contains(&"a1".to_string()));
        assert!(moves.contains(&"a2".to_string()));
        assert!(!moves.contains(&"a3".to_string()));
        assert!(moves.contains(&"a6".to_string()));
        assert!(!moves.contains(&"a9".to_string()));
    }

    #[test]
    fn test_cannon_does_not_capture_own_piece() {
        let moves = destinations("4k4/9/9/R8/9/9/P8/9/9/C3K4", "a0");
        assert!(!moves.contains(&"a6".to_string()));
    }
}
