/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    first_occupied, pseudo_moves, Color, Move, MoveList, PieceKind, Position, Square, SquareList,
    DIAGONALS, HORSE_JUMPS, ORTHOGONALS,
};

/// Returns `true` if `color`'s General is attacked by any enemy piece.
///
/// This is equivalent to asking whether any enemy piece's [`pseudo_moves`] contain the General's square,
/// including the "flying general" rule: two Generals facing each other on an open file are both in check.
/// Rather than generating every enemy move, attacks are traced outwards from the General.
///
/// A side without a General on the board is never considered in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    let Some(general) = position.general(color) else {
        return false;
    };
    is_attacked_by(position, general, color.opponent())
}

/// Returns `true` if any `attacker` piece could move to `square`.
pub fn is_attacked_by(position: &Position, square: Square, attacker: Color) -> bool {
    let is_enemy = |sq: Square, kind: PieceKind| {
        position
            .piece_at(sq)
            .is_some_and(|piece| piece.color() == attacker && piece.kind() == kind)
    };

    // Sliders, plus Generals facing each other on a file
    for (dr, dc) in ORTHOGONALS {
        let Some(blocker) = first_occupied(position, square, dr, dc) else {
            continue;
        };

        if is_enemy(blocker, PieceKind::Chariot) || (dc == 0 && is_enemy(blocker, PieceKind::General)) {
            return true;
        }

        if first_occupied(position, blocker, dr, dc).is_some_and(|sq| is_enemy(sq, PieceKind::Cannon)) {
            return true;
        }
    }

    // Horses: the leg is adjacent to the horse, not to the target
    for (dr, dc, leg_dr, leg_dc) in HORSE_JUMPS {
        let Some(horse) = square.offset(-dr, -dc) else {
            continue;
        };
        if !is_enemy(horse, PieceKind::Horse) {
            continue;
        }
        if horse
            .offset(leg_dr, leg_dc)
            .is_some_and(|leg| !position.is_occupied(leg))
        {
            return true;
        }
    }

    // Soldiers advance towards the target, or step sideways into it once across the river
    if square
        .offset(-attacker.forward(), 0)
        .is_some_and(|sq| is_enemy(sq, PieceKind::Soldier))
    {
        return true;
    }
    for dc in [-1, 1] {
        if square
            .offset(0, dc)
            .is_some_and(|sq| is_enemy(sq, PieceKind::Soldier) && sq.across_river(attacker))
        {
            return true;
        }
    }

    // Palace and home-side pieces can only reach squares in their own territory
    if square.in_palace(attacker) {
        for (dr, dc) in ORTHOGONALS {
            if square.offset(dr, dc).is_some_and(|sq| is_enemy(sq, PieceKind::General)) {
                return true;
            }
        }
        for (dr, dc) in DIAGONALS {
            if square.offset(dr, dc).is_some_and(|sq| is_enemy(sq, PieceKind::Advisor)) {
                return true;
            }
        }
    }
    if square.on_own_side(attacker) {
        for (dr, dc) in DIAGONALS {
            let Some(elephant) = square.offset(dr * 2, dc * 2) else {
                continue;
            };
            if is_enemy(elephant, PieceKind::Elephant)
                && square.offset(dr, dc).is_some_and(|eye| !position.is_occupied(eye))
            {
                return true;
            }
        }
    }

    false
}

/// Computes the legal destinations of the piece on `square`.
///
/// These are the piece's [`pseudo_moves`], minus any that would leave its own General in check.
/// The face-to-face destination of the flying general rule only exists for check detection,
/// so no move landing on a General is ever legal.
///
/// If `square` is empty, the returned list is empty.
pub fn legal_moves_from(position: &Position, square: Square) -> SquareList {
    let Some(piece) = position.piece_at(square) else {
        return SquareList::new();
    };
    let color = piece.color();

    pseudo_moves(position, square)
        .into_iter()
        .filter(|&to| {
            !position.piece_at(to).is_some_and(|target| target.is_general())
                && !is_in_check(&position.with_move_made(Move::new(square, to)), color)
        })
        .collect()
}

/// Computes the legal destinations of the piece on `square`, if it belongs to `side_to_move`.
///
/// Empty when `square` is empty or holds an opponent's piece.
pub fn legal_moves_at(position: &Position, square: Square, side_to_move: Color) -> SquareList {
    if position.color_at(square) != Some(side_to_move) {
        return SquareList::new();
    }
    legal_moves_from(position, square)
}

/// Computes every legal move available to `color`, in board order.
pub fn legal_moves(position: &Position, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in position.pieces_of(color) {
        for to in legal_moves_from(position, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Returns `true` if `color` has at least one legal move.
///
/// Stops at the first legal move found, so this is cheaper than checking [`legal_moves`] for emptiness.
pub fn has_legal_moves(position: &Position, color: Color) -> bool {
    position
        .pieces_of(color)
        .any(|(from, _)| !legal_moves_from(position, from).is_empty())
}

/// Returns `true` if `mv` is legal for whichever side owns the piece on its starting square.
pub fn is_legal(position: &Position, mv: Move) -> bool {
    legal_moves_from(position, mv.from()).contains(&mv.to())
}

/// Returns `true` if `color`, to move, is in check and has no legal moves.
pub fn is_checkmate(position: &Position, color: Color) -> bool {
    is_in_check(position, color) && !has_legal_moves(position, color)
}

/// Returns `true` if `color`, to move, is *not* in check but has no legal moves.
///
/// Unlike chess, a stalemate is scored as a draw here.
pub fn is_stalemate(position: &Position, color: Color) -> bool {
    !is_in_check(position, color) && !has_legal_moves(position, color)
}

/// Returns `true` if `mv` captures a piece.
#[inline(always)]
pub fn is_capture(position: &Position, mv: Move) -> bool {
    position.is_occupied(mv.to())
}

/// Returns `true` if playing `mv` puts the opponent of the moving piece in check.
pub fn gives_check(position: &Position, mv: Move) -> bool {
    let Some(color) = position.color_at(mv.from()) else {
        return false;
    };
    is_in_check(&position.with_move_made(mv), color.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fen(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_startpos_not_in_check() {
        let pos = Position::default();
        assert!(!is_in_check(&pos, Color::Red));
        assert!(!is_in_check(&pos, Color::Black));
        assert_eq!(legal_moves(&pos, Color::Red).len(), 44);
        assert_eq!(legal_moves(&pos, Color::Black).len(), 44);
    }

    #[test]
    fn test_chariot_check() {
        let pos = fen("4k4/9/9/9/9/9/9/9/9/R2K5");
        assert!(!is_in_check(&pos, Color::Black));
        let pos = fen("4k4/9/9/9/9/9/9/9/9/3K4R");
        assert!(!is_in_check(&pos, Color::Black));
        let pos = fen("4k3R/9/9/9/9/9/9/9/9/3K5");
        assert!(is_in_check(&pos, Color::Black));
    }

    #[test]
    fn test_cannon_check_needs_screen() {
        // Cannon on e5 facing the Black General with nothing between
        let pos = fen("4k4/9/9/9/4C4/9/9/9/9/3K5");
        assert!(!is_in_check(&pos, Color::Black));
        // A Black Advisor on e8 acts as the screen
        let pos = fen("4k4/4a4/9/9/4C4/9/9/9/9/3K5");
        assert!(is_in_check(&pos, Color::Black));
    }

    #[test]
    fn test_horse_check_and_leg() {
        // Red Horse on d7 attacks e9 through the leg on d8
        let pos = fen("4k4/9/3N5/9/9/9/9/9/9/3K5");
        assert!(is_in_check(&pos, Color::Black));
        let pos = fen("4k4/3p5/3N5/9/9/9/9/9/9/3K5");
        assert!(!is_in_check(&pos, Color::Black));
    }

    #[test]
    fn test_soldier_check() {
        // A Red Soldier directly in front of the Black General
        let pos = fen("9/4k4/4P4/9/9/9/9/9/9/3K5");
        assert!(is_in_check(&pos, Color::Black));
        // Beside it
        let pos = fen("9/3Pk4/9/9/9/9/9/9/9/3K5");
        assert!(is_in_check(&pos, Color::Black));
        // Soldiers never move backwards
        let pos = fen("4P4/4k4/9/9/9/9/9/9/9/3K5");
        assert!(!is_in_check(&pos, Color::Black));
    }

    #[test]
    fn test_flying_general_is_check_for_both() {
        let pos = fen("4k4/9/9/9/9/9/9/9/9/4K4");
        assert!(is_in_check(&pos, Color::Red));
        assert!(is_in_check(&pos, Color::Black));
    }

    #[test]
    fn test_cannot_expose_general_to_facing() {
        // The Red Advisor on e1 is the only piece between the Generals; it is pinned
        let pos = fen("4k4/9/9/9/9/9/9/9/4A4/3AK4");
        assert!(legal_moves_from(&pos, "e1".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        // Two Red Chariots mate the Black General on the back rank
        let mate = fen("3k5/R8/3R5/9/9/9/9/9/9/4K4");
        assert!(is_checkmate(&mate, Color::Black));
        assert!(!is_stalemate(&mate, Color::Black));

        // Black General on d9 with no legal moves, but not in check
        let stale = fen("3k5/5R3/9/9/9/9/9/9/9/2R1K4");
        assert!(!is_in_check(&stale, Color::Black));
        assert!(is_stalemate(&stale, Color::Black));
        assert!(!is_checkmate(&stale, Color::Black));
    }

    #[test]
    fn test_missing_general_is_not_check() {
        let pos = fen("9/9/9/9/9/9/9/9/9/4K4");
        assert!(!is_in_check(&pos, Color::Black));
    }
}
