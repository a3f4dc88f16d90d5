/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use xiangqi::{
    evaluate, is_checkmate, is_in_check, is_stalemate, legal_moves, legal_moves_at, legal_moves_from, pseudo_moves, Color,
    Position, Square,
};

fn destinations(position: &Position, square: &str) -> Vec<String> {
    let mut squares = legal_moves_from(position, square.parse().unwrap())
        .into_iter()
        .map(|sq| sq.to_string())
        .collect::<Vec<_>>();
    squares.sort();
    squares
}

/// Check detection by brute force: does any enemy piece have the General's square among its destinations?
fn naive_is_in_check(position: &Position, color: Color) -> bool {
    let Some(general) = position.general(color) else {
        return false;
    };

    position
        .pieces_of(color.opponent())
        .any(|(from, _)| pseudo_moves(position, from).contains(&general))
}

/// Plays up to `plies` random legal moves from the starting position, calling `f` on every position reached.
fn random_playout(seed: u64, plies: usize, mut f: impl FnMut(&Position, Color)) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut position = Position::default();
    let mut side = Color::Red;

    for _ in 0..plies {
        f(&position, side);

        let moves = legal_moves(&position, side);
        if moves.is_empty() {
            break;
        }

        position.make_move(moves[rng.random_range(0..moves.len())]);
        side = side.opponent();
    }
}

#[test]
fn test_cannon_jumps_exactly_one_screen() {
    // The Soldier on a4 screens the Chariot on a6; the Red General on e0 screens nothing
    let pos = Position::from_fen("3k5/9/9/r8/9/p8/9/9/9/C3K4").unwrap();
    assert_eq!(
        destinations(&pos, "a0"),
        ["a1", "a2", "a3", "a6", "b0", "c0", "d0"]
    );
}

#[test]
fn test_pinned_by_facing_generals() {
    // The Chariot is the only thing standing between the Generals, so it may not leave the file
    let pos = Position::from_fen("4k4/9/9/9/4R4/9/9/9/9/4K4").unwrap();
    assert!(!is_in_check(&pos, Color::Red));
    assert!(!is_in_check(&pos, Color::Black));

    // The Black General on e9 is never a legal destination
    assert_eq!(
        destinations(&pos, "e5"),
        ["e1", "e2", "e3", "e4", "e6", "e7", "e8"]
    );

    let open = Position::from_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
    assert!(is_in_check(&open, Color::Red));
    assert!(is_in_check(&open, Color::Black));
}

#[test]
fn test_moves_only_for_side_to_move() {
    let pos = Position::default();
    let horse: Square = "b0".parse().unwrap();

    assert_eq!(legal_moves_at(&pos, horse, Color::Red).len(), 2);
    assert!(legal_moves_at(&pos, horse, Color::Black).is_empty());
    assert!(legal_moves_at(&pos, "e4".parse().unwrap(), Color::Red).is_empty());
}

#[test]
fn test_terminal_states() {
    let mated = Position::from_fen("3k5/R8/3R5/9/9/9/9/9/9/4K4").unwrap();
    assert!(is_checkmate(&mated, Color::Black));
    assert!(!is_stalemate(&mated, Color::Black));
    assert!(!is_checkmate(&mated, Color::Red));

    let stalemated = Position::from_fen("3k5/5R3/9/9/9/9/9/9/9/2R1K4").unwrap();
    assert!(is_stalemate(&stalemated, Color::Black));
    assert!(!is_checkmate(&stalemated, Color::Black));
    assert!(legal_moves(&stalemated, Color::Black).is_empty());
}

#[test]
fn test_legal_moves_never_leave_general_in_check() {
    for seed in 0..8 {
        random_playout(seed, 120, |position, side| {
            for mv in legal_moves(position, side) {
                let after = position.with_move_made(mv);
                assert!(!is_in_check(&after, side), "{mv} leaves {side} in check in {position:?}");
                assert!(
                    !position.piece_at(mv.to()).is_some_and(|piece| piece.is_general()),
                    "{mv} captures a General in {position:?}"
                );
            }
        });
    }
}

#[test]
fn test_check_detection_matches_naive() {
    for seed in 100..108 {
        random_playout(seed, 150, |position, side| {
            for color in Color::all() {
                assert_eq!(
                    is_in_check(position, color),
                    naive_is_in_check(position, color),
                    "check detection disagrees for {color} in {position:?} ({side} to move)"
                );
            }
        });
    }
}

#[test]
fn test_generals_stay_on_board_and_in_palace() {
    random_playout(7, 200, |position, _| {
        for color in Color::all() {
            let general = position.general(color);
            assert!(general.is_some_and(|sq: Square| sq.in_palace(color)), "{position:?}");
        }
    });
}

#[test]
fn test_eval_is_symmetric_and_fen_roundtrips() {
    random_playout(2024, 100, |position, _| {
        assert_eq!(evaluate(position, Color::Red), -evaluate(position, Color::Black));

        let fen = position.to_fen();
        assert_eq!(Position::from_fen(&fen).unwrap(), *position, "{fen}");
    });
}
