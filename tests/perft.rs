/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use xiangqi::{perft_generic, Color, Position, FEN_STARTPOS};

fn test_perft_fen_nodes(depth: usize, fen: &str, side_to_move: Color, expected: u64) {
    let position = Position::from_fen(fen).unwrap();
    let res = perft_generic::<false, false>(&position, side_to_move, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on {fen} ({side_to_move} to move)");
}

fn test_bulk_perft_fen_nodes(depth: usize, fen: &str, side_to_move: Color, expected: u64) {
    let position = Position::from_fen(fen).unwrap();
    let res = perft_generic::<true, false>(&position, side_to_move, depth);
    assert_eq!(res, expected, "Bulk PERFT({depth}) failed on {fen} ({side_to_move} to move)");
}

#[cfg(test)]
mod startpos_perft {
    use super::*;

    #[test]
    fn test_startpos_perft_1() {
        test_perft_fen_nodes(1, FEN_STARTPOS, Color::Red, 44);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_fen_nodes(2, FEN_STARTPOS, Color::Red, 1_920);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_fen_nodes(3, FEN_STARTPOS, Color::Red, 79_666);
    }

    #[test]
    fn test_startpos_bulk_perft_3() {
        test_bulk_perft_fen_nodes(3, FEN_STARTPOS, Color::Red, 79_666);
    }

    #[test]
    #[ignore = "slow without optimizations"]
    fn test_startpos_bulk_perft_4() {
        test_bulk_perft_fen_nodes(4, FEN_STARTPOS, Color::Red, 3_290_240);
    }

    #[test]
    fn test_startpos_is_symmetric() {
        // Black's view of the starting position is a mirror image of Red's
        test_bulk_perft_fen_nodes(3, FEN_STARTPOS, Color::Black, 79_666);
    }
}

#[cfg(test)]
mod terminal_perft {
    use super::*;

    #[test]
    fn test_checkmate_has_no_moves() {
        test_perft_fen_nodes(1, "3k5/R8/3R5/9/9/9/9/9/9/4K4", Color::Black, 0);
    }

    #[test]
    fn test_stalemate_has_no_moves() {
        test_perft_fen_nodes(1, "3k5/5R3/9/9/9/9/9/9/9/2R1K4", Color::Black, 0);
    }

    #[test]
    fn test_depth_zero_is_one_node() {
        test_perft_fen_nodes(0, FEN_STARTPOS, Color::Red, 1);
    }
}
