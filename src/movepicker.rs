/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use crate::{Move, MoveList, MAX_NUM_MOVES};

/// Lazily yields moves from highest to lowest ordering score.
///
/// Uses a selection sort, so a node that is cut off early never pays for sorting the whole list.
/// Moves with equal scores are yielded in the order they were generated.
pub struct MovePicker {
    moves: MoveList,
    scores: ArrayVec<i32, MAX_NUM_MOVES>,
    current: usize,
}

impl MovePicker {
    /// Scores every move in `moves` with `score_fn`.
    pub fn new(moves: MoveList, score_fn: impl Fn(&Move) -> i32) -> Self {
        let scores = moves.iter().map(score_fn).collect();

        Self {
            moves,
            scores,
            current: 0,
        }
    }

    /// Number of moves that have not been yielded yet.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.moves.len() - self.current
    }
}

impl Iterator for MovePicker {
    type Item = (Move, i32);

    fn next(&mut self) -> Option<Self::Item> {
        // No more moves left
        if self.current >= self.moves.len() {
            return None;
        }

        // Fetch the current best
        let mut best_index = self.current;
        let mut best_score = self.scores[best_index];

        // Find the index of the next highest score; strict comparison keeps ties stable
        for i in (self.current + 1)..self.moves.len() {
            if self.scores[i] > best_score {
                best_index = i;
                best_score = self.scores[i];
            }
        }

        // Shift rather than swap, so the moves left behind keep their relative order
        if best_index != self.current {
            self.moves[self.current..=best_index].rotate_right(1);
            self.scores[self.current..=best_index].rotate_right(1);
        }

        let mv = self.moves[self.current];
        let score = self.scores[self.current];

        // Increment for next call
        self.current += 1;

        Some((mv, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_picker_order() {
        let moves: MoveList = [(0, 1), (0, 2), (0, 3), (0, 4)]
            .into_iter()
            .map(|(r, c)| Move::new(Square::at(r, c), Square::at(r + 1, c)))
            .collect();
        let scores = [3, 5, 3, 7];

        let picker = MovePicker::new(moves, |mv| scores[mv.from().col() as usize - 1]);
        assert_eq!(picker.remaining(), 4);

        let order = picker.map(|(mv, score)| (mv.from().col(), score)).collect::<Vec<_>>();
        // Equal scores come out in generation order
        assert_eq!(order, vec![(4, 7), (2, 5), (1, 3), (3, 3)]);
    }
}
