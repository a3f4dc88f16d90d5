/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{tune, Move, Square, Table, MAX_PLY};

/// Stores bonuses for moving from one square to another.
///
/// Used to keep track of good moves found during search. Indexed by `[from][to]`.
#[derive(Debug)]
pub struct HistoryTable(Box<[Table<i32>; Square::COUNT]>);

impl HistoryTable {
    /// Clear the history table, removing all scores.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.0.iter_mut().for_each(|table| *table = Table::splat(0));
    }

    /// Fetch the accumulated score of `mv`.
    #[inline(always)]
    pub fn get(&self, mv: Move) -> i32 {
        self.0[mv.from().index()][mv.to()]
    }

    /// Rewards `mv` for raising alpha at `depth`.
    ///
    /// Deeper searches are more trustworthy, so the bonus grows with the square of the depth.
    #[inline(always)]
    pub fn update(&mut self, mv: Move, depth: u8) {
        let bonus = depth as i32 * depth as i32;
        let entry = &mut self.0[mv.from().index()][mv.to()];
        *entry = (*entry + bonus).min(tune::max_history_bonus!());
    }
}

impl Default for HistoryTable {
    #[inline(always)]
    fn default() -> Self {
        Self(Box::new([Table::splat(0); Square::COUNT]))
    }
}

impl fmt::Display for HistoryTable {
    /// Lists every move with a non-zero score, best first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = Square::iter()
            .flat_map(|from| {
                self.0[from.index()]
                    .iter()
                    .filter(|(_, score)| **score != 0)
                    .map(move |(to, &score)| (Move::new(from, to), score))
            })
            .collect::<Vec<_>>();
        entries.sort_by_key(|&(_, score)| -score);

        for (mv, score) in entries {
            writeln!(f, "{mv}\t{score}")?;
        }
        Ok(())
    }
}

/// Quiet moves that most recently caused a beta cutoff at each ply, two per ply.
#[derive(Debug, Clone)]
pub struct KillerTable([[Option<Move>; 2]; MAX_PLY]);

impl KillerTable {
    /// Clear all killer moves.
    #[inline(always)]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Records `mv` as the newest killer at `ply`, demoting the previous newest.
    ///
    /// Recording the newest killer again has no effect.
    #[inline(always)]
    pub fn store(&mut self, mv: Move, ply: usize) {
        let Some(killers) = self.0.get_mut(ply) else {
            return;
        };
        if killers[0] != Some(mv) {
            killers[1] = killers[0];
            killers[0] = Some(mv);
        }
    }

    /// Fetch the killer moves at `ply`, newest first.
    #[inline(always)]
    pub fn get(&self, ply: usize) -> [Option<Move>; 2] {
        self.0.get(ply).copied().unwrap_or_default()
    }
}

impl Default for KillerTable {
    #[inline(always)]
    fn default() -> Self {
        Self([[None; 2]; MAX_PLY])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_accumulates_depth_squared() {
        let mut history = HistoryTable::default();
        let mv = Move::new(Square::at(9, 1), Square::at(7, 2));

        history.update(mv, 3);
        history.update(mv, 2);
        assert_eq!(history.get(mv), 13);
        assert_eq!(history.get(Move::new(Square::at(7, 2), Square::at(9, 1))), 0);

        history.clear();
        assert_eq!(history.get(mv), 0);
    }

    #[test]
    fn test_history_saturates_below_other_bonuses() {
        let mut history = HistoryTable::default();
        let mv = Move::new(Square::at(9, 1), Square::at(7, 2));

        for _ in 0..1000 {
            history.update(mv, u8::MAX);
        }
        assert_eq!(history.get(mv), tune::max_history_bonus!());
        assert!(history.get(mv) < tune::second_killer_bonus!());
        assert!(history.get(mv) + tune::first_killer_bonus!() + tune::check_move_bonus!() < tune::capture_bonus!());
    }

    #[test]
    fn test_killers_shift() {
        let mut killers = KillerTable::default();
        let a = Move::new(Square::at(9, 1), Square::at(7, 2));
        let b = Move::new(Square::at(9, 7), Square::at(7, 6));

        killers.store(a, 2);
        killers.store(a, 2);
        assert_eq!(killers.get(2), [Some(a), None]);

        killers.store(b, 2);
        assert_eq!(killers.get(2), [Some(b), Some(a)]);
        assert_eq!(killers.get(3), [None, None]);

        // Out of range plies are ignored
        killers.store(a, MAX_PLY);
        assert_eq!(killers.get(MAX_PLY), [None, None]);
    }
}
