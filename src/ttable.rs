/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::HashMap;

use crate::{Move, PositionKey, Score, SearchBounds};

/// What a stored score says about the true score of its position.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Bound {
    /// Every move was searched inside the window; the score is exact.
    Exact,

    /// No move raised alpha, so the true score is at most this.
    Upper,

    /// A move reached beta and the rest were skipped, so the true score is at least this.
    Lower,
}

impl Bound {
    /// Classifies `score` against the window it was searched with.
    #[inline(always)]
    pub fn new(score: Score, bounds: SearchBounds) -> Self {
        if score <= bounds.alpha {
            Self::Upper
        } else if score >= bounds.beta {
            Self::Lower
        } else {
            Self::Exact
        }
    }
}

/// A cached search result for one position and side to move.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TTableEntry {
    /// Remaining depth the position was searched to.
    pub depth: u8,

    /// Best move found for this position. Ordered first when the position is searched again.
    pub bestmove: Move,

    /// Best score found for this position, with mate scores relative to this node.
    pub score: Score,

    /// How `score` relates to the true score.
    pub bound: Bound,
}

impl TTableEntry {
    /// Creates an entry for a node `ply` plies from the root, searched within `bounds`.
    ///
    /// The bound is classified before a mate `score` is made relative to the node.
    #[inline(always)]
    pub fn new(bestmove: Move, score: Score, bounds: SearchBounds, depth: u8, ply: i32) -> Self {
        Self {
            bestmove,
            score: score.relative(ply),
            depth,
            bound: Bound::new(score, bounds),
        }
    }

    /// Returns this entry's score, measured from the root, if it settles a node searched within `bounds`.
    ///
    /// Exact scores always do. An upper bound only does at or below alpha,
    /// and a lower bound only at or above beta.
    #[inline(always)]
    pub fn try_score(&self, bounds: SearchBounds, ply: i32) -> Option<Score> {
        let score = self.score.absolute(ply);

        let usable = match self.bound {
            Bound::Exact => true,
            Bound::Upper => score <= bounds.alpha,
            Bound::Lower => score >= bounds.beta,
        };

        usable.then_some(score)
    }
}

/// Transposition table: search results cached by [`PositionKey`].
///
/// Keys are the full canonical encoding, not a hash, so two different positions never share an entry.
/// A table lives only as long as the [`crate::Search`] that owns it.
#[derive(Debug, Default)]
pub struct TTable {
    cache: HashMap<PositionKey, TTableEntry>,

    /// Number of accesses that have occurred since last clearing.
    pub(crate) accesses: usize,

    /// Number of hits that have occurred since last clearing.
    pub(crate) hits: usize,
}

impl TTable {
    /// Clears the entries of this [`TTable`].
    #[inline(always)]
    pub fn clear(&mut self) {
        self.cache.clear();
        self.accesses = 0;
        self.hits = 0;
    }

    /// Returns the number of entries stored in this [`TTable`].
    #[inline(always)]
    pub fn num_entries(&self) -> usize {
        self.cache.len()
    }

    /// Number of lookups made since the table was last cleared.
    #[inline(always)]
    pub fn accesses(&self) -> usize {
        self.accesses
    }

    /// Number of lookups that found an entry since the table was last cleared.
    #[inline(always)]
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Get the entry for `key`, if one exists.
    #[inline(always)]
    pub fn get(&self, key: &PositionKey) -> Option<&TTableEntry> {
        self.cache.get(key)
    }

    /// Get the entry for `key`, if one exists, counting the lookup towards this table's statistics.
    #[inline(always)]
    pub fn probe(&mut self, key: &PositionKey) -> Option<TTableEntry> {
        self.accesses += 1;
        let entry = self.cache.get(key).copied();
        if entry.is_some() {
            self.hits += 1;
        }
        entry
    }

    /// Store `entry` in the table at `key`, overriding and returning whatever was there.
    #[inline(always)]
    pub fn store(&mut self, key: PositionKey, entry: TTableEntry) -> Option<TTableEntry> {
        self.cache.insert(key, entry)
    }
}
