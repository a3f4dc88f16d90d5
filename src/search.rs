/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    ops::Neg,
    time::{Duration, Instant},
};

use log::{debug, trace};

use crate::{
    evaluate, gives_check, is_in_check, legal_moves, tune, Color, HistoryTable, KillerTable, Move,
    MoveList, MovePicker, Position, PositionKey, Score, Skill, TTable, TTableEntry,
};

/// Maximum depth that can be searched
pub const MAX_DEPTH: u8 = 64;

/// Maximum number of plies from the root, including the quiescence search.
pub const MAX_PLY: usize = 128;

/// Bounds within an alpha-beta search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBounds {
    /// Lower bound.
    ///
    /// We are guaranteed a score that is AT LEAST `alpha`.
    /// During search, if no move can raise `alpha`, we are said to have "failed low."
    pub alpha: Score,

    /// Upper bound.
    ///
    /// Our opponent is guaranteed a score that is AT MOST `beta`.
    /// During search, if a move scores higher than `beta`, we are said to have "failed high."
    pub beta: Score,
}

impl SearchBounds {
    /// Create a new [`SearchBounds`] from the provided `alpha` and `beta` values.
    #[inline(always)]
    pub const fn new(alpha: Score, beta: Score) -> Self {
        Self { alpha, beta }
    }

    /// Create a "null window" around `beta`.
    #[inline(always)]
    fn null_beta(self) -> Self {
        Self::new(self.beta - 1, self.beta)
    }
}

impl Neg for SearchBounds {
    type Output = Self;
    /// Negating a [`SearchBounds`] swaps the `alpha` and `beta` fields and negates them both.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self {
            alpha: -self.beta,
            beta: -self.alpha,
        }
    }
}

impl Default for SearchBounds {
    /// Default [`SearchBounds`] are a `(-infinity, infinity)`.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Score::ALPHA, Score::BETA)
    }
}

/// Represents a window around a search result to act as our a/b bounds.
#[derive(Debug)]
struct AspirationWindow {
    /// Bounds of this search window
    bounds: SearchBounds,

    /// Number of times that a score has been returned above beta.
    beta_fails: i32,

    /// Number of times that a score has been returned below alpha.
    alpha_fails: i32,
}

impl AspirationWindow {
    /// Initial distance from the expected score to either bound.
    #[inline(always)]
    fn delta() -> Score {
        Score::new(tune::initial_aspiration_window_delta!())
    }

    /// Creates a new [`AspirationWindow`] centered around `score`.
    #[inline(always)]
    fn new(score: Score, depth: u8) -> Self {
        // If the score is mate, we expect search results to fluctuate, so set the windows to infinite.
        // Also, we only want to use aspiration windows after certain depths, so check that, too.
        let bounds = if depth < tune::min_aspiration_window_depth!() || score.is_mate() {
            SearchBounds::default()
        } else {
            let delta = Self::delta();
            SearchBounds::new(
                (score - delta).max(Score::ALPHA),
                (score + delta).min(Score::BETA),
            )
        };

        Self {
            bounds,
            alpha_fails: 0,
            beta_fails: 0,
        }
    }

    /// Widens the window's `alpha` bound, expanding it downwards.
    ///
    /// This also resets the `beta` bound to `(alpha + beta) / 2`
    #[inline(always)]
    fn widen_down(&mut self, score: Score) {
        // Compute a gradually-increasing delta
        let delta = Self::delta() * (1 << (self.alpha_fails + 1));

        // By convention, we widen both bounds on a fail low.
        self.bounds.beta = ((self.bounds.alpha + self.bounds.beta) / 2).min(Score::BETA);
        self.bounds.alpha = (score - delta).max(Score::ALPHA);

        self.alpha_fails += 1;
    }

    /// Widens the window's `beta` bound, expanding it upwards.
    #[inline(always)]
    fn widen_up(&mut self, score: Score) {
        // Compute a gradually-increasing delta
        let delta = Self::delta() * (1 << (self.beta_fails + 1));

        self.bounds.beta = (score + delta).min(Score::BETA);

        self.beta_fails += 1;
    }

    /// Returns `true` if `score` fails low, meaning it is below `alpha` and the window must be expanded downwards.
    #[inline(always)]
    fn fails_low(&self, score: Score) -> bool {
        self.bounds.alpha != Score::ALPHA && score <= self.bounds.alpha
    }

    /// Returns `true` if `score` fails high, meaning it is above `beta` and the window must be expanded upwards.
    #[inline(always)]
    fn fails_high(&self, score: Score) -> bool {
        self.bounds.beta != Score::BETA && score >= self.bounds.beta
    }
}

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Number of nodes searched.
    pub nodes: u64,

    /// Best move found during the search.
    ///
    /// Only `None` if the side to move has no legal moves.
    pub bestmove: Option<Move>,

    /// Evaluation of the position after `bestmove` is made.
    pub score: Score,

    /// The depth of the last fully completed iteration. Zero if none completed.
    pub depth: u8,

    /// Whether the search ran out of time (or nodes) before reaching its maximum depth.
    pub timed_out: bool,
}

impl Default for SearchResult {
    /// A default search result should initialize to a *very bad* value,
    /// since there isn't a move to play.
    #[inline(always)]
    fn default() -> Self {
        Self {
            nodes: 0,
            bestmove: None,
            score: Score::ALPHA,
            depth: 0,
            timed_out: false,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Maximum depth to execute the search.
    pub max_depth: u8,

    /// Node allowance.
    ///
    /// If the search exceeds this many nodes, it will exit as quickly as possible.
    pub max_nodes: u64,

    /// Start time of the search.
    pub starttime: Instant,

    /// Wall-clock allowance, measured from `starttime`.
    ///
    /// The clock is sampled every few nodes; once this is exceeded the search unwinds
    /// and falls back on the last completed iteration.
    pub time_budget: Duration,
}

impl SearchConfig {
    /// Depth ceiling and time budget for a given [`Skill`], starting now.
    pub fn for_skill(skill: Skill) -> Self {
        Self {
            max_depth: skill.depth(),
            time_budget: skill.time_budget(),
            ..Default::default()
        }
    }
}

impl Default for SearchConfig {
    /// A default [`SearchConfig`] will permit an "infinite" search.
    ///
    /// The word "infinite" is quoted here because the actual defaults are the `::MAX` values for each field.
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_nodes: u64::MAX,
            starttime: Instant::now(),
            time_budget: Duration::MAX,
        }
    }
}

/// Executes a search on a Xiangqi position.
///
/// Every table used while searching belongs to this value, so each top-level search starts from a clean slate.
#[derive(Debug)]
pub struct Search {
    /// Number of nodes searched.
    nodes: u64,

    /// Set once the time or node allowance runs out. The search unwinds as soon as this is `true`.
    stopped: bool,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    /// Transposition table used to cache information during search.
    ttable: TTable,

    /// Accumulated bonuses for quiet moves that raised alpha.
    history: HistoryTable,

    /// Quiet moves that raised alpha, per ply.
    killers: KillerTable,

    /// Number of late moves searched at a reduced depth.
    reductions: u64,

    /// Number of reduced searches that had to be repeated at full depth.
    researches: u64,
}

impl Search {
    /// Construct a new [`Search`] instance to execute.
    #[inline(always)]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            nodes: 0,
            stopped: false,
            config,
            ttable: TTable::default(),
            history: HistoryTable::default(),
            killers: KillerTable::default(),
            reductions: 0,
            researches: 0,
        }
    }

    /// Start the search on `position` with `side` to move, returning a [`SearchResult`].
    ///
    /// This is the entrypoint of the search. It always returns a move if `side` has one,
    /// no matter how little time it was given.
    pub fn start(mut self, position: &Position, side: Color) -> SearchResult {
        debug!(
            "Starting search on {position:?} ({side} to move), max depth {}, budget {:?}",
            self.config.max_depth, self.config.time_budget
        );

        let result = self.iterative_deepening(position, side);

        let hits = self.ttable.hits();
        let accesses = self.ttable.accesses();
        let hit_rate = hits as f32 / accesses.max(1) as f32 * 100.0;
        trace!(
            "TT stats: {hits} hits / {accesses} accesses ({hit_rate:.2}% hit rate), {} entries",
            self.ttable.num_entries()
        );
        trace!("LMR stats: {} reductions, {} re-searches", self.reductions, self.researches);

        result
    }

    /// Performs [iterative deepening](https://www.chessprogramming.org/Iterative_Deepening) (ID) on the Search's position.
    ///
    /// Each iteration searches every root move one ply deeper than the last, inside an aspiration window
    /// around the previous iteration's score. The best move of a completed iteration is searched first in the next.
    fn iterative_deepening(&mut self, position: &Position, side: Color) -> SearchResult {
        let mut result = SearchResult::default();

        let moves = legal_moves(position, side);
        if moves.is_empty() {
            result.score = if is_in_check(position, side) {
                -Score::MATE
            } else {
                Score::DRAW
            };
            return result;
        }

        // Order the root moves once; afterwards only the previous best move is promoted
        let mut ordered = MovePicker::new(moves, |mv| self.score_move(position, mv, None, 0))
            .map(|(mv, _)| mv)
            .collect::<MoveList>();

        // Initialize `bestmove` to the first move available
        result.bestmove = ordered.first().copied();

        let mut depth = 1;

        'iterative_deepening: while depth <= self.config.max_depth {
            let mut window = AspirationWindow::new(result.score, depth);

            let (bestmove, score) = 'aspiration_window: loop {
                let (bestmove, score) = self.search_root(position, side, &ordered, depth, window.bounds);

                // If we've ran out of time, the last iteration was forcibly cancelled and can't be trusted.
                if self.stopped {
                    result.timed_out = true;

                    // With no completed iteration to fall back on, any fully evaluated candidate beats a blind guess
                    if result.depth == 0 {
                        if let Some(mv) = bestmove {
                            result.bestmove = Some(mv);
                            result.score = score;
                        }
                    }

                    debug!(
                        "Search cancelled during depth {depth} after {} nodes; using {} from depth {}",
                        self.nodes,
                        result.bestmove.map(|mv| mv.to_string()).unwrap_or_default(),
                        result.depth
                    );
                    break 'iterative_deepening;
                }

                // If the score fell outside of the aspiration window, widen it gradually
                if window.fails_low(score) {
                    window.widen_down(score);
                } else if window.fails_high(score) {
                    window.widen_up(score);
                } else {
                    break 'aspiration_window (bestmove, score);
                }
            };

            result.bestmove = bestmove.or(result.bestmove);
            result.score = score;
            result.depth = depth;

            // Search the best move first during the next iteration
            if let Some(index) = ordered.iter().position(|&mv| Some(mv) == bestmove) {
                ordered[..=index].rotate_right(1);
            }

            debug!(
                "depth {depth} score {score} nodes {} time {}ms bestmove {}",
                self.nodes,
                self.config.starttime.elapsed().as_millis(),
                result.bestmove.map(|mv| mv.to_string()).unwrap_or_default()
            );

            depth += 1;
        }

        result.nodes = self.nodes;
        result
    }

    /// Searches every move in `moves` from the root, in order.
    ///
    /// Returns the best move and its score, or `None` if the search was cancelled before any move finished.
    fn search_root(
        &mut self,
        position: &Position,
        side: Color,
        moves: &MoveList,
        depth: u8,
        mut bounds: SearchBounds,
    ) -> (Option<Move>, Score) {
        let mut best = Score::ALPHA;
        let mut bestmove = None;

        for &mv in moves {
            let new = position.with_move_made(mv);
            let score = -self.negamax(&new, side.opponent(), depth - 1, 1, -bounds, true);

            if self.stopped {
                break;
            }

            if score > best {
                best = score;
                bestmove = Some(mv);
            }

            if score > bounds.alpha {
                bounds.alpha = score;
            }

            // Fail high; the aspiration window must be widened anyway
            if bounds.alpha >= bounds.beta {
                break;
            }
        }

        (bestmove, best)
    }

    /// Primary location of search logic.
    ///
    /// Uses the [negamax](https://www.chessprogramming.org/Negamax) algorithm in a [fail soft](https://www.chessprogramming.org/Alpha-Beta#Negamax_Framework) framework.
    fn negamax(
        &mut self,
        position: &Position,
        side: Color,
        depth: u8,
        ply: usize,
        mut bounds: SearchBounds,
        allow_null: bool,
    ) -> Score {
        if self.search_cancelled() {
            return bounds.alpha;
        }
        self.nodes += 1;

        /****************************************************************************************************
         * TT Cutoffs: https://www.chessprogramming.org/Transposition_Table#Transposition_Table_Cutoffs
         ****************************************************************************************************/
        let key = position.key(side);
        let tt_entry = self.ttable.probe(&key);
        if let Some(tt_score) = Self::probe_tt(tt_entry, depth, ply, bounds) {
            return tt_score;
        }

        /****************************************************************************************************
         * Quiescence Search: https://www.chessprogramming.org/Quiescence_Search
         ****************************************************************************************************/
        if depth == 0 {
            return self.quiescence(position, side, ply, bounds);
        }

        let in_check = is_in_check(position, side);

        if allow_null {
            if let Some(score) = self.node_pruning_score(position, side, depth, ply, bounds, in_check) {
                return score;
            }
        }

        // If there are no legal moves, it's either mate or a draw.
        let moves = legal_moves(position, side);
        if moves.is_empty() {
            return if in_check {
                // Offset by ply to prefer earlier mates
                ply as i32 - Score::MATE
            } else {
                // Stalemate is a draw in Xiangqi
                Score::DRAW
            };
        }

        // Look at "promising" moves first
        let tt_move = tt_entry.map(|entry| entry.bestmove);
        let picker = MovePicker::new(moves, |mv| self.score_move(position, mv, tt_move, ply));

        // Start with a *really bad* initial score
        let mut best = Score::ALPHA;
        let mut bestmove = None;
        let original_alpha = bounds.alpha;

        /****************************************************************************************************
         * Primary move loop
         ****************************************************************************************************/
        for (i, (mv, _)) in picker.enumerate() {
            // Copy-make the new position
            let new = position.with_move_made(mv);
            let is_capture = position.is_occupied(mv.to());
            let full_depth = depth - 1;

            /****************************************************************************************************
             * Late Move Reductions: https://www.chessprogramming.org/Late_Move_Reductions
             *
             * Quiet moves late in the ordering are unlikely to be best, so search them shallower first.
             ****************************************************************************************************/
            let reduced = depth >= tune::min_lmr_depth!()
                && i >= tune::min_lmr_moves!()
                && !is_capture
                && !is_in_check(&new, side.opponent());

            let new_depth = if reduced {
                self.reductions += 1;
                full_depth - tune::lmr_reduction!()
            } else {
                full_depth
            };

            let mut score = -self.negamax(&new, side.opponent(), new_depth, ply + 1, -bounds, true);
            if self.stopped {
                return bounds.alpha;
            }

            // The reduced search raised alpha, so it has to be verified at full depth
            if reduced && score > bounds.alpha {
                self.researches += 1;
                score = -self.negamax(&new, side.opponent(), full_depth, ply + 1, -bounds, true);
                if self.stopped {
                    return bounds.alpha;
                }
            }

            /****************************************************************************************************
             * Score evaluation & bounds adjustments
             ****************************************************************************************************/
            if score > best {
                best = score;
                bestmove = Some(mv);

                if score > bounds.alpha {
                    bounds.alpha = score;

                    // Killer and history heuristics only reward quiet moves
                    if !is_capture {
                        self.killers.store(mv, ply);
                        self.history.update(mv, depth);
                    }
                }

                // Fail high
                if bounds.alpha >= bounds.beta {
                    break;
                }
            }
        }

        if let Some(bestmove) = bestmove {
            self.save_to_tt(
                key,
                bestmove,
                best,
                SearchBounds::new(original_alpha, bounds.beta),
                depth,
                ply,
            );
        }

        best
    }

    /// Quiescence Search (QSearch)
    ///
    /// A search that looks at only possible captures and capture-chains.
    /// This is called when [`Search::negamax`] reaches a depth of 0, and stops at [`MAX_PLY`].
    fn quiescence(&mut self, position: &Position, side: Color, ply: usize, mut bounds: SearchBounds) -> Score {
        if self.search_cancelled() {
            return bounds.alpha;
        }
        self.nodes += 1;

        // Evaluate the current position, to serve as our baseline
        let stand_pat = evaluate(position, side);

        // Beta cutoff; this position is "too good" and our opponent would never let us get here
        if stand_pat >= bounds.beta {
            return stand_pat;
        } else if stand_pat > bounds.alpha {
            bounds.alpha = stand_pat;
        }

        if ply >= MAX_PLY - 1 {
            return stand_pat;
        }

        let captures = legal_moves(position, side)
            .into_iter()
            .filter(|mv| position.is_occupied(mv.to()))
            .collect::<MoveList>();

        // Most valuable victims first
        let picker = MovePicker::new(captures, |mv| {
            position
                .piece_at(mv.to())
                .map_or(0, |victim| victim.kind().value())
        });

        let mut best = stand_pat;

        for (mv, _) in picker {
            let new = position.with_move_made(mv);
            let score = -self.quiescence(&new, side.opponent(), ply + 1, -bounds);

            if self.stopped {
                return bounds.alpha;
            }

            if score > best {
                best = score;

                if score > bounds.alpha {
                    bounds.alpha = score;
                }

                if score >= bounds.beta {
                    break;
                }
            }
        }

        best // fail-soft
    }

    /// Checks if we've exceeded any conditions that would warrant the search to end.
    ///
    /// The clock is only sampled once every [`tune::node_check_interval`] nodes.
    #[inline(always)]
    fn search_cancelled(&mut self) -> bool {
        if !self.stopped {
            // Condition 1: We've exceeded our allotted search time
            if self.nodes % tune::node_check_interval!() == 0 {
                self.stopped = self.config.starttime.elapsed() >= self.config.time_budget;
            }

            // Condition 2: We've exceeded the maximum amount of nodes we're allowed to search
            self.stopped |= self.nodes >= self.config.max_nodes;
        }

        self.stopped
    }

    /// Saves the provided data to an entry in the TTable.
    #[inline(always)]
    fn save_to_tt(
        &mut self,
        key: PositionKey,
        bestmove: Move,
        score: Score,
        bounds: SearchBounds,
        depth: u8,
        ply: usize,
    ) {
        let entry = TTableEntry::new(bestmove, score, bounds, depth, ply as i32);
        self.ttable.store(key, entry);
    }

    /// Returns the score of a [`TTable`] entry, if it is deep enough and usable within `bounds`.
    ///
    /// See [`TTableEntry::try_score`] for more.
    #[inline(always)]
    fn probe_tt(
        entry: Option<TTableEntry>,
        depth: u8,
        ply: usize,
        bounds: SearchBounds,
    ) -> Option<Score> {
        // Can only cut off if the existing entry came from a greater depth.
        entry
            .filter(|entry| entry.depth >= depth)
            .and_then(|entry| entry.try_score(bounds, ply as i32))
    }

    /// Applies a score to the provided move, intended to be used when ordering moves during search.
    ///
    /// Higher is better: the TT move, then captures of valuable pieces, then killers and history.
    /// A slight pull towards the center of the board and a bonus for checking break ties.
    #[inline(always)]
    fn score_move(&self, position: &Position, mv: &Move, tt_move: Option<Move>, ply: usize) -> i32 {
        let mv = *mv;
        let mut score = 0;

        if tt_move == Some(mv) {
            score += tune::tt_move_bonus!();
        }

        if let Some(victim) = position.piece_at(mv.to()) {
            score += tune::capture_bonus!() + victim.kind().value() * tune::victim_multiplier!();
        }

        let [first, second] = self.killers.get(ply);
        if first == Some(mv) {
            score += tune::first_killer_bonus!();
        }
        if second == Some(mv) {
            score += tune::second_killer_bonus!();
        }

        score += self.history.get(mv);

        if gives_check(position, mv) {
            score += tune::check_move_bonus!();
        }

        // Distance from the center is measured in half-rows, since the center lies on the river.
        // Doubling everything else keeps the comparison exact.
        let to = mv.to();
        let off_center = 2 * (to.col() as i32 - 4).abs() + (2 * to.row() as i32 - 9).abs();

        2 * score - off_center
    }

    /// If null move pruning can cut this node, returns the score to cut it with.
    ///
    /// Never prunes when `side` is in check or the remaining depth is too shallow.
    /// Not called right after another null move.
    #[inline]
    fn node_pruning_score(
        &mut self,
        position: &Position,
        side: Color,
        depth: u8,
        ply: usize,
        bounds: SearchBounds,
        in_check: bool,
    ) -> Option<Score> {
        /****************************************************************************************************
         * Null Move Pruning: https://www.chessprogramming.org/Null_Move_Pruning
         *
         * If we can afford to skip our turn and give our opponent two moves in a row while maintaining a high
         * enough score, we can prune this branch as our opponent would likely never let us reach it anyway.
         ****************************************************************************************************/
        // Passing while in check would leave the General capturable
        if in_check || depth < tune::min_nmp_depth!() {
            return None;
        }

        let reduction = tune::nmp_reduction!() + (depth >= tune::nmp_deep_depth!()) as u8;
        let nmp_depth = depth.saturating_sub(1 + reduction);

        // Search the same board with the opponent to move, at a reduced depth with a zero-window
        let score = -self.negamax(position, side.opponent(), nmp_depth, ply + 1, -bounds.null_beta(), false);

        (!self.stopped && score >= bounds.beta).then_some(score)
    }
}
