/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{
    book_move, evaluate, is_in_check, legal_moves, tune, Color, Move, Position, Search, SearchConfig,
};

/// Search depth ceiling for each skill level, starting at skill 1.
const SKILL_DEPTHS: [u8; Skill::COUNT] = [3, 4, 6, 7, 8, 9];

/// Time budget in milliseconds for each skill level, starting at skill 1.
const SKILL_TIME_BUDGETS_MS: [u64; Skill::COUNT] = [250, 350, 500, 700, 900, 1200];

/// Playing strength of the engine, from 1 (weakest) to 6 (strongest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Skill(u8);

impl Skill {
    /// Number of distinct skill levels.
    pub const COUNT: usize = 6;

    /// Weakest skill level.
    pub const MIN: Self = Self(1);

    /// Strongest skill level.
    pub const MAX: Self = Self(Self::COUNT as u8);

    /// Creates a new [`Skill`], clamping `level` into `1..=6`.
    #[inline(always)]
    pub fn new(level: i64) -> Self {
        Self(level.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    /// The numeric level of this skill.
    #[inline(always)]
    pub const fn level(&self) -> u8 {
        self.0
    }

    /// Maximum depth searched at this skill.
    #[inline(always)]
    pub const fn depth(&self) -> u8 {
        SKILL_DEPTHS[self.0 as usize - 1]
    }

    /// Wall-clock budget for a search at this skill.
    #[inline(always)]
    pub const fn time_budget(&self) -> Duration {
        Duration::from_millis(SKILL_TIME_BUDGETS_MS[self.0 as usize - 1])
    }

    /// Returns `true` if this skill runs the full search rather than the quick heuristic.
    #[inline(always)]
    pub const fn uses_search(&self) -> bool {
        self.0 >= tune::min_search_skill!()
    }
}

impl Default for Skill {
    #[inline(always)]
    fn default() -> Self {
        Self(3)
    }
}

impl FromStr for Skill {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid skill level {s:?}"))?;
        Ok(Self::new(level))
    }
}

impl fmt::Display for Skill {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a [`Selection`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionSource {
    /// The opening book.
    Book,

    /// The full alpha-beta search.
    Search,

    /// The quick heuristic used at low skill levels.
    Heuristic,
}

/// A move chosen by the [`MoveSelector`], with details on how it was chosen.
///
/// The details are informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The chosen move.
    pub mv: Move,

    /// The skill level the move was chosen at.
    pub skill: Skill,

    /// Depth actually reached: 0 for a book move, 1 for the heuristic.
    pub depth: u8,

    /// Time the search was allowed.
    pub time_budget: Duration,

    /// Where the move came from.
    pub source: SelectionSource,
}

/// Options for a single call to [`MoveSelector::select`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Consult the opening book before searching.
    pub use_opening_book: bool,

    /// Number of moves (plies) played so far in the game.
    pub move_number: usize,
}

/// Picks moves for the engine according to a [`Skill`] level.
///
/// Low skill levels choose randomly among the better-looking moves, so the source of randomness is injectable.
#[derive(Debug, Clone)]
pub struct MoveSelector<R = Xoshiro256PlusPlus> {
    rng: R,
}

impl MoveSelector<Xoshiro256PlusPlus> {
    /// Creates a [`MoveSelector`] whose random choices are fully determined by `seed`.
    #[inline(always)]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl Default for MoveSelector<Xoshiro256PlusPlus> {
    /// Seeds the selector from the operating system.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Xoshiro256PlusPlus::from_os_rng())
    }
}

impl<R: Rng> MoveSelector<R> {
    /// Creates a [`MoveSelector`] that draws from `rng`.
    #[inline(always)]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Chooses a move for `color` to play in `position`.
    ///
    /// The opening book is tried first (if enabled), then either the quick heuristic or the full search,
    /// depending on `skill`. Returns `None` only if `color` has no legal moves.
    pub fn select(
        &mut self,
        position: &Position,
        color: Color,
        skill: Skill,
        options: SelectOptions,
    ) -> Option<Selection> {
        let time_budget = skill.time_budget();

        if options.use_opening_book {
            if let Some(mv) = book_move(position, color, options.move_number) {
                info!("Book move {mv} for {color} at move {}", options.move_number);
                return Some(Selection {
                    mv,
                    skill,
                    depth: 0,
                    time_budget,
                    source: SelectionSource::Book,
                });
            }
        }

        if !skill.uses_search() {
            debug!("Skill {skill}: choosing {color}'s move heuristically");
            let mv = self.heuristic_move(position, color)?;
            return Some(Selection {
                mv,
                skill,
                depth: 1,
                time_budget,
                source: SelectionSource::Heuristic,
            });
        }

        debug!(
            "Skill {skill}: searching {color}'s move to depth {} within {}ms",
            skill.depth(),
            time_budget.as_millis()
        );
        let result = Search::new(SearchConfig::for_skill(skill)).start(position, color);
        let mv = result.bestmove?;

        debug!(
            "Search chose {mv} with score {} at depth {} ({} nodes)",
            result.score, result.depth, result.nodes
        );

        Some(Selection {
            mv,
            skill,
            depth: result.depth,
            time_budget,
            source: SelectionSource::Search,
        })
    }

    /// Scores every legal move with [`quick_score`] and picks randomly among the top third.
    fn heuristic_move(&mut self, position: &Position, color: Color) -> Option<Move> {
        let mut scored = legal_moves(position, color)
            .into_iter()
            .map(|mv| (mv, quick_score(position, color, mv)))
            .collect::<Vec<_>>();

        if scored.is_empty() {
            return None;
        }

        // Stable, so equally scored moves keep their generation order
        scored.sort_by_key(|&(_, score)| -score);

        let candidates = (scored.len() / 3).max(1);
        let (mv, _) = scored[self.rng.random_range(0..candidates)];
        Some(mv)
    }
}

/// Quick, search-free estimate of how good `mv` is for `color`, in hundredths of a [`crate::Score`] unit.
///
/// The evaluation after the move, plus a fraction of the captured piece's value,
/// minus a penalty if the move leaves `color` in check.
pub fn quick_score(position: &Position, color: Color, mv: Move) -> i32 {
    let after = position.with_move_made(mv);
    let mut score = evaluate(&after, color).inner() * 100;

    if let Some(victim) = position.piece_at(mv.to()) {
        score += victim.kind().value() * tune::quick_capture_percent!();
    }

    if is_in_check(&after, color) {
        score -= tune::quick_check_penalty!() * 100;
    }

    score
}

/// Chooses a move for `color` at the given `skill`, or `None` if it has no legal moves.
///
/// Shorthand for [`MoveSelector::select`] on a freshly seeded selector.
///
/// # Example
/// ```
/// # use xiangqi::{ai_move, Color, Position, SelectOptions, Skill};
/// let options = SelectOptions { use_opening_book: true, move_number: 0 };
/// let mv = ai_move(&Position::default(), Color::Red, Skill::new(3), options);
/// assert_eq!(mv.unwrap().to_string(), "b2e2");
/// ```
pub fn ai_move(position: &Position, color: Color, skill: Skill, options: SelectOptions) -> Option<Move> {
    MoveSelector::default()
        .select(position, color, skill, options)
        .map(|selection| selection.mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn test_skill_is_clamped() {
        assert_eq!(Skill::new(0), Skill::MIN);
        assert_eq!(Skill::new(-4), Skill::MIN);
        assert_eq!(Skill::new(99), Skill::MAX);
        assert_eq!("4".parse::<Skill>().unwrap().level(), 4);
        assert!("four".parse::<Skill>().is_err());
    }

    #[test]
    fn test_skill_curves_increase() {
        for level in 1..Skill::COUNT as i64 {
            let (lower, higher) = (Skill::new(level), Skill::new(level + 1));
            assert!(lower.depth() < higher.depth());
            assert!(lower.time_budget() < higher.time_budget());
        }
        assert_eq!(Skill::MIN.time_budget(), Duration::from_millis(250));
        assert_eq!(Skill::MAX.depth(), 9);
        assert!(!Skill::new(2).uses_search());
        assert!(Skill::new(3).uses_search());
    }

    #[test]
    fn test_book_selection() {
        let options = SelectOptions {
            use_opening_book: true,
            move_number: 0,
        };
        let selection = MoveSelector::from_seed(1)
            .select(&Position::default(), Color::Red, Skill::new(1), options)
            .unwrap();

        assert_eq!(selection.mv, CENTRAL_CANNON);
        assert_eq!(selection.source, SelectionSource::Book);
        assert_eq!(selection.depth, 0);
    }

    #[test]
    fn test_heuristic_picks_from_top_third() {
        let pos = Position::default();
        let mut scored = legal_moves(&pos, Color::Red)
            .into_iter()
            .map(|mv| (mv, quick_score(&pos, Color::Red, mv)))
            .collect::<Vec<_>>();
        scored.sort_by_key(|&(_, score)| -score);
        let top = &scored[..scored.len() / 3];

        let mut selector = MoveSelector::from_seed(7);
        for _ in 0..20 {
            let selection = selector
                .select(&pos, Color::Red, Skill::MIN, SelectOptions::default())
                .unwrap();
            assert_eq!(selection.source, SelectionSource::Heuristic);
            assert!(top.iter().any(|&(mv, _)| mv == selection.mv));
        }
    }

    #[test]
    fn test_no_moves_no_selection() {
        let mated = Position::from_fen("3k5/R8/3R5/9/9/9/9/9/9/4K4").unwrap();
        for level in [1, 6] {
            let mut selector = MoveSelector::from_seed(0);
            assert!(selector
                .select(&mated, Color::Black, Skill::new(level), SelectOptions::default())
                .is_none());
        }
    }
}
