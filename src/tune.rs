/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Bonus for a Soldier that has crossed the river.
macro_rules! soldier_river_bonus {
    () => {
        6
    };
}
pub(crate) use soldier_river_bonus;

/// Cap on the mobility bonus of a Chariot or Cannon.
macro_rules! max_mobility_bonus {
    () => {
        10
    };
}
pub(crate) use max_mobility_bonus;

/// Penalty for being in check, and bonus for giving check.
macro_rules! check_bonus {
    () => {
        30
    };
}
pub(crate) use check_bonus;

/// Number of nodes between checks of the clock. Must be a power of two.
macro_rules! node_check_interval {
    () => {
        128
    };
}
pub(crate) use node_check_interval;

/// Initial Aspiration Window size
macro_rules! initial_aspiration_window_delta {
    () => {
        30
    };
}
pub(crate) use initial_aspiration_window_delta;

/// Minimum depth to incorporate Aspiration Windows into the Iterative Deepening search.
macro_rules! min_aspiration_window_depth {
    () => {
        2
    };
}
pub(crate) use min_aspiration_window_depth;

/// Minium depth at which null move pruning can be applied.
macro_rules! min_nmp_depth {
    () => {
        3
    };
}
pub(crate) use min_nmp_depth;

/// Value to subtract from `depth` when applying null move pruning.
macro_rules! nmp_reduction {
    () => {
        2
    };
}
pub(crate) use nmp_reduction;

/// Depth at which null move pruning reduces by one extra ply.
macro_rules! nmp_deep_depth {
    () => {
        5
    };
}
pub(crate) use nmp_deep_depth;

/// Minimum depth at which to apply late move reductions.
macro_rules! min_lmr_depth {
    () => {
        3
    };
}
pub(crate) use min_lmr_depth;

/// Minimum moves that must be searched before late move reductions can be applied.
macro_rules! min_lmr_moves {
    () => {
        4
    };
}
pub(crate) use min_lmr_moves;

/// Plies removed from a move's depth by late move reductions.
macro_rules! lmr_reduction {
    () => {
        1
    };
}
pub(crate) use lmr_reduction;

/// Ordering bonus for the move stored in the transposition table.
macro_rules! tt_move_bonus {
    () => {
        10_000
    };
}
pub(crate) use tt_move_bonus;

/// Base ordering bonus for a capture, before the victim's value is added.
macro_rules! capture_bonus {
    () => {
        500
    };
}
pub(crate) use capture_bonus;

/// Multiplier applied to the victim's value when ordering captures.
macro_rules! victim_multiplier {
    () => {
        10
    };
}
pub(crate) use victim_multiplier;

/// Ordering bonus for the most recent killer move at a ply.
macro_rules! first_killer_bonus {
    () => {
        250
    };
}
pub(crate) use first_killer_bonus;

/// Ordering bonus for the older killer move at a ply.
macro_rules! second_killer_bonus {
    () => {
        200
    };
}
pub(crate) use second_killer_bonus;

/// Ordering bonus for a move that gives check.
macro_rules! check_move_bonus {
    () => {
        40
    };
}
pub(crate) use check_move_bonus;

/// Maximum value a history entry can accumulate.
///
/// Kept below the second killer bonus, so history only orders quiet moves among themselves.
macro_rules! max_history_bonus {
    () => {
        150
    };
}
pub(crate) use max_history_bonus;

/// Skill levels below this bypass the search and pick among the best-looking moves at random.
macro_rules! min_search_skill {
    () => {
        3
    };
}
pub(crate) use min_search_skill;

/// Percent of a capture's victim value added when quickly scoring moves at low skill.
macro_rules! quick_capture_percent {
    () => {
        20
    };
}
pub(crate) use quick_capture_percent;

/// Penalty applied when quickly scoring a move that leaves the mover in check.
macro_rules! quick_check_penalty {
    () => {
        50
    };
}
pub(crate) use quick_check_penalty;
