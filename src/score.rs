/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::MAX_PLY;

/// A numerical representation of the evaluation of a position / move.
///
/// Units are the material values of [`crate::PieceKind::value`], where a Soldier is worth 12.
/// This value is internally capped at [`Self::INF`].
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Largest possible score ever achievable.
    pub const INF: Self = Self(i16::MAX as i32);

    /// Score of mate in the current position.
    pub const MATE: Self = Self(Self::INF.0 - 1);

    /// Score of a draw, including stalemate.
    pub const DRAW: Self = Self(0);

    /// Initial value of alpha in alpha-beta pruning.
    pub const ALPHA: Self = Self(-Self::INF.0);

    /// Initial value of beta in alpha-beta pruning.
    pub const BETA: Self = Self::INF;

    /// Lowest possible score for mate.
    ///
    /// This is only obtainable if mate is found [`MAX_PLY`] plies from the root.
    pub const LOWEST_MATE: Self = Self(Self::MATE.0 - MAX_PLY as i32);

    /// Constructs a new [`Score`] instance.
    #[inline(always)]
    pub const fn new(score: i32) -> Self {
        Self(score)
    }

    /// Returns the inner value of this [`Score`].
    #[inline(always)]
    pub const fn inner(&self) -> i32 {
        self.0
    }

    /// Returns `true` if the score is a mate score.
    #[inline(always)]
    pub fn is_mate(&self) -> bool {
        self.abs() >= Self::LOWEST_MATE
    }

    /// Returns the number of plies (half moves) this score is from mate.
    #[inline(always)]
    pub const fn plies_to_mate(&self) -> i32 {
        Self::MATE.0 - self.0.abs()
    }

    /// Returns the number of moves (full moves) this score is from mate.
    ///
    /// Negative if the side to move is the one being mated.
    #[inline(always)]
    pub const fn moves_to_mate(&self) -> i32 {
        let plies = self.plies_to_mate();

        // Mating takes our own move as well, so an odd ply count rounds up
        if self.0 > 0 {
            (plies + 1) / 2
        } else {
            -plies / 2
        }
    }

    /// Converts a mate score measured from the root into one measured from the node `ply` plies deep.
    ///
    /// This is the form a mate score is stored in the [`crate::TTable`], so that it stays valid
    /// when the same position is reached at a different distance from the root.
    #[inline(always)]
    pub fn relative(self, ply: i32) -> Self {
        self.shift_mate(ply)
    }

    /// Inverse of [`Score::relative`]: converts a node-relative mate score back to one measured from the root.
    #[inline(always)]
    pub fn absolute(self, ply: i32) -> Self {
        self.shift_mate(-ply)
    }

    /// Moves a mate score `ply` plies further from zero. Other scores are unchanged.
    #[inline(always)]
    fn shift_mate(self, ply: i32) -> Self {
        match self.0 {
            _ if !self.is_mate() => self,
            score if score > 0 => Self(score + ply),
            score => Self(score - ply),
        }
    }

    /// Returns the absolute value of this [`Score`].
    #[inline(always)]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl std::ops::Sub<Score> for i32 {
    type Output = Score;

    #[inline(always)]
    fn sub(self, rhs: Score) -> Self::Output {
        Score(self - rhs.0)
    }
}

impl PartialEq<i32> for Score {
    fn eq(&self, other: &i32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<i32> for Score {
    fn partial_cmp(&self, other: &i32) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(f, "mate {}", self.moves_to_mate())
        } else {
            self.0.fmt(f)
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(f, "{} ({} plies to mate)", self.0, self.plies_to_mate())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_absolute() {
        let plies = 3;

        // Plies to mate
        let our_mate = Score::MATE - plies;
        assert_eq!(our_mate.plies_to_mate(), plies);

        let their_mate = -(Score::MATE - plies);
        assert_eq!(their_mate.plies_to_mate(), plies);

        // Relative scores
        let our_relative = our_mate.relative(plies);
        assert_eq!(our_relative, Score::MATE);

        let their_relative = their_mate.relative(plies);
        assert_eq!(their_relative, -Score::MATE);

        // Absolute scores
        let our_absolute = our_relative.absolute(plies);
        assert_eq!(our_absolute, our_mate);

        let their_absolute = their_relative.absolute(plies);
        assert_eq!(their_absolute, their_mate);
    }

    #[test]
    fn test_material_is_never_mate() {
        assert!(!Score::new(10_000 + 2_000).is_mate());
        assert!((Score::MATE - 5).is_mate());
        assert!((-Score::MATE + 5).is_mate());
    }

    #[test]
    fn test_moves_to_mate() {
        // Mating in one move means the mate lands one ply from the root
        assert_eq!((Score::MATE - 1).moves_to_mate(), 1);
        // Being mated after our move and theirs
        assert_eq!((2 - Score::MATE).moves_to_mate(), -1);
    }
}
