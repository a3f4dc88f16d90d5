/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use super::Square;

/// A generic container of 90 elements, one per [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table<T>([T; Square::COUNT]);

impl<T> Table<T> {
    /// Create a new [`Table`] by applying `f` to each [`Square`].
    #[inline(always)]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Square) -> T,
    {
        Self(std::array::from_fn(|i| f(Square(i as u8))))
    }

    /// Create a new [`Table`] with the provided values, in row-major order.
    #[inline(always)]
    pub const fn new(values: [T; Square::COUNT]) -> Self {
        Self(values)
    }

    /// Create a new [`Table`] with every value set to `value`.
    #[inline(always)]
    pub const fn splat(value: T) -> Self
    where
        T: Copy,
    {
        Self([value; Square::COUNT])
    }

    /// Get the value of this [`Table`] at the index of `square`.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> &T {
        &self.0[square.index()]
    }

    /// Set the value of this [`Table`] at the index of `square`.
    #[inline(always)]
    pub fn set(&mut self, square: Square, value: T) {
        self.0[square.index()] = value;
    }

    /// Iterate over every square and its value, in row-major order.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, &T)> {
        Square::iter().zip(self.0.iter())
    }
}

impl<T> Default for Table<T>
where
    T: Default + Copy,
{
    #[inline(always)]
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T> Index<Square> for Table<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl<T> IndexMut<Square> for Table<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

impl<T: fmt::Display> fmt::Display for Table<T> {
    /// Prints the table as a grid, Black's back rank first, with ICCS rank/file labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = f.width().unwrap_or(4);

        for row in 0..Square::ROWS {
            let rank = Square::ROWS - 1 - row;
            write!(f, "{rank} |")?;
            for col in 0..Square::COLS {
                let value = &self[Square::at(row, col)];
                write!(f, "{:>width$}", value.to_string())?;
            }
            writeln!(f)?;
        }

        write!(f, "  +")?;
        for _ in 0..Square::COLS {
            write!(f, "{}", "-".repeat(width))?;
        }
        write!(f, "\n   ")?;
        for col in 0..Square::COLS {
            write!(f, "{:>width$}", (b'a' + col) as char)?;
        }

        Ok(())
    }
}
