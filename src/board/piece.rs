/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Neg, str::FromStr};

use anyhow::{bail, Result};

/// Represents the color of a player or piece.
///
/// In Xiangqi, Red traditionally moves first, and therefore [`Color`] defaults to [`Color::Red`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    Red,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with Red.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Red, Self::Black]
    }

    /// Returns `true` if this [`Color`] is Red.
    #[inline(always)]
    pub const fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if this [`Color`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use xiangqi::Color;
    /// assert_eq!(Color::Red.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::Red);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Returns this [`Color`] as a `usize`.
    ///
    /// Will be `0` for Red, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the row direction this color's Soldiers advance in.
    ///
    /// Red starts at the bottom of the board (rows 5-9) and advances towards row 0.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::Red => -1,
            Self::Black => 1,
        }
    }

    /// Creates a [`Color`] from the case of a piece letter, with uppercase being Red.
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::Red
        } else {
            Self::Black
        }
    }

    /// Converts this [`Color`] to the single character used in position keys and FEN strings.
    #[inline(always)]
    pub const fn to_char(&self) -> char {
        match self {
            Self::Red => 'r',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Color must be either 'red' or 'black' (case-insensitive). Found {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a Xiangqi piece can have.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 7;

    /// An array of all 7 [`PieceKind`]s.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::General,
            Self::Advisor,
            Self::Elephant,
            Self::Horse,
            Self::Chariot,
            Self::Cannon,
            Self::Soldier,
        ]
    }

    /// Returns this [`PieceKind`] as a `usize`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Material value of this [`PieceKind`].
    ///
    /// The General is not truly capturable, but a large value keeps positions
    /// missing a General clearly lost.
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        match self {
            Self::General => 10_000,
            Self::Advisor => 20,
            Self::Elephant => 20,
            Self::Horse => 45,
            Self::Chariot => 100,
            Self::Cannon => 60,
            Self::Soldier => 12,
        }
    }

    /// Returns `true` if this piece slides along ranks and files.
    #[inline(always)]
    pub const fn is_slider(&self) -> bool {
        matches!(self, Self::Chariot | Self::Cannon)
    }

    /// Creates a [`PieceKind`] from a FEN letter, ignoring case.
    ///
    /// Accepts both the common (`b`, `n`, `p`) and the alternate (`e`, `h`, `s`) letters.
    pub fn from_char(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'k' => Ok(Self::General),
            'a' => Ok(Self::Advisor),
            'b' | 'e' => Ok(Self::Elephant),
            'n' | 'h' => Ok(Self::Horse),
            'r' => Ok(Self::Chariot),
            'c' => Ok(Self::Cannon),
            'p' | 's' => Ok(Self::Soldier),
            _ => bail!("Invalid char for PieceKind: Must be one of [k, a, b, n, r, c, p]. Got {kind:?}"),
        }
    }

    /// Converts this [`PieceKind`] to its lowercase FEN letter.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::General => 'k',
            Self::Advisor => 'a',
            Self::Elephant => 'b',
            Self::Horse => 'n',
            Self::Chariot => 'r',
            Self::Cannon => 'c',
            Self::Soldier => 'p',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Advisor => "advisor",
            Self::Elephant => "elephant",
            Self::Horse => "horse",
            Self::Chariot => "chariot",
            Self::Cannon => "cannon",
            Self::Soldier => "soldier",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A Xiangqi piece: a [`PieceKind`] belonging to a [`Color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Number of distinct pieces (every kind in both colors).
    pub const COUNT: usize = Color::COUNT * PieceKind::COUNT;

    /// Creates a new [`Piece`] from the provided [`Color`] and [`PieceKind`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this is a General.
    #[inline(always)]
    pub const fn is_general(&self) -> bool {
        matches!(self.kind, PieceKind::General)
    }

    /// Index of this [`Piece`] into a table of [`Piece::COUNT`] elements.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.color.index() * PieceKind::COUNT + self.kind.index()
    }

    /// Creates a [`Piece`] from a FEN letter. Uppercase letters are Red.
    ///
    /// # Example
    /// ```
    /// # use xiangqi::{Color, Piece, PieceKind};
    /// let piece = Piece::from_char('C').unwrap();
    /// assert_eq!(piece, Piece::new(Color::Red, PieceKind::Cannon));
    /// ```
    #[inline(always)]
    pub fn from_char(c: char) -> Result<Self> {
        Ok(Self::new(Color::from_case(c), PieceKind::from_char(c)?))
    }

    /// Converts this [`Piece`] to its FEN letter, uppercase for Red.
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        match self.color {
            Color::Red => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Fetches a human-readable name for this [`Piece`], such as `"red cannon"`.
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_chars_roundtrip_case() {
        for color in Color::all() {
            for kind in PieceKind::all() {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_char(piece.char()).unwrap(), piece);
            }
        }
    }

    #[test]
    fn test_alternate_letters() {
        assert_eq!(PieceKind::from_char('E').unwrap(), PieceKind::Elephant);
        assert_eq!(PieceKind::from_char('h').unwrap(), PieceKind::Horse);
        assert_eq!(PieceKind::from_char('s').unwrap(), PieceKind::Soldier);
        assert!(PieceKind::from_char('q').is_err());
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("R".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("Black".parse::<Color>().unwrap(), Color::Black);
        assert_eq!("b".parse::<Color>().unwrap(), Color::Black);
        assert!("w".parse::<Color>().is_err());
        assert!("white".parse::<Color>().is_err());
    }

    #[test]
    fn test_material_ordering() {
        use PieceKind::*;
        assert!(General.value() > Chariot.value());
        assert!(Chariot.value() > Cannon.value());
        assert!(Cannon.value() > Horse.value());
        assert!(Advisor.value() > Soldier.value());
        assert!(Elephant.value() > Soldier.value());
    }
}
