/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{is_in_check, pseudo_moves, tune, Color, Piece, PieceKind, Position, Psqt, Score, Square};

/// Evaluates `position` from `color`'s perspective.
///
/// Shorthand for [`Evaluator::eval_for`].
///
/// # Example
/// ```
/// # use xiangqi::{evaluate, Color, Position};
/// let pos = Position::default();
/// assert_eq!(evaluate(&pos, Color::Red), -evaluate(&pos, Color::Black));
/// ```
#[inline(always)]
pub fn evaluate(position: &Position, color: Color) -> Score {
    Evaluator::new(position).eval_for(color)
}

/// Encapsulates the logic of scoring a Xiangqi position.
///
/// Scores are always computed from a given side's perspective: a positive score favors that side.
/// Because every term is added for one side and subtracted for the other,
/// evaluating for Red always yields the negation of evaluating for Black.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    /// The position to evaluate.
    position: &'a Position,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for `position`.
    #[inline(always)]
    pub fn new(position: &'a Position) -> Self {
        Self { position }
    }

    /// Evaluate this position from `color`'s perspective.
    ///
    /// A positive/high number is good for the `color`, while a negative number is better for the opponent.
    /// A score of 0 is considered equal.
    pub fn eval_for(&self, color: Color) -> Score {
        let mut score = Score::DRAW;

        // Iterate over every occupied square
        for (square, piece) in self.position.pieces() {
            let value = self.piece_value(square, piece);

            // Flip scores appropriately to evaluate from `color`'s perspective
            if color == piece.color() {
                score += value;
            } else {
                score -= value;
            }
        }

        // Being in check is dangerous; giving check is pressure
        if is_in_check(self.position, color) {
            score -= tune::check_bonus!();
        }
        if is_in_check(self.position, color.opponent()) {
            score += tune::check_bonus!();
        }

        score
    }

    /// Full static worth of `piece` standing on `square`, from its owner's perspective.
    ///
    /// Material and placement come from the [`Psqt`]. Soldiers across the river earn a bonus,
    /// and sliders earn a capped bonus for each square they can reach.
    #[inline(always)]
    fn piece_value(&self, square: Square, piece: Piece) -> i32 {
        let mut value = Psqt::eval(piece, square);

        match piece.kind() {
            PieceKind::Soldier if square.across_river(piece.color()) => {
                value += tune::soldier_river_bonus!();
            }
            PieceKind::Chariot | PieceKind::Cannon => {
                let mobility = pseudo_moves(self.position, square).len() as i32;
                value += mobility.min(tune::max_mobility_bonus!());
            }
            _ => {}
        }

        value
    }

    /// Fetches the signed value (positive for Red) of the piece on the specified square, if one exists.
    ///
    /// Only used when printing the evaluator
    #[inline(always)]
    fn value_at(&self, square: Square) -> Option<i32> {
        self.position.piece_at(square).map(|piece| {
            let value = self.piece_value(square, piece);
            if piece.color().is_red() {
                value
            } else {
                -value
            }
        })
    }
}

impl fmt::Display for Evaluator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  +")?;
        for _ in 0..Square::COLS {
            write!(f, "-------+")?;
        }
        writeln!(f)?;
        for row in 0..Square::ROWS {
            write!(f, "{} |", Square::ROWS - 1 - row)?;

            // Step 1: Write the piece char
            for col in 0..Square::COLS {
                let piece = self.position.piece_at(Square::at(row, col));
                let piece_char = piece.map(|p| p.char()).unwrap_or(' ');
                write!(f, "   {piece_char}   |")?;
            }
            writeln!(f)?;
            write!(f, "  |")?;

            // Step 2: Write the contribution of that piece
            for col in 0..Square::COLS {
                let score = match self.value_at(Square::at(row, col)) {
                    // Generals dwarf everything else; only show their placement bonus
                    Some(val) if val.abs() >= PieceKind::General.value() => {
                        format!("{:^7}", format!("K{:+}", val.signum() * (val.abs() - PieceKind::General.value())))
                    }
                    Some(val) => format!("{:^7}", format!("{val:+}")),
                    None => String::from("       "),
                };
                write!(f, "{score}|")?;
            }
            writeln!(f)?;

            write!(f, "  +")?;
            for _ in 0..Square::COLS {
                write!(f, "-------+")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..Square::COLS {
            write!(f, "   {}    ", (b'a' + col) as char)?;
        }

        let red = self.eval_for(Color::Red);
        let winning_side = if red > Score::DRAW {
            Some(Color::Red)
        } else if red < Score::DRAW {
            Some(Color::Black)
        } else {
            None
        };

        writeln!(f, "\n")?;
        writeln!(
            f,
            "Winning side: {}",
            winning_side.map(|c| c.name()).unwrap_or("N/A")
        )?;
        write!(f, "Score (red): {red}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_is_balanced() {
        let pos = Position::default();
        assert_eq!(evaluate(&pos, Color::Red), Score::DRAW);
        assert_eq!(evaluate(&pos, Color::Black), Score::DRAW);
    }

    #[test]
    fn test_extra_chariot_is_winning() {
        // Black is missing a Chariot
        let pos = Position::from_fen("1nbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR")
            .unwrap();
        assert!(evaluate(&pos, Color::Red) > 100);
        assert!(evaluate(&pos, Color::Black) < -100);
    }

    #[test]
    fn test_check_adjustment() {
        // Red Chariot checks the Black General along the back rank
        let pos = Position::from_fen("4k3R/9/9/9/9/9/9/9/9/3K5").unwrap();
        let quiet = Position::from_fen("4k4/8R/9/9/9/9/9/9/9/3K5").unwrap();

        let checking = evaluate(&pos, Color::Red);
        let not_checking = evaluate(&quiet, Color::Red);

        // Placement differs slightly, but the check swings the score by far more
        assert!(checking - not_checking >= Score::new(tune::check_bonus!() - 5));
        assert_eq!(evaluate(&pos, Color::Black), -checking);
    }

    #[test]
    fn test_soldier_river_bonus() {
        let home = Position::from_fen("3k5/9/9/9/9/9/4P4/9/9/5K3").unwrap();
        let crossed = Position::from_fen("3k5/9/9/9/4P4/9/9/9/9/5K3").unwrap();

        let diff = evaluate(&crossed, Color::Red) - evaluate(&home, Color::Red);
        // Table rises from 1 to 3, plus the river bonus
        assert_eq!(diff, Score::new(2 + tune::soldier_river_bonus!()));
    }
}
