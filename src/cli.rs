/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

use crate::{Color, Move, Skill, Square};

/// Command-line arguments of the `xiangqi` binary.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Skill level of the engine, from 1 (weakest) to 6 (strongest).
    #[arg(short, long, default_value_t = Skill::default())]
    pub skill: Skill,

    /// Seed for the engine's random choices at low skill levels.
    ///
    /// If not set, the engine is seeded from the operating system.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never play moves from the opening book.
    #[arg(long, default_value = "false")]
    pub no_book: bool,

    /// The engine plays Red's moves automatically.
    #[arg(long, default_value = "false")]
    pub red_ai: bool,

    /// The engine plays Black's moves automatically.
    #[arg(long, default_value = "false")]
    pub black_ai: bool,

    /// Log level (off, error, warn, info, debug, trace). Overrides `RUST_LOG`.
    #[arg(long, value_name = "LEVEL")]
    pub log: Option<LevelFilter>,
}

impl Cli {
    /// Returns `true` if the engine should play `color`'s moves automatically.
    #[inline(always)]
    pub const fn is_ai(&self, color: Color) -> bool {
        match color {
            Color::Red => self.red_ai,
            Color::Black => self.black_ai,
        }
    }
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position, from the perspective of the side to move.
    Eval {
        /// If set, the contribution of every piece will also be printed.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Generate and print a FEN string for the current position, followed by the side to move.
    Fen,

    /// Let the engine play a move for the side to move.
    Go {
        /// Play at this skill level instead of the engine's current one.
        #[arg(short, long)]
        skill: Option<Skill>,
    },

    /// Print the canonical key of the current position.
    Key,

    /// Shows all legal moves in the current position, or for the piece on a specific square.
    Moves { square: Option<Square> },

    /// Start a new game from the standard starting position.
    New,

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Play the provided move (such as `b2e2`), if it is legal.
    #[command(alias = "move")]
    Play { mv: Move },

    /// Set up a position from `startpos` or a FEN board string, with the given side to move (Red by default).
    Position { fen: String, side: Option<Color> },

    /// Display the engine's skill level, or change it.
    Skill { level: Option<Skill> },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!("d".parse(), Ok(EngineCommand::Display)));
        assert!(matches!("perft 3".parse(), Ok(EngineCommand::Perft { depth: 3 })));

        let Ok(EngineCommand::Play { mv }) = "play b2e2".parse() else {
            panic!("failed to parse play command");
        };
        assert_eq!(mv, "b2e2");

        let Ok(EngineCommand::Go { skill }) = "go --skill 9".parse() else {
            panic!("failed to parse go command");
        };
        assert_eq!(skill, Some(Skill::MAX));

        assert!("play z9z9".parse::<EngineCommand>().is_err());
        assert!("fly".parse::<EngineCommand>().is_err());
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from(["xiangqi", "--skill", "2", "--black-ai", "--seed", "42"]).unwrap();
        assert_eq!(cli.skill, Skill::new(2));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.is_ai(Color::Black));
        assert!(!cli.is_ai(Color::Red));
        assert!(!cli.no_book);
    }
}
