/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::{
    legal_moves_at, perft, splitperft, Cli, Color, EngineCommand, Evaluator, Game, MoveSelector,
    SelectOptions, Skill, Square,
};

/// An interactive Xiangqi engine, driven by commands read from `stdin`.
#[derive(Debug)]
pub struct Engine {
    /// The game being played.
    ///
    /// This is modified whenever moves are played or new positions are given,
    /// and is reset whenever the engine is told to start a new game.
    game: Game,

    /// Default skill level for the engine's moves.
    skill: Skill,

    /// Whether the engine may play moves from its opening book.
    use_book: bool,

    /// Which sides the engine moves for automatically, indexed by [`Color::index`].
    ai_sides: [bool; Color::COUNT],

    /// Chooses the engine's moves.
    selector: MoveSelector,
}

impl Engine {
    /// Constructs a new [`Engine`] instance, configured by `cli`, to be executed with [`Engine::run`].
    pub fn new(cli: &Cli) -> Self {
        Self {
            game: Game::default(),
            skill: cli.skill,
            use_book: !cli.no_book,
            ai_sides: Color::all().map(|color| cli.is_ai(color)),
            selector: cli.seed.map(MoveSelector::from_seed).unwrap_or_default(),
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Execute the main loop for the engine, handling one line of `stdin` at a time until `exit` or end of input.
    ///
    /// Invalid commands and illegal moves are reported to `stderr` and do not stop the loop.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.name());
        self.display();

        // The engine may be playing the first move
        self.play_ai_moves()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read line from stdin")?;
            let buf = line.trim();

            // Ignore empty lines
            if buf.is_empty() {
                continue;
            }

            let cmd = match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
                Ok(cmd) => cmd,
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            };

            if matches!(cmd, EngineCommand::Exit) {
                break;
            }

            // Keep running, even on error
            if let Err(err) = self.handle_command(cmd) {
                eprintln!("Error: {err:#}");
            }
        }

        Ok(())
    }

    /// Handle the execution of a single [`EngineCommand`].
    fn handle_command(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::Display => self.display(),

            EngineCommand::Eval { pretty } => self.eval(pretty),

            EngineCommand::Exit => {}

            EngineCommand::Fen => println!(
                "{} {}",
                self.game.position().to_fen(),
                self.game.side_to_move().to_char()
            ),

            EngineCommand::Go { skill } => self.go(skill.unwrap_or(self.skill))?,

            EngineCommand::Key => println!("{}", self.game.key()),

            EngineCommand::Moves { square } => self.moves(square),

            EngineCommand::New => {
                self.game = Game::default();
                self.display();
                self.play_ai_moves()?;
            }

            EngineCommand::Perft { depth } => {
                let nodes = perft(self.game.position(), self.game.side_to_move(), depth);
                println!("{nodes}");
            }

            EngineCommand::Splitperft { depth } => {
                let nodes = splitperft(self.game.position(), self.game.side_to_move(), depth);
                println!("\n{nodes}");
            }

            EngineCommand::Play { mv } => {
                self.game.make_move(mv)?;
                self.report_move();
                self.play_ai_moves()?;
            }

            EngineCommand::Position { fen, side } => {
                let side = side.unwrap_or_default();
                self.game = if fen.eq_ignore_ascii_case("startpos") {
                    Game::new(Default::default(), side)
                } else {
                    Game::from_fen(&fen, side)?
                };
                self.display();
            }

            EngineCommand::Skill { level } => {
                if let Some(level) = level {
                    self.skill = level;
                }
                println!("skill := {}", self.skill);
            }
        }

        Ok(())
    }

    /// Executes the `display` command, printing the current position.
    fn display(&self) {
        println!("{}", self.game);
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self, pretty: bool) {
        let evaluator = Evaluator::new(self.game.position());
        if pretty {
            print!("{evaluator}\n\nScore: ");
        }

        println!("{}", evaluator.eval_for(self.game.side_to_move()));
    }

    /// Executes the `moves` command.
    ///
    /// A square without a piece belonging to the side to move has no moves.
    fn moves(&self, square: Option<Square>) {
        let position = self.game.position();
        let moves = match square {
            Some(square) => legal_moves_at(position, square, self.game.side_to_move())
                .into_iter()
                .map(|to| format!("{square}{to}"))
                .collect::<Vec<_>>(),
            None => self
                .game
                .legal_moves()
                .into_iter()
                .map(|mv| mv.to_string())
                .collect(),
        };

        // If there are none, print "(none)"
        if moves.is_empty() {
            println!("(none)");
        } else {
            println!("{}", moves.join(", "));
        }
    }

    /// Has the engine choose and play a move for the side to move.
    ///
    /// Refuses once the game has ended, including by repetition, even if legal moves remain.
    fn go(&mut self, skill: Skill) -> Result<()> {
        if let Some(outcome) = self.game.outcome() {
            bail!("The game is over ({outcome}); start a new one with `new` or `position`");
        }

        let side = self.game.side_to_move();
        let options = SelectOptions {
            use_opening_book: self.use_book,
            move_number: self.game.move_number(),
        };

        let Some(selection) = self
            .selector
            .select(self.game.position(), side, skill, options)
        else {
            println!("{side} has no legal moves");
            return Ok(());
        };

        println!(
            "{side} plays {} ({:?}, skill {}, depth {})",
            selection.mv, selection.source, selection.skill, selection.depth
        );
        self.game.make_move(selection.mv)?;
        self.report_move();

        Ok(())
    }

    /// Lets the engine move for every side it controls, until it is a human's turn or the game is over.
    fn play_ai_moves(&mut self) -> Result<()> {
        while self.game.outcome().is_none() && self.ai_sides[self.game.side_to_move().index()] {
            self.go(self.skill)?;
        }
        Ok(())
    }

    /// Prints the board after a move, and whether the game has ended or the side to move is in check.
    fn report_move(&self) {
        self.display();

        match self.game.outcome() {
            Some(outcome) => println!("{outcome}"),
            None if self.game.is_in_check() => println!("{} is in check", self.game.side_to_move()),
            None => {}
        }
    }
}
