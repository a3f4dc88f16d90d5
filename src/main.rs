/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use xiangqi::{Cli, Engine};

fn main() {
    let cli = Cli::parse();

    // `--log` wins over `RUST_LOG`, which wins over the default
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log {
        builder.filter_level(level);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut engine = Engine::new(&cli);

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
    }
}
