//! This crate contains the source code for the binary for the game mergetuine.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mergetuine::{
    config::{Args, Config},
    logging, App,
};
use tracing::info;

fn main() -> Result<()> {
    install()?;
    if logging::init_tracing() {
        info!(version = env!("CARGO_PKG_VERSION"), "diagnostic logging enabled");
    }

    let config = Config::try_from(Args::parse())?;
    let mut app = App::new(config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
