//! grid - terminal step sequencer
//!
//! Run with: cargo run --bin grid [config.json]
//!
//! Logs go to stderr, so redirect them when raising the level:
//! `RUST_LOG=debug cargo run --bin grid 2> grid.log`

mod app;
mod ui;

use app::App;
use saavy_grid::{config::SequencerConfig, runtime::Sequencer};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SequencerConfig::from_json_file(&path)?,
        None => SequencerConfig::default(),
    };

    // Audio is opened before the terminal switches to raw mode so a
    // device warning lands on a readable screen.
    let sequencer = Sequencer::new(config);

    let mut terminal = ratatui::init();
    let result = App::new(sequencer).run(&mut terminal);
    ratatui::restore();
    result
}
