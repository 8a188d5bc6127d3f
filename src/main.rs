#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use anyhow::Result;
use tracing::info;

use moon_runner::app::App;
use moon_runner::config::Config;
use moon_runner::constants::LOOP_TIME;
use moon_runner::platform;

/// The desktop entry point: configuration, logging, then the frame loop until the window closes.
pub fn main() -> Result<()> {
    let config = Config::load()?;
    platform::init_logging(&config.log_filter);
    info!(save_path = %config.save_path.display(), seed = ?config.seed, "Configuration loaded");

    let mut app = App::new(&config)?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}
    Ok(())
}
