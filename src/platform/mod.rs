//! Host services shared by the binaries: logging setup, seeding, and the SDL
//! canvas and mixer adapters when the `sdl` feature is enabled.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::formatter::TickFormatter;

#[cfg(feature = "sdl")]
pub mod canvas;
#[cfg(feature = "sdl")]
pub mod mixer;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when it is set and valid.
/// Returns `false` and leaves the existing subscriber alone if one is already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .with_env_filter(filter)
        .event_format(TickFormatter)
        .finish()
        .with(ErrorLayer::default());

    match subscriber.try_init() {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "Logger already installed");
            false
        }
    }
}

/// The game's random source: seeded for reproducible runs, from OS entropy otherwise.
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => {
            debug!(seed, "Using fixed seed");
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_os_rng(),
    }
}
