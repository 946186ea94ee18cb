//! Logger setup for the `arbora` binary and tests.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install `env_logger` once, at `Info` unless `RUST_LOG` says otherwise
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // another logger may already be installed
        let _ = builder.try_init();
    });
}
