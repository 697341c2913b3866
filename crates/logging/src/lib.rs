// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Logging setup
//!
//! The gravity crates log through the [`log`] facade.  This crate installs [`env_logger`] as the
//! backend for whichever program drives them.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds. This can be overridden by setting the `RUST_LOG`
//! environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=asteroid=debug,asteroid_mesh=debug cargo test
//! ```

mod filter;

pub use filter::filter_string;

/// Crates whose logs are captured by [`init_default`].
pub const CRATES: &[&str] = &["asteroid", "asteroid_mesh"];

/// [`Info`](log::LevelFilter::Info) in debug builds, [`Warn`](log::LevelFilter::Warn) in release.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Installs `env_logger`, capturing logs from `crates` at `level` unless `RUST_LOG` is set.
///
/// Fails if a logger has already been installed.
pub fn init(crates: &[&str], level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter_string(crates, level)),
    )
    .try_init()
}

/// [`init`] for the gravity crates at [`default_level`].
pub fn init_default() -> Result<(), log::SetLoggerError> {
    init(CRATES, default_level())
}

/// Installs a logger whose output is captured by the test harness.  Safe to call from every test.
pub fn init_for_tests() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter_string(CRATES, log::LevelFilter::Debug)),
    )
    .is_test(true)
    .try_init();
}

// End of File
