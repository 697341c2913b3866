// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

/// Builds the filter string that would otherwise be set in `RUST_LOG`, capturing each of `crates`
/// at `level`.  Crate names use their library form (`asteroid_mesh`, not `asteroid-mesh`).
pub fn filter_string(crates: &[&str], level: log::LevelFilter) -> String {
    let level_str = match level {
        log::LevelFilter::Off => "off",
        log::LevelFilter::Error => "error",
        log::LevelFilter::Warn => "warn",
        log::LevelFilter::Info => "info",
        log::LevelFilter::Debug => "debug",
        log::LevelFilter::Trace => "trace",
    };
    crates
        .iter()
        .map(|&pkg_name| format!("{}={}", pkg_name.replace('-', "_"), level_str))
        .collect::<Vec<_>>()
        .join(",")
}


// End of File
