//! Test fixtures for cargo-mkmf unit tests.
//!
//! The baseline Makefile and host configuration here mirror what mkmf
//! reports on a typical Linux machine. They are shared with the CLI
//! integration tests under `tests/fixtures`.

use crate::host::HostConfig;

/// The host's dummy Makefile, as mkmf's `dummy_makefile` renders it.
pub const DUMMY_MAKEFILE: &str = include_str!("../../tests/fixtures/dummy_makefile.mk");

/// Host configuration matching [`DUMMY_MAKEFILE`].
pub const HOST_TOML: &str = include_str!("../../tests/fixtures/host.toml");

/// Parsed [`HOST_TOML`].
pub fn host_config() -> HostConfig {
    toml::from_str(HOST_TOML).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        let host = host_config();
        assert_eq!(host.dlext(), Some("so"));
        assert!(DUMMY_MAKEFILE.contains("clean-so::"));
    }
}
