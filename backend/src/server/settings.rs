//! Listener settings loaded via OrthoConfig.
//!
//! Values are layered from configuration files, `USER_SERVICE_*`
//! environment variables and command-line flags.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Address settings for the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServerSettings {
    /// Interface to bind. Defaults to all interfaces.
    pub host: Option<String>,
    /// TCP port to bind. Defaults to 8080.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Return the configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let host = self.host();
        (host, self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::other(format!("host {host} resolved to no addresses")))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for listener settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_args(args: &[&str]) -> ServerSettings {
        let argv = std::iter::once(OsString::from("user-registry"))
            .chain(args.iter().map(OsString::from));
        ServerSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USER_SERVICE_HOST", None::<String>),
            ("USER_SERVICE_PORT", None::<String>),
        ]);

        let settings = load_from_args(&[]);
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(
            settings.bind_addr().expect("default address resolves"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_SERVICE_HOST", Some("127.0.0.1".to_owned())),
            ("USER_SERVICE_PORT", Some("9090".to_owned())),
        ]);

        let settings = load_from_args(&[]);
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
        assert_eq!(
            settings.bind_addr().expect("address resolves"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
    }

    #[rstest]
    fn command_line_overrides_environment() {
        let _guard = lock_env([
            ("USER_SERVICE_HOST", None::<String>),
            ("USER_SERVICE_PORT", Some("9090".to_owned())),
        ]);

        let settings = load_from_args(&["--port", "7070"]);
        assert_eq!(settings.port(), 7070);
    }
}
