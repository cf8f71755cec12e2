use figment::{providers::Env, Figment};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    #[serde(default = "default_inactive_threshold")]
    pub inactive_threshold_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3001
}
fn default_sweep_interval() -> u64 {
    300
}
fn default_inactive_threshold() -> u64 {
    300
}

impl Config {
    /// `BROADCAST_*` variables win over the bare `PORT`.
    pub fn figment() -> Figment {
        Figment::new()
            .join(Env::prefixed("BROADCAST_"))
            .join(Env::raw().only(&["PORT"]))
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// At least one second; zero is treated as one.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    pub fn inactive_threshold(&self) -> Duration {
        Duration::from_secs(self.inactive_threshold_secs)
    }

    pub fn address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::from_env()?;

            assert_eq!(config.port, 3001);
            assert_eq!(config.sweep_interval(), Duration::from_secs(300));
            assert_eq!(config.inactive_threshold(), Duration::from_secs(300));
            assert_eq!(
                config.address().unwrap(),
                "0.0.0.0:3001".parse::<SocketAddr>().unwrap()
            );
            Ok(())
        });
    }

    #[test]
    fn test_port_from_plain_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "8080");

            let config = Config::from_env()?;
            assert_eq!(config.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_takes_priority() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "8080");
            jail.set_env("BROADCAST_PORT", "9090");
            jail.set_env("BROADCAST_HOST", "127.0.0.1");
            jail.set_env("BROADCAST_SWEEP_INTERVAL_SECS", "10");
            jail.set_env("BROADCAST_INACTIVE_THRESHOLD_SECS", "20");

            let config = Config::from_env()?;
            assert_eq!(config.port, 9090);
            assert_eq!(config.sweep_interval(), Duration::from_secs(10));
            assert_eq!(config.inactive_threshold(), Duration::from_secs(20));
            assert_eq!(
                config.address().unwrap(),
                "127.0.0.1:9090".parse::<SocketAddr>().unwrap()
            );
            Ok(())
        });
    }

    #[test]
    fn test_zero_sweep_interval_is_clamped() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("BROADCAST_SWEEP_INTERVAL_SECS", "0");
            jail.set_env("BROADCAST_INACTIVE_THRESHOLD_SECS", "0");

            let config = Config::from_env()?;
            assert_eq!(config.sweep_interval(), Duration::from_secs(1));
            assert_eq!(config.inactive_threshold(), Duration::ZERO);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "not-a-port");

            assert!(Config::from_env().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("BROADCAST_HOST", "not an ip");

            let config = Config::from_env()?;
            assert!(config.address().is_err());
            Ok(())
        });
    }
}
