use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use anyhow::{Context, Result};

pub const BIND_ADDR_VAR: &str = "TODOS_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 3000));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
}
impl Config {
    /// Defaults, with the bind address overridden by `TODOS_BIND_ADDR` if set.
    pub fn from_env() -> Result<Self> {
        Self::from_bind_addr(std::env::var(BIND_ADDR_VAR).ok().as_deref())
    }

    pub fn from_bind_addr(addr: Option<&str>) -> Result<Self> {
        let Some(raw) = addr else {
            return Ok(Self::default());
        };
        let bind_addr = raw
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid {BIND_ADDR_VAR}: {raw:?}"))?;
        Ok(Self { bind_addr })
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constant() -> Result<()> {
        let config = Config::from_bind_addr(None)?;
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        Ok(())
    }

    #[test]
    fn test_override() -> Result<()> {
        let config = Config::from_bind_addr(Some("127.0.0.1:8080"))?;
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>()?);
        Ok(())
    }

    #[test]
    fn test_invalid_addr() {
        let err = Config::from_bind_addr(Some("localhost")).unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_VAR));
    }
}
