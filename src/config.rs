use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::catalog::{self, Region};
use crate::store::FreshnessPolicy;

pub const DEFAULT_API_BASE: &str = "https://disease.sh/v3/covid-19";
pub const DEFAULT_REGION: &str = "Oregon";
pub const DEFAULT_LOG_FILE: &str = "tui-choropleth.log";

/// Terminal choropleth of today's COVID-19 deaths per US state
#[derive(Debug, Clone, Parser)]
#[command(name = "tui-choropleth", version, about)]
pub struct Config {
    /// Base URL of the statistics API
    #[arg(long, env = "CHOROPLETH_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// GeoJSON file or http(s) URL with one polygon feature per state
    #[arg(long, env = "CHOROPLETH_GEOMETRY")]
    pub geometry: Option<String>,

    /// Region selected at startup, by name or postal code
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// HTTP timeout for statistics and geometry requests
    #[arg(
        long,
        env = "CHOROPLETH_HTTP_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Show fetch results even if a newer region was hovered meanwhile
    #[arg(long)]
    pub accept_stale: bool,

    /// Log output path (the terminal belongs to the UI)
    #[arg(long, env = "CHOROPLETH_LOG", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn freshness(&self) -> FreshnessPolicy {
        if self.accept_stale {
            FreshnessPolicy::LastWriteWins
        } else {
            FreshnessPolicy::LatestSelection
        }
    }

    pub fn initial_region(&self) -> Result<&'static Region> {
        catalog::resolve(&self.region).ok_or_else(|| anyhow!("unknown region {:?}", self.region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tui-choropleth"]).unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.initial_region().unwrap().id.code(), "OR");
        assert_eq!(config.freshness(), FreshnessPolicy::LatestSelection);
        assert!(!config.accept_stale);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "tui-choropleth",
            "--api-base",
            "http://localhost:9000/v3",
            "--geometry",
            "states.geojson",
            "--region",
            "ny",
            "--timeout-secs",
            "3",
            "--accept-stale",
        ])
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:9000/v3");
        assert_eq!(config.geometry.as_deref(), Some("states.geojson"));
        assert_eq!(config.initial_region().unwrap().label, "New York");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.freshness(), FreshnessPolicy::LastWriteWins);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(Config::try_parse_from(["tui-choropleth", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn test_unknown_region() {
        let config = Config::try_parse_from(["tui-choropleth", "--region", "Atlantis"]).unwrap();
        assert!(config.initial_region().is_err());
    }
}
