//! Configuration management

use std::str::FromStr;
use std::time::Duration;

use anyhow::{self, Context, Result};

use crate::services::planner::PlannerConfig;
use crate::services::records::{AirtableConfig, TableNames};
use crate::types::Coordinates;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// Optional NATS credentials (user, password)
    pub nats_credentials: Option<(String, String)>,

    /// Prefix of the subjects this worker answers on (e.g. "routes")
    pub subject_prefix: String,

    /// Airtable access, when both the token and base id are set
    pub airtable: Option<AirtableConfig>,

    /// Upstream table names
    pub tables: TableNames,

    /// Route planning parameters
    pub planner: PlannerConfig,
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn coordinates_or(
    lookup: &impl Fn(&str) -> Option<String>,
    prefix: &str,
    default: Coordinates,
) -> Result<Coordinates> {
    Ok(Coordinates {
        lat: parse_or(lookup, &format!("{}_LAT", prefix), default.lat)?,
        lng: parse_or(lookup, &format!("{}_LNG", prefix), default.lng)?,
    })
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let nats_url = lookup("NATS_URL")
            .unwrap_or_else(|| "nats://localhost:4222".to_string());

        let nats_credentials = match (lookup("NATS_USER"), lookup("NATS_PASSWORD")) {
            (Some(user), Some(password)) if !user.is_empty() => Some((user, password)),
            _ => None,
        };

        let subject_prefix = lookup("SUBJECT_PREFIX")
            .unwrap_or_else(|| "routes".to_string());

        let airtable = match (lookup("AIRTABLE_BASE_ID"), lookup("AIRTABLE_PAT")) {
            (Some(base_id), Some(token)) => {
                let mut airtable = AirtableConfig::new(base_id, token);
                if let Some(api_url) = lookup("AIRTABLE_API_URL") {
                    airtable.api_url = api_url;
                }
                if lookup("AIRTABLE_TIMEOUT_SECS").is_some() {
                    let secs: u64 = parse_or(&lookup, "AIRTABLE_TIMEOUT_SECS", 0)?;
                    airtable.timeout = Some(Duration::from_secs(secs));
                }
                Some(airtable)
            }
            _ => None,
        };

        let default_tables = TableNames::default();
        let tables = TableNames {
            jobs: lookup("JOBS_TABLE").unwrap_or(default_tables.jobs),
            trucks: lookup("TRUCKS_TABLE").unwrap_or(default_tables.trucks),
            drivers: lookup("DRIVERS_TABLE").unwrap_or(default_tables.drivers),
        };

        let defaults = PlannerConfig::default();
        let planner = PlannerConfig {
            origin: coordinates_or(&lookup, "ORIGIN", defaults.origin)?,
            warehouse: coordinates_or(&lookup, "WAREHOUSE", defaults.warehouse)?,
            average_speed_kmh: parse_or(&lookup, "AVERAGE_SPEED_KMH", defaults.average_speed_kmh)?,
            max_waypoints: parse_or(&lookup, "MAX_WAYPOINTS", defaults.max_waypoints)?,
            two_opt_margin_m: parse_or(&lookup, "TWO_OPT_MARGIN_M", defaults.two_opt_margin_m)?,
            default_bed_ft: parse_or(&lookup, "DEFAULT_BED_FT", defaults.default_bed_ft)?,
        };

        if planner.max_waypoints < 2 {
            anyhow::bail!(
                "MAX_WAYPOINTS must be at least 2 (current: {})",
                planner.max_waypoints
            );
        }
        if !(planner.average_speed_kmh > 0.0) {
            anyhow::bail!(
                "AVERAGE_SPEED_KMH must be positive (current: {})",
                planner.average_speed_kmh
            );
        }

        Ok(Self {
            nats_url,
            nats_credentials,
            subject_prefix,
            airtable,
            tables,
            planner,
        })
    }

    /// Airtable settings, required whenever live tables are read
    pub fn airtable(&self) -> Result<&AirtableConfig> {
        self.airtable
            .as_ref()
            .context("AIRTABLE_PAT and AIRTABLE_BASE_ID must be set")
    }

    /// Full subject name under this worker's prefix
    pub fn subject(&self, name: &str) -> String {
        format!("{}.{}", self.subject_prefix, name)
    }
}
