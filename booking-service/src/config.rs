use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

const DEFAULT_RANGE_LOW: u32 = 40;
const DEFAULT_RANGE_HIGH: u32 = 52;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVars {
    /// JSON array of exams to book. `None` books the sample schedule.
    pub exams_path: Option<PathBuf>,
    pub range_low: u32,
    pub range_high: u32,
}

impl EnvVars {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let exams_path = match var("EXAMS_PATH") {
            Some(s) if !s.trim().is_empty() => Some(PathBuf::from(s)),
            _ => {
                warn!("EXAMS_PATH not set. Defaulting to sample schedule");
                None
            }
        };

        let range_low = match var("RANGE_LOW") {
            Some(s) => s
                .trim()
                .parse()
                .with_context(|| format!("RANGE_LOW ('{s}') is not a valid room number"))?,
            None => {
                warn!("RANGE_LOW not set. Defaulting to {DEFAULT_RANGE_LOW}");
                DEFAULT_RANGE_LOW
            }
        };

        let range_high = match var("RANGE_HIGH") {
            Some(s) => s
                .trim()
                .parse()
                .with_context(|| format!("RANGE_HIGH ('{s}') is not a valid room number"))?,
            None => {
                warn!("RANGE_HIGH not set. Defaulting to {DEFAULT_RANGE_HIGH}");
                DEFAULT_RANGE_HIGH
            }
        };

        Ok(Self {
            exams_path,
            range_low,
            range_high,
        })
    }
}
