// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Run limits for the simulation engine.

use anyhow::Context;
use costline_core::simulation::SimTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Events scheduled after this simulated time are never processed.
    pub max_simulation_time: SimTime,
    /// Upper bound on the number of processed events, if any.
    pub max_events: Option<u64>,
    /// Capacity of each measurement subscriber's channel.
    pub measurement_buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_simulation_time: 3600.0,
            max_events: None,
            measurement_buffer_size: 1024,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse engine configuration")
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = EngineConfig::from_json_str(r#"{ "max_events": 100 }"#).unwrap();
        assert_eq!(config.max_simulation_time, 3600.0);
        assert_eq!(config.max_events, Some(100));
        assert_eq!(config.measurement_buffer_size, 1024);
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(err.to_string().contains("engine configuration"));
        assert!(EngineConfig::from_path("/nonexistent/engine.json").is_err());
    }
}
