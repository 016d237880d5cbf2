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

//! Configuration of the cost monitor.

use crate::cost::annotation::{ProvidedCostSource, StereotypeCostSource};
use anyhow::{Context, Result};
use costline_core::cost::{CostAnnotation, CostAnnotationSource, Currency};
use costline_core::model::ContainerId;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Which [`CostAnnotationSource`] the monitor resolves prices with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationSourceConfig {
    /// Read the "Price" stereotype of each container.
    #[default]
    Stereotype,
    /// Use injected values.
    Provided {
        /// Applied to every unit without its own entry.
        #[serde(default)]
        default: Option<CostAnnotation>,
        /// Per-unit annotations keyed by container id.
        #[serde(default)]
        units: HashMap<ContainerId, CostAnnotation>,
    },
}

impl AnnotationSourceConfig {
    /// Builds the configured source.
    pub fn build(&self) -> Arc<dyn CostAnnotationSource> {
        match self {
            AnnotationSourceConfig::Stereotype => Arc::new(StereotypeCostSource),
            AnnotationSourceConfig::Provided { default, units } => {
                let source = ProvidedCostSource::new();
                if let Some(annotation) = default {
                    source.set(*annotation);
                }
                for (unit, annotation) in units {
                    source.set_for(unit.clone(), *annotation);
                }
                Arc::new(source)
            }
        }
    }
}

/// Settings of the cost monitor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CostMonitorConfig {
    /// Currency every measurement is tagged with.
    pub currency: Currency,
    /// Where unit prices and sampling intervals come from.
    pub annotation_source: AnnotationSourceConfig,
}

impl CostMonitorConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse cost monitor configuration")
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costline_core::model::ResourceContainer;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CostMonitorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CostMonitorConfig::default());
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.annotation_source, AnnotationSourceConfig::Stereotype);
    }

    #[test]
    fn test_provided_source_config() {
        let config = CostMonitorConfig::from_json_str(
            r#"{
                "currency": "USD",
                "annotation_source": {
                    "kind": "provided",
                    "default": { "unit_price": 1.0, "sample_interval": 60.0 },
                    "units": { "rc-web": { "unit_price": 10.0, "sample_interval": 5.0 } }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::Usd);
        let source = config.annotation_source.build();
        assert_eq!(
            source.lookup(&ResourceContainer::new("rc-web", "web")),
            Some(CostAnnotation::new(10.0, 5.0))
        );
        assert_eq!(
            source.lookup(&ResourceContainer::new("rc-db", "db")),
            Some(CostAnnotation::new(1.0, 60.0))
        );
    }

    #[test]
    fn test_unknown_source_kind_is_rejected() {
        let err = CostMonitorConfig::from_json_str(r#"{ "annotation_source": { "kind": "oracle" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("cost monitor configuration"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = CostMonitorConfig::from_path("/nonexistent/costline.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/costline.json"));
    }
}
