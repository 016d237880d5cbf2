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

//! Provides the foundational traits and data structures for cost telemetry.
//!
//! This module defines the "common language" for metrics within Costline:
//! the metric descriptions monitors can request, the values collectors keep,
//! and the probe/calculator contracts. `costline-telemetry` provides the
//! concrete cost probe and the collector built on these types.

pub mod metrics;
pub mod probe;

pub use self::metrics::{
    HistogramStats, Metric, MetricDescription, MetricId, MetricType, MetricValue, MetricsError,
    MetricsResult, COST_OF_RESOURCE_CONTAINERS, COST_OVER_TIME, RESPONSE_TIME, UTILIZATION,
};
pub use self::probe::{Calculator, CalculatorFactory, Probe};
