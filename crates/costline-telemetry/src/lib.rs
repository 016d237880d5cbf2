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

//! # Costline Telemetry
//!
//! The cost monitor and everything around it: the per-unit cost probes and
//! their registry, the behavior that binds monitoring declarations to
//! elastic infrastructure and drives periodic sampling, the interchangeable
//! cost annotation sources, the default calculator factory, and the
//! collector that keeps sampled values.

#![warn(missing_docs)]

pub mod calculator;
pub mod collector;
pub mod config;
pub mod cost;
pub mod logging;
pub mod metrics;
pub mod storage;

pub use calculator::{CostOverTimeCalculator, DefaultCalculatorFactory};
pub use collector::MeasurementCollector;
pub use config::{AnnotationSourceConfig, CostMonitorConfig};
pub use cost::{
    ContainerCostProbe, CostMonitorBehavior, ProbeRegistry, ProvidedCostSource,
    StereotypeCostSource,
};
pub use metrics::MetricsRegistry;
pub use storage::{InMemoryBackend, MetricsBackend};
