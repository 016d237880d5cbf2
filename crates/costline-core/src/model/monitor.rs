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

//! Monitoring declarations: measuring points, monitors, and measurement specifications.

use crate::model::resource::ResourceContainer;
use crate::telemetry::metrics::MetricDescription;
use std::fmt::{self, Display};

/// The place in the model where a metric is observed.
#[derive(Debug, Clone)]
pub enum MeasuringPoint {
    /// Observes a whole resource container.
    ResourceContainer(ResourceContainer),
    /// Observes one processing resource (CPU, HDD, ...) of a container.
    ActiveResource {
        /// The container owning the resource.
        container: ResourceContainer,
        /// Resource type name, e.g. "CPU".
        resource_type: String,
    },
    /// Observes calls to an operation signature of an assembly.
    Operation {
        /// Name of the assembly context.
        assembly: String,
        /// Operation signature name.
        signature: String,
    },
}

impl MeasuringPoint {
    /// Returns the observed container if this is a resource container measuring point.
    pub fn resource_container(&self) -> Option<&ResourceContainer> {
        match self {
            MeasuringPoint::ResourceContainer(container) => Some(container),
            MeasuringPoint::ActiveResource { .. } | MeasuringPoint::Operation { .. } => None,
        }
    }

    /// Returns a stable, human-readable representation for logs and metric labels.
    pub fn string_representation(&self) -> String {
        match self {
            MeasuringPoint::ResourceContainer(container) => {
                format!("ResourceContainer: {container}")
            }
            MeasuringPoint::ActiveResource {
                container,
                resource_type,
            } => format!("ActiveResource: {resource_type} of {container}"),
            MeasuringPoint::Operation {
                assembly,
                signature,
            } => format!("Operation: {assembly}.{signature}"),
        }
    }
}

impl Display for MeasuringPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_representation())
    }
}

/// A request to observe one metric at one measuring point.
#[derive(Debug, Clone)]
pub struct MeasurementSpecification {
    /// The metric to collect.
    pub metric_description: MetricDescription,
    /// Where to collect it, taken from the owning monitor.
    pub measuring_point: MeasuringPoint,
}

/// A monitor groups all metrics requested for one measuring point.
#[derive(Debug, Clone)]
pub struct Monitor {
    /// Human-readable name.
    pub entity_name: String,
    /// The observed point.
    pub measuring_point: MeasuringPoint,
    /// The metrics requested at `measuring_point`.
    pub metrics: Vec<MetricDescription>,
}

impl Monitor {
    /// Creates a monitor without any requested metric.
    pub fn new(entity_name: impl Into<String>, measuring_point: MeasuringPoint) -> Self {
        Self {
            entity_name: entity_name.into(),
            measuring_point,
            metrics: Vec::new(),
        }
    }

    /// Requests an additional metric, returning the updated monitor.
    pub fn with_metric(mut self, metric: MetricDescription) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Expands the monitor into one specification per requested metric.
    pub fn measurement_specifications(&self) -> impl Iterator<Item = MeasurementSpecification> + '_ {
        self.metrics.iter().map(|metric| MeasurementSpecification {
            metric_description: *metric,
            measuring_point: self.measuring_point.clone(),
        })
    }
}

/// All monitors declared for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct MonitorRepository {
    /// Declared monitors, in declaration order.
    pub monitors: Vec<Monitor>,
}

impl MonitorRepository {
    /// Creates a repository from the given monitors.
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self { monitors }
    }

    /// Iterates over every measurement specification of every monitor.
    pub fn measurement_specifications(&self) -> impl Iterator<Item = MeasurementSpecification> + '_ {
        self.monitors
            .iter()
            .flat_map(Monitor::measurement_specifications)
    }
}
