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

//! Metric descriptions requested by monitors, and the metric values kept by collectors.

use std::fmt::{self, Display};
use std::hash::Hash;

/// Describes a metric that a monitor can request, such as "cost over time".
///
/// Two descriptions denote the same metric when their ids are equal; the
/// name is informative only.
#[derive(Debug, Clone, Copy)]
pub struct MetricDescription {
    /// Stable identifier, compared by [`same_metric`](Self::same_metric).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

impl MetricDescription {
    /// Creates a description.
    pub const fn new(id: &'static str, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Returns `true` if both descriptions have the same id.
    pub fn same_metric(&self, other: &MetricDescription) -> bool {
        self.id == other.id
    }
}

impl Display for MetricDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The metric a monitor requests to account for the cost of a resource container.
pub const COST_OF_RESOURCE_CONTAINERS: MetricDescription =
    MetricDescription::new("cost_of_resource_containers", "Cost of Resource Containers");

/// The metric a cost calculator produces: sampled cost values over simulated time.
pub const COST_OVER_TIME: MetricDescription =
    MetricDescription::new("cost_over_time", "Cost over Time");

/// Response time of an operation call.
pub const RESPONSE_TIME: MetricDescription =
    MetricDescription::new("response_time", "Response Time");

/// Utilization of an active resource.
pub const UTILIZATION: MetricDescription =
    MetricDescription::new("utilization", "Utilization");

/// A structured identifier for a stored metric series.
///
/// A `MetricId` is composed of a namespace, a name, and a set of key-value labels,
/// e.g. `cost:cost_over_time[container=rc-1,currency=EUR]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricId {
    /// The broad category of the metric (e.g., "cost").
    pub namespace: String,
    /// The specific name of the metric (e.g., "cost_over_time").
    pub name: String,
    /// Key-value pairs, kept sorted by key.
    pub labels: Vec<(String, String)>,
}

impl MetricId {
    /// Creates a new `MetricId` with a namespace and a name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            labels: Vec::new(),
        }
    }

    /// Adds a dimensional label, keeping labels sorted by key.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self.labels.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// Returns the value of a label, if present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            write!(f, "{}:{}", self.namespace, self.name)
        } else {
            let labels_str = self
                .labels
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "{}:{}[{}]", self.namespace, self.name, labels_str)
        }
    }
}

/// The fundamental type of a stored metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// A value that only ever increases (e.g., records collected).
    Counter,
    /// A value that can go up or down (e.g., the latest sampled cost).
    Gauge,
    /// The full series of recorded samples.
    Histogram,
}

/// The value of a stored metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// A 64-bit unsigned integer for counters.
    Counter(u64),
    /// A 64-bit float for gauges.
    Gauge(f64),
    /// The distribution of recorded samples across buckets.
    Histogram {
        /// The upper bounds of the buckets.
        bucket_bounds: Vec<f64>,
        /// The count of samples at or below each bound.
        bucket_counts: Vec<u64>,
        /// Number of recorded samples.
        count: u64,
        /// Sum of recorded samples.
        sum: f64,
    },
}

/// Count and sum of the samples recorded by a histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramStats {
    /// Number of recorded samples.
    pub count: u64,
    /// Sum of recorded samples.
    pub sum: f64,
}

impl HistogramStats {
    /// Arithmetic mean of the samples, if any was recorded.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl MetricValue {
    /// Returns the [`MetricType`] corresponding to this value.
    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricValue::Counter(_) => MetricType::Counter,
            MetricValue::Gauge(_) => MetricType::Gauge,
            MetricValue::Histogram { .. } => MetricType::Histogram,
        }
    }

    /// Returns the value as a `u64` if it is a `Counter`.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `f64` if it is a `Gauge`.
    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            MetricValue::Gauge(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the sample count and sum if this is a `Histogram`.
    pub fn histogram_stats(&self) -> Option<HistogramStats> {
        match self {
            MetricValue::Histogram { count, sum, .. } => Some(HistogramStats {
                count: *count,
                sum: *sum,
            }),
            _ => None,
        }
    }
}

/// Descriptive metadata about a stored metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricMetadata {
    /// The metric's unique identifier.
    pub id: MetricId,
    /// The type of the metric.
    pub metric_type: MetricType,
    /// What the metric measures.
    pub description: String,
    /// The unit of measurement (e.g., "EUR").
    pub unit: String,
    /// Number of updates applied since registration.
    pub updates: u64,
}

impl MetricMetadata {
    /// Creates metadata for a freshly registered metric.
    pub fn new(
        id: MetricId,
        metric_type: MetricType,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id,
            metric_type,
            description: description.into(),
            unit: unit.into(),
            updates: 0,
        }
    }

    /// Records that the value was updated.
    pub fn touch(&mut self) {
        self.updates = self.updates.saturating_add(1);
    }
}

/// A stored metric: its current value and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// The descriptive metadata for the metric.
    pub metadata: MetricMetadata,
    /// The current value of the metric.
    pub value: MetricValue,
}

impl Metric {
    /// Creates a `Counter` metric.
    pub fn new_counter(id: MetricId, description: impl Into<String>, initial_value: u64) -> Self {
        Self {
            metadata: MetricMetadata::new(id, MetricType::Counter, description, "count"),
            value: MetricValue::Counter(initial_value),
        }
    }

    /// Creates a `Gauge` metric.
    pub fn new_gauge(
        id: MetricId,
        description: impl Into<String>,
        unit: impl Into<String>,
        initial_value: f64,
    ) -> Self {
        Self {
            metadata: MetricMetadata::new(id, MetricType::Gauge, description, unit),
            value: MetricValue::Gauge(initial_value),
        }
    }

    /// Creates an empty `Histogram` metric.
    pub fn new_histogram(
        id: MetricId,
        description: impl Into<String>,
        unit: impl Into<String>,
        bucket_bounds: Vec<f64>,
    ) -> Self {
        let bucket_counts = vec![0; bucket_bounds.len()];
        Self {
            metadata: MetricMetadata::new(id, MetricType::Histogram, description, unit),
            value: MetricValue::Histogram {
                bucket_bounds,
                bucket_counts,
                count: 0,
                sum: 0.0,
            },
        }
    }
}

/// A specialized `Result` type for metric storage operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// An error that can occur while storing or updating metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// The requested metric was not found.
    MetricNotFound(MetricId),
    /// An operation was attempted on a metric of the wrong type.
    TypeMismatch {
        /// The expected metric type for the operation.
        expected: MetricType,
        /// The actual metric type that was found.
        found: MetricType,
    },
    /// The storage backend failed (e.g., a poisoned lock).
    StorageError(String),
    /// An invalid operation was attempted (e.g., unsorted histogram bounds).
    InvalidOperation(String),
}

impl Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::MetricNotFound(id) => write!(f, "Metric not found: {id}"),
            MetricsError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {expected:?}, found {found:?}")
            }
            MetricsError::StorageError(msg) => write!(f, "Storage error: {msg}"),
            MetricsError::InvalidOperation(msg) => write!(f, "Invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for MetricsError {}
