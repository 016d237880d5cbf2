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

//! Registry for managing metrics.

use crate::storage::{backend::MetricsBackend, memory_backend::InMemoryBackend};
use costline_core::telemetry::{
    HistogramStats, Metric, MetricId, MetricType, MetricsError, MetricsResult,
};
use std::sync::Arc;

/// Central registry for collected metrics.
///
/// Registration writes a fresh metric to the backend and returns a typed
/// handle. Handles share the backend, so updates made through a handle are
/// visible to every reader of the registry.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    backend: Arc<dyn MetricsBackend>,
}

impl MetricsRegistry {
    /// Create a new metrics registry with the default in-memory backend.
    pub fn new() -> Self {
        Self {
            backend: Arc::new(InMemoryBackend::new()),
        }
    }

    /// Create a new metrics registry with a custom backend.
    pub fn with_backend(backend: Arc<dyn MetricsBackend>) -> Self {
        Self { backend }
    }

    /// Register a new counter metric.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        self.register_counter_with_labels(namespace, name, description, Vec::new())
    }

    /// Register a new counter metric with labels.
    pub fn register_counter_with_labels(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        labels: Vec<(String, String)>,
    ) -> MetricsResult<CounterHandle> {
        let id = labelled_id(namespace, name, labels);
        self.backend
            .put_metric(Metric::new_counter(id.clone(), description, 0))?;
        Ok(CounterHandle::new(id, self.backend.clone()))
    }

    /// Register a new gauge metric with labels.
    pub fn register_gauge_with_labels(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        labels: Vec<(String, String)>,
    ) -> MetricsResult<GaugeHandle> {
        let id = labelled_id(namespace, name, labels);
        self.backend
            .put_metric(Metric::new_gauge(id.clone(), description, unit, 0.0))?;
        Ok(GaugeHandle::new(id, self.backend.clone()))
    }

    /// Register a new histogram metric with labels.
    ///
    /// Bucket bounds must be strictly increasing.
    pub fn register_histogram_with_labels(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        buckets: Vec<f64>,
        labels: Vec<(String, String)>,
    ) -> MetricsResult<HistogramHandle> {
        if buckets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(MetricsError::InvalidOperation(
                "histogram bucket bounds must be strictly increasing".to_string(),
            ));
        }
        let id = labelled_id(namespace, name, labels);
        self.backend
            .put_metric(Metric::new_histogram(id.clone(), description, unit, buckets))?;
        Ok(HistogramHandle::new(id, self.backend.clone()))
    }

    /// Get all metrics in a namespace.
    pub fn namespace_metrics(&self, namespace: &str) -> Vec<Metric> {
        self.backend.metrics_by_namespace(namespace)
    }

    /// Get the total number of metrics.
    pub fn metric_count(&self) -> usize {
        self.backend.metric_count()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn labelled_id(
    namespace: impl Into<String>,
    name: impl Into<String>,
    labels: Vec<(String, String)>,
) -> MetricId {
    labels
        .into_iter()
        .fold(MetricId::new(namespace, name), |id, (key, value)| {
            id.with_label(key, value)
        })
}

/// Handle for counter operations.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl CounterHandle {
    fn new(id: MetricId, backend: Arc<dyn MetricsBackend>) -> Self {
        Self { id, backend }
    }

    /// Increment the counter by 1.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.backend.increment_counter(&self.id, 1)
    }

    /// Get the current counter value.
    pub fn get(&self) -> MetricsResult<u64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric
            .value
            .as_counter()
            .ok_or_else(|| MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: metric.value.metric_type(),
            })
    }

    /// Get the metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for gauge operations.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl GaugeHandle {
    fn new(id: MetricId, backend: Arc<dyn MetricsBackend>) -> Self {
        Self { id, backend }
    }

    /// Set the gauge to a specific value.
    pub fn set(&self, value: f64) -> MetricsResult<()> {
        self.backend.set_gauge(&self.id, value)
    }

    /// Get the current gauge value.
    pub fn get(&self) -> MetricsResult<f64> {
        let metric = self.backend.get_metric(&self.id)?;
        metric
            .value
            .as_gauge()
            .ok_or_else(|| MetricsError::TypeMismatch {
                expected: MetricType::Gauge,
                found: metric.value.metric_type(),
            })
    }

    /// Get the metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for histogram operations.
#[derive(Debug, Clone)]
pub struct HistogramHandle {
    id: MetricId,
    backend: Arc<dyn MetricsBackend>,
}

impl HistogramHandle {
    fn new(id: MetricId, backend: Arc<dyn MetricsBackend>) -> Self {
        Self { id, backend }
    }

    /// Record a sample in the histogram.
    pub fn observe(&self, value: f64) -> MetricsResult<()> {
        self.backend.record_histogram_sample(&self.id, value)
    }

    /// Get the count and sum of the recorded samples.
    pub fn stats(&self) -> MetricsResult<HistogramStats> {
        let metric = self.backend.get_metric(&self.id)?;
        metric
            .value
            .histogram_stats()
            .ok_or_else(|| MetricsError::TypeMismatch {
                expected: MetricType::Histogram,
                found: metric.value.metric_type(),
            })
    }

    /// Get the metric ID.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.metric_count(), 0);
    }

    #[test]
    fn test_counter_registration_and_operations() {
        let registry = MetricsRegistry::new();
        let counter = registry
            .register_counter("cost", "records", "Collected cost records")
            .unwrap();

        assert_eq!(counter.increment().unwrap(), 1);
        assert_eq!(counter.increment().unwrap(), 2);
        assert_eq!(counter.get().unwrap(), 2);
        assert_eq!(counter.id().to_string(), "cost:records");
        assert_eq!(registry.metric_count(), 1);
    }

    #[test]
    fn test_labelled_gauge() {
        let registry = MetricsRegistry::new();
        let gauge = registry
            .register_gauge_with_labels(
                "cost",
                "cost_over_time",
                "Latest sampled cost",
                "EUR",
                vec![("container".to_string(), "rc-1".to_string())],
            )
            .unwrap();

        gauge.set(30.0).unwrap();
        assert_eq!(gauge.get().unwrap(), 30.0);
        assert_eq!(gauge.id().label("container"), Some("rc-1"));
        assert_eq!(registry.namespace_metrics("cost").len(), 1);
    }

    #[test]
    fn test_histogram_registration_and_operations() {
        let registry = MetricsRegistry::new();
        let histogram = registry
            .register_histogram_with_labels(
                "cost",
                "cost_samples",
                "Sampled cost distribution",
                "EUR",
                vec![10.0, 100.0],
                Vec::new(),
            )
            .unwrap();

        histogram.observe(30.0).unwrap();
        histogram.observe(50.0).unwrap();
        assert_eq!(
            histogram.stats().unwrap(),
            HistogramStats {
                count: 2,
                sum: 80.0
            }
        );
    }

    #[test]
    fn test_unsorted_buckets_are_rejected() {
        let registry = MetricsRegistry::new();
        let result = registry.register_histogram_with_labels(
            "cost",
            "bad",
            "",
            "EUR",
            vec![100.0, 10.0],
            Vec::new(),
        );

        assert!(matches!(result, Err(MetricsError::InvalidOperation(_))));
        assert_eq!(registry.metric_count(), 0);
    }
}
