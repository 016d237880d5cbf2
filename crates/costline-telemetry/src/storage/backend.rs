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

use costline_core::telemetry::{Metric, MetricId, MetricType, MetricValue, MetricsError, MetricsResult};
use std::fmt::Debug;

/// Trait defining the interface for metrics storage backends.
pub trait MetricsBackend: Send + Sync + Debug + 'static {
    /// Store or replace a metric.
    fn put_metric(&self, metric: Metric) -> MetricsResult<()>;

    /// Retrieve a metric by ID.
    fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric>;

    /// Get all metrics.
    fn list_all_metrics(&self) -> Vec<Metric>;

    /// Get the number of metrics stored.
    fn metric_count(&self) -> usize;

    /// Get all metrics of a namespace.
    fn metrics_by_namespace(&self, namespace: &str) -> Vec<Metric> {
        self.list_all_metrics()
            .into_iter()
            .filter(|metric| metric.metadata.id.namespace == namespace)
            .collect()
    }

    /// Increment a counter by the given amount.
    fn increment_counter(&self, id: &MetricId, delta: u64) -> MetricsResult<u64> {
        let mut metric = self.get_metric(id)?;

        match metric.value {
            MetricValue::Counter(ref mut value) => {
                *value = value.saturating_add(delta);
                let result = *value;
                metric.metadata.touch();
                self.put_metric(metric)?;
                Ok(result)
            }
            _ => Err(MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: metric.value.metric_type(),
            }),
        }
    }

    /// Set a gauge value.
    fn set_gauge(&self, id: &MetricId, value: f64) -> MetricsResult<()> {
        let mut metric = self.get_metric(id)?;

        match metric.value {
            MetricValue::Gauge(ref mut gauge_value) => {
                *gauge_value = value;
                metric.metadata.touch();
                self.put_metric(metric)
            }
            _ => Err(MetricsError::TypeMismatch {
                expected: MetricType::Gauge,
                found: metric.value.metric_type(),
            }),
        }
    }

    /// Add a sample to a histogram.
    fn record_histogram_sample(&self, id: &MetricId, sample: f64) -> MetricsResult<()> {
        let mut metric = self.get_metric(id)?;

        match metric.value {
            MetricValue::Histogram {
                ref bucket_bounds,
                ref mut bucket_counts,
                ref mut count,
                ref mut sum,
            } => {
                for (bucket, &bound) in bucket_counts.iter_mut().zip(bucket_bounds) {
                    if sample <= bound {
                        *bucket += 1;
                    }
                }
                *count += 1;
                *sum += sample;
                metric.metadata.touch();
                self.put_metric(metric)
            }
            _ => Err(MetricsError::TypeMismatch {
                expected: MetricType::Histogram,
                found: metric.value.metric_type(),
            }),
        }
    }
}
