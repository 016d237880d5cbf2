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

//! Collects the cost records produced by probes into the metrics registry.

use crate::metrics::{CounterHandle, GaugeHandle, HistogramHandle, MetricsRegistry};
use costline_core::model::ContainerId;
use costline_core::simulation::MeasurementRecord;
use costline_core::telemetry::{HistogramStats, MetricsResult};
use std::collections::HashMap;

const NAMESPACE: &str = "cost";

/// Default histogram bucket bounds for sampled cost values.
pub const DEFAULT_COST_BUCKETS: [f64; 8] = [1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0, 1000.0];

#[derive(Debug)]
struct UnitSeries {
    latest: GaugeHandle,
    distribution: HistogramHandle,
}

/// Keeps every recorded measurement and mirrors it into labelled metrics.
///
/// The record history is the only copy of the sampled series. Each unit also
/// gets a gauge holding its latest sampled cost and a bucketed histogram,
/// both labelled with the unit id and the currency.
#[derive(Debug)]
pub struct MeasurementCollector {
    registry: MetricsRegistry,
    series: HashMap<ContainerId, UnitSeries>,
    records_total: CounterHandle,
    history: Vec<MeasurementRecord>,
}

impl MeasurementCollector {
    /// Creates a collector backed by a fresh in-memory registry.
    pub fn new() -> MetricsResult<Self> {
        Self::with_registry(MetricsRegistry::new())
    }

    /// Creates a collector writing to the given registry.
    pub fn with_registry(registry: MetricsRegistry) -> MetricsResult<Self> {
        let records_total =
            registry.register_counter(NAMESPACE, "records", "Cost measurements collected")?;
        Ok(Self {
            registry,
            series: HashMap::new(),
            records_total,
            history: Vec::new(),
        })
    }

    /// Records one measurement.
    pub fn record(&mut self, record: &MeasurementRecord) -> MetricsResult<()> {
        let value = record.measure.value;
        if !self.series.contains_key(&record.unit) {
            let series = self.register_series(record)?;
            self.series.insert(record.unit.clone(), series);
        }
        let series = &self.series[&record.unit];
        series.latest.set(value)?;
        series.distribution.observe(value)?;
        self.records_total.increment()?;

        log::trace!(
            "Collected {} for {} at t={}",
            record.measure,
            record.unit,
            record.taken_at
        );
        self.history.push(record.clone());
        Ok(())
    }

    fn register_series(&self, record: &MeasurementRecord) -> MetricsResult<UnitSeries> {
        let labels = vec![
            ("container".to_string(), record.unit.to_string()),
            ("currency".to_string(), record.measure.currency.code().to_string()),
        ];
        let unit = record.measure.currency.code();
        let latest = self.registry.register_gauge_with_labels(
            NAMESPACE,
            record.metric.id,
            "Latest sampled cost",
            unit,
            labels.clone(),
        )?;
        let distribution = self.registry.register_histogram_with_labels(
            NAMESPACE,
            format!("{}_samples", record.metric.id),
            "Sampled cost distribution",
            unit,
            DEFAULT_COST_BUCKETS.to_vec(),
            labels,
        )?;
        log::debug!("Registered cost series for {}", record.unit);
        Ok(UnitSeries {
            latest,
            distribution,
        })
    }

    /// Returns the latest sampled value for `unit`, if any was recorded.
    pub fn latest(&self, unit: &ContainerId) -> MetricsResult<Option<f64>> {
        self.series
            .get(unit)
            .map(|series| series.latest.get())
            .transpose()
    }

    /// Returns every sampled value for `unit`, in recording order.
    pub fn samples(&self, unit: &ContainerId) -> Vec<f64> {
        self.history
            .iter()
            .filter(|record| &record.unit == unit)
            .map(|record| record.measure.value)
            .collect()
    }

    /// Returns the count and sum of the samples of `unit`, if any was recorded.
    pub fn summary(&self, unit: &ContainerId) -> MetricsResult<Option<HistogramStats>> {
        self.series
            .get(unit)
            .map(|series| series.distribution.stats())
            .transpose()
    }

    /// Returns the number of collected records.
    pub fn record_count(&self) -> MetricsResult<u64> {
        self.records_total.get()
    }

    /// Returns every collected record, in recording order.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.history
    }

    /// Returns the registry holding the collected metrics.
    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }
}
