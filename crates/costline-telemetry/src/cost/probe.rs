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

//! The probe sampling the cost of one elastic unit.

use costline_core::cost::{
    CostAnnotation, CostAnnotationSource, CostError, CostResult, Currency, Measure,
};
use costline_core::model::ElasticInfrastructureCfg;
use costline_core::simulation::{SimTime, SimulationEvent, TakeCostMeasurement};
use costline_core::telemetry::{MetricDescription, Probe, COST_OVER_TIME};

/// Samples `replicas x unit price` for the unit of one elastic infrastructure
/// configuration.
///
/// The replica count is read from the configuration's live replica set at
/// every sample, so scale-out and scale-in done elsewhere show up in the next
/// measurement without the probe observing scaling events. A probe never
/// changes after construction.
#[derive(Debug)]
pub struct ContainerCostProbe {
    config: ElasticInfrastructureCfg,
    unit_price: f64,
    interval: SimTime,
    currency: Currency,
}

impl ContainerCostProbe {
    /// Builds a probe from an already resolved annotation.
    ///
    /// Fails with [`CostError::InvalidAnnotation`] if the annotation has a
    /// non-finite price or a non-positive interval.
    pub fn new(
        config: ElasticInfrastructureCfg,
        annotation: CostAnnotation,
        currency: Currency,
    ) -> CostResult<Self> {
        annotation.validate(&config.unit.id)?;
        Ok(Self {
            config,
            unit_price: annotation.unit_price,
            interval: annotation.sample_interval,
            currency,
        })
    }

    /// Builds a probe, resolving the annotation through `source`.
    ///
    /// Fails with [`CostError::MissingAnnotation`] if the unit has no cost
    /// defined.
    pub fn from_source(
        config: ElasticInfrastructureCfg,
        source: &dyn CostAnnotationSource,
        currency: Currency,
    ) -> CostResult<Self> {
        let annotation = source
            .lookup(&config.unit)
            .ok_or_else(|| CostError::MissingAnnotation {
                container: config.unit.id.clone(),
            })?;
        Self::new(config, annotation, currency)
    }

    /// Samples the current cost of the unit.
    ///
    /// The event must target the unit or one of its current replicas;
    /// anything else means the event was routed to the wrong probe.
    pub fn sample(&self, event: &TakeCostMeasurement) -> CostResult<Measure> {
        if !self.config.is_in_scope(&event.target) {
            return Err(CostError::TargetOutOfScope {
                target: event.target.clone(),
                unit: self.config.unit.id.clone(),
            });
        }

        let replicas = self.config.replica_count();
        Ok(Measure::new(replicas as f64 * self.unit_price, self.currency))
    }

    /// Time between two samples.
    pub fn interval(&self) -> SimTime {
        self.interval
    }

    /// Price of one replica.
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// The configuration this probe belongs to.
    pub fn config(&self) -> &ElasticInfrastructureCfg {
        &self.config
    }
}

impl Probe for ContainerCostProbe {
    fn metric(&self) -> &MetricDescription {
        &COST_OVER_TIME
    }

    fn take_measurement(&self, event: &SimulationEvent) -> CostResult<Measure> {
        match event {
            SimulationEvent::TakeCostMeasurement(sample) => self.sample(sample),
            other => Err(CostError::UnexpectedEvent {
                expected: "TakeCostMeasurement",
                found: other.name(),
            }),
        }
    }
}
