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

//! The behavior binding cost monitors to elastic infrastructure and driving sampling.
//!
//! Two events drive it:
//!
//! - `MeasurementSpecificationVisited`: if the specification asks for the
//!   cost of a resource container that is the unit of an elastic
//!   infrastructure configuration, and that unit has a cost annotation, a
//!   probe is registered (once per unit), a calculator is built for it, and
//!   the first `TakeCostMeasurement` is emitted with zero delay.
//! - `TakeCostMeasurement`: the unit's probe is sampled, the measurement is
//!   emitted as `ProbeTaken`, and the same event is emitted again one
//!   interval later.
//!
//! The sampling loop has no stop condition. The host simulation's event
//! queue acts as the timer and the loop ends when the host stops
//! processing events.

use crate::config::CostMonitorConfig;
use crate::cost::probe::ContainerCostProbe;
use crate::cost::registry::ProbeRegistry;
use costline_core::cost::{CostAnnotationSource, CostResult, Currency};
use costline_core::model::{MeasurementSpecification, MeasuringPoint, SemanticConfiguration};
use costline_core::simulation::{
    EventBatch, MeasurementRecord, SimTime, SimulationBehavior, SimulationEvent,
    SimulationResult, TakeCostMeasurement,
};
use costline_core::telemetry::{
    CalculatorFactory, Probe, COST_OF_RESOURCE_CONTAINERS, COST_OVER_TIME,
};
use std::sync::Arc;

/// Accounts for the cost of elastic resource containers.
///
/// The behavior is active only when the run has a semantic configuration to
/// bind against.
#[derive(Debug)]
pub struct CostMonitorBehavior {
    calculator_factory: Arc<dyn CalculatorFactory>,
    annotation_source: Arc<dyn CostAnnotationSource>,
    semantic_configuration: Option<SemanticConfiguration>,
    currency: Currency,
    probes: ProbeRegistry,
}

impl CostMonitorBehavior {
    /// Creates a monitor with an empty probe registry.
    pub fn new(
        calculator_factory: Arc<dyn CalculatorFactory>,
        annotation_source: Arc<dyn CostAnnotationSource>,
        semantic_configuration: Option<SemanticConfiguration>,
        currency: Currency,
    ) -> Self {
        Self {
            calculator_factory,
            annotation_source,
            semantic_configuration,
            currency,
            probes: ProbeRegistry::new(),
        }
    }

    /// Creates a monitor whose annotation source and currency come from `config`.
    pub fn from_config(
        config: &CostMonitorConfig,
        calculator_factory: Arc<dyn CalculatorFactory>,
        semantic_configuration: Option<SemanticConfiguration>,
    ) -> Self {
        Self::new(
            calculator_factory,
            config.annotation_source.build(),
            semantic_configuration,
            config.currency,
        )
    }

    /// The probes registered so far.
    pub fn probe_registry(&self) -> &ProbeRegistry {
        &self.probes
    }

    /// Binds a visited measurement specification to a cost probe.
    ///
    /// Returns an empty batch when the specification is not about container
    /// cost, when no elastic configuration scales the container, or when no
    /// cost is defined for it. A unit that is already bound also yields an
    /// empty batch. Otherwise returns the calculator registration
    /// followed by the first sampling event.
    pub fn on_measurement_specification(
        &mut self,
        spec: &MeasurementSpecification,
    ) -> CostResult<EventBatch> {
        let Some(container) = spec.measuring_point.resource_container() else {
            return Ok(EventBatch::new());
        };
        if !spec
            .metric_description
            .same_metric(&COST_OF_RESOURCE_CONTAINERS)
        {
            return Ok(EventBatch::new());
        }
        let Some(semantic) = &self.semantic_configuration else {
            return Ok(EventBatch::new());
        };

        let Some(cfg) = semantic.elastic_infrastructure_for(container) else {
            log::info!(
                "Not registering calculator for {}, no elastic infrastructure configuration with matching unit.",
                spec.measuring_point
            );
            return Ok(EventBatch::new());
        };

        let Some(annotation) = self.annotation_source.lookup(&cfg.unit) else {
            log::info!(
                "Not registering calculator for {}, because there are no costs defined for the resource container.",
                spec.measuring_point
            );
            return Ok(EventBatch::new());
        };

        let currency = self.currency;
        let (probe, created) = self.probes.register_if_absent(&cfg.unit.id, || {
            ContainerCostProbe::new(cfg.clone(), annotation, currency)
        })?;
        if !created {
            // One calculator and one sampling loop per unit.
            log::debug!(
                "Calculator for {} already registered.",
                spec.measuring_point
            );
            return Ok(EventBatch::new());
        }

        log::info!("Registering calculator for {}.", spec.measuring_point);

        let calculator = self.calculator_factory.build(
            &COST_OVER_TIME,
            &spec.measuring_point,
            Arc::clone(&probe) as Arc<dyn Probe>,
        );

        Ok(vec![
            SimulationEvent::CalculatorRegistered(calculator),
            TakeCostMeasurement::first(cfg.unit.id.clone(), probe.interval()).into(),
        ])
    }

    /// Takes one sample and schedules the next one.
    ///
    /// Fails if no probe is registered for the event's target, or if the
    /// probe does not own the target. Both mean events were routed wrongly.
    pub fn on_take_cost_measurement(
        &mut self,
        event: &TakeCostMeasurement,
        now: SimTime,
    ) -> CostResult<EventBatch> {
        let probe = self.probes.require(&event.target)?;
        let measure = probe.sample(event)?;
        log::trace!("Cost of {} at t={}: {}", event.target, now, measure);

        let record = MeasurementRecord {
            unit: event.target.clone(),
            measuring_point: MeasuringPoint::ResourceContainer(probe.config().unit.clone()),
            metric: COST_OVER_TIME,
            measure,
            taken_at: now,
        };

        Ok(vec![
            SimulationEvent::ProbeTaken(record),
            event.next().into(),
        ])
    }
}

impl SimulationBehavior for CostMonitorBehavior {
    fn name(&self) -> &str {
        "cost-monitor"
    }

    fn is_active(&self) -> bool {
        self.semantic_configuration.is_some()
    }

    fn on_event(&mut self, event: &SimulationEvent, now: SimTime) -> SimulationResult<EventBatch> {
        let batch = match event {
            SimulationEvent::MeasurementSpecificationVisited(spec) => {
                self.on_measurement_specification(spec)?
            }
            SimulationEvent::TakeCostMeasurement(sample) => {
                self.on_take_cost_measurement(sample, now)?
            }
            _ => EventBatch::new(),
        };
        Ok(batch)
    }
}
