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

//! Contracts between probes, calculators, and the metric-collection subsystem.

use crate::cost::{CostResult, Measure};
use crate::model::MeasuringPoint;
use crate::simulation::SimulationEvent;
use crate::telemetry::metrics::MetricDescription;
use std::fmt::Debug;
use std::sync::Arc;

/// A probe turns a simulation event into a measurement.
///
/// Probes are pull-based: they read the current state of the model when the
/// event is handed to them and never observe the model on their own.
pub trait Probe: Send + Sync + Debug + 'static {
    /// The metric this probe produces.
    fn metric(&self) -> &MetricDescription;

    /// Takes a measurement for the given event.
    ///
    /// Returns an error if the event is not one this probe understands, or if
    /// the event is inconsistent with the probe's configuration.
    fn take_measurement(&self, event: &SimulationEvent) -> CostResult<Measure>;
}

/// A registered metric calculator: a probe bound to a measuring point.
///
/// Calculators are announced to the rest of the simulation through
/// [`SimulationEvent::CalculatorRegistered`].
pub trait Calculator: Send + Sync + Debug + 'static {
    /// The metric this calculator produces.
    fn metric(&self) -> &MetricDescription;

    /// The measuring point the calculator reports for.
    fn measuring_point(&self) -> &MeasuringPoint;

    /// The probe feeding this calculator.
    fn probe(&self) -> &Arc<dyn Probe>;
}

/// Builds calculators for probes.
pub trait CalculatorFactory: Send + Sync + Debug + 'static {
    /// Builds a calculator for `metric` at `measuring_point`, fed by `probe`.
    fn build(
        &self,
        metric: &MetricDescription,
        measuring_point: &MeasuringPoint,
        probe: Arc<dyn Probe>,
    ) -> Arc<dyn Calculator>;
}
