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

use crate::cost::Measure;
use crate::model::{ContainerId, MeasurementSpecification, MeasuringPoint};
use crate::telemetry::metrics::MetricDescription;
use crate::telemetry::probe::Calculator;
use std::sync::Arc;

/// Simulated time, in model time units.
pub type SimTime = f64;

/// The trigger of one cost sample for one unit.
///
/// The event carries the interval it was scheduled with, so rescheduling
/// never needs to consult the probe again.
#[derive(Debug, Clone, PartialEq)]
pub struct TakeCostMeasurement {
    /// The unit to sample.
    pub target: ContainerId,
    /// Delay from the time the event is emitted to the time it fires.
    pub delay: SimTime,
    /// Sampling period of `target`.
    pub interval: SimTime,
}

impl TakeCostMeasurement {
    /// The first sample of a unit, firing immediately.
    pub fn first(target: ContainerId, interval: SimTime) -> Self {
        Self {
            target,
            delay: 0.0,
            interval,
        }
    }

    /// The follow-up sample, one interval later.
    ///
    /// There is no stop condition: each sample produces the
    /// next one until the host simulation stops processing events.
    pub fn next(&self) -> Self {
        Self {
            target: self.target.clone(),
            delay: self.interval,
            interval: self.interval,
        }
    }
}

/// A sampled cost, handed to whatever collects measurements.
#[derive(Debug, Clone)]
pub struct MeasurementRecord {
    /// The unit whose probe took the measurement.
    pub unit: ContainerId,
    /// The measuring point the probe's calculator reports for.
    pub measuring_point: MeasuringPoint,
    /// The measured metric.
    pub metric: MetricDescription,
    /// The sampled cost.
    pub measure: Measure,
    /// Simulated time at which the sample was taken.
    pub taken_at: SimTime,
}

/// Every event exchanged between behaviors and the kernel.
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// Emitted once by the kernel before any other event.
    SimulationStarted,
    /// Model traversal found a measurement specification.
    MeasurementSpecificationVisited(MeasurementSpecification),
    /// A calculator was built and must be known to the metric-collection subsystem.
    CalculatorRegistered(Arc<dyn Calculator>),
    /// Time to sample the cost of a unit.
    TakeCostMeasurement(TakeCostMeasurement),
    /// A probe produced a measurement.
    ProbeTaken(MeasurementRecord),
    /// A named timer used by host behaviors such as scaling policies.
    Timer {
        /// Free-form label identifying the timer.
        label: String,
        /// Delay until the timer fires.
        delay: SimTime,
    },
}

impl SimulationEvent {
    /// Delay between emission and firing. Zero for events without a delay.
    pub fn delay(&self) -> SimTime {
        match self {
            SimulationEvent::TakeCostMeasurement(e) => e.delay,
            SimulationEvent::Timer { delay, .. } => *delay,
            SimulationEvent::SimulationStarted
            | SimulationEvent::MeasurementSpecificationVisited(_)
            | SimulationEvent::CalculatorRegistered(_)
            | SimulationEvent::ProbeTaken(_) => 0.0,
        }
    }

    /// The event type name, for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SimulationEvent::SimulationStarted => "SimulationStarted",
            SimulationEvent::MeasurementSpecificationVisited(_) => {
                "MeasurementSpecificationVisited"
            }
            SimulationEvent::CalculatorRegistered(_) => "CalculatorRegistered",
            SimulationEvent::TakeCostMeasurement(_) => "TakeCostMeasurement",
            SimulationEvent::ProbeTaken(_) => "ProbeTaken",
            SimulationEvent::Timer { .. } => "Timer",
        }
    }
}

impl From<TakeCostMeasurement> for SimulationEvent {
    fn from(event: TakeCostMeasurement) -> Self {
        SimulationEvent::TakeCostMeasurement(event)
    }
}
