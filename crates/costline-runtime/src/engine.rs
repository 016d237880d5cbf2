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

//! The simulation kernel: clock, pending events, and behavior dispatch.

use crate::config::EngineConfig;
use crate::queue::EventQueue;
use costline_core::event::EventBus;
use costline_core::model::MonitorRepository;
use costline_core::simulation::{
    EventBatch, MeasurementRecord, SimTime, SimulationBehavior, SimulationError,
    SimulationEvent, SimulationResult,
};
use costline_core::telemetry::Calculator;
use costline_telemetry::MeasurementCollector;
use std::fmt;
use std::sync::Arc;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No event was left to process.
    Drained,
    /// The next event lies beyond the configured time limit.
    TimeLimit,
    /// The configured event budget was used up.
    EventLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Drained => f.write_str("event queue drained"),
            StopReason::TimeLimit => f.write_str("time limit reached"),
            StopReason::EventLimit => f.write_str("event limit reached"),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Simulated time of the last processed event.
    pub end_time: SimTime,
    /// Number of events processed since the engine was created.
    pub processed_events: u64,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

/// A single-threaded discrete-event kernel.
///
/// Events are processed one at a time in firing-time order. The kernel
/// handles calculator registrations and probe measurements itself, then hands
/// every event to each active behavior. The events a behavior returns are
/// validated as a batch and scheduled relative to the current clock. Any
/// error aborts the run.
pub struct SimulationEngine {
    config: EngineConfig,
    clock: SimTime,
    queue: EventQueue,
    behaviors: Vec<Box<dyn SimulationBehavior>>,
    calculators: Vec<Arc<dyn Calculator>>,
    collector: MeasurementCollector,
    measurements: EventBus<MeasurementRecord>,
    processed_events: u64,
}

impl SimulationEngine {
    /// Creates an engine at time zero with `SimulationStarted` pending.
    pub fn new(config: EngineConfig) -> SimulationResult<Self> {
        let mut queue = EventQueue::new();
        queue.push(0.0, SimulationEvent::SimulationStarted);
        let measurements = EventBus::new(config.measurement_buffer_size);
        Ok(Self {
            config,
            clock: 0.0,
            queue,
            behaviors: Vec::new(),
            calculators: Vec::new(),
            collector: MeasurementCollector::new()?,
            measurements,
            processed_events: 0,
        })
    }

    /// Adds a behavior. Inactive behaviors are kept but never receive events.
    pub fn register_behavior(&mut self, behavior: Box<dyn SimulationBehavior>) {
        if behavior.is_active() {
            log::info!("Registered behavior '{}'", behavior.name());
        } else {
            log::info!("Registered behavior '{}' (inactive for this run)", behavior.name());
        }
        self.behaviors.push(behavior);
    }

    /// Schedules `event` to fire after its delay, relative to the current clock.
    pub fn schedule(&mut self, event: SimulationEvent) -> SimulationResult<()> {
        validate_delay(&event)?;
        self.queue.push(self.clock + event.delay(), event);
        Ok(())
    }

    /// Schedules one `MeasurementSpecificationVisited` per requested metric.
    ///
    /// The visits fire at the current time, after any event already pending
    /// for that instant.
    pub fn visit_monitor_repository(
        &mut self,
        repository: &MonitorRepository,
    ) -> SimulationResult<()> {
        for spec in repository.measurement_specifications() {
            log::debug!(
                "Visiting measurement specification {} at {}",
                spec.metric_description,
                spec.measuring_point
            );
            self.schedule(SimulationEvent::MeasurementSpecificationVisited(spec))?;
        }
        Ok(())
    }

    /// Processes the next event, if one is pending.
    ///
    /// Returns `Ok(false)` when the queue is empty.
    pub fn step(&mut self) -> SimulationResult<bool> {
        let Some((time, event)) = self.queue.pop() else {
            return Ok(false);
        };
        self.clock = time;
        self.processed_events += 1;
        log::trace!("t={} processing {}", self.clock, event.name());

        if let Err(e) = self.process(&event) {
            log::error!(
                "Simulation aborted at t={} while processing {}: {}",
                self.clock,
                event.name(),
                e
            );
            return Err(e);
        }
        Ok(true)
    }

    fn process(&mut self, event: &SimulationEvent) -> SimulationResult<()> {
        match event {
            SimulationEvent::CalculatorRegistered(calculator) => {
                log::info!(
                    "Calculator for {} at {} registered",
                    calculator.metric(),
                    calculator.measuring_point()
                );
                self.calculators.push(Arc::clone(calculator));
            }
            SimulationEvent::ProbeTaken(record) => {
                self.collector.record(record)?;
                self.measurements.publish(record.clone());
            }
            _ => {}
        }

        let now = self.clock;
        for behavior in self.behaviors.iter_mut().filter(|b| b.is_active()) {
            let batch: EventBatch = behavior.on_event(event, now)?;
            if batch.is_empty() {
                continue;
            }
            batch.iter().try_for_each(validate_delay)?;
            for emitted in batch {
                self.queue.push(now + emitted.delay(), emitted);
            }
        }
        Ok(())
    }

    /// Processes events until the queue drains or a configured limit is hit.
    pub fn run(&mut self) -> SimulationResult<RunSummary> {
        log::info!(
            "Starting simulation run (time limit {}, event limit {:?}, {} measurement subscribers)",
            self.config.max_simulation_time,
            self.config.max_events,
            self.measurements.subscriber_count()
        );
        let stop_reason = loop {
            match self.queue.peek_time() {
                None => break StopReason::Drained,
                Some(time) if time > self.config.max_simulation_time => {
                    break StopReason::TimeLimit
                }
                Some(_) => {}
            }
            if self
                .config
                .max_events
                .is_some_and(|max| self.processed_events >= max)
            {
                break StopReason::EventLimit;
            }
            self.step()?;
        };

        let summary = RunSummary {
            end_time: self.clock,
            processed_events: self.processed_events,
            stop_reason,
        };
        log::info!(
            "Simulation stopped at t={} after {} events: {}",
            summary.end_time,
            summary.processed_events,
            summary.stop_reason
        );
        Ok(summary)
    }

    /// The current simulated time.
    pub fn now(&self) -> SimTime {
        self.clock
    }

    /// Number of events waiting to be processed.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Calculators registered so far, in registration order.
    pub fn calculators(&self) -> &[Arc<dyn Calculator>] {
        &self.calculators
    }

    /// The collector holding every measurement taken so far.
    pub fn collector(&self) -> &MeasurementCollector {
        &self.collector
    }

    /// Measurements are published here as they are collected.
    ///
    /// Only subscribers registered before a measurement is taken receive it.
    pub fn measurements(&self) -> &EventBus<MeasurementRecord> {
        &self.measurements
    }
}

impl fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("clock", &self.clock)
            .field("pending_events", &self.queue.len())
            .field("behaviors", &self.behaviors.len())
            .field("calculators", &self.calculators.len())
            .field("processed_events", &self.processed_events)
            .finish()
    }
}

fn validate_delay(event: &SimulationEvent) -> SimulationResult<()> {
    let delay = event.delay();
    if delay.is_finite() && delay >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidDelay {
            event: event.name(),
            delay,
        })
    }
}
