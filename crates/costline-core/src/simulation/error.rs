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

use crate::cost::CostError;
use crate::telemetry::metrics::MetricsError;
use std::fmt::{self, Display};

/// A specialized `Result` type for simulation steps.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// An error that terminates a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The cost monitor detected an inconsistency.
    Cost(CostError),
    /// A measurement could not be stored by the collector.
    Metrics(MetricsError),
    /// An event was emitted with a negative or non-finite delay.
    InvalidDelay {
        /// The event type name.
        event: &'static str,
        /// The rejected delay.
        delay: f64,
    },
    /// A host behavior failed.
    Behavior {
        /// The failing behavior.
        behavior: String,
        /// What went wrong.
        message: String,
    },
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Cost(e) => write!(f, "Cost monitoring failed: {e}"),
            SimulationError::Metrics(e) => write!(f, "Metric collection failed: {e}"),
            SimulationError::InvalidDelay { event, delay } => {
                write!(f, "Event {event} emitted with invalid delay {delay}")
            }
            SimulationError::Behavior { behavior, message } => {
                write!(f, "Behavior {behavior} failed: {message}")
            }
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Cost(e) => Some(e),
            SimulationError::Metrics(e) => Some(e),
            SimulationError::InvalidDelay { .. } | SimulationError::Behavior { .. } => None,
        }
    }
}

impl From<CostError> for SimulationError {
    fn from(e: CostError) -> Self {
        SimulationError::Cost(e)
    }
}

impl From<MetricsError> for SimulationError {
    fn from(e: MetricsError) -> Self {
        SimulationError::Metrics(e)
    }
}
