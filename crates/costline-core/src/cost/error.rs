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

use crate::model::ContainerId;
use std::fmt::{self, Display};

/// A specialized `Result` type for cost accounting operations.
pub type CostResult<T> = Result<T, CostError>;

/// An error raised by the cost monitor.
///
/// Missing bindings or missing annotations are not errors; they are skipped
/// where they are detected. Every variant here means that a probe could not
/// be built or that events reached the wrong probe.
#[derive(Debug, Clone, PartialEq)]
pub enum CostError {
    /// A probe was constructed for a unit without a cost annotation.
    MissingAnnotation {
        /// The unit lacking an annotation.
        container: ContainerId,
    },
    /// A cost annotation has an unusable price or interval.
    InvalidAnnotation {
        /// The annotated unit.
        container: ContainerId,
        /// What is wrong with the annotation.
        reason: String,
    },
    /// A sampling event targets a container the probe's configuration does not own.
    TargetOutOfScope {
        /// The container named by the event.
        target: ContainerId,
        /// The unit the probe was built for.
        unit: ContainerId,
    },
    /// A sampling event arrived for a unit without a registered probe.
    ProbeNotRegistered(ContainerId),
    /// A probe was handed an event type it cannot measure.
    UnexpectedEvent {
        /// The event type the probe accepts.
        expected: &'static str,
        /// The event type it received.
        found: &'static str,
    },
}

impl Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostError::MissingAnnotation { container } => {
                write!(f, "Expected a cost annotation on container {container}, found none")
            }
            CostError::InvalidAnnotation { container, reason } => {
                write!(f, "Invalid cost annotation on container {container}: {reason}")
            }
            CostError::TargetOutOfScope { target, unit } => write!(
                f,
                "Sampling event targets {target}, which is not in scope of unit {unit}"
            ),
            CostError::ProbeNotRegistered(unit) => {
                write!(f, "No cost probe registered for unit {unit}")
            }
            CostError::UnexpectedEvent { expected, found } => {
                write!(f, "Wrong event type. Expected {expected} but got {found}")
            }
        }
    }
}

impl std::error::Error for CostError {}
