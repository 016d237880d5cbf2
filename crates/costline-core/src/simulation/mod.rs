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

//! Events and behavior contracts of the discrete-event simulation.
//!
//! The kernel that orders and dispatches these events lives outside this
//! crate. Behaviors never block and never see the event queue: they receive
//! one event together with the current simulated time and answer with the
//! batch of events to schedule, each carrying its own delay.

mod behavior;
mod error;
mod event;

pub use self::behavior::{EventBatch, SimulationBehavior};
pub use self::error::{SimulationError, SimulationResult};
pub use self::event::{MeasurementRecord, SimTime, SimulationEvent, TakeCostMeasurement};
