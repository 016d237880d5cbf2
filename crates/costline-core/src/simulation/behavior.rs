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

use crate::simulation::error::SimulationResult;
use crate::simulation::event::{SimTime, SimulationEvent};
use std::fmt::Debug;

/// The events a behavior emits in response to one event.
///
/// The kernel schedules the whole batch at once, after the handler returned.
pub type EventBatch = Vec<SimulationEvent>;

/// A simulation extension reacting to events.
///
/// Handlers run to completion on the kernel's thread and take `&mut self`,
/// so behavior state needs no locking. Any state shared with other behaviors
/// must carry its own synchronization.
pub trait SimulationBehavior: Send + Debug {
    /// A short name for logs.
    fn name(&self) -> &str;

    /// Whether the behavior takes part in this run. Inactive behaviors never
    /// receive events.
    fn is_active(&self) -> bool {
        true
    }

    /// Handles `event`, fired at simulated time `now`.
    ///
    /// Behaviors ignore events they are not interested in by returning an
    /// empty batch. An error aborts the simulation run.
    fn on_event(&mut self, event: &SimulationEvent, now: SimTime) -> SimulationResult<EventBatch>;
}
