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

//! # Costline Runtime
//!
//! A small discrete-event kernel that hosts simulation behaviors such as the
//! cost monitor. It owns the simulated clock and the pending-event queue,
//! collects the measurements probes produce, and stops a run when the queue
//! drains or a configured limit is reached.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod queue;

pub use config::EngineConfig;
pub use engine::{RunSummary, SimulationEngine, StopReason};
pub use queue::EventQueue;
