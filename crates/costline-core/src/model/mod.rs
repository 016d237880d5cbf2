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

//! The slice of the deployment model the cost monitor reads.
//!
//! Loading and resolving the full component model is the job of the host
//! application. This module only defines what the monitor needs to see:
//! resource containers and their annotations, the elasticity configurations
//! that scale them, and the monitoring declarations that request metrics.

pub mod configuration;
pub mod monitor;
pub mod resource;

pub use self::configuration::{
    ElasticInfrastructureCfg, ReplicaSet, SemanticConfiguration, TargetConfiguration,
};
pub use self::monitor::{MeasurementSpecification, MeasuringPoint, Monitor, MonitorRepository};
pub use self::resource::{ContainerId, ResourceContainer, Stereotype};
