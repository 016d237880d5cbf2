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

//! Elasticity (scaling) configurations of the deployment model.

use crate::model::resource::{ContainerId, ResourceContainer};
use std::sync::{Arc, PoisonError, RwLock};

/// A shared, live view of the replicas currently instantiated for a unit.
///
/// Cloning a `ReplicaSet` yields another handle to the same collection, so a
/// scaling policy and a cost probe observe the same elements. Nothing here
/// caches the size: [`len`](Self::len) always reads the current collection.
#[derive(Debug, Clone, Default)]
pub struct ReplicaSet {
    elements: Arc<RwLock<Vec<ResourceContainer>>>,
}

impl ReplicaSet {
    /// Creates a replica set holding the given elements.
    pub fn new(elements: Vec<ResourceContainer>) -> Self {
        Self {
            elements: Arc::new(RwLock::new(elements)),
        }
    }

    /// Returns the number of replicas at this instant.
    pub fn len(&self) -> usize {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no replica currently exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a replica with the given id currently exists.
    pub fn contains(&self, id: &ContainerId) -> bool {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|element| &element.id == id)
    }

    /// Adds a replica.
    pub fn scale_out(&self, replica: ResourceContainer) {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("Scaling out: adding replica {}", replica);
        elements.push(replica);
    }

    /// Removes the most recently added replica, if any.
    pub fn scale_in(&self) -> Option<ResourceContainer> {
        let removed = self
            .elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        if let Some(replica) = &removed {
            log::debug!("Scaling in: removed replica {}", replica);
        }
        removed
    }

    /// Removes the replica with the given id, if present.
    pub fn remove(&self, id: &ContainerId) -> Option<ResourceContainer> {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        let position = elements.iter().position(|element| &element.id == id)?;
        Some(elements.remove(position))
    }

    /// Returns a copy of the current elements.
    pub fn snapshot(&self) -> Vec<ResourceContainer> {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Binds a scalable unit to its set of replica elements.
#[derive(Debug, Clone)]
pub struct ElasticInfrastructureCfg {
    /// The scaling target.
    pub unit: ResourceContainer,
    /// The replicas currently instantiated for `unit`.
    pub elements: ReplicaSet,
    /// Name of the resource environment the unit belongs to.
    pub resource_environment: String,
}

impl ElasticInfrastructureCfg {
    /// Creates a configuration for `unit` with the given replica handle.
    pub fn new(
        unit: ResourceContainer,
        elements: ReplicaSet,
        resource_environment: impl Into<String>,
    ) -> Self {
        Self {
            unit,
            elements,
            resource_environment: resource_environment.into(),
        }
    }

    /// Returns the current replica count.
    pub fn replica_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if `id` is the unit itself or one of its current replicas.
    pub fn is_in_scope(&self, id: &ContainerId) -> bool {
        &self.unit.id == id || self.elements.contains(id)
    }
}

/// A target configuration of the semantic deployment model.
///
/// Only the [`ElasticInfrastructure`](Self::ElasticInfrastructure) variant
/// is relevant for cost accounting; the others are carried so that a
/// configuration catalog can be represented faithfully.
#[derive(Debug, Clone)]
pub enum TargetConfiguration {
    /// A horizontally scalable resource container.
    ElasticInfrastructure(ElasticInfrastructureCfg),
    /// A group of replicated assembly contexts.
    ServiceGroup {
        /// Name of the replicated assembly.
        unit_assembly: String,
    },
    /// A group of consumers competing for messages of the same queue.
    CompetingConsumersGroup {
        /// Name of the consumer assembly.
        unit_assembly: String,
    },
}

/// The catalog of target configurations for one simulation run.
#[derive(Debug, Clone, Default)]
pub struct SemanticConfiguration {
    /// All target configurations, in declaration order.
    pub target_cfgs: Vec<TargetConfiguration>,
}

impl SemanticConfiguration {
    /// Creates a catalog from the given configurations.
    pub fn new(target_cfgs: Vec<TargetConfiguration>) -> Self {
        Self { target_cfgs }
    }

    /// Iterates over the elastic infrastructure configurations only.
    pub fn elastic_infrastructure_cfgs(&self) -> impl Iterator<Item = &ElasticInfrastructureCfg> {
        self.target_cfgs.iter().filter_map(|cfg| match cfg {
            TargetConfiguration::ElasticInfrastructure(eicfg) => Some(eicfg),
            TargetConfiguration::ServiceGroup { .. }
            | TargetConfiguration::CompetingConsumersGroup { .. } => None,
        })
    }

    /// Returns the first elastic infrastructure configuration whose unit is `container`.
    pub fn elastic_infrastructure_for(
        &self,
        container: &ResourceContainer,
    ) -> Option<&ElasticInfrastructureCfg> {
        self.elastic_infrastructure_cfgs()
            .find(|cfg| cfg.unit.is_same_unit(container))
    }
}
