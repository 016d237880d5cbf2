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

//! Registry of cost probes, one per infrastructure unit.

use crate::cost::probe::ContainerCostProbe;
use costline_core::cost::{CostError, CostResult};
use costline_core::model::ContainerId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps infrastructure units to their cost probe.
///
/// Registration is idempotent: the first probe registered for a unit wins
/// and later attempts return it unchanged. The registry lives as long as the
/// monitor owning it, i.e. for one simulation run.
#[derive(Debug, Default)]
pub struct ProbeRegistry {
    probes: HashMap<ContainerId, Arc<ContainerCostProbe>>,
}

impl ProbeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            probes: HashMap::new(),
        }
    }

    /// Returns the probe of `unit`, building and storing it with `factory` if absent.
    ///
    /// The flag is `true` when this call stored the probe. `factory` is only
    /// invoked when no probe exists yet. If it fails, nothing is stored.
    pub fn register_if_absent<F>(
        &mut self,
        unit: &ContainerId,
        factory: F,
    ) -> CostResult<(Arc<ContainerCostProbe>, bool)>
    where
        F: FnOnce() -> CostResult<ContainerCostProbe>,
    {
        match self.probes.entry(unit.clone()) {
            Entry::Occupied(entry) => {
                log::debug!("Reusing cost probe for unit {}", unit);
                Ok((Arc::clone(entry.get()), false))
            }
            Entry::Vacant(entry) => {
                let probe = Arc::new(factory()?);
                log::debug!(
                    "Registered cost probe for unit {} (price={}, interval={})",
                    unit,
                    probe.unit_price(),
                    probe.interval()
                );
                Ok((Arc::clone(entry.insert(probe)), true))
            }
        }
    }

    /// Returns the probe registered for `unit`, if any.
    pub fn lookup(&self, unit: &ContainerId) -> Option<&Arc<ContainerCostProbe>> {
        self.probes.get(unit)
    }

    /// Returns the probe registered for `unit`, or [`CostError::ProbeNotRegistered`].
    pub fn require(&self, unit: &ContainerId) -> CostResult<&Arc<ContainerCostProbe>> {
        self.lookup(unit)
            .ok_or_else(|| CostError::ProbeNotRegistered(unit.clone()))
    }

    /// Returns `true` if a probe is registered for `unit`.
    pub fn contains(&self, unit: &ContainerId) -> bool {
        self.probes.contains_key(unit)
    }

    /// Number of registered probes.
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Returns `true` if no probe is registered.
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costline_core::cost::{CostAnnotation, Currency};
    use costline_core::model::{ElasticInfrastructureCfg, ReplicaSet, ResourceContainer};

    fn probe(price: f64) -> CostResult<ContainerCostProbe> {
        let cfg = ElasticInfrastructureCfg::new(
            ResourceContainer::new("rc-web", "web"),
            ReplicaSet::default(),
            "env",
        );
        ContainerCostProbe::new(cfg, CostAnnotation::new(price, 5.0), Currency::Eur)
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ProbeRegistry::new();
        let unit = ContainerId::new("rc-web");

        let (first, created) = registry.register_if_absent(&unit, || probe(10.0)).unwrap();
        assert!(created);
        let (second, created) = registry.register_if_absent(&unit, || probe(99.0)).unwrap();
        assert!(!created);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.unit_price(), 10.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_factory_not_called_when_present() {
        let mut registry = ProbeRegistry::new();
        let unit = ContainerId::new("rc-web");
        registry.register_if_absent(&unit, || probe(10.0)).unwrap();

        let result = registry.register_if_absent(&unit, || panic!("factory must not run"));
        assert!(matches!(result, Ok((_, false))));
    }

    #[test]
    fn test_failed_factory_stores_nothing() {
        let mut registry = ProbeRegistry::new();
        let unit = ContainerId::new("rc-web");

        let result = registry.register_if_absent(&unit, || probe(f64::NAN));
        assert!(result.is_err());
        assert!(registry.is_empty());
        assert!(!registry.contains(&unit));
    }

    #[test]
    fn test_require_on_unknown_unit_fails() {
        let registry = ProbeRegistry::new();
        let unit = ContainerId::new("rc-ghost");

        assert!(registry.lookup(&unit).is_none());
        assert_eq!(
            registry.require(&unit).unwrap_err(),
            CostError::ProbeNotRegistered(unit)
        );
    }
}
