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

//! Resource containers and the stereotype annotations applied to them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use uuid::Uuid;

/// A stable identifier for a [`ResourceContainer`].
///
/// This is the key under which probes are registered, so two containers with
/// the same id are treated as the same infrastructure unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates an id from an existing string identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, random id. Used for replicas created at runtime.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContainerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A named annotation with numeric tagged values, applied to a model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stereotype {
    /// The stereotype name (e.g., "Price").
    pub name: String,
    /// Tagged values keyed by tag name.
    #[serde(default)]
    pub tagged_values: BTreeMap<String, f64>,
}

impl Stereotype {
    /// Creates a stereotype without any tagged values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tagged_values: BTreeMap::new(),
        }
    }

    /// Adds a tagged value, returning the updated stereotype.
    pub fn with_tagged_value(mut self, tag: impl Into<String>, value: f64) -> Self {
        self.tagged_values.insert(tag.into(), value);
        self
    }

    /// Returns the value of the given tag, if set.
    pub fn tagged_value(&self, tag: &str) -> Option<f64> {
        self.tagged_values.get(tag).copied()
    }
}

/// An infrastructure unit of the resource environment.
///
/// Containers are the scaling targets of elastic infrastructure
/// configurations. Equality of units is decided by [`ContainerId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContainer {
    /// Stable identity of the container.
    pub id: ContainerId,
    /// Human-readable name.
    pub entity_name: String,
    /// Stereotypes applied to this container.
    #[serde(default)]
    pub stereotypes: Vec<Stereotype>,
}

impl ResourceContainer {
    /// Creates a container without stereotypes.
    pub fn new(id: impl Into<ContainerId>, entity_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_name: entity_name.into(),
            stereotypes: Vec::new(),
        }
    }

    /// Creates a replica of this container: same name and annotations, fresh id.
    pub fn replicate(&self) -> Self {
        Self {
            id: ContainerId::generate(),
            entity_name: self.entity_name.clone(),
            stereotypes: self.stereotypes.clone(),
        }
    }

    /// Applies a stereotype, returning the updated container.
    pub fn with_stereotype(mut self, stereotype: Stereotype) -> Self {
        self.stereotypes.push(stereotype);
        self
    }

    /// Returns the applied stereotype with the given name, if any.
    pub fn stereotype(&self, name: &str) -> Option<&Stereotype> {
        self.stereotypes.iter().find(|s| s.name == name)
    }

    /// Returns `true` if at least one stereotype is applied.
    pub fn has_stereotypes(&self) -> bool {
        !self.stereotypes.is_empty()
    }

    /// Returns `true` if `other` denotes the same infrastructure unit.
    pub fn is_same_unit(&self, other: &ResourceContainer) -> bool {
        self.id == other.id
    }
}

impl Display for ResourceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.entity_name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereotype_lookup() {
        let container = ResourceContainer::new("rc-1", "web").with_stereotype(
            Stereotype::new("Price")
                .with_tagged_value("amount", 10.0)
                .with_tagged_value("interval", 5.0),
        );

        let price = container.stereotype("Price").unwrap();
        assert_eq!(price.tagged_value("amount"), Some(10.0));
        assert_eq!(price.tagged_value("interval"), Some(5.0));
        assert_eq!(price.tagged_value("currency"), None);
        assert!(container.stereotype("CostReport").is_none());
        assert!(container.has_stereotypes());
    }

    #[test]
    fn test_replicas_get_fresh_ids() {
        let unit = ResourceContainer::new("rc-1", "web");
        let replica = unit.replicate();

        assert_ne!(replica.id, unit.id);
        assert_eq!(replica.entity_name, "web");
        assert!(!unit.is_same_unit(&replica));
        assert!(unit.is_same_unit(&unit.clone()));
    }

    #[test]
    fn test_container_deserializes_from_json() {
        let json = r#"{
            "id": "rc-7",
            "entity_name": "db",
            "stereotypes": [{ "name": "Price", "tagged_values": { "amount": 2.5 } }]
        }"#;
        let container: ResourceContainer = serde_json::from_str(json).unwrap();

        assert_eq!(container.id, ContainerId::new("rc-7"));
        assert_eq!(
            container.stereotype("Price").unwrap().tagged_value("amount"),
            Some(2.5)
        );
    }
}
