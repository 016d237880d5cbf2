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

//! Interchangeable ways of resolving the cost annotation of a unit.
//!
//! [`StereotypeCostSource`] reads the annotation from the model itself: the
//! "Price" stereotype applied to the container, with its `amount` and
//! `interval` tagged values. [`ProvidedCostSource`] is filled by the host
//! application instead. Both answer the same [`CostAnnotationSource`] query
//! and the monitor does not know which one it talks to.

use costline_core::cost::{CostAnnotation, CostAnnotationSource};
use costline_core::model::{ContainerId, ResourceContainer};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Name of the stereotype carrying cost information.
pub const PRICE_STEREOTYPE: &str = "Price";
/// Tag holding the price of one replica.
pub const TAG_AMOUNT: &str = "amount";
/// Tag holding the sampling interval.
pub const TAG_INTERVAL: &str = "interval";

/// Reads cost annotations from the "Price" stereotype of a container.
///
/// A container without the stereotype, or with the stereotype but missing
/// one of the two tags, has no cost defined.
#[derive(Debug, Default, Clone, Copy)]
pub struct StereotypeCostSource;

impl CostAnnotationSource for StereotypeCostSource {
    fn lookup(&self, unit: &ResourceContainer) -> Option<CostAnnotation> {
        let price = unit.stereotype(PRICE_STEREOTYPE)?;
        let amount = price.tagged_value(TAG_AMOUNT)?;
        let interval = price.tagged_value(TAG_INTERVAL)?;
        Some(CostAnnotation::new(amount, interval))
    }
}

/// Cost annotations injected by the host application.
///
/// Per-unit entries take precedence over the run-wide default.
#[derive(Debug, Default)]
pub struct ProvidedCostSource {
    default: RwLock<Option<CostAnnotation>>,
    per_unit: RwLock<HashMap<ContainerId, CostAnnotation>>,
}

impl ProvidedCostSource {
    /// Creates a source without any annotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source applying `annotation` to every unit.
    pub fn with_default(annotation: CostAnnotation) -> Self {
        let source = Self::new();
        source.set(annotation);
        source
    }

    /// Sets the annotation applied to units without their own entry.
    pub fn set(&self, annotation: CostAnnotation) {
        *self.default.write().unwrap_or_else(PoisonError::into_inner) = Some(annotation);
    }

    /// Sets the annotation of one unit.
    pub fn set_for(&self, unit: ContainerId, annotation: CostAnnotation) {
        self.per_unit
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(unit, annotation);
    }
}

impl CostAnnotationSource for ProvidedCostSource {
    fn lookup(&self, unit: &ResourceContainer) -> Option<CostAnnotation> {
        let per_unit = self
            .per_unit
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&unit.id)
            .copied();
        per_unit.or_else(|| *self.default.read().unwrap_or_else(PoisonError::into_inner))
    }
}
