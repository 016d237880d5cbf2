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

//! Cost annotations, currency-tagged measures, and cost accounting errors.

mod error;
mod measure;

pub use self::error::{CostError, CostResult};
pub use self::measure::{Currency, Measure};

use crate::model::{ContainerId, ResourceContainer};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The price of one replica of a unit and how often its cost is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostAnnotation {
    /// Cost of a single replica per sample.
    pub unit_price: f64,
    /// Simulated time between two samples. Must be strictly positive.
    pub sample_interval: f64,
}

impl CostAnnotation {
    /// Creates an annotation. Use [`validate`](Self::validate) before relying on it.
    pub fn new(unit_price: f64, sample_interval: f64) -> Self {
        Self {
            unit_price,
            sample_interval,
        }
    }

    /// Checks that the price is finite and the interval finite and strictly positive.
    ///
    /// A zero interval would reschedule the sampling event at the same
    /// timestamp forever.
    pub fn validate(&self, container: &ContainerId) -> CostResult<()> {
        if !self.unit_price.is_finite() {
            return Err(CostError::InvalidAnnotation {
                container: container.clone(),
                reason: format!("unit price {} is not finite", self.unit_price),
            });
        }
        if !self.sample_interval.is_finite() || self.sample_interval <= 0.0 {
            return Err(CostError::InvalidAnnotation {
                container: container.clone(),
                reason: format!(
                    "sample interval {} must be finite and > 0",
                    self.sample_interval
                ),
            });
        }
        Ok(())
    }
}

/// Resolves the cost annotation of an infrastructure unit.
///
/// `None` means that no cost is defined for the unit, which is an expected
/// situation and not an error.
pub trait CostAnnotationSource: Send + Sync + Debug + 'static {
    /// Returns the annotation of `unit`, if one is defined.
    fn lookup(&self, unit: &ResourceContainer) -> Option<CostAnnotation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_annotation() {
        let id = ContainerId::new("rc-1");
        assert!(CostAnnotation::new(10.0, 5.0).validate(&id).is_ok());
        assert!(CostAnnotation::new(0.0, 0.5).validate(&id).is_ok());
    }

    #[test]
    fn test_non_positive_interval_is_rejected() {
        let id = ContainerId::new("rc-1");
        for interval in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CostAnnotation::new(10.0, interval).validate(&id).unwrap_err();
            assert!(matches!(err, CostError::InvalidAnnotation { .. }));
        }
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        let id = ContainerId::new("rc-1");
        let err = CostAnnotation::new(f64::NAN, 5.0).validate(&id).unwrap_err();
        assert!(err.to_string().contains("unit price"));
    }
}
