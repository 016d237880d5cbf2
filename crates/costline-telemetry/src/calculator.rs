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

//! The default calculator factory.

use costline_core::model::MeasuringPoint;
use costline_core::telemetry::{Calculator, CalculatorFactory, MetricDescription, Probe};
use std::sync::Arc;

/// A calculator fed by a single probe, reporting for one measuring point.
#[derive(Debug)]
pub struct CostOverTimeCalculator {
    metric: MetricDescription,
    measuring_point: MeasuringPoint,
    probe: Arc<dyn Probe>,
}

impl Calculator for CostOverTimeCalculator {
    fn metric(&self) -> &MetricDescription {
        &self.metric
    }

    fn measuring_point(&self) -> &MeasuringPoint {
        &self.measuring_point
    }

    fn probe(&self) -> &Arc<dyn Probe> {
        &self.probe
    }
}

/// Builds [`CostOverTimeCalculator`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCalculatorFactory;

impl CalculatorFactory for DefaultCalculatorFactory {
    fn build(
        &self,
        metric: &MetricDescription,
        measuring_point: &MeasuringPoint,
        probe: Arc<dyn Probe>,
    ) -> Arc<dyn Calculator> {
        log::debug!("Building calculator {} for {}", metric.name, measuring_point);
        Arc::new(CostOverTimeCalculator {
            metric: *metric,
            measuring_point: measuring_point.clone(),
            probe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::ContainerCostProbe;
    use costline_core::cost::{CostAnnotation, Currency};
    use costline_core::model::{ElasticInfrastructureCfg, ReplicaSet, ResourceContainer};
    use costline_core::telemetry::COST_OVER_TIME;

    #[test]
    fn test_factory_wraps_probe() {
        let unit = ResourceContainer::new("rc-web", "web");
        let cfg = ElasticInfrastructureCfg::new(unit.clone(), ReplicaSet::default(), "env");
        let probe: Arc<dyn Probe> = Arc::new(
            ContainerCostProbe::new(cfg, CostAnnotation::new(1.0, 1.0), Currency::Eur).unwrap(),
        );

        let calculator = DefaultCalculatorFactory.build(
            &COST_OVER_TIME,
            &MeasuringPoint::ResourceContainer(unit),
            Arc::clone(&probe),
        );

        assert!(calculator.metric().same_metric(&COST_OVER_TIME));
        assert!(Arc::ptr_eq(calculator.probe(), &probe));
        assert_eq!(
            calculator.measuring_point().to_string(),
            "ResourceContainer: web <rc-web>"
        );
    }
}
