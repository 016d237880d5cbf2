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

use approx::assert_relative_eq;
use costline_core::model::{
    ContainerId, ElasticInfrastructureCfg, MeasuringPoint, Monitor, MonitorRepository,
    ReplicaSet, ResourceContainer, SemanticConfiguration, Stereotype, TargetConfiguration,
};
use costline_core::simulation::{
    EventBatch, SimTime, SimulationBehavior, SimulationError, SimulationEvent, SimulationResult,
    TakeCostMeasurement,
};
use costline_core::telemetry::{COST_OF_RESOURCE_CONTAINERS, RESPONSE_TIME};
use costline_core::{CostError, Currency};
use costline_runtime::{EngineConfig, SimulationEngine, StopReason};
use costline_telemetry::{CostMonitorBehavior, DefaultCalculatorFactory, StereotypeCostSource};
use std::sync::Arc;

/// Adds replicas once, at a fixed time.
#[derive(Debug)]
struct ScaleOutAt {
    at: SimTime,
    unit: ResourceContainer,
    replicas: ReplicaSet,
    count: usize,
}

impl SimulationBehavior for ScaleOutAt {
    fn name(&self) -> &str {
        "scale-out"
    }

    fn on_event(&mut self, event: &SimulationEvent, _now: SimTime) -> SimulationResult<EventBatch> {
        match event {
            SimulationEvent::SimulationStarted => Ok(vec![SimulationEvent::Timer {
                label: "scale-out".to_string(),
                delay: self.at,
            }]),
            SimulationEvent::Timer { label, .. } if label == "scale-out" => {
                for _ in 0..self.count {
                    self.replicas.scale_out(self.unit.replicate());
                }
                Ok(EventBatch::new())
            }
            _ => Ok(EventBatch::new()),
        }
    }
}

fn priced_unit() -> ResourceContainer {
    ResourceContainer::new("rc-web", "web").with_stereotype(
        Stereotype::new("Price")
            .with_tagged_value("amount", 10.0)
            .with_tagged_value("interval", 5.0),
    )
}

fn semantic(unit: &ResourceContainer, replicas: &ReplicaSet) -> SemanticConfiguration {
    SemanticConfiguration::new(vec![TargetConfiguration::ElasticInfrastructure(
        ElasticInfrastructureCfg::new(unit.clone(), replicas.clone(), "cloud"),
    )])
}

fn cost_monitor(semantic: Option<SemanticConfiguration>) -> Box<CostMonitorBehavior> {
    Box::new(CostMonitorBehavior::new(
        Arc::new(DefaultCalculatorFactory),
        Arc::new(StereotypeCostSource),
        semantic,
        Currency::Eur,
    ))
}

fn engine(max_simulation_time: SimTime) -> SimulationEngine {
    SimulationEngine::new(EngineConfig {
        max_simulation_time,
        ..EngineConfig::default()
    })
    .unwrap()
}

#[test]
fn samples_follow_replica_count_over_time() {
    let unit = priced_unit();
    let replicas = ReplicaSet::new((0..3).map(|_| unit.replicate()).collect());
    let repository = MonitorRepository::new(vec![Monitor::new(
        "web cost",
        MeasuringPoint::ResourceContainer(unit.clone()),
    )
    .with_metric(COST_OF_RESOURCE_CONTAINERS)]);

    let mut engine = engine(15.0);
    engine.register_behavior(cost_monitor(Some(semantic(&unit, &replicas))));
    engine.register_behavior(Box::new(ScaleOutAt {
        at: 7.5,
        unit: unit.clone(),
        replicas: replicas.clone(),
        count: 2,
    }));
    let subscriber = engine.measurements().subscribe();
    engine.visit_monitor_repository(&repository).unwrap();

    let summary = engine.run().unwrap();

    assert_eq!(summary.stop_reason, StopReason::TimeLimit);
    assert_eq!(summary.end_time, 15.0);
    assert_eq!(engine.calculators().len(), 1);
    assert!(engine.calculators()[0]
        .metric()
        .same_metric(&costline_core::telemetry::COST_OVER_TIME));

    let unit_id = ContainerId::new("rc-web");
    assert_eq!(engine.collector().samples(&unit_id), vec![30.0, 30.0, 50.0, 50.0]);
    assert_relative_eq!(engine.collector().latest(&unit_id).unwrap().unwrap(), 50.0);

    let times: Vec<_> = engine
        .collector()
        .records()
        .iter()
        .map(|record| record.taken_at)
        .collect();
    assert_eq!(times, vec![0.0, 5.0, 10.0, 15.0]);

    let published: Vec<_> = subscriber.try_iter().collect();
    assert_eq!(published.len(), 4);
    assert!(published.iter().all(|record| record.unit == unit_id));
    assert_eq!(published[0].measure.currency, Currency::Eur);
}

#[test]
fn scaling_to_zero_samples_zero_cost() {
    let unit = priced_unit();
    let replicas = ReplicaSet::new(vec![unit.replicate()]);
    let repository = MonitorRepository::new(vec![Monitor::new(
        "web cost",
        MeasuringPoint::ResourceContainer(unit.clone()),
    )
    .with_metric(COST_OF_RESOURCE_CONTAINERS)]);

    let mut engine = engine(5.0);
    engine.register_behavior(cost_monitor(Some(semantic(&unit, &replicas))));
    engine.visit_monitor_repository(&repository).unwrap();
    assert!(engine.step().unwrap()); // SimulationStarted
    assert!(replicas.scale_in().is_some());

    engine.run().unwrap();

    assert_eq!(
        engine.collector().samples(&ContainerId::new("rc-web")),
        vec![0.0, 0.0]
    );
}

#[test]
fn other_metrics_produce_no_sampling() {
    let unit = priced_unit();
    let replicas = ReplicaSet::new(vec![unit.replicate()]);
    let repository = MonitorRepository::new(vec![Monitor::new(
        "web latency",
        MeasuringPoint::ResourceContainer(unit.clone()),
    )
    .with_metric(RESPONSE_TIME)]);

    let mut engine = engine(100.0);
    engine.register_behavior(cost_monitor(Some(semantic(&unit, &replicas))));
    engine.visit_monitor_repository(&repository).unwrap();

    let summary = engine.run().unwrap();

    assert_eq!(summary.stop_reason, StopReason::Drained);
    assert_eq!(summary.processed_events, 2);
    assert!(engine.calculators().is_empty());
    assert_eq!(engine.collector().record_count().unwrap(), 0);
}

#[test]
fn monitor_without_semantic_configuration_stays_silent() {
    let unit = priced_unit();
    let repository = MonitorRepository::new(vec![Monitor::new(
        "web cost",
        MeasuringPoint::ResourceContainer(unit),
    )
    .with_metric(COST_OF_RESOURCE_CONTAINERS)]);

    let mut engine = engine(100.0);
    engine.register_behavior(cost_monitor(None));
    engine.visit_monitor_repository(&repository).unwrap();

    let summary = engine.run().unwrap();

    assert_eq!(summary.stop_reason, StopReason::Drained);
    assert!(engine.calculators().is_empty());
    assert_eq!(engine.collector().record_count().unwrap(), 0);
}

#[test]
fn sampling_an_unregistered_unit_aborts_the_run() {
    let unit = priced_unit();
    let replicas = ReplicaSet::new(vec![unit.replicate()]);

    let mut engine = engine(100.0);
    engine.register_behavior(cost_monitor(Some(semantic(&unit, &replicas))));
    engine
        .schedule(TakeCostMeasurement::first(ContainerId::new("rc-web"), 5.0).into())
        .unwrap();

    let err = engine.run().unwrap_err();

    assert_eq!(
        err,
        SimulationError::Cost(CostError::ProbeNotRegistered(ContainerId::new("rc-web")))
    );
    assert_eq!(engine.collector().record_count().unwrap(), 0);
}

#[test]
fn two_monitors_on_one_unit_share_one_sampling_loop() {
    let unit = priced_unit();
    let replicas = ReplicaSet::new((0..3).map(|_| unit.replicate()).collect());
    let repository = MonitorRepository::new(vec![
        Monitor::new("web cost", MeasuringPoint::ResourceContainer(unit.clone()))
            .with_metric(COST_OF_RESOURCE_CONTAINERS),
        Monitor::new("web cost again", MeasuringPoint::ResourceContainer(unit.clone()))
            .with_metric(COST_OF_RESOURCE_CONTAINERS),
    ]);

    let mut engine = engine(10.0);
    engine.register_behavior(cost_monitor(Some(semantic(&unit, &replicas))));
    engine.visit_monitor_repository(&repository).unwrap();

    engine.run().unwrap();

    assert_eq!(engine.calculators().len(), 1);
    assert_eq!(
        engine.collector().samples(&ContainerId::new("rc-web")),
        vec![30.0, 30.0, 30.0]
    );
    let times: Vec<_> = engine
        .collector()
        .records()
        .iter()
        .map(|record| record.taken_at)
        .collect();
    assert_eq!(times, vec![0.0, 5.0, 10.0]);
}

#[test]
fn measurements_without_subscribers_are_not_retained() {
    let unit = priced_unit();
    let replicas = ReplicaSet::new(vec![unit.replicate()]);
    let repository = MonitorRepository::new(vec![Monitor::new(
        "web cost",
        MeasuringPoint::ResourceContainer(unit.clone()),
    )
    .with_metric(COST_OF_RESOURCE_CONTAINERS)]);

    let mut engine = engine(10.0);
    engine.register_behavior(cost_monitor(Some(semantic(&unit, &replicas))));
    engine.visit_monitor_repository(&repository).unwrap();
    engine.run().unwrap();

    assert_eq!(engine.collector().record_count().unwrap(), 3);
    let late = engine.measurements().subscribe();
    assert!(late.try_recv().is_err());
    assert_eq!(engine.measurements().subscriber_count(), 1);
}
