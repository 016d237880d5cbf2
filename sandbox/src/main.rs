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

use anyhow::Result;
use costline_core::model::{
    ElasticInfrastructureCfg, MeasuringPoint, Monitor, MonitorRepository, ReplicaSet,
    ResourceContainer, SemanticConfiguration, Stereotype, TargetConfiguration,
};
use costline_core::simulation::{
    EventBatch, SimTime, SimulationBehavior, SimulationEvent, SimulationResult,
};
use costline_core::telemetry::{COST_OF_RESOURCE_CONTAINERS, UTILIZATION};
use costline_runtime::{EngineConfig, SimulationEngine};
use costline_telemetry::{
    logging, CostMonitorBehavior, CostMonitorConfig, DefaultCalculatorFactory,
};
use std::sync::Arc;

const SCALE_TIMER: &str = "scaling-policy";

/// Grows the replica set up to a ceiling, then shrinks it back, one step per period.
#[derive(Debug)]
struct ScalingPolicy {
    unit: ResourceContainer,
    replicas: ReplicaSet,
    period: SimTime,
    max_replicas: usize,
    growing: bool,
}

impl ScalingPolicy {
    fn tick(&self) -> SimulationEvent {
        SimulationEvent::Timer {
            label: SCALE_TIMER.to_string(),
            delay: self.period,
        }
    }
}

impl SimulationBehavior for ScalingPolicy {
    fn name(&self) -> &str {
        "scaling-policy"
    }

    fn on_event(&mut self, event: &SimulationEvent, now: SimTime) -> SimulationResult<EventBatch> {
        match event {
            SimulationEvent::SimulationStarted => Ok(vec![self.tick()]),
            SimulationEvent::Timer { label, .. } if label == SCALE_TIMER => {
                if self.growing && self.replicas.len() >= self.max_replicas {
                    self.growing = false;
                } else if !self.growing && self.replicas.len() <= 1 {
                    self.growing = true;
                }
                if self.growing {
                    self.replicas.scale_out(self.unit.replicate());
                } else {
                    self.replicas.scale_in();
                }
                log::info!("t={now}: {} runs {} replica(s)", self.unit, self.replicas.len());
                Ok(vec![self.tick()])
            }
            _ => Ok(EventBatch::new()),
        }
    }
}

fn main() -> Result<()> {
    logging::init(logging::DEFAULT_FILTER)?;

    let mut args = std::env::args().skip(1);
    let engine_config = match args.next() {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig {
            max_simulation_time: 120.0,
            ..EngineConfig::default()
        },
    };
    let monitor_config = match args.next() {
        Some(path) => CostMonitorConfig::from_path(path)?,
        None => CostMonitorConfig::default(),
    };

    let web = ResourceContainer::new("rc-web", "web-server").with_stereotype(
        Stereotype::new("Price")
            .with_tagged_value("amount", 0.12)
            .with_tagged_value("interval", 10.0),
    );
    let database = ResourceContainer::new("rc-db", "database");
    let replicas = ReplicaSet::new(vec![web.replicate()]);

    let semantic = SemanticConfiguration::new(vec![TargetConfiguration::ElasticInfrastructure(
        ElasticInfrastructureCfg::new(web.clone(), replicas.clone(), "cloud"),
    )]);
    let repository = MonitorRepository::new(vec![
        Monitor::new("web cost", MeasuringPoint::ResourceContainer(web.clone()))
            .with_metric(COST_OF_RESOURCE_CONTAINERS),
        Monitor::new("db cost", MeasuringPoint::ResourceContainer(database.clone()))
            .with_metric(COST_OF_RESOURCE_CONTAINERS),
        Monitor::new(
            "db cpu",
            MeasuringPoint::ActiveResource {
                container: database,
                resource_type: "CPU".to_string(),
            },
        )
        .with_metric(UTILIZATION),
    ]);

    let mut engine = SimulationEngine::new(engine_config)?;
    engine.register_behavior(Box::new(CostMonitorBehavior::from_config(
        &monitor_config,
        Arc::new(DefaultCalculatorFactory),
        Some(semantic),
    )));
    engine.register_behavior(Box::new(ScalingPolicy {
        unit: web.clone(),
        replicas,
        period: 15.0,
        max_replicas: 4,
        growing: true,
    }));
    engine.visit_monitor_repository(&repository)?;

    let summary = engine.run()?;

    for record in engine.collector().records() {
        log::info!("t={:>6.1}  {}  {}", record.taken_at, record.measuring_point, record.measure);
    }
    let registry = engine.collector().registry();
    log::debug!(
        "{} metric series registered, {} under \"cost\"",
        registry.metric_count(),
        registry.namespace_metrics("cost").len()
    );
    if let Some(stats) = engine.collector().summary(&web.id)? {
        log::info!(
            "Mean cost per sample for {}: {:.3} over {} sample(s)",
            web,
            stats.mean().unwrap_or_default(),
            stats.count
        );
    }
    log::info!(
        "{} measurement(s) for {}, run ended at t={} ({})",
        engine.collector().record_count()?,
        web,
        summary.end_time,
        summary.stop_reason
    );
    Ok(())
}
