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

//! Logging behavior of the binding step. Lives in its own test binary
//! because it installs the global logger.

use costline_core::model::{
    ElasticInfrastructureCfg, MeasurementSpecification, MeasuringPoint, ReplicaSet,
    ResourceContainer, SemanticConfiguration, Stereotype, TargetConfiguration,
};
use costline_core::telemetry::COST_OF_RESOURCE_CONTAINERS;
use costline_core::Currency;
use costline_telemetry::{CostMonitorBehavior, DefaultCalculatorFactory, StereotypeCostSource};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

fn priced(id: &str, name: &str) -> ResourceContainer {
    ResourceContainer::new(id, name).with_stereotype(
        Stereotype::new("Price")
            .with_tagged_value("amount", 10.0)
            .with_tagged_value("interval", 5.0),
    )
}

#[test]
fn unmatched_unit_logs_exactly_one_message() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let scaled = priced("rc-web", "web");
    let unscaled = priced("rc-db", "db");
    let semantic = SemanticConfiguration::new(vec![TargetConfiguration::ElasticInfrastructure(
        ElasticInfrastructureCfg::new(scaled.clone(), ReplicaSet::new(vec![scaled.replicate()]), "env"),
    )]);
    let mut monitor = CostMonitorBehavior::new(
        Arc::new(DefaultCalculatorFactory),
        Arc::new(StereotypeCostSource),
        Some(semantic),
        Currency::Eur,
    );
    LOGGER.records.lock().unwrap().clear();

    let batch = monitor
        .on_measurement_specification(&MeasurementSpecification {
            metric_description: COST_OF_RESOURCE_CONTAINERS,
            measuring_point: MeasuringPoint::ResourceContainer(unscaled),
        })
        .unwrap();

    assert!(batch.is_empty());
    assert!(monitor.probe_registry().is_empty());
    let records = LOGGER.records.lock().unwrap();
    assert_eq!(records.len(), 1, "unexpected log records: {records:?}");
    assert_eq!(records[0].0, Level::Info);
    assert_eq!(
        records[0].1,
        "Not registering calculator for ResourceContainer: db <rc-db>, no elastic infrastructure configuration with matching unit."
    );
}
