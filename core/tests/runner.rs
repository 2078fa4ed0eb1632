//! Runner contract: fixed-slice stepping, registration order, event
//! timestamps, and typed entity retrieval.

use evtol_core::{ChargingNetwork, Runner, SimEntity, SimResult, StepContext};
use std::any::Any;
use std::time::Duration;

/// Minimal entity that counts its steps and reports each one.
struct CounterSim {
    id: String,
    step_count: u32,
    report_steps: bool,
}

impl CounterSim {
    fn new(id: &str) -> Self {
        Self {
            id: id.into(),
            step_count: 0,
            report_steps: false,
        }
    }

    fn reporting(id: &str) -> Self {
        Self {
            report_steps: true,
            ..Self::new(id)
        }
    }
}

impl SimEntity for CounterSim {
    fn id(&self) -> &str {
        &self.id
    }

    fn step(&mut self, _time_slice: Duration, ctx: &mut StepContext<'_>) -> SimResult<()> {
        self.step_count += 1;
        if self.report_steps {
            ctx.record_event(&self.id, "Stepped", None);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn runs_with_no_entities() {
    let mut runner = Runner::default();

    assert!(runner.events().is_empty());
    assert_eq!(runner.entities_of::<CounterSim>().count(), 0);
    assert_eq!(runner.elapsed(), Duration::ZERO);

    runner.run(Duration::from_secs(100)).unwrap();

    assert_eq!(runner.elapsed(), Duration::from_secs(100));
    assert!(runner.events().is_empty());
}

#[test]
fn steps_every_entity_once_per_slice() {
    let mut runner = Runner::new(Duration::from_secs(1));

    let sim1 = runner.add(CounterSim::new("sim1"));
    let sim2 = runner.add(CounterSim::new("sim2"));

    assert_eq!(sim1.borrow().step_count, 0);
    assert_eq!(sim2.borrow().step_count, 0);

    runner.run(Duration::from_secs(100)).unwrap();

    assert_eq!(runner.elapsed(), Duration::from_secs(100));
    assert_eq!(sim1.borrow().step_count, 100);
    assert_eq!(sim2.borrow().step_count, 100);
}

#[test]
fn entities_step_in_registration_order() {
    let mut runner = Runner::new(Duration::from_secs(1));

    runner.add(CounterSim::reporting("first"));
    runner.add(CounterSim::reporting("second"));

    runner.run(Duration::from_secs(1)).unwrap();

    let events = runner.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "first");
    assert_eq!(events[1].id, "second");
    assert_eq!(events[0].timestamp, events[1].timestamp);
}

#[test]
fn partial_slice_remainder_is_dropped() {
    let mut runner = Runner::new(Duration::from_secs(60));

    let sim = runner.add(CounterSim::new("sim1"));

    runner.run(Duration::from_secs(150)).unwrap();

    assert_eq!(runner.elapsed(), Duration::from_secs(120));
    assert_eq!(sim.borrow().step_count, 2);

    // Less than one slice: nothing advances
    runner.run(Duration::from_secs(59)).unwrap();

    assert_eq!(runner.elapsed(), Duration::from_secs(120));
    assert_eq!(sim.borrow().step_count, 2);
}

#[test]
fn recorded_events_carry_elapsed_timestamps() {
    let mut runner = Runner::default();

    // First event before any stepping lands at time zero
    runner.record_event("runner", "Event1", Some(serde_json::json!({ "key": 1 })));

    runner.run(Duration::from_secs(3600)).unwrap();

    runner.record_event("runner", "Event2", None);

    let events = runner.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].timestamp, Duration::ZERO);
    assert_eq!(events[1].timestamp, Duration::from_secs(3600));

    // Wire format: timestamps are floating-point seconds, payload under "data"
    assert_eq!(
        serde_json::to_value(&events[0]).unwrap(),
        serde_json::json!({ "timestamp": 0.0, "id": "runner", "event": "Event1", "data": { "key": 1 } })
    );
    assert_eq!(
        serde_json::to_value(&events[1]).unwrap(),
        serde_json::json!({ "timestamp": 3600.0, "id": "runner", "event": "Event2" })
    );
}

#[test]
fn entities_of_filters_by_concrete_type() {
    let mut runner = Runner::default();

    runner.add(CounterSim::new("sim1"));
    runner.add(ChargingNetwork::new("chargers", 2));
    runner.add(CounterSim::new("sim2"));

    assert_eq!(runner.entities_of::<CounterSim>().count(), 2);
    assert_eq!(runner.entities_of::<ChargingNetwork>().count(), 1);

    // Registration order is preserved within the filtered view
    let ids: Vec<String> = runner
        .entities_of::<CounterSim>()
        .map(|s| s.id().to_string())
        .collect();
    assert_eq!(ids, ["sim1", "sim2"]);
}

#[test]
#[should_panic(expected = "time slice must be positive")]
fn zero_time_slice_is_rejected() {
    let _ = Runner::new(Duration::ZERO);
}
