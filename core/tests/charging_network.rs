//! Charging network contract: occupancy invariants, acquire/release
//! violations, and contention events.

use evtol_core::{ChargingNetwork, Runner, SimError};
use std::time::Duration;

#[test]
fn acquire_and_release_track_occupancy() {
    let mut runner = Runner::default();
    let chargers = runner.add(ChargingNetwork::new("chargers", 2));

    assert_eq!(chargers.borrow().total_ports(), 2);
    assert_eq!(chargers.borrow().available_ports(), 2);
    assert_eq!(chargers.borrow().occupied_ports(), 0);

    runner
        .command(&chargers, |net, ctx| net.acquire(ctx))
        .unwrap();

    assert_eq!(chargers.borrow().available_ports(), 1);
    assert_eq!(chargers.borrow().occupied_ports(), 1);

    runner
        .command(&chargers, |net, ctx| net.release(ctx))
        .unwrap();

    assert_eq!(chargers.borrow().available_ports(), 2);
    assert_eq!(chargers.borrow().occupied_ports(), 0);

    // Each transition leaves a post-operation occupancy snapshot
    let events = runner.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, "PlugIn");
    assert_eq!(
        events[0].data,
        Some(serde_json::json!({ "availablePorts": 1, "occupiedPorts": 1 }))
    );
    assert_eq!(events[1].event, "PlugOut");
    assert_eq!(
        events[1].data,
        Some(serde_json::json!({ "availablePorts": 2, "occupiedPorts": 0 }))
    );
}

#[test]
fn acquire_beyond_capacity_is_a_capacity_violation() {
    let mut runner = Runner::default();
    let chargers = runner.add(ChargingNetwork::new("chargers", 1));

    runner
        .command(&chargers, |net, ctx| net.acquire(ctx))
        .unwrap();

    let err = runner
        .command(&chargers, |net, ctx| net.acquire(ctx))
        .unwrap_err();
    assert!(matches!(err, SimError::NoPortAvailable { .. }));

    // Failed acquire mutates nothing and records nothing
    assert_eq!(chargers.borrow().occupied_ports(), 1);
    assert_eq!(runner.events().len(), 1);
}

#[test]
fn release_without_occupancy_is_a_state_violation() {
    let mut runner = Runner::default();
    let chargers = runner.add(ChargingNetwork::new("chargers", 1));

    let err = runner
        .command(&chargers, |net, ctx| net.release(ctx))
        .unwrap_err();
    assert!(matches!(err, SimError::NoPortOccupied { .. }));

    assert_eq!(chargers.borrow().occupied_ports(), 0);
    assert!(runner.events().is_empty());
}

#[test]
fn idle_network_produces_no_events() {
    let mut runner = Runner::default();
    let chargers = runner.add(ChargingNetwork::new("chargers", 3));

    runner.run(Duration::from_secs(3600)).unwrap();

    assert!(runner.events().is_empty());
    assert_eq!(chargers.borrow().occupied_ports(), 0);
    assert_eq!(chargers.borrow().available_ports(), 3);
}
