//! fleet-runner: headless eVTOL fleet simulation runner.
//!
//! Usage:
//!   fleet-runner --seed 1 --hours 3 --aircraft 20 --chargers 3 --slice-secs 1
//!
//! Builds a randomized fleet from the model catalog, simulates the
//! requested duration, and prints a JSON report (full event log plus a
//! per-manufacturer summary) to stdout.

use anyhow::Result;
use evtol_core::{Aircraft, Attributes, ChargingNetwork, FlightState, Runner, Statistics};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

/// Table of aircraft models available to the fleet.
fn aircraft_models() -> Vec<Attributes> {
    vec![
        Attributes {
            manufacturer: "Alpha".into(),
            passenger_count: 4,
            flight_speed_mph: 120.0,
            flight_consumption_kwh_per_mi: 1.6,
            battery_capacity_kwh: 320.0,
            faults_per_hr: 0.25,
            charge_time: Duration::from_secs(36 * 60),
        },
        Attributes {
            manufacturer: "Bravo".into(),
            passenger_count: 5,
            flight_speed_mph: 100.0,
            flight_consumption_kwh_per_mi: 1.5,
            battery_capacity_kwh: 100.0,
            faults_per_hr: 0.10,
            charge_time: Duration::from_secs(12 * 60),
        },
        Attributes {
            manufacturer: "Charlie".into(),
            passenger_count: 3,
            flight_speed_mph: 160.0,
            flight_consumption_kwh_per_mi: 2.2,
            battery_capacity_kwh: 220.0,
            faults_per_hr: 0.05,
            charge_time: Duration::from_secs(48 * 60),
        },
        Attributes {
            manufacturer: "Delta".into(),
            passenger_count: 2,
            flight_speed_mph: 90.0,
            flight_consumption_kwh_per_mi: 0.8,
            battery_capacity_kwh: 120.0,
            faults_per_hr: 0.22,
            charge_time: Duration::from_secs(2232),
        },
        Attributes {
            manufacturer: "Echo".into(),
            passenger_count: 2,
            flight_speed_mph: 30.0,
            flight_consumption_kwh_per_mi: 5.8,
            battery_capacity_kwh: 150.0,
            faults_per_hr: 0.61,
            charge_time: Duration::from_secs(18 * 60),
        },
    ]
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManufacturerSummary {
    aircraft_count: usize,
    average_charge_time: f64,
    average_flight_time: f64,
    average_flight_miles: f64,
    fault_count: u32,
    passenger_miles: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 1u64);
    let hours = parse_arg(&args, "--hours", 3u64);
    let aircraft_count = parse_arg(&args, "--aircraft", 20u32);
    let charger_count = parse_arg(&args, "--chargers", 3u32);
    let slice_secs = parse_arg(&args, "--slice-secs", 1u64);

    log::info!(
        "seed={seed} hours={hours} aircraft={aircraft_count} chargers={charger_count} slice={slice_secs}s"
    );

    let mut runner = Runner::new(Duration::from_secs(slice_secs));

    // Fixed seed for reproducible random sequences
    runner.seed(seed);

    let chargers = runner.add(ChargingNetwork::new("Charging Network", charger_count));

    // Fleet with pseudo-randomized models; all aircraft take off at t=0
    let models = aircraft_models();
    for id in 1..=aircraft_count {
        let model = models[runner.rng().next_u64_below(models.len() as u64) as usize].clone();
        let aircraft = runner.add(Aircraft::new(format!("EV{id:03}"), model, chargers.clone()));
        runner.command(&aircraft, |a, ctx| a.set_state(FlightState::Flying, ctx))?;
    }

    runner.run(Duration::from_secs(hours * 3600))?;

    let report = build_report(&runner)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Aggregate the fleet into the report consumed by downstream analysis:
/// the raw event log plus per-manufacturer performance summaries.
fn build_report(runner: &Runner) -> Result<serde_json::Value> {
    let mut by_manufacturer: BTreeMap<String, Vec<(Attributes, Statistics)>> = BTreeMap::new();

    for aircraft in runner.entities_of::<Aircraft>() {
        by_manufacturer
            .entry(aircraft.attributes().manufacturer.clone())
            .or_default()
            .push((aircraft.attributes().clone(), *aircraft.statistics()));
    }

    let mut summary = BTreeMap::new();
    for (manufacturer, fleet) in by_manufacturer {
        summary.insert(manufacturer, summarize(&fleet));
    }

    Ok(serde_json::json!({
        "events": runner.events(),
        "summary": summary,
    }))
}

fn summarize(fleet: &[(Attributes, Statistics)]) -> ManufacturerSummary {
    let flight_count: u32 = fleet.iter().map(|(_, s)| s.flight_count).sum();
    let charge_count: u32 = fleet.iter().map(|(_, s)| s.charge_count).sum();
    let total_flight_secs: f64 = fleet.iter().map(|(_, s)| s.flight_time.as_secs_f64()).sum();
    let total_charge_secs: f64 = fleet.iter().map(|(_, s)| s.charge_time.as_secs_f64()).sum();
    let total_miles: f64 = fleet.iter().map(|(_, s)| s.flight_distance_mi).sum();

    ManufacturerSummary {
        aircraft_count: fleet.len(),
        average_charge_time: if charge_count > 0 {
            total_charge_secs / charge_count as f64
        } else {
            0.0
        },
        average_flight_time: if flight_count > 0 {
            total_flight_secs / flight_count as f64
        } else {
            0.0
        },
        average_flight_miles: if flight_count > 0 {
            total_miles / flight_count as f64
        } else {
            0.0
        },
        fault_count: fleet.iter().map(|(_, s)| s.fault_count).sum(),
        passenger_miles: fleet
            .iter()
            .map(|(a, s)| a.passenger_count as f64 * s.flight_distance_mi)
            .sum(),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
