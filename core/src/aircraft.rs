//! Simplistic eVTOL simulator.
//!
//! Per-slice order (fixed, the source of all observable behavior):
//!   1. Physical update in the current state (flight or charge model).
//!   2. Exactly one fault draw, in every state. The draw consumes one
//!      value from the shared stream even when the result is unused, so
//!      the stream position depends only on slice count, not on state.
//!   3. Automatic state transition evaluation.

use crate::{
    charging_network::ChargingNetwork,
    entity::{Handle, SimEntity, StepContext},
    error::SimResult,
    types::{duration_hours, EntityId},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Duration;

/// Static aircraft model parameters, fixed at construction.
/// Values are accepted unvalidated; nonsensical parameters produce
/// nonsensical results, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attributes {
    pub manufacturer: String,
    pub passenger_count: u32,
    pub flight_speed_mph: f64,
    pub flight_consumption_kwh_per_mi: f64,
    pub battery_capacity_kwh: f64,
    pub faults_per_hr: f64,
    #[serde(with = "crate::types::duration_secs")]
    pub charge_time: Duration,
}

/// Cumulative per-aircraft statistics. Every field is monotonically
/// non-decreasing across slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Statistics {
    #[serde(with = "crate::types::duration_secs")]
    pub flight_time: Duration,
    #[serde(with = "crate::types::duration_secs")]
    pub charge_time: Duration,
    pub flight_distance_mi: f64,
    pub flight_count: u32,
    pub charge_count: u32,
    pub fault_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightState {
    Landed,
    Flying,
    QueuedToCharge,
    Charging,
}

impl FlightState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landed => "Landed",
            Self::Flying => "Flying",
            Self::QueuedToCharge => "QueuedToCharge",
            Self::Charging => "Charging",
        }
    }
}

/// Full observable state, attached to every `StateChanged` event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusSnapshot {
    state: &'static str,
    battery_energy_kwh: f64,
    battery_percent: f64,
    #[serde(with = "crate::types::duration_secs")]
    flight_time: Duration,
    #[serde(with = "crate::types::duration_secs")]
    charge_time: Duration,
    flight_miles: f64,
    flight_count: u32,
    charge_count: u32,
    fault_count: u32,
}

pub struct Aircraft {
    id: EntityId,
    attributes: Attributes,
    statistics: Statistics,
    state: FlightState,
    battery_energy_kwh: f64,
    chargers: Handle<ChargingNetwork>,
}

impl Aircraft {
    /// Construct an aircraft with a full battery, landed. `chargers` is
    /// the shared network this aircraft competes on for its lifetime.
    pub fn new(
        id: impl Into<EntityId>,
        attributes: Attributes,
        chargers: Handle<ChargingNetwork>,
    ) -> Self {
        let battery_energy_kwh = attributes.battery_capacity_kwh;

        Self {
            id: id.into(),
            attributes,
            statistics: Statistics::default(),
            state: FlightState::Landed,
            battery_energy_kwh,
            chargers,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn battery_energy_kwh(&self) -> f64 {
        self.battery_energy_kwh
    }

    /// Assign a new state, firing entry/exit side effects and recording
    /// a `StateChanged` event. Assigning the current state is a no-op:
    /// no statistics update, no event. This is both the auto-transition
    /// path and the external-command path (e.g. initial takeoff), with
    /// an identical side-effect contract.
    pub fn set_state(&mut self, state: FlightState, ctx: &mut StepContext<'_>) -> SimResult<()> {
        if self.state == state {
            return Ok(());
        }

        // Update stats on state entry
        match state {
            FlightState::Flying => self.statistics.flight_count += 1,
            FlightState::Charging => self.statistics.charge_count += 1,
            _ => (),
        }

        // Update charger occupancy; release is checked against the
        // previous state, not the new one
        if state == FlightState::Charging {
            self.chargers.borrow_mut().acquire(ctx)?;
        } else if self.state == FlightState::Charging {
            self.chargers.borrow_mut().release(ctx)?;
        }

        log::debug!("{}: {} -> {}", self.id, self.state.as_str(), state.as_str());
        self.state = state;

        ctx.record_event(
            &self.id,
            "StateChanged",
            Some(serde_json::to_value(self.snapshot())?),
        );

        Ok(())
    }

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state.as_str(),
            battery_energy_kwh: self.battery_energy_kwh,
            battery_percent: (100.0 * self.battery_energy_kwh
                / self.attributes.battery_capacity_kwh)
                .round(),
            flight_time: self.statistics.flight_time,
            charge_time: self.statistics.charge_time,
            flight_miles: self.statistics.flight_distance_mi,
            flight_count: self.statistics.flight_count,
            charge_count: self.statistics.charge_count,
            fault_count: self.statistics.fault_count,
        }
    }
}

impl SimEntity for Aircraft {
    fn id(&self) -> &str {
        &self.id
    }

    fn step(&mut self, time_slice: Duration, ctx: &mut StepContext<'_>) -> SimResult<()> {
        let slice_hours = duration_hours(time_slice);

        // Update stats in current state
        match self.state {
            FlightState::Landed | FlightState::QueuedToCharge => (),

            FlightState::Flying => {
                let step_distance_mi = slice_hours * self.attributes.flight_speed_mph;
                let step_energy_kwh =
                    step_distance_mi * self.attributes.flight_consumption_kwh_per_mi;

                self.statistics.flight_time += time_slice;
                self.statistics.flight_distance_mi += step_distance_mi;

                // Linear energy consumption during flight
                self.battery_energy_kwh = (self.battery_energy_kwh - step_energy_kwh).max(0.0);
            }

            FlightState::Charging => {
                // Linear charge rate: a full charge takes exactly
                // `charge_time` of continuous charging
                let step_energy_kwh = (slice_hours
                    / duration_hours(self.attributes.charge_time))
                    * self.attributes.battery_capacity_kwh;

                self.statistics.charge_time += time_slice;

                self.battery_energy_kwh = (self.battery_energy_kwh + step_energy_kwh)
                    .min(self.attributes.battery_capacity_kwh);
            }
        }

        // Apply fault probability equally in all operational states
        if ctx.rng().chance(self.attributes.faults_per_hr * slice_hours) {
            self.statistics.fault_count += 1;
        }

        // Evaluate automatic state transitions
        match self.state {
            FlightState::Landed => (),

            FlightState::Flying => {
                // Charge when the battery is dead
                if self.battery_energy_kwh <= 0.0 {
                    if self.chargers.borrow().available_ports() > 0 {
                        self.set_state(FlightState::Charging, ctx)?;
                    } else {
                        self.set_state(FlightState::QueuedToCharge, ctx)?;
                    }
                }
            }

            FlightState::QueuedToCharge => {
                // Start charging when a port frees up
                if self.chargers.borrow().available_ports() > 0 {
                    self.set_state(FlightState::Charging, ctx)?;
                }
            }

            FlightState::Charging => {
                // Take off when the battery is full
                if self.battery_energy_kwh >= self.attributes.battery_capacity_kwh {
                    self.set_state(FlightState::Flying, ctx)?;
                }
            }
        }

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
