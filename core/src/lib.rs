//! evtol-core: deterministic fixed-time-step simulation of an eVTOL
//! fleet sharing a capacity-limited charging network.
//!
//! RULES:
//!   - The runner owns every entity and steps them in registration
//!     order, every time slice, single-threaded.
//!   - All randomness flows through the runner's [`SimRng`].
//!   - All state changes are recorded in the append-only event log.
//!   - Same seed, same time slice, same registrations, same `run`
//!     calls: identical event log and final statistics.
//!
//! Report aggregation and the aircraft model catalog live outside this
//! crate (see the `fleet-runner` binary); the core only produces the
//! structured event and statistics data a reporter consumes.

pub mod aircraft;
pub mod charging_network;
pub mod entity;
pub mod error;
pub mod event;
pub mod rng;
pub mod runner;
pub mod types;

pub use aircraft::{Aircraft, Attributes, FlightState, Statistics};
pub use charging_network::ChargingNetwork;
pub use entity::{Handle, SimEntity, StepContext};
pub use error::{SimError, SimResult};
pub use event::{EventLog, EventRecord};
pub use rng::SimRng;
pub use runner::Runner;
pub use types::EntityId;
