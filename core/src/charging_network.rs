//! A fixed-capacity pool of charging ports.
//!
//! The network only counts occupancy; it does not track which aircraft
//! holds which port. Energy is dispensed at a rate determined by the
//! consumer between acquire and release, so the network itself has no
//! autonomous per-slice behavior.

use crate::{
    entity::{SimEntity, StepContext},
    error::{SimError, SimResult},
    types::EntityId,
};
use serde::Serialize;
use std::any::Any;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct PortSnapshot {
    available_ports: u32,
    occupied_ports: u32,
}

pub struct ChargingNetwork {
    id: EntityId,
    total_ports: u32,
    occupied_ports: u32,
}

impl ChargingNetwork {
    pub fn new(id: impl Into<EntityId>, total_ports: u32) -> Self {
        Self {
            id: id.into(),
            total_ports,
            occupied_ports: 0,
        }
    }

    pub fn total_ports(&self) -> u32 {
        self.total_ports
    }

    pub fn available_ports(&self) -> u32 {
        self.total_ports - self.occupied_ports
    }

    pub fn occupied_ports(&self) -> u32 {
        self.occupied_ports
    }

    /// Take exclusive use of one port. Emits a `PlugIn` event carrying
    /// the post-acquire occupancy. Calling with no port available is a
    /// capacity violation and mutates nothing.
    pub fn acquire(&mut self, ctx: &mut StepContext<'_>) -> SimResult<()> {
        if self.available_ports() == 0 {
            return Err(SimError::NoPortAvailable {
                id: self.id.clone(),
            });
        }

        self.occupied_ports += 1;
        log::debug!("{}: plug in ({}/{})", self.id, self.occupied_ports, self.total_ports);
        ctx.record_event(&self.id, "PlugIn", Some(serde_json::to_value(self.snapshot())?));

        Ok(())
    }

    /// Give back one port. Emits a `PlugOut` event carrying the
    /// post-release occupancy. Calling with no port occupied is a state
    /// violation and mutates nothing.
    pub fn release(&mut self, ctx: &mut StepContext<'_>) -> SimResult<()> {
        if self.occupied_ports == 0 {
            return Err(SimError::NoPortOccupied {
                id: self.id.clone(),
            });
        }

        self.occupied_ports -= 1;
        log::debug!("{}: plug out ({}/{})", self.id, self.occupied_ports, self.total_ports);
        ctx.record_event(&self.id, "PlugOut", Some(serde_json::to_value(self.snapshot())?));

        Ok(())
    }

    fn snapshot(&self) -> PortSnapshot {
        PortSnapshot {
            available_ports: self.available_ports(),
            occupied_ports: self.occupied_ports,
        }
    }
}

impl SimEntity for ChargingNetwork {
    fn id(&self) -> &str {
        &self.id
    }

    /// Purely reactive: occupancy only changes via acquire/release, and
    /// the network never touches the random stream.
    fn step(&mut self, _time_slice: Duration, _ctx: &mut StepContext<'_>) -> SimResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
