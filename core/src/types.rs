//! Shared primitive types used across the entire simulation.

use std::time::Duration;

/// A stable, unique identifier for any entity in the simulation.
/// Uniqueness is the caller's responsibility.
pub type EntityId = String;

/// Convert a duration to fractional hours for rate math
/// (speeds in mph, consumption in kWh/mi, fault rates per hour).
pub fn duration_hours(d: Duration) -> f64 {
    d.as_secs_f64() / 3600.0
}

/// Serde adapter: durations on the wire are floating-point seconds,
/// matching the report format consumed by external tooling.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
