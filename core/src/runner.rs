//! The simulation runner: the heart of the engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. The clock advances by one time slice.
//!   2. Every registered entity steps, in registration order.
//!   3. Repeat while at least one whole slice of the requested
//!      duration remains; a partial-slice remainder is dropped.
//!
//! RULES:
//!   - Entities are owned by the runner for its entire lifetime and
//!     cannot be removed once added.
//!   - All randomness flows through the runner's [`SimRng`].
//!   - All events flow through the runner's [`EventLog`].
//!   - Same time slice + same registrations + same seed + same `run`
//!     calls = identical event log and final statistics.

use crate::{
    entity::{Handle, SimEntity, StepContext},
    error::SimResult,
    event::{EventLog, EventRecord},
    rng::SimRng,
};
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct Runner {
    time_slice: Duration,
    elapsed: Duration,
    entities: Vec<Rc<RefCell<dyn SimEntity>>>,
    log: EventLog,
    rng: SimRng,
}

impl Runner {
    /// Construct a runner. `time_slice` defines the time resolution of
    /// the simulation and must be strictly positive.
    pub fn new(time_slice: Duration) -> Self {
        assert!(!time_slice.is_zero(), "time slice must be positive");

        Self {
            time_slice,
            elapsed: Duration::ZERO,
            entities: Vec::new(),
            log: EventLog::default(),
            rng: SimRng::default(),
        }
    }

    pub fn time_slice(&self) -> Duration {
        self.time_slice
    }

    /// Register an entity and return a shared handle to it.
    ///
    /// The entity's identifier was fixed at construction; registration
    /// order determines step order, which acts as the deterministic
    /// tie-break for charging contention within a slice.
    pub fn add<E: SimEntity>(&mut self, entity: E) -> Handle<E> {
        let handle = Handle::new(entity);
        let shared: Rc<RefCell<dyn SimEntity>> = handle.0.clone();
        self.entities.push(shared);
        handle
    }

    /// Run all entities for the specified duration, one slice at a time.
    /// A remainder smaller than one slice is silently dropped.
    pub fn run(&mut self, duration: Duration) -> SimResult<()> {
        let mut remaining = duration;

        log::debug!(
            "run: duration={:?} slice={:?} entities={}",
            duration,
            self.time_slice,
            self.entities.len()
        );

        while remaining >= self.time_slice {
            self.elapsed += self.time_slice;

            let mut ctx = StepContext::new(self.elapsed, &mut self.log, &mut self.rng);
            for entity in &self.entities {
                entity.borrow_mut().step(self.time_slice, &mut ctx)?;
            }

            remaining -= self.time_slice;
        }

        Ok(())
    }

    /// Total elapsed simulation time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Apply a user-defined seed to reproduce a pseudo-random sequence.
    /// Call before any `run`; reseeding mid-run is undefined with respect
    /// to reproducibility.
    pub fn seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// The runner's RNG, for callers that randomize setup (e.g. fleet
    /// assembly) from the same deterministic stream.
    pub fn rng(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// Append an event stamped with the current elapsed time. Entities
    /// record their own events during steps and commands; this entry
    /// point lets external callers annotate the log directly.
    pub fn record_event(&mut self, id: &str, event: impl Into<String>, data: Option<Value>) {
        self.log.append(self.elapsed, id, event, data);
    }

    /// Read-only view of the event log, in insertion order.
    pub fn events(&self) -> &[EventRecord] {
        self.log.records()
    }

    /// Iterate over registered entities of one concrete type, in
    /// registration order.
    pub fn entities_of<E: SimEntity>(&self) -> impl Iterator<Item = Ref<'_, E>> {
        self.entities.iter().filter_map(|cell| {
            Ref::filter_map(cell.borrow(), |entity| entity.as_any().downcast_ref::<E>()).ok()
        })
    }

    /// Interact with an entity outside the stepping loop, with logging
    /// and randomness available (e.g. an initial takeoff command).
    pub fn command<E: SimEntity, R>(
        &mut self,
        handle: &Handle<E>,
        f: impl FnOnce(&mut E, &mut StepContext<'_>) -> R,
    ) -> R {
        let mut ctx = StepContext::new(self.elapsed, &mut self.log, &mut self.rng);
        f(&mut *handle.borrow_mut(), &mut ctx)
    }
}

impl Default for Runner {
    /// One-second time resolution.
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
