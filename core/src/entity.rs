//! Entity contract and the per-step facilities the runner lends out.
//!
//! RULE: Every simulated object implements [`SimEntity`].
//! The runner calls `step()` on each registered entity, in registration
//! order, once per time slice. Execution is single-threaded and
//! cooperative: a step runs to completion before the next entity's step
//! begins, and before the clock advances again.

use crate::{error::SimResult, event::EventLog, rng::SimRng};
use serde_json::Value;
use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

/// The contract every simulated entity must fulfill.
///
/// This is the seam through which the core is extended: a new entity type
/// only implements `step()` and records events through the [`StepContext`]
/// under its own identifier.
pub trait SimEntity: 'static {
    /// The entity's stable identifier, assigned once at construction.
    fn id(&self) -> &str;

    /// Advance the entity's state by exactly one time slice.
    ///
    /// Implementations may assume no intermediate state changes occur
    /// within a single slice.
    fn step(&mut self, time_slice: Duration, ctx: &mut StepContext<'_>) -> SimResult<()>;

    /// For typed filtered retrieval via `Runner::entities_of`.
    fn as_any(&self) -> &dyn Any;
}

/// Runner facilities lent to an entity for the duration of one call:
/// the current clock value, the shared event log, and the shared RNG.
pub struct StepContext<'a> {
    elapsed: Duration,
    log: &'a mut EventLog,
    rng: &'a mut SimRng,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(elapsed: Duration, log: &'a mut EventLog, rng: &'a mut SimRng) -> Self {
        Self { elapsed, log, rng }
    }

    /// Total elapsed simulation time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Append an event stamped with the current elapsed time.
    pub fn record_event(&mut self, id: &str, event: impl Into<String>, data: Option<Value>) {
        self.log.append(self.elapsed, id, event, data);
    }

    /// The simulation's shared deterministic RNG.
    pub fn rng(&mut self) -> &mut SimRng {
        self.rng
    }
}

/// Cloneable shared handle to a registered entity.
///
/// The runner keeps one share for stepping; callers keep others to issue
/// commands or read state between runs, and aircraft hold one to their
/// charging network. Borrows follow `RefCell` rules: do not hold a borrow
/// across a `Runner::run` call.
pub struct Handle<E: ?Sized>(pub(crate) Rc<RefCell<E>>);

impl<E: SimEntity> Handle<E> {
    pub(crate) fn new(entity: E) -> Self {
        Self(Rc::new(RefCell::new(entity)))
    }
}

impl<E: ?Sized> Handle<E> {
    pub fn borrow(&self) -> Ref<'_, E> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, E> {
        self.0.borrow_mut()
    }
}

impl<E: ?Sized> Clone for Handle<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}
