use futures::future::{AbortHandle, AbortRegistration};
use std::cell::{Cell, RefCell};

use crate::domain::logging::{LogComponent, get_logger};

/// Handed to the batch that called [`RequestTracker::begin`].
pub struct RequestTicket {
    pub generation: u64,
    pub registration: AbortRegistration,
}

/// Last-request-wins bookkeeping for one stream of batches.
///
/// Starting a batch aborts the one before it. A batch may only commit while
/// its generation is still the current one.
#[derive(Default)]
pub struct RequestTracker {
    generation: Cell<u64>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        self.abort_in_flight();
        let (handle, registration) = AbortHandle::new_pair();
        *self.in_flight.borrow_mut() = Some(handle);
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        RequestTicket { generation, registration }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Abort whatever is in flight and invalidate every ticket issued so far.
    pub fn cancel(&self) {
        self.abort_in_flight();
        self.generation.set(self.generation.get() + 1);
    }

    fn abort_in_flight(&self) {
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            if !handle.is_aborted() {
                get_logger().debug(
                    LogComponent::Application("RequestTracker"),
                    &format!("🛑 Aborting batch #{}", self.generation.get()),
                );
            }
            handle.abort();
        }
    }
}
