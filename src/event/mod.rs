mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::StoreEvent;

use crate::state::DesignState;

/// Receives store events after the mutation that caused them has been applied
pub trait StoreListener {
    fn handle_event(&mut self, event: &StoreEvent, state: &DesignState);
}

impl<F> StoreListener for F
where
    F: FnMut(&StoreEvent, &DesignState),
{
    fn handle_event(&mut self, event: &StoreEvent, state: &DesignState) {
        self(event, state)
    }
}
