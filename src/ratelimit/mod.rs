//! Rate limiting logic and state management.

mod backend;
mod clock;
mod counter;
mod key;
mod limiter;

pub use backend::AdmissionBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::{CounterEntry, TimeWindow};
pub use key::CounterKey;
pub use limiter::{AdmissionLimiter, AdmissionResult, DEFAULT_IDENTIFIER};
