//! Host side of the hook boundary: running hooks and turning their answers into outcomes.

pub mod decision;
pub mod dispatcher;
pub mod events;

pub use decision::{Admission, ClientDenial, GateDecision};
pub use dispatcher::{DispatchSettings, HookDispatcher};
pub use events::{EventOutcome, HostEvent, OutcomeKind};
