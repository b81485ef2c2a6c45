//! Process table module

pub mod accounting;
pub mod context;
pub mod entity;
pub mod state;

pub use accounting::EpochAccounting;
pub use context::{ContextSwitch, IrqMask, PendingSwitch, SavedContext};
pub use entity::{ProcEntry, ProcTable};
pub use state::ProcState;
