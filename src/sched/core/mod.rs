//! Núcleo do escalonador
//!
//! Fila de prontos, políticas de seleção e o dispatcher que as consulta.

pub mod debug;
pub mod expdist;
pub mod goodness;
pub mod policy;
pub mod runqueue;
pub mod scheduler;

pub use expdist::ExpDistPolicy;
pub use goodness::GoodnessPolicy;
pub use policy::{PriorityPolicy, SchedClass, SchedPolicy};
pub use runqueue::ReadyQueue;
pub use scheduler::{Dispatch, SchedStats, Scheduler};
