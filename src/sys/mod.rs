//! System Definitions.
//!
//! Contém os tipos e códigos de erro que definem a interface entre o núcleo de
//! escalonamento e o resto do kernel.

pub mod error;
pub mod types;

pub use error::{SchedError, SchedResult};
pub use types::Pid;
