//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware usados pelo escalonador.

pub mod rand;
pub mod test_framework;

pub use rand::{ExpSampler, XorShiftExp};
