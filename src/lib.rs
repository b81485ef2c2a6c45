//! Forge Scheduling Core.
//!
//! Núcleo de escalonamento do kernel Forge: tabela de processos, fila de
//! prontos ordenada, políticas (prioridade, ExpDist, Goodness por épocas) e o
//! dispatcher. A troca física de contexto e a fonte de entropia ficam com o
//! kernel hospedeiro.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

// --- Infraestrutura ---
pub mod logging; // Macros kerror!/kinfo!/ktrace! sobre a fachada `log`
pub mod klib; // Amostrador exponencial e framework de self-test
pub mod sys; // Tipos e códigos de erro

// --- Escalonador ---
pub mod sched;

pub use crate::sched::{SchedClass, SchedConfig, Scheduler};
pub use crate::sys::{Pid, SchedError, SchedResult};
