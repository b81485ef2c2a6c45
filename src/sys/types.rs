//! Tipos fundamentais do sistema

/// Process ID
///
/// Índice direto na tabela de processos (`0..NPROC`). O PID 0 é reservado
/// para o processo idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Pid(pub u32);

impl Pid {
    /// Processo idle (NULLPROC): sempre pronto, nunca entra na fila.
    pub const IDLE: Pid = Pid(crate::sched::config::NULLPROC as u32);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Índice do slot na tabela de processos.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_idle(self) -> bool {
        self.0 == Self::IDLE.0
    }
}

impl From<usize> for Pid {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl core::fmt::Display for Pid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "pid {}", self.0)
    }
}
