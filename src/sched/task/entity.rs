//! Process Control Block e tabela de processos
//!
//! A tabela é uma arena de tamanho fixo indexada por PID: slots nunca são
//! realocados, só reiniciados no lugar. A fila de prontos guarda apenas
//! índices para esta tabela.

use core::ops::{Index, IndexMut};
use core::ptr;

use super::accounting::EpochAccounting;
use super::context::SavedContext;
use super::state::ProcState;
use crate::sched::config::NPROC;
use crate::sys::{Pid, SchedError, SchedResult};

/// Process Control Block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcEntry {
    /// Estado atual
    pub state: ProcState,
    /// Prioridade estática; é a chave de ordenação da fila de prontos
    pub priority: i32,
    /// Bookkeeping da política Goodness
    pub epoch: EpochAccounting,
    /// Contexto salvo (SP + máscara de IRQ)
    pub context: SavedContext,
}

impl ProcEntry {
    /// Slot livre
    pub const fn empty() -> Self {
        Self {
            state: ProcState::Free,
            priority: 0,
            epoch: EpochAccounting {
                counter: 0,
                goodness: 0,
                quantum_exhausted: false,
                is_new: false,
            },
            context: SavedContext::new(0, super::context::IrqMask::empty()),
        }
    }

    /// Devolve o slot ao estado livre, zerando o bookkeeping
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

/// Tabela de processos (arena fixa de `NPROC` slots)
#[derive(Debug, Clone)]
pub struct ProcTable {
    entries: [ProcEntry; NPROC],
}

impl ProcTable {
    pub const fn new() -> Self {
        Self {
            entries: [ProcEntry::empty(); NPROC],
        }
    }

    /// Valida o PID contra o tamanho da tabela
    pub fn check(pid: Pid) -> SchedResult<Pid> {
        if pid.index() < NPROC {
            Ok(pid)
        } else {
            Err(SchedError::ESRCH)
        }
    }

    pub fn get(&self, pid: Pid) -> SchedResult<&ProcEntry> {
        self.entries.get(pid.index()).ok_or(SchedError::ESRCH)
    }

    pub fn get_mut(&mut self, pid: Pid) -> SchedResult<&mut ProcEntry> {
        self.entries.get_mut(pid.index()).ok_or(SchedError::ESRCH)
    }

    /// Itera todos os slots (inclusive livres) em ordem de PID
    pub fn iter(&self) -> impl Iterator<Item = (Pid, &ProcEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (Pid::from(idx), entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Pid, &mut ProcEntry)> {
        self.entries
            .iter_mut()
            .enumerate()
            .map(|(idx, entry)| (Pid::from(idx), entry))
    }

    /// Ponteiros para o contexto salvo de quem sai e de quem entra.
    ///
    /// Ponteiros brutos porque `from == to` é permitido (troca para si mesmo).
    pub(crate) fn context_ptrs(
        &mut self,
        from: Pid,
        to: Pid,
    ) -> SchedResult<(*mut SavedContext, *const SavedContext)> {
        Self::check(from)?;
        Self::check(to)?;
        let base = self.entries.as_mut_ptr();
        // SAFETY: os dois índices foram validados contra NPROC acima
        unsafe {
            Ok((
                ptr::addr_of_mut!((*base.add(from.index())).context),
                ptr::addr_of!((*base.add(to.index())).context),
            ))
        }
    }
}

impl Default for ProcTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Pid> for ProcTable {
    type Output = ProcEntry;

    fn index(&self, pid: Pid) -> &ProcEntry {
        &self.entries[pid.index()]
    }
}

impl IndexMut<Pid> for ProcTable {
    fn index_mut(&mut self, pid: Pid) -> &mut ProcEntry {
        &mut self.entries[pid.index()]
    }
}
