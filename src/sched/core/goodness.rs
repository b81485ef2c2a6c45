//! Política Goodness por épocas (LINUXSCHED)
//!
//! Emula o escalonador clássico do Linux 2.4: cada processo recebe um
//! contador de ticks por época, e a "goodness" (`priority + counter`) decide
//! quem roda. Quando todo processo pronto esgotou o contador (goodness 0),
//! uma nova época recarrega a tabela inteira, guardando metade do que sobrou
//! de quem não usou a fatia toda.
//!
//! A fila continua ordenada por prioridade; goodness só afeta a escolha.

use super::policy::SchedPolicy;
use super::runqueue::ReadyQueue;
use crate::sched::task::{ProcState, ProcTable};
use crate::sys::Pid;

/// Estado da política Goodness
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodnessPolicy {
    epoch_active: bool,
    epochs: u64,
}

impl GoodnessPolicy {
    pub const fn new() -> Self {
        Self {
            epoch_active: false,
            epochs: 0,
        }
    }

    /// Existe uma época em andamento?
    pub fn epoch_active(&self) -> bool {
        self.epoch_active
    }

    /// Épocas iniciadas desde o boot
    pub fn epochs(&self) -> u64 {
        self.epochs
    }

    /// Recalcula contador e goodness de toda a tabela.
    ///
    /// Slots livres e o idle têm o bookkeeping zerado; os demais (prontos,
    /// correntes ou bloqueados) são recarregados.
    pub fn start_epoch(&mut self, procs: &mut ProcTable) {
        crate::kdebug!("(Goodness) Nova época:", self.epochs + 1);

        for (pid, entry) in procs.iter_mut() {
            if entry.state == ProcState::Free || pid.is_idle() {
                entry.epoch.reset();
                continue;
            }
            entry.epoch.recharge(entry.priority);
        }

        self.epoch_active = true;
        self.epochs += 1;
    }

    /// Membro pronto com a maior goodness estritamente positiva.
    ///
    /// Empates ficam com o primeiro encontrado (ordem da fila, da cabeça).
    pub fn pick_max_goodness(rq: &ReadyQueue, procs: &ProcTable) -> Option<Pid> {
        let mut best: Option<(Pid, i32)> = None;

        for (pid, _) in rq.iter() {
            let entry = &procs[pid];
            if entry.state != ProcState::Ready {
                continue;
            }
            let goodness = entry.epoch.goodness;
            if goodness > 0 && best.map_or(true, |(_, g)| goodness > g) {
                best = Some((pid, goodness));
            }
        }

        best.map(|(pid, _)| pid)
    }
}

impl SchedPolicy for GoodnessPolicy {
    fn pick_next(&mut self, rq: &ReadyQueue, procs: &mut ProcTable) -> Option<Pid> {
        if !self.epoch_active {
            self.start_epoch(procs);
        }

        if let Some(pid) = Self::pick_max_goodness(rq, procs) {
            return Some(pid);
        }

        // todos os prontos esgotados: força nova época e tenta uma vez
        self.start_epoch(procs);
        Self::pick_max_goodness(rq, procs)
    }
}
