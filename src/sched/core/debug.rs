//! Ferramentas de Debug para o Scheduler

use super::runqueue::ReadyQueue;

/// Imprime cada membro da fila de prontos, da cabeça para a cauda
#[allow(unused_variables)]
pub fn dump_ready_queue(rq: &ReadyQueue) {
    crate::ktrace!("--- [TRACE] FILA DE PRONTOS ---");
    crate::ktrace!("  - READY count:", rq.len());

    for (pid, key) in rq.iter() {
        crate::ktrace!("    -> PID:", pid.as_u32());
        crate::ktrace!("       key:", key);
    }

    crate::ktrace!("--- [TRACE] FIM DO DUMP ---");
}
