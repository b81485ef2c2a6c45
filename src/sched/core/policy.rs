//! Algoritmos de escalonamento
//!
//! Cada classe expõe o mesmo contrato (`SchedPolicy::pick_next`): olha a fila
//! de prontos (e, se precisar, a tabela) e devolve o PID escolhido, ou `None`
//! quando ninguém está pronto. Tirar o escolhido da fila e trocar o contexto
//! é trabalho do dispatcher.

use super::runqueue::ReadyQueue;
use crate::sched::task::ProcTable;
use crate::sys::{Pid, SchedError, SchedResult};

/// Classes de escalonamento suportadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedClass {
    /// Prioridade estrita: maior chave ganha, round-robin entre iguais
    #[default]
    Priority,
    /// Prioridade com jitter exponencial (EXPDISTSCHED)
    ExpDist,
    /// Goodness por épocas, estilo Linux 2.4 (LINUXSCHED)
    Goodness,
}

impl SchedClass {
    /// Converte o valor cru da syscall `setschedclass`.
    pub const fn from_raw(raw: u32) -> SchedResult<Self> {
        match raw {
            0 => Ok(Self::Priority),
            1 => Ok(Self::ExpDist),
            2 => Ok(Self::Goodness),
            _ => Err(SchedError::EINVAL),
        }
    }

    /// Valor cru devolvido por `getschedclass`.
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::Priority => 0,
            Self::ExpDist => 1,
            Self::Goodness => 2,
        }
    }
}

/// Contrato comum das políticas de seleção
pub trait SchedPolicy {
    /// Escolhe o próximo processo entre os membros de `rq`.
    ///
    /// Não remove nada da fila. `None` significa "nenhum pronto".
    fn pick_next(&mut self, rq: &ReadyQueue, procs: &mut ProcTable) -> Option<Pid>;
}

/// Prioridade estrita: o membro da cauda (maior chave, mais antigo entre iguais)
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityPolicy;

impl SchedPolicy for PriorityPolicy {
    fn pick_next(&mut self, rq: &ReadyQueue, _procs: &mut ProcTable) -> Option<Pid> {
        rq.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_class_roundtrip() {
        for class in [SchedClass::Priority, SchedClass::ExpDist, SchedClass::Goodness] {
            assert_eq!(SchedClass::from_raw(class.as_raw()), Ok(class));
        }
        assert_eq!(SchedClass::from_raw(3), Err(SchedError::EINVAL));
        assert_eq!(SchedClass::default(), SchedClass::Priority);
    }

    #[test]
    fn test_priority_policy_picks_tail() {
        let mut rq = ReadyQueue::new();
        let mut procs = ProcTable::new();
        assert_eq!(PriorityPolicy.pick_next(&rq, &mut procs), None);

        rq.insert(Pid::new(1), 10).unwrap();
        rq.insert(Pid::new(2), 30).unwrap();
        rq.insert(Pid::new(3), 20).unwrap();
        assert_eq!(PriorityPolicy.pick_next(&rq, &mut procs), Some(Pid::new(2)));
        // pick_next não consome
        assert_eq!(rq.len(), 3);
    }
}
