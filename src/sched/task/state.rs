//! Estados de processo

/// Estado de um slot da tabela de processos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcState {
    /// Slot livre, bookkeeping zerado
    #[default]
    Free,
    /// Pronto para executar (membro da fila de prontos)
    Ready,
    /// Executando agora (exatamente um slot por vez)
    Current,
    /// Bloqueado (sleep/wait/suspend) - gerenciado fora deste núcleo
    Blocked,
}

impl ProcState {
    /// Verifica se pode ser escalonado
    pub const fn is_runnable(self) -> bool {
        matches!(self, Self::Ready | Self::Current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ready_and_current_are_runnable() {
        assert!(ProcState::Ready.is_runnable());
        assert!(ProcState::Current.is_runnable());
        assert!(!ProcState::Free.is_runnable());
        assert!(!ProcState::Blocked.is_runnable());
    }
}
