//! # Códigos de Erro do Escalonador
//!
//! Segue o padrão POSIX/Linux (errno) como o resto do kernel, para que as
//! syscalls de controle (`setschedclass`, `chprio`...) possam devolver o código
//! negativo direto em RAX.
//!
//! O dispatcher (`reschedule`) nunca devolve erro: falhas internas são logadas
//! e absorvidas pelo fallback definido (idle ou membro da cauda).

use core::fmt;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    ESRCH = 3,   // No such process (PID fora da tabela)
    EBUSY = 16,  // Slot já em uso / processo em estado incompatível
    EINVAL = 22, // Argumento inválido (classe desconhecida, PID idle)

    // Forge Specific
    EUNINIT = 1000,  // Escalonador global ainda não inicializado
    ECORRUPT = 1001, // Encadeamento da fila de prontos inconsistente
}

/// Resultado padrão das operações do escalonador
pub type SchedResult<T> = Result<T, SchedError>;

impl SchedError {
    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::ESRCH => "no such process",
            Self::EBUSY => "process slot busy or in an incompatible state",
            Self::EINVAL => "invalid argument",
            Self::EUNINIT => "scheduler not initialized",
            Self::ECORRUPT => "ready queue linkage corrupted",
        };
        f.write_str(msg)
    }
}
