//! Constantes de configuração do Scheduler

use crate::sched::core::policy::SchedClass;

/// Número de slots da tabela de processos
pub const NPROC: usize = 50;

/// Slot do processo idle (NULLPROC)
pub const NULLPROC: usize = 0;

/// Menor prioridade aceita na admissão (o idle roda com 0)
pub const MIN_PRIORITY: i32 = 1;

/// Quantum padrão (Timeslice) em ticks do timer
pub const QUANTUM: i32 = 10;

/// Taxa λ da distribuição exponencial usada pela política ExpDist
pub const EXPDIST_LAMBDA: f64 = 0.1;

/// Chave da sentinela de cabeça (−∞, nunca casa)
pub const MIN_KEY: i32 = i32::MIN;

/// Chave da sentinela de cauda (+∞, toda inserção para antes dela)
pub const MAX_KEY: i32 = i32::MAX;

/// Semente padrão do amostrador exponencial
pub const DEFAULT_SEED: u64 = 0x5EED_F0E6_E5C4_ED01;

/// Configuração de runtime do escalonador, consumida por `Scheduler::new`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedConfig {
    /// Quantum entregue em toda troca (e no fallback da política Goodness)
    pub default_quantum: i32,
    /// Taxa λ da política ExpDist
    pub expdist_lambda: f64,
    /// Classe ativa logo após o boot
    pub initial_class: SchedClass,
    /// Semente do `XorShiftExp` padrão
    pub seed: u64,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            default_quantum: QUANTUM,
            expdist_lambda: EXPDIST_LAMBDA,
            initial_class: SchedClass::Priority,
            seed: DEFAULT_SEED,
        }
    }
}
