//! Política ExpDist (EXPDISTSCHED)
//!
//! Prioridade com jitter probabilístico. A cada decisão sorteia `r ~ Exp(λ)`
//! e escolhe a menor chave estritamente maior que `r`. Se nenhuma chave passa
//! de `r`, satura no intervalo da fila: `r` abaixo da menor chave escolhe a
//! menor, acima da maior escolhe a maior.
//!
//! Entre membros com a chave-alvo vence o mais antigo, o mesmo que a classe
//! Priority tiraria pela cauda.
//!
//! Com λ = 0.1 a média do sorteio é 10, então chaves baixas ganham com
//! frequência, mas chaves altas continuam recebendo CPU.

use super::policy::SchedPolicy;
use super::runqueue::ReadyQueue;
use crate::klib::ExpSampler;
use crate::sched::task::ProcTable;
use crate::sys::Pid;

/// Política ExpDist sobre um amostrador exponencial qualquer
#[derive(Debug, Clone)]
pub struct ExpDistPolicy<S> {
    sampler: S,
    lambda: f64,
}

impl<S: ExpSampler> ExpDistPolicy<S> {
    pub fn new(sampler: S, lambda: f64) -> Self {
        Self { sampler, lambda }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Resolve a chave-alvo para um sorteio `r` numa única passada da fila.
    ///
    /// `None` apenas com a fila vazia.
    pub fn target_key(rq: &ReadyQueue, r: f64) -> Option<i32> {
        let mut min_key: Option<i32> = None;
        let mut max_key: Option<i32> = None;
        let mut candidate: Option<i32> = None;

        for (_, key) in rq.iter() {
            min_key = Some(min_key.map_or(key, |m| m.min(key)));
            max_key = Some(max_key.map_or(key, |m| m.max(key)));
            if f64::from(key) > r && candidate.map_or(true, |c| key < c) {
                candidate = Some(key);
            }
        }

        let (min_key, max_key) = (min_key?, max_key?);
        Some(match candidate {
            Some(key) => key,
            None if r < f64::from(min_key) => min_key,
            None => max_key,
        })
    }

    /// Membro mais antigo com a chave-alvo.
    ///
    /// Se a chave não existir (invariante quebrado entre a passada de
    /// `target_key` e a fila), loga e devolve o membro da cauda.
    pub fn pick_front_at_key(rq: &ReadyQueue, target_key: i32) -> Option<Pid> {
        if let Some(pid) = rq.oldest_with_key(target_key) {
            return Some(pid);
        }

        crate::kerror!("(ExpDist) Invariante violado, chave-alvo ausente:", target_key);
        rq.last()
    }
}

impl<S: ExpSampler> SchedPolicy for ExpDistPolicy<S> {
    fn pick_next(&mut self, rq: &ReadyQueue, _procs: &mut ProcTable) -> Option<Pid> {
        if rq.is_empty() {
            return None;
        }

        let r = self.sampler.sample_exponential(self.lambda);
        let target = Self::target_key(rq, r)?;
        crate::ktrace!("(ExpDist) chave-alvo=", target);
        Self::pick_front_at_key(rq, target)
    }
}
