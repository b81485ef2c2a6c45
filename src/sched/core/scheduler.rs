//! # Dispatcher (resched)
//!
//! Autoridade única de escalonamento: dona da tabela de processos, da fila de
//! prontos, do modo ativo e do quantum. Toda decisão passa por
//! [`Scheduler::reschedule`], que atualiza as estruturas e devolve o que fazer
//! com a CPU:
//!
//! - `Dispatch::Continue`: o processo atual segue rodando (fast path);
//! - `Dispatch::Switch(token)`: a troca está decidida e as estruturas já
//!   refletem o novo processo; falta só `PendingSwitch::commit`.
//!
//! ## Modos
//! - **Priority:** maior prioridade ganha; round-robin entre iguais.
//! - **ExpDist:** prioridade com jitter exponencial.
//! - **Goodness:** épocas estilo Linux 2.4; o quantum entregue é o contador
//!   restante do escolhido.
//!
//! Em todos os modos o idle (PID 0) é o fallback de fila vazia e nunca entra
//! na fila.
//!
//! ## Sincronização
//! Nenhum lock interno. O chamador garante exclusão (interrupções mascaradas
//! ou o `spin::Mutex` global de `sched`).

use super::expdist::ExpDistPolicy;
use super::goodness::GoodnessPolicy;
use super::policy::{PriorityPolicy, SchedClass, SchedPolicy};
use super::runqueue::ReadyQueue;
use crate::klib::{ExpSampler, XorShiftExp};
use crate::sched::config::{SchedConfig, EXPDIST_LAMBDA, MIN_PRIORITY};
use crate::sched::task::{
    ContextSwitch, EpochAccounting, PendingSwitch, ProcEntry, ProcState, ProcTable, SavedContext,
};
use crate::sys::{Pid, SchedError, SchedResult};

/// Resultado de uma decisão de escalonamento
#[derive(Debug)]
#[must_use = "uma troca decidida precisa de commit"]
pub enum Dispatch {
    /// Nada muda: o processo atual continua
    Continue,
    /// Troca pronta para ser executada
    Switch(PendingSwitch),
}

/// Contadores do dispatcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedStats {
    /// Trocas decididas (inclusive troca para si mesmo)
    pub context_switches: u64,
    /// Despachos do idle por fila vazia
    pub idle_fallbacks: u64,
    /// Decisões resolvidas pelo fast path do modo Priority
    pub fast_path: u64,
    /// Épocas iniciadas pela política Goodness
    pub epochs: u64,
}

/// Estado completo do escalonador
pub struct Scheduler<S: ExpSampler = XorShiftExp> {
    procs: ProcTable,
    rq: ReadyQueue,
    currpid: Pid,
    class: SchedClass,
    /// Ticks restantes do processo atual
    preempt: i32,
    /// Quantum padrão
    quantum: i32,
    expdist: ExpDistPolicy<S>,
    goodness: GoodnessPolicy,
    stats: SchedStats,
}

impl Scheduler<XorShiftExp> {
    /// Escalonador com o amostrador padrão semeado por `config.seed`.
    pub fn new(config: SchedConfig) -> Self {
        Self::with_sampler(config, XorShiftExp::new(config.seed))
    }
}

impl<S: ExpSampler> Scheduler<S> {
    /// Escalonador sobre um amostrador exponencial qualquer.
    ///
    /// O idle já nasce CURRENT; nenhum outro slot está ocupado.
    pub fn with_sampler(config: SchedConfig, sampler: S) -> Self {
        let quantum = config.default_quantum.max(1);
        let lambda = if config.expdist_lambda.is_finite() && config.expdist_lambda > 0.0 {
            config.expdist_lambda
        } else {
            crate::kwarn!("(Sched) λ inválido para ExpDist, usando o padrão");
            EXPDIST_LAMBDA
        };
        let mut procs = ProcTable::new();
        procs[Pid::IDLE].state = ProcState::Current;

        crate::kinfo!("(Sched) Classe inicial:", config.initial_class.as_raw());

        Self {
            procs,
            rq: ReadyQueue::new(),
            currpid: Pid::IDLE,
            class: config.initial_class,
            preempt: quantum,
            quantum,
            expdist: ExpDistPolicy::new(sampler, lambda),
            goodness: GoodnessPolicy::new(),
            stats: SchedStats::default(),
        }
    }

    // =========================================================================
    // DECISÃO
    // =========================================================================

    /// Decide quem roda a seguir e atualiza tabela, fila e quantum.
    ///
    /// Nunca falha: inconsistências são logadas e absorvidas (idle ou membro
    /// da cauda).
    pub fn reschedule(&mut self) -> Dispatch {
        match self.class {
            SchedClass::Priority => self.reschedule_priority(),
            SchedClass::ExpDist => self.reschedule_expdist(),
            SchedClass::Goodness => self.reschedule_goodness(),
        }
    }

    /// `reschedule` seguido do commit da troca.
    ///
    /// A troca é a última ação: quando `switch` retorna, o processo que
    /// chamou acabou de ser re-escalonado.
    pub fn resched<C: ContextSwitch + ?Sized>(&mut self, cpu: &mut C) {
        if let Dispatch::Switch(pending) = self.reschedule() {
            // SAFETY: o token aponta para a tabela de `self`, emprestada com
            // exclusividade durante toda a chamada.
            unsafe { pending.commit(cpu) };
        }
    }

    fn reschedule_priority(&mut self) -> Dispatch {
        let old = self.currpid;
        let outgoing = &self.procs[old];

        if outgoing.state == ProcState::Current
            && self.rq.highest_key().map_or(true, |key| outgoing.priority > key)
        {
            self.stats.fast_path += 1;
            return Dispatch::Continue;
        }

        self.requeue_outgoing(old);
        match PriorityPolicy.pick_next(&self.rq, &mut self.procs) {
            Some(new) if self.take_selected(new) => self.dispatch_to(old, new, self.quantum),
            _ => self.dispatch_idle(old),
        }
    }

    fn reschedule_expdist(&mut self) -> Dispatch {
        let old = self.currpid;
        self.requeue_outgoing(old);

        if self.rq.is_empty() {
            return self.dispatch_idle(old);
        }

        match self.expdist.pick_next(&self.rq, &mut self.procs) {
            Some(new) if self.take_selected(new) => self.dispatch_to(old, new, self.quantum),
            _ => self.dispatch_idle(old),
        }
    }

    fn reschedule_goodness(&mut self) -> Dispatch {
        let old = self.currpid;
        let remaining = self.preempt;

        let outgoing = &mut self.procs[old];
        if outgoing.state == ProcState::Current && !old.is_idle() {
            let priority = outgoing.priority;
            outgoing.epoch.snapshot(priority, remaining);
        }
        self.requeue_outgoing(old);

        if self.rq.is_empty() {
            return self.dispatch_idle(old);
        }

        let new = match self.goodness.pick_next(&self.rq, &mut self.procs) {
            Some(pid) if self.take_selected(pid) => pid,
            _ => return self.dispatch_idle(old),
        };

        let counter = self.procs[new].epoch.counter;
        let quantum = if counter > 0 { counter } else { self.quantum };
        self.dispatch_to(old, new, quantum)
    }

    /// Devolve à fila quem perde a CPU, se ainda estiver CURRENT.
    ///
    /// O idle só muda de estado: nunca é enfileirado.
    fn requeue_outgoing(&mut self, old: Pid) {
        let entry = &mut self.procs[old];
        if entry.state != ProcState::Current {
            return;
        }

        entry.state = ProcState::Ready;
        if old.is_idle() {
            return;
        }

        let priority = entry.priority;
        if self.rq.insert(old, priority).is_err() {
            crate::kerror!("(Sched) Falha ao reinserir na fila PID:", old.as_u32());
        }
    }

    /// Tira o escolhido da fila, pelos extremos quando possível.
    fn take_selected(&mut self, pid: Pid) -> bool {
        let removed = if self.rq.first() == Some(pid) {
            self.rq.remove_first().is_some()
        } else if self.rq.last() == Some(pid) {
            self.rq.remove_last().is_some()
        } else {
            self.rq.remove(pid).is_ok()
        };

        if !removed {
            crate::kerror!("(Sched) Escolhido fora da fila PID:", pid.as_u32());
        }
        removed
    }

    fn dispatch_idle(&mut self, old: Pid) -> Dispatch {
        crate::ktrace!("(Sched) Fila vazia, despachando idle");
        self.stats.idle_fallbacks += 1;
        self.dispatch_to(old, Pid::IDLE, self.quantum)
    }

    fn dispatch_to(&mut self, old: Pid, new: Pid, quantum: i32) -> Dispatch {
        debug_assert!(
            self.procs[new].state.is_runnable(),
            "despacho de processo não executável"
        );
        self.procs[new].state = ProcState::Current;
        self.currpid = new;
        self.preempt = quantum;
        self.stats.context_switches += 1;
        crate::ktrace!("(Sched) Despachando PID:", new.as_u32());

        // ponteiros obtidos por último: nenhum acesso à tabela depois deles
        match self.procs.context_ptrs(old, new) {
            // SAFETY: os dois slots pertencem a `self.procs`, que não se move
            // enquanto o token existir (contrato de `commit`).
            Ok((old_ctx, new_ctx)) => {
                Dispatch::Switch(unsafe { PendingSwitch::new(old, old_ctx, new, new_ctx) })
            }
            Err(_) => {
                crate::kerror!("(Sched) Contexto inválido na troca para PID:", new.as_u32());
                Dispatch::Continue
            }
        }
    }

    // =========================================================================
    // MODO E QUANTUM
    // =========================================================================

    pub fn sched_class(&self) -> SchedClass {
        self.class
    }

    /// Troca o modo ativo. Vale a partir do próximo `reschedule`.
    pub fn set_sched_class(&mut self, class: SchedClass) {
        crate::kinfo!("(Sched) Nova classe de escalonamento:", class.as_raw());
        self.class = class;
    }

    /// Processo atualmente CURRENT
    pub fn current(&self) -> Pid {
        self.currpid
    }

    pub fn remaining_quantum(&self) -> i32 {
        self.preempt
    }

    pub fn set_remaining_quantum(&mut self, ticks: i32) {
        self.preempt = ticks;
    }

    /// Quantum padrão entregue nas trocas
    pub fn default_quantum(&self) -> i32 {
        self.quantum
    }

    /// Taxa λ efetiva da política ExpDist
    pub fn expdist_lambda(&self) -> f64 {
        self.expdist.lambda()
    }

    /// Um tick do timer. Retorna `true` quando o quantum acabou e um
    /// `reschedule` é devido.
    pub fn tick(&mut self) -> bool {
        self.preempt = self.preempt.saturating_sub(1);
        self.preempt <= 0
    }

    // =========================================================================
    // TRANSIÇÕES EXTERNAS
    // =========================================================================

    /// Provisiona um slot livre como READY e o enfileira.
    pub fn admit(&mut self, pid: Pid, priority: i32) -> SchedResult<()> {
        let pid = Self::check_user_pid(pid)?;
        if priority < MIN_PRIORITY {
            return Err(SchedError::EINVAL);
        }

        let entry = &mut self.procs[pid];
        if entry.state != ProcState::Free {
            return Err(SchedError::EBUSY);
        }

        *entry = ProcEntry {
            state: ProcState::Ready,
            priority,
            epoch: EpochAccounting::fresh(),
            context: entry.context,
        };

        if let Err(err) = self.rq.insert(pid, priority) {
            self.procs[pid].reset();
            return Err(err);
        }

        crate::ktrace!("(Sched) Processo admitido PID:", pid.as_u32());
        Ok(())
    }

    /// Processo bloqueado volta a ficar pronto.
    pub fn make_ready(&mut self, pid: Pid) -> SchedResult<()> {
        let pid = Self::check_user_pid(pid)?;
        let entry = &mut self.procs[pid];
        match entry.state {
            ProcState::Blocked => {}
            ProcState::Free => return Err(SchedError::ESRCH),
            _ => return Err(SchedError::EBUSY),
        }

        let priority = entry.priority;
        self.rq.insert(pid, priority)?;
        self.procs[pid].state = ProcState::Ready;
        Ok(())
    }

    /// Tira o processo da disputa pela CPU.
    ///
    /// Se for o atual, só marca BLOCKED: o próximo `reschedule` não o
    /// reinsere.
    pub fn block(&mut self, pid: Pid) -> SchedResult<()> {
        let pid = Self::check_user_pid(pid)?;
        match self.procs[pid].state {
            ProcState::Ready => self.rq.remove(pid)?,
            ProcState::Current => {}
            ProcState::Free => return Err(SchedError::ESRCH),
            ProcState::Blocked => return Err(SchedError::EBUSY),
        }

        self.procs[pid].state = ProcState::Blocked;
        Ok(())
    }

    /// Devolve o slot ao estado livre, zerando o bookkeeping.
    pub fn release(&mut self, pid: Pid) -> SchedResult<()> {
        let pid = Self::check_user_pid(pid)?;
        match self.procs[pid].state {
            ProcState::Free => return Err(SchedError::ESRCH),
            ProcState::Ready => self.rq.remove(pid)?,
            ProcState::Current | ProcState::Blocked => {}
        }

        self.procs[pid].reset();
        Ok(())
    }

    /// Altera a prioridade (chave da fila) e devolve a anterior.
    pub fn set_priority(&mut self, pid: Pid, priority: i32) -> SchedResult<i32> {
        let pid = Self::check_user_pid(pid)?;
        if priority < MIN_PRIORITY {
            return Err(SchedError::EINVAL);
        }

        let state = self.procs[pid].state;
        if state == ProcState::Free {
            return Err(SchedError::ESRCH);
        }
        if state == ProcState::Ready {
            self.rq.remove(pid)?;
            self.rq.insert(pid, priority)?;
        }

        let old = core::mem::replace(&mut self.procs[pid].priority, priority);
        Ok(old)
    }

    /// Contexto inicial de um processo recém-criado (pilha montada fora daqui).
    pub fn set_saved_context(&mut self, pid: Pid, context: SavedContext) -> SchedResult<()> {
        let pid = Self::check_user_pid(pid)?;
        if self.procs[pid].state == ProcState::Current {
            return Err(SchedError::EBUSY);
        }
        self.procs[pid].context = context;
        Ok(())
    }

    fn check_user_pid(pid: Pid) -> SchedResult<Pid> {
        if pid.is_idle() {
            return Err(SchedError::EINVAL);
        }
        ProcTable::check(pid)
    }

    // =========================================================================
    // INSPEÇÃO
    // =========================================================================

    pub fn proc(&self, pid: Pid) -> SchedResult<&ProcEntry> {
        self.procs.get(pid)
    }

    pub fn procs(&self) -> &ProcTable {
        &self.procs
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.rq
    }

    pub fn stats(&self) -> SchedStats {
        SchedStats {
            epochs: self.goodness.epochs(),
            ..self.stats
        }
    }

    /// Loga fila, processo atual e contadores (nível TRACE).
    pub fn dump(&self) {
        crate::ktrace!("(Sched) Classe ativa:", self.class.as_raw());
        crate::ktrace!("(Sched) Atual PID:", self.currpid.as_u32());
        crate::ktrace!("(Sched) Quantum restante:", self.preempt);
        super::debug::dump_ready_queue(&self.rq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::klib::rand::ScriptedSampler;
    use crate::sched::config::QUANTUM;
    use crate::sched::task::context::RecordingCpu;
    use crate::sched::task::IrqMask;

    fn config(class: SchedClass) -> SchedConfig {
        SchedConfig {
            initial_class: class,
            ..SchedConfig::default()
        }
    }

    fn pid(n: u32) -> Pid {
        Pid::new(n)
    }

    #[test]
    fn test_boot_state() {
        let sched = Scheduler::new(SchedConfig::default());
        assert_eq!(sched.current(), Pid::IDLE);
        assert_eq!(sched.sched_class(), SchedClass::Priority);
        assert_eq!(sched.remaining_quantum(), QUANTUM);
        assert_eq!(sched.proc(Pid::IDLE).unwrap().state, ProcState::Current);
        assert!(sched.ready_queue().is_empty());
    }

    #[test]
    fn test_fast_path_changes_nothing() {
        let mut sched = Scheduler::new(SchedConfig::default());
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 5).unwrap();
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(1));

        sched.admit(pid(2), 3).unwrap();
        sched.set_remaining_quantum(2);
        let before = sched.stats();

        assert!(matches!(sched.reschedule(), Dispatch::Continue));
        assert_eq!(sched.current(), pid(1));
        assert_eq!(sched.ready_queue().len(), 1);
        assert_eq!(sched.remaining_quantum(), 2);
        assert_eq!(sched.stats().context_switches, before.context_switches);
        assert_eq!(sched.stats().fast_path, before.fast_path + 1);
        assert_eq!(cpu.switches, 1);
    }

    #[test]
    fn test_round_robin_among_equal_priorities() {
        let mut sched = Scheduler::new(SchedConfig::default());
        let mut cpu = RecordingCpu::new();
        for n in 1..=3 {
            sched.admit(pid(n), 10).unwrap();
        }

        let mut order = [Pid::IDLE; 6];
        for slot in order.iter_mut() {
            sched.resched(&mut cpu);
            *slot = sched.current();
        }
        assert_eq!(order, [pid(1), pid(2), pid(3), pid(1), pid(2), pid(3)]);
        assert!(!sched.ready_queue().contains(Pid::IDLE));
    }

    #[test]
    fn test_higher_priority_preempts() {
        let mut sched = Scheduler::new(SchedConfig::default());
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 5).unwrap();
        sched.resched(&mut cpu);

        sched.admit(pid(2), 9).unwrap();
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(2));
        assert_eq!(sched.proc(pid(1)).unwrap().state, ProcState::Ready);
        assert_eq!(sched.ready_queue().first(), Some(pid(1)));
    }

    #[test]
    fn test_idle_fallback_in_every_mode() {
        for class in [SchedClass::Priority, SchedClass::ExpDist, SchedClass::Goodness] {
            let mut sched = Scheduler::new(config(class));
            let mut cpu = RecordingCpu::new();
            sched.admit(pid(1), 4).unwrap();
            sched.resched(&mut cpu);
            assert_eq!(sched.current(), pid(1));

            sched.block(pid(1)).unwrap();
            sched.set_remaining_quantum(3);
            sched.resched(&mut cpu);

            assert_eq!(sched.current(), Pid::IDLE);
            assert_eq!(sched.remaining_quantum(), QUANTUM);
            assert_eq!(sched.stats().idle_fallbacks, 1);
            assert_eq!(sched.proc(pid(1)).unwrap().state, ProcState::Blocked);
            assert!(sched.ready_queue().is_empty());
        }
    }

    #[test]
    fn test_idle_is_never_enqueued() {
        for class in [SchedClass::Priority, SchedClass::ExpDist, SchedClass::Goodness] {
            let mut sched = Scheduler::new(config(class));
            let mut cpu = RecordingCpu::new();
            for n in 1..=4 {
                sched.admit(pid(n), n as i32 * 2).unwrap();
            }
            for _ in 0..40 {
                sched.resched(&mut cpu);
                assert!(!sched.ready_queue().contains(Pid::IDLE));
                assert_eq!(sched.proc(sched.current()).unwrap().state, ProcState::Current);
                assert_eq!(sched.ready_queue().len(), 3);
            }
        }
    }

    #[test]
    fn test_expdist_uses_sample_and_extremity_removal() {
        let mut sched = Scheduler::with_sampler(
            config(SchedClass::ExpDist),
            ScriptedSampler::new(&[15.0, 0.0, 500.0]),
        );
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 10).unwrap();
        sched.admit(pid(2), 20).unwrap();
        sched.admit(pid(3), 30).unwrap();

        // r = 15 -> chave 20 (membro interior)
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(2));
        assert_eq!(sched.ready_queue().len(), 2);

        // r = 0 -> abaixo do intervalo, menor chave
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(1));
        assert!(sched.ready_queue().contains(pid(2)));

        // r = 500 -> acima do intervalo, maior chave
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(3));
        assert_eq!(sched.remaining_quantum(), QUANTUM);
        assert_eq!(sched.ready_queue().len(), 2);
    }

    #[test]
    fn test_expdist_can_reselect_outgoing() {
        let mut sched =
            Scheduler::with_sampler(config(SchedClass::ExpDist), ScriptedSampler::new(&[1.0]));
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 5).unwrap();
        sched.admit(pid(2), 50).unwrap();

        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(1));
        match sched.reschedule() {
            Dispatch::Switch(pending) => {
                assert!(pending.is_self_switch());
                unsafe { pending.commit(&mut cpu) };
            }
            Dispatch::Continue => panic!("ExpDist sempre decide uma troca"),
        }
        assert_eq!(sched.current(), pid(1));
    }

    #[test]
    fn test_goodness_quantum_follows_counter() {
        let mut sched = Scheduler::new(config(SchedClass::Goodness));
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 6).unwrap();
        sched.admit(pid(2), 4).unwrap();

        // época 1: g(1) = 12, g(2) = 8
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(1));
        assert_eq!(sched.remaining_quantum(), 6);

        // usa 2 ticks: contador 4, goodness 10 > 8
        assert!(!sched.tick());
        assert!(!sched.tick());
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(1));
        assert_eq!(sched.remaining_quantum(), 4);

        // esgota a fatia: goodness 0, vez do 2
        for _ in 0..3 {
            assert!(!sched.tick());
        }
        assert!(sched.tick());
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(2));
        assert!(sched.proc(pid(1)).unwrap().epoch.quantum_exhausted);
        assert_eq!(sched.remaining_quantum(), 4);

        // todos esgotados: nova época, sem bônus
        for _ in 0..4 {
            sched.tick();
        }
        sched.resched(&mut cpu);
        assert_eq!(sched.stats().epochs, 2);
        assert_eq!(sched.current(), pid(1));
        assert_eq!(sched.remaining_quantum(), 6);
        assert_eq!(sched.proc(pid(2)).unwrap().epoch.counter, 4);
    }

    #[test]
    fn test_goodness_keeps_priority_as_queue_key() {
        let mut sched = Scheduler::new(config(SchedClass::Goodness));
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 3).unwrap();
        sched.admit(pid(2), 7).unwrap();
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(2));

        sched.resched(&mut cpu);
        for (member, key) in sched.ready_queue().iter() {
            assert_eq!(key, sched.proc(member).unwrap().priority);
        }
    }

    #[test]
    fn test_commit_saves_outgoing_context() {
        let mut sched = Scheduler::new(SchedConfig::default());
        let mut cpu = RecordingCpu::new();
        cpu.mask = IrqMask::KEYBOARD;
        sched
            .set_saved_context(pid(1), SavedContext::new(0xA000, IrqMask::TIMER))
            .unwrap();
        sched.admit(pid(1), 5).unwrap();

        sched.resched(&mut cpu);
        let idle = sched.proc(Pid::IDLE).unwrap();
        assert_eq!(idle.context.sp, 0x1000);
        assert_eq!(idle.context.irq_mask, IrqMask::KEYBOARD);
        assert_eq!(idle.state, ProcState::Ready);
        assert_eq!(cpu.last_loaded_sp, 0xA000);
        assert_eq!(cpu.mask, IrqMask::TIMER);
    }

    #[test]
    fn test_every_dispatch_targets_a_runnable_entry() {
        for class in [SchedClass::Priority, SchedClass::ExpDist, SchedClass::Goodness] {
            let mut sched = Scheduler::new(config(class));
            for n in 1..=3 {
                sched.admit(pid(n), 3).unwrap();
            }
            for round in 0..12 {
                let next = match sched.reschedule() {
                    Dispatch::Switch(pending) => pending.to(),
                    Dispatch::Continue => sched.current(),
                };
                assert!(sched.proc(next).unwrap().state.is_runnable());
                if round == 5 {
                    sched.block(sched.current()).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_invalid_lambda_falls_back_to_default() {
        for lambda in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let sched = Scheduler::new(SchedConfig {
                expdist_lambda: lambda,
                ..SchedConfig::default()
            });
            assert_eq!(sched.expdist_lambda(), EXPDIST_LAMBDA);
        }

        let sched = Scheduler::new(SchedConfig {
            expdist_lambda: 0.25,
            ..SchedConfig::default()
        });
        assert_eq!(sched.expdist_lambda(), 0.25);
    }

    #[test]
    fn test_dump_walks_populated_queue() {
        let mut sched = Scheduler::new(SchedConfig::default());
        sched.admit(pid(1), 4).unwrap();
        sched.admit(pid(2), 9).unwrap();
        sched.admit(pid(3), 4).unwrap();

        sched.dump();
        super::super::debug::dump_ready_queue(sched.ready_queue());
        // dump só lê: nada muda
        assert_eq!(sched.ready_queue().len(), 3);
        assert_eq!(sched.current(), Pid::IDLE);
        assert_eq!(sched.stats(), SchedStats::default());
    }

    #[test]
    fn test_admission_rules() {
        let mut sched = Scheduler::new(SchedConfig::default());
        assert_eq!(sched.admit(Pid::IDLE, 5), Err(SchedError::EINVAL));
        assert_eq!(sched.admit(pid(1), 0), Err(SchedError::EINVAL));
        assert_eq!(sched.admit(pid(500), 5), Err(SchedError::ESRCH));
        sched.admit(pid(1), 5).unwrap();
        assert_eq!(sched.admit(pid(1), 5), Err(SchedError::EBUSY));
        assert!(sched.proc(pid(1)).unwrap().epoch.is_new);
    }

    #[test]
    fn test_block_ready_and_release() {
        let mut sched = Scheduler::new(SchedConfig::default());
        sched.admit(pid(1), 5).unwrap();
        sched.admit(pid(2), 5).unwrap();

        sched.block(pid(2)).unwrap();
        assert!(!sched.ready_queue().contains(pid(2)));
        assert_eq!(sched.block(pid(2)), Err(SchedError::EBUSY));

        sched.make_ready(pid(2)).unwrap();
        assert!(sched.ready_queue().contains(pid(2)));
        assert_eq!(sched.make_ready(pid(2)), Err(SchedError::EBUSY));

        sched.release(pid(1)).unwrap();
        assert!(!sched.ready_queue().contains(pid(1)));
        assert_eq!(*sched.proc(pid(1)).unwrap(), ProcEntry::empty());
        assert_eq!(sched.release(pid(1)), Err(SchedError::ESRCH));
        assert_eq!(sched.make_ready(pid(1)), Err(SchedError::ESRCH));
    }

    #[test]
    fn test_set_priority_requeues_ready_member() {
        let mut sched = Scheduler::new(SchedConfig::default());
        sched.admit(pid(1), 5).unwrap();
        sched.admit(pid(2), 10).unwrap();

        assert_eq!(sched.set_priority(pid(1), 20), Ok(5));
        assert_eq!(sched.ready_queue().last(), Some(pid(1)));
        assert_eq!(sched.ready_queue().key_of(pid(1)), Some(20));
        assert_eq!(sched.set_priority(pid(3), 20), Err(SchedError::ESRCH));
    }

    #[test]
    fn test_mode_switch_between_decisions() {
        let mut sched = Scheduler::new(SchedConfig::default());
        let mut cpu = RecordingCpu::new();
        sched.admit(pid(1), 2).unwrap();
        sched.admit(pid(2), 8).unwrap();
        sched.resched(&mut cpu);
        assert_eq!(sched.current(), pid(2));

        sched.set_sched_class(SchedClass::Goodness);
        assert_eq!(sched.sched_class(), SchedClass::Goodness);
        sched.resched(&mut cpu);
        // g(2) = 16 > g(1) = 4
        assert_eq!(sched.current(), pid(2));
        assert_eq!(sched.stats().epochs, 1);
    }
}
