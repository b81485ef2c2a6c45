//! # Scheduling Subsystem
//!
//! O módulo `sched` decide qual processo ocupa a CPU. Ele é dono da tabela de
//! processos e da fila de prontos, e delega a troca física de registradores
//! para a camada de arquitetura via [`ContextSwitch`].
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Fila de prontos:** lista circular ordenada por prioridade (`core::runqueue`).
//! - **Políticas:** prioridade estrita, ExpDist (jitter exponencial) e Goodness
//!   por épocas (`core::expdist`, `core::goodness`).
//! - **Dispatcher:** `Scheduler::reschedule` e o token `PendingSwitch`.
//!
//! ## 🏗️ Autoridade Global
//! Uma única instância de [`Scheduler`] vive em `SCHEDULER`, criada em
//! [`init`] e destruída em [`shutdown`]. Quem já possui o escalonador (testes,
//! kernels com outra sincronização) pode usar `Scheduler` diretamente.
//!
//! ## ⚠️ Pontos de Atenção
//! - **Single core:** um lock global, sem runqueues por CPU.
//! - **Troca fora do lock:** [`resched`] solta o `Mutex` antes de chamar a
//!   primitiva de troca, senão o próximo processo acharia o lock preso.

pub mod config;
pub mod core;
pub mod task;


use spin::Mutex;

pub use self::config::SchedConfig;
pub use self::core::{Dispatch, SchedClass, SchedStats, Scheduler};
pub use self::task::{ContextSwitch, IrqMask, ProcState};

use crate::sys::{SchedError, SchedResult};

/// Autoridade de escalonamento do sistema
static SCHEDULER: Mutex<Option<Scheduler>> = Mutex::new(None);

/// Inicializa o escalonador global. Substitui uma instância anterior.
pub fn init(config: SchedConfig) {
    crate::kinfo!("(Sched) Inicializando scheduler...");
    let mut guard = SCHEDULER.lock();
    if guard.is_some() {
        crate::kwarn!("(Sched) Scheduler já inicializado, recriando");
    }
    *guard = Some(Scheduler::new(config));
    crate::kok!("(Sched) Scheduler inicializado");
}

/// Destrói o escalonador global. Retorna `false` se não havia instância.
pub fn shutdown() -> bool {
    let was_live = SCHEDULER.lock().take().is_some();
    if was_live {
        crate::kinfo!("(Sched) Scheduler finalizado");
    }
    was_live
}

/// Executa `f` com acesso exclusivo ao escalonador global.
pub fn with_scheduler<R>(f: impl FnOnce(&mut Scheduler) -> R) -> SchedResult<R> {
    let mut guard = SCHEDULER.lock();
    let sched = guard.as_mut().ok_or(SchedError::EUNINIT)?;
    Ok(f(sched))
}

/// Ponto de decisão: yield, fim de quantum ou desbloqueio.
///
/// # Safety
///
/// Interrupções devem estar mascaradas, e ninguém pode chamar [`shutdown`] ou
/// [`init`] até a troca retornar: o token aponta para dentro da instância
/// global depois que o lock foi solto.
pub unsafe fn resched<C: ContextSwitch + ?Sized>(cpu: &mut C) -> SchedResult<()> {
    let dispatch = with_scheduler(|sched| sched.reschedule())?;
    if let Dispatch::Switch(pending) = dispatch {
        // SAFETY: garantido pelo chamador
        unsafe { pending.commit(cpu) };
    }
    Ok(())
}

/// Chamado a cada tick do timer. Retorna `true` se um `resched` é devido.
///
/// Usa `try_lock`: se o kernel já está dentro do escalonador, o tick é
/// descartado em vez de travar.
pub fn timer_tick() -> bool {
    match SCHEDULER.try_lock() {
        Some(mut guard) => guard.as_mut().map_or(false, |sched| sched.tick()),
        None => false,
    }
}

/// `getschedclass`
pub fn sched_class() -> SchedResult<SchedClass> {
    with_scheduler(|sched| sched.sched_class())
}

/// `setschedclass`
pub fn set_sched_class(class: SchedClass) -> SchedResult<()> {
    with_scheduler(|sched| sched.set_sched_class(class))
}

/// `setschedclass` a partir do valor cru da syscall
pub fn set_sched_class_raw(raw: u32) -> SchedResult<()> {
    set_sched_class(SchedClass::from_raw(raw)?)
}
