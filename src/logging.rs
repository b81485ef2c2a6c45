// =============================================================================
// KERNEL LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do núcleo de escalonamento com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM alocação - Apenas strings literais + um valor hex opcional
// - Emite pela fachada `log`: o kernel hospedeiro instala o sink (serial)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Violação de invariante (fila corrompida, chave não encontrada)
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal (init, troca de classe de escalonamento)
// - DEBUG: Início de época
// - TRACE: Cada decisão do dispatcher, fallback para o idle
//
// COMO USAR:
//   kinfo!("(Sched) Inicializando...");        // Apenas string
//   kinfo!("(Sched) PID=", pid.as_u32());      // String + hex
//
// =============================================================================

#[doc(hidden)]
pub use log;

/// Target usado em todos os registros emitidos por este crate.
pub const TARGET: &str = "forge_sched";

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    // Apenas string literal
    ($msg:expr) => {{
        $crate::logging::log::error!(target: $crate::logging::TARGET, "{}", $msg);
    }};
    // String + valor hex
    ($msg:expr, $val:expr) => {{
        $crate::logging::log::error!(
            target: $crate::logging::TARGET,
            "{}{:#x}",
            $msg,
            $val as u64
        );
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::logging::log::warn!(target: $crate::logging::TARGET, "{}", $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::log::warn!(
            target: $crate::logging::TARGET,
            "{}{:#x}",
            $msg,
            $val as u64
        );
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================
//
// kinfo! - Ativo com log_info, log_debug ou log_trace
//

#[cfg(any(feature = "log_info", feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::logging::log::info!(target: $crate::logging::TARGET, "{}", $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::log::info!(
            target: $crate::logging::TARGET,
            "{}{:#x}",
            $msg,
            $val as u64
        );
    }};
}

#[cfg(not(any(feature = "log_info", feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(any(feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::logging::log::debug!(target: $crate::logging::TARGET, "{}", $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::log::debug!(
            target: $crate::logging::TARGET,
            "{}{:#x}",
            $msg,
            $val as u64
        );
    }};
}

#[cfg(not(any(feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================
//
// ktrace! - Ativo apenas com log_trace
// Usado para detalhes extremos de cada decisão do dispatcher.
//

#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::logging::log::trace!(target: $crate::logging::TARGET, "{}", $msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::log::trace!(
            target: $crate::logging::TARGET,
            "{}{:#x}",
            $msg,
            $val as u64
        );
    }};
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK/FAIL)
// =============================================================================

/// kok! - Log de sucesso ([OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::logging::log::info!(target: $crate::logging::TARGET, "[OK] {}", $msg);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}
