// =============================================================================
// LOGGING DO NÚCLEO DE IPC - ZERO OVERHEAD
// =============================================================================
//
// Mesmo esquema do logger do kernel:
// - Filtro em tempo de compilação via features do Cargo
// - Com feature "no_logs", TODOS os macros só avaliam os argumentos
//   (nada é emitido, nenhum binding fica sem uso)
// - SEM core::fmt - apenas strings literais + um valor em hex
// - Escreve no ConsoleSink instalado (ver debug::console)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros críticos
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal de execução
// - DEBUG: Informações de debugging
// - TRACE: Detalhes extremos (cada send/receive)
//
// USO:
//   kinfo!("(IPC) Inicializando...");          // Apenas string
//   kwarn!("(IPC) delete: porta=", id);        // String + hex
//
// =============================================================================

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";
pub const P_OK: &str = "\x1b[32m[OK]\x1b[0m ";

/// Corpo comum de todos os macros de nível.
#[doc(hidden)]
#[macro_export]
macro_rules! __klog_line {
    ($prefix:expr, $msg:expr) => {{
        $crate::debug::console::emit_str($prefix);
        $crate::debug::console::emit_str($msg);
        $crate::debug::console::emit_nl();
    }};
    ($prefix:expr, $msg:expr, $val:expr) => {{
        $crate::debug::console::emit_str($prefix);
        $crate::debug::console::emit_str($msg);
        $crate::debug::console::emit_hex($val as u64);
        $crate::debug::console::emit_nl();
    }};
}

/// Corpo dos níveis desligados: avalia os argumentos e descarta.
#[doc(hidden)]
#[macro_export]
macro_rules! __klog_discard {
    ($($t:expr),* $(,)?) => {{
        let _ = ($(&$t,)*);
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_ERROR, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_ERROR, $msg, $val)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {
        $crate::__klog_discard!($($t)*)
    };
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_WARN, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_WARN, $msg, $val)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {
        $crate::__klog_discard!($($t)*)
    };
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_INFO, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_INFO, $msg, $val)
    };
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {
        $crate::__klog_discard!($($t)*)
    };
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_trace", feature = "log_debug")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_DEBUG, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_DEBUG, $msg, $val)
    };
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_trace", feature = "log_debug")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {
        $crate::__klog_discard!($($t)*)
    };
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_TRACE, $msg)
    };
    ($msg:expr, $val:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_TRACE, $msg, $val)
    };
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {
        $crate::__klog_discard!($($t)*)
    };
}

// =============================================================================
// MACROS DE STATUS
// =============================================================================

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {
        $crate::__klog_line!($crate::debug::klog::P_OK, $msg)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {
        $crate::__klog_discard!($($t)*)
    };
}
