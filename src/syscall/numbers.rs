//! # Números de Syscall - IPC
//!
//! | Range     | Categoria |
//! |-----------|-----------|
//! | 0x30-0x3F | IPC       |
//!
//! Números são ABI: uma vez publicados, não mudam.

// ============================================================================
// IPC (0x30 - 0x3F)
// ============================================================================

/// Cria uma porta.
///
/// Retorno: ID da porta
pub const SYS_IPC_PORT_CREATE: usize = 0x30;

/// Remove uma porta.
///
/// Args: (port)
pub const SYS_IPC_PORT_DELETE: usize = 0x31;

/// Envia mensagem.
///
/// Args: (port, msg_ptr: *const [u64; 6])
pub const SYS_IPC_PORT_SEND: usize = 0x32;

/// Recebe mensagem (bloqueante).
///
/// Args: (port, msg_ptr: *mut [u64; 6])
/// Retorno: PID do remetente
pub const SYS_IPC_PORT_RECEIVE: usize = 0x33;

/// Define máscara de broadcast da porta.
///
/// Args: (port, mask)
pub const SYS_IPC_PORT_SET_BROADCAST: usize = 0x34;

/// Envia para todas as portas inscritas na máscara.
///
/// Args: (mask, msg_ptr: *const [u64; 6])
/// Retorno: número de portas que receberam
pub const SYS_IPC_PORT_SEND_BROADCAST: usize = 0x35;

/// Mensagens aguardando na porta.
///
/// Args: (port)
pub const SYS_IPC_PORT_PENDING: usize = 0x36;

/// Primeiro número do range de IPC
pub const IPC_FIRST: usize = 0x30;

/// Último número do range de IPC
pub const IPC_LAST: usize = 0x3F;
