//! Códigos de Erro do núcleo de IPC
//!
//! Sistema de erros unificado para portas, syscalls e o protocolo do devman.
//! Erros são retornados como valores negativos: em RAX na fronteira de
//! syscall, e na palavra de resultado das mensagens de resposta na
//! fronteira de protocolo entre processos.
//!
//! Nenhum desses erros é fatal: todos são recuperáveis no ponto em que
//! são detectados.

use core::fmt;

/// Enum de erros do sistema.
///
/// Valores são i32 para permitir representação negativa em isize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SysError {
    // === Erros Gerais (1-15) ===
    /// Porta, dispositivo ou conexão inexistente
    NotFound = 2,
    /// Argumento inválido
    InvalidArgument = 4,

    // === Erros de Handle (16-31) ===
    /// Handle inválido ou fechado
    BadHandle = 16,

    // === Erros de Memória (32-47) ===
    /// Pool de objetos sem slot livre
    ResourceExhausted = 32,
    /// Endereço inválido (ponteiro nulo vindo do usuário)
    BadAddress = 33,

    // === Erros de IO (48-63) ===
    /// Hook do driver reportou falha
    OperationFailed = 48,

    // === Erros de Sistema (240-255) ===
    /// Syscall não implementada
    NotImplemented = 254,
    /// Erro desconhecido
    Unknown = 255,
}

impl SysError {
    /// Converte para isize negativo (formato de retorno da syscall)
    #[inline]
    pub fn as_isize(self) -> isize {
        -(self as i32 as isize)
    }

    /// Converte para i64 negativo (palavra de resultado em respostas IPC)
    #[inline]
    pub fn as_code(self) -> i64 {
        -(self as i32 as i64)
    }

    /// Cria erro a partir de código negativo
    pub fn from_code(code: i64) -> Option<Self> {
        if code >= 0 {
            return None;
        }
        let abs = code.unsigned_abs();
        match abs {
            2 => Some(Self::NotFound),
            4 => Some(Self::InvalidArgument),
            16 => Some(Self::BadHandle),
            32 => Some(Self::ResourceExhausted),
            33 => Some(Self::BadAddress),
            48 => Some(Self::OperationFailed),
            254 => Some(Self::NotImplemented),
            _ => Some(Self::Unknown),
        }
    }

    /// Nome curto, para logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::InvalidArgument => "invalid argument",
            Self::BadHandle => "bad handle",
            Self::ResourceExhausted => "resource exhausted",
            Self::BadAddress => "bad address",
            Self::OperationFailed => "operation failed",
            Self::NotImplemented => "not implemented",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resultado: Ok(valor) ou Err(SysError)
pub type SysResult<T> = Result<T, SysError>;

/// Helper para converter SysResult<usize> em isize para retorno
pub fn result_to_isize(result: SysResult<usize>) -> isize {
    match result {
        Ok(val) => val as isize,
        Err(e) => e.as_isize(),
    }
}
