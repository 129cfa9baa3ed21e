//! # IPC Message
//!
//! Payload fixo de seis palavras. A palavra 0 é o código da mensagem; o
//! significado das demais depende do protocolo (ver `devman::protocol`).

use bitflags::bitflags;

use crate::sched::ProcessId;

/// Palavras por mensagem.
pub const MSG_WORDS: usize = 6;

/// Payload de uma mensagem de porta.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpcMessage {
    pub data: [u64; MSG_WORDS],
}

impl IpcMessage {
    /// Mensagem com `code` na palavra 0 e o resto zerado.
    pub const fn new(code: u64) -> Self {
        let mut data = [0; MSG_WORDS];
        data[0] = code;
        Self { data }
    }

    pub const fn from_words(data: [u64; MSG_WORDS]) -> Self {
        Self { data }
    }

    /// Código (palavra 0).
    #[inline]
    pub const fn code(&self) -> u64 {
        self.data[0]
    }

    /// Palavra `index`; fora do intervalo lê como 0.
    #[inline]
    pub fn word(&self, index: usize) -> u64 {
        self.data.get(index).copied().unwrap_or(0)
    }
}

/// Mensagem parada na fila de uma porta.
#[derive(Debug, Clone, Copy)]
pub struct QueuedMessage {
    pub sender: ProcessId,
    pub msg: IpcMessage,
}

bitflags! {
    /// Categorias de broadcast que uma porta aceita.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BroadcastMask: u64 {
        /// Anúncios de dispositivos.
        const DEVICE = 1 << 0;
    }
}
