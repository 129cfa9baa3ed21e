//! Regiões de memória compartilhada (interface).
//!
//! O devman só aceita e fecha regiões; quem cria, mapeia e desmapeia é o
//! serviço de memória compartilhada do sistema.

use crate::sys::SysResult;

/// ID de região compartilhada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShmId(pub u64);

/// Região aceita e mapeada no processo do servidor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShmMapping {
    pub base: usize,
    pub size: usize,
}

/// Serviço de memória compartilhada.
pub trait SharedMemory {
    /// Aceita a região oferecida pelo cliente e a mapeia localmente.
    fn accept(&self, id: ShmId) -> SysResult<ShmMapping>;

    /// Desfaz um `accept` bem-sucedido.
    fn close(&self, id: ShmId);
}
