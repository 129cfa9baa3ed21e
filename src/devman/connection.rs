//! Conexões cliente → dispositivo.
//!
//! O cliente só vê um [`ConnHandle`]: índice + geração no slab de
//! conexões. Um handle fechado ou forjado simplesmente não resolve.

use super::device::DeviceId;
use super::shmem::ShmId;
use crate::mm::SlabKey;

/// Handle opaco de conexão (palavra 1 da resposta de OPEN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnHandle(pub(crate) SlabKey);

impl ConnHandle {
    /// Nunca é 0.
    pub fn to_raw(self) -> u64 {
        self.0.to_raw()
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(SlabKey::from_raw(raw))
    }
}

/// Conexão aberta
#[derive(Debug)]
pub struct Connection {
    pub device: DeviceId,
    pub shm: ShmId,
    /// Base do buffer compartilhado no espaço do servidor
    pub base: usize,
    pub size: usize,
    /// Requisições desta conexão em voo ou na fila
    pub(crate) outstanding: usize,
    /// CLOSE recebido; libera quando `outstanding` zerar
    pub(crate) closing: bool,
}

impl Connection {
    pub fn new(device: DeviceId, shm: ShmId) -> Self {
        Self {
            device,
            shm,
            base: 0,
            size: 0,
            outstanding: 0,
            closing: false,
        }
    }
}
