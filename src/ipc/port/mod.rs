//! # Port
//!
//! Uma porta é uma fila FIFO de mensagens mais uma fila de receivers
//! bloqueados. Portas vivem dentro do [`PortRegistry`] e só são tocadas
//! com o lock do registry.

mod registry;

use alloc::collections::VecDeque;

use super::message::BroadcastMask;
use crate::mm::SlabKey;
use crate::sched::WaitQueue;

pub use registry::PortRegistry;

/// ID de porta. Nunca reutilizado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortId(pub u64);

impl PortId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Estado de uma porta.
pub struct Port {
    pub id: PortId,
    /// Chaves do slab de mensagens, na ordem de envio
    pub(crate) pending: VecDeque<SlabKey>,
    /// Receivers bloqueados
    pub(crate) waiters: WaitQueue,
    pub(crate) broadcast: BroadcastMask,
}

impl Port {
    fn new(id: PortId) -> Self {
        Self {
            id,
            pending: VecDeque::new(),
            waiters: WaitQueue::new(),
            broadcast: BroadcastMask::empty(),
        }
    }

    /// Mensagens aguardando receive.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Threads bloqueadas em receive.
    pub fn waiters(&self) -> usize {
        self.waiters.len()
    }
}
