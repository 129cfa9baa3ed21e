//! # Port Registry
//!
//! Tabela id → porta mais os dois slabs (portas e mensagens). Tudo aqui
//! roda com o lock do [`IpcSpace`](crate::ipc::IpcSpace) adquirido; o
//! registry em si não sabe nada de threads além de guardar `ThreadRef`s.

use alloc::vec::Vec;

use super::{Port, PortId};
use crate::ipc::config::IpcConfig;
use crate::ipc::message::{BroadcastMask, IpcMessage, QueuedMessage};
use crate::klib::HashTable;
use crate::mm::{SlabCache, SlabKey};
use crate::sched::{ProcessId, ThreadRef};
use crate::sys::{SysError, SysResult};

// ============================================================================
// PORT REGISTRY
// ============================================================================

/// Registry de portas
pub struct PortRegistry {
    /// Porta por ID
    table: HashTable<PortId, SlabKey>,
    ports: SlabCache<Port>,
    messages: SlabCache<QueuedMessage>,
    /// Próximo ID (estritamente crescente)
    next_id: u64,
}

impl PortRegistry {
    pub fn new(config: &IpcConfig) -> Self {
        Self {
            table: HashTable::new(config.table_buckets),
            ports: SlabCache::new("ipc_port", config.max_ports),
            messages: SlabCache::new("ipc_message", config.max_messages),
            next_id: 1,
        }
    }

    /// Cria nova porta
    pub fn create(&mut self) -> SysResult<PortId> {
        let id = PortId(self.next_id);
        let key = self
            .ports
            .alloc(Port::new(id))
            .ok_or(SysError::ResourceExhausted)?;

        // Só consome o ID depois de conseguir o slot
        self.next_id += 1;
        self.table.insert(id, key);
        Ok(id)
    }

    /// Remove a porta e descarta as mensagens enfileiradas.
    ///
    /// Devolve a porta para o chamador tratar os waiters.
    pub fn remove(&mut self, id: PortId) -> SysResult<Port> {
        let key = self.table.remove(&id).ok_or(SysError::NotFound)?;
        let mut port = self.ports.free(key).ok_or(SysError::NotFound)?;

        for msg_key in port.pending.drain(..) {
            self.messages.free(msg_key);
        }
        Ok(port)
    }

    fn lookup(&self, id: PortId) -> SysResult<&Port> {
        let key = self.table.get(&id).ok_or(SysError::NotFound)?;
        self.ports.get(*key).ok_or(SysError::NotFound)
    }

    fn lookup_mut(&mut self, id: PortId) -> SysResult<&mut Port> {
        let key = self.table.get(&id).ok_or(SysError::NotFound)?;
        self.ports.get_mut(*key).ok_or(SysError::NotFound)
    }

    /// Enfileira `msg` e retira (no máximo) um waiter para ser acordado.
    pub fn push_message(
        &mut self,
        id: PortId,
        sender: ProcessId,
        msg: &IpcMessage,
    ) -> SysResult<Option<ThreadRef>> {
        let port_key = *self.table.get(&id).ok_or(SysError::NotFound)?;
        if self.ports.get(port_key).is_none() {
            return Err(SysError::NotFound);
        }

        let msg_key = self
            .messages
            .alloc(QueuedMessage { sender, msg: *msg })
            .ok_or(SysError::ResourceExhausted)?;

        match self.ports.get_mut(port_key) {
            Some(port) => {
                port.pending.push_back(msg_key);
                Ok(port.waiters.pop())
            }
            None => {
                self.messages.free(msg_key);
                Err(SysError::NotFound)
            }
        }
    }

    /// Retira a mensagem mais antiga e libera seu slot.
    pub fn pop_message(&mut self, id: PortId) -> SysResult<Option<QueuedMessage>> {
        let port = self.lookup_mut(id)?;
        let Some(msg_key) = port.pending.pop_front() else {
            return Ok(None);
        };
        Ok(self.messages.free(msg_key))
    }

    /// Coloca `thread` na fila de espera da porta.
    pub fn enqueue_waiter(&mut self, id: PortId, thread: ThreadRef) -> SysResult<()> {
        self.lookup_mut(id)?.waiters.add(thread);
        Ok(())
    }

    pub fn pending(&self, id: PortId) -> SysResult<usize> {
        Ok(self.lookup(id)?.pending())
    }

    pub fn waiters(&self, id: PortId) -> SysResult<usize> {
        Ok(self.lookup(id)?.waiters())
    }

    pub fn set_broadcast_mask(&mut self, id: PortId, mask: BroadcastMask) -> SysResult<()> {
        self.lookup_mut(id)?.broadcast = mask;
        Ok(())
    }

    /// Entrega uma cópia de `msg` a toda porta cuja máscara intersecta `mask`.
    ///
    /// Best-effort: portas que não couberem no slab de mensagens ficam sem
    /// a cópia. Threads a acordar vão para `wakes`. Retorna entregas feitas.
    pub fn broadcast(
        &mut self,
        mask: BroadcastMask,
        sender: ProcessId,
        msg: &IpcMessage,
        wakes: &mut Vec<ThreadRef>,
    ) -> usize {
        let mut targets: Vec<PortId> = Vec::new();
        for key in self.table.values() {
            if let Some(port) = self.ports.get(*key) {
                if port.broadcast.intersects(mask) {
                    targets.push(port.id);
                }
            }
        }
        // Ordem de criação, para a entrega ser determinística
        targets.sort_unstable();

        let mut delivered = 0;
        for id in targets {
            match self.push_message(id, sender, msg) {
                Ok(waiter) => {
                    delivered += 1;
                    wakes.extend(waiter);
                }
                Err(err) => {
                    crate::kwarn!("(IPC) broadcast: entrega falhou para porta=", id.0);
                    crate::ktrace!(err.as_str());
                }
            }
        }
        delivered
    }

    /// Portas vivas.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, id: PortId) -> bool {
        self.table.contains_key(&id)
    }

    /// Mensagens enfileiradas em todas as portas.
    pub fn queued_messages(&self) -> usize {
        self.messages.len()
    }
}
