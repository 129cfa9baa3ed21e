//! # IPC Space
//!
//! Serviço de portas: registry protegido por um único spinlock mais o
//! scheduler usado para bloquear e acordar receivers.
//!
//! ## Regras de lock
//!
//! - Toda mutação de registry, fila de mensagens e wait queue acontece com
//!   `registry` travado
//! - O lock NUNCA é mantido através de `suspend_current`
//! - `wake_up` é chamado depois de soltar o lock

use alloc::sync::Arc;
use alloc::vec::Vec;

use super::config::IpcConfig;
use super::message::{BroadcastMask, IpcMessage};
use super::port::{PortId, PortRegistry};
use crate::sched::{ProcessId, Scheduler};
use crate::sync::Spinlock;
use crate::sys::{SysError, SysResult};

/// Espaço de portas do sistema.
pub struct IpcSpace {
    registry: Spinlock<PortRegistry>,
    sched: Arc<dyn Scheduler>,
}

impl IpcSpace {
    pub fn new(config: IpcConfig, sched: Arc<dyn Scheduler>) -> Self {
        crate::kinfo!("(IPC) Inicializando espaço de portas, max_ports=", config.max_ports);
        Self {
            registry: Spinlock::new(PortRegistry::new(&config)),
            sched,
        }
    }

    pub fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.sched
    }

    // =========================================================================
    // CICLO DE VIDA
    // =========================================================================

    /// Cria uma porta.
    pub fn create_port(&self) -> SysResult<PortId> {
        let result = self.registry.lock().create();
        match result {
            Ok(id) => crate::ktrace!("(IPC) create: porta=", id.0),
            Err(_) => crate::kwarn!("(IPC) create: pool de portas esgotado"),
        }
        result
    }

    /// Remove uma porta.
    ///
    /// Mensagens enfileiradas são descartadas. Receivers bloqueados são
    /// acordados e, ao revalidar a porta, recebem `NotFound`.
    pub fn delete_port(&self, id: PortId) -> SysResult<()> {
        let mut port = self.registry.lock().remove(id)?;

        if !port.waiters.is_empty() {
            crate::kwarn!(
                "(IPC) delete: porta com threads aguardando, waiters=",
                port.waiters.len()
            );
        }
        crate::ktrace!("(IPC) delete: porta=", id.0);

        for thread in port.waiters.drain() {
            self.sched.wake_up(thread);
        }
        Ok(())
    }

    // =========================================================================
    // MENSAGENS
    // =========================================================================

    /// Envia `msg` para a porta, acordando no máximo um receiver.
    pub fn send(&self, id: PortId, msg: &IpcMessage, sender: ProcessId) -> SysResult<()> {
        let waiter = self.registry.lock().push_message(id, sender, msg)?;
        crate::ktrace!("(IPC) send: porta=", id.0);

        if let Some(thread) = waiter {
            self.sched.wake_up(thread);
        }
        Ok(())
    }

    /// Recebe a próxima mensagem, bloqueando enquanto a porta estiver vazia.
    ///
    /// Copia o payload para `out` e devolve o remetente.
    pub fn receive(&self, id: PortId, out: &mut IpcMessage) -> SysResult<ProcessId> {
        let mut registry = self.registry.lock();
        loop {
            // Revalida a porta a cada volta: pode ter sido removida
            if let Some(queued) = registry.pop_message(id)? {
                drop(registry);
                *out = queued.msg;
                return Ok(queued.sender);
            }

            registry.enqueue_waiter(id, self.sched.current())?;
            drop(registry);

            self.sched.suspend_current();

            registry = self.registry.lock();
        }
    }

    /// Versão não-bloqueante de [`receive`](Self::receive).
    pub fn try_receive(&self, id: PortId, out: &mut IpcMessage) -> SysResult<Option<ProcessId>> {
        let queued = self.registry.lock().pop_message(id)?;
        Ok(queued.map(|q| {
            *out = q.msg;
            q.sender
        }))
    }

    /// Mensagens aguardando na porta.
    pub fn pending(&self, id: PortId) -> SysResult<usize> {
        self.registry.lock().pending(id)
    }

    /// Threads bloqueadas em receive na porta.
    pub fn waiting(&self, id: PortId) -> SysResult<usize> {
        self.registry.lock().waiters(id)
    }

    // =========================================================================
    // BROADCAST
    // =========================================================================

    pub fn set_broadcast_mask(&self, id: PortId, mask: BroadcastMask) -> SysResult<()> {
        self.registry.lock().set_broadcast_mask(id, mask)
    }

    /// Entrega `msg` a todas as portas inscritas em `mask`.
    ///
    /// Retorna o número de portas que receberam a cópia.
    pub fn send_broadcast(
        &self,
        mask: BroadcastMask,
        msg: &IpcMessage,
        sender: ProcessId,
    ) -> SysResult<usize> {
        if mask.is_empty() {
            return Err(SysError::InvalidArgument);
        }

        let mut wakes = Vec::new();
        let delivered = self.registry.lock().broadcast(mask, sender, msg, &mut wakes);
        crate::ktrace!("(IPC) broadcast: entregas=", delivered);

        for thread in wakes {
            self.sched.wake_up(thread);
        }
        Ok(delivered)
    }

    // =========================================================================
    // INTROSPECÇÃO
    // =========================================================================

    pub fn port_count(&self) -> usize {
        self.registry.lock().len()
    }

    pub fn contains(&self, id: PortId) -> bool {
        self.registry.lock().contains(id)
    }
}
