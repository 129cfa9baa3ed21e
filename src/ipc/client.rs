//! Cliente de portas por processo.
//!
//! O devman (e qualquer servidor em espaço de usuário) fala com o kernel
//! através do trait [`PortClient`]. [`IpcClient`] é a implementação direta
//! sobre um [`IpcSpace`], com o remetente fixado no processo dono.

use alloc::sync::Arc;

use super::message::{BroadcastMask, IpcMessage};
use super::port::PortId;
use super::space::IpcSpace;
use crate::sched::ProcessId;
use crate::sys::SysResult;

/// Operações de porta vistas por um processo.
pub trait PortClient {
    fn port_create(&self) -> SysResult<PortId>;

    fn port_delete(&self, port: PortId) -> SysResult<()>;

    fn port_send(&self, port: PortId, msg: &IpcMessage) -> SysResult<()>;

    /// Bloqueia até chegar mensagem; devolve o remetente.
    fn port_receive(&self, port: PortId, out: &mut IpcMessage) -> SysResult<ProcessId>;

    /// Não bloqueia: `Ok(None)` com a porta vazia.
    fn port_try_receive(&self, port: PortId, out: &mut IpcMessage)
        -> SysResult<Option<ProcessId>>;

    fn port_set_broadcast_mask(&self, port: PortId, mask: BroadcastMask) -> SysResult<()>;
}

/// Cliente ligado a um processo.
#[derive(Clone)]
pub struct IpcClient {
    space: Arc<IpcSpace>,
    pid: ProcessId,
}

impl IpcClient {
    pub fn new(space: Arc<IpcSpace>, pid: ProcessId) -> Self {
        Self { space, pid }
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn space(&self) -> &Arc<IpcSpace> {
        &self.space
    }

    /// Broadcast em nome deste processo.
    pub fn port_send_broadcast(&self, mask: BroadcastMask, msg: &IpcMessage) -> SysResult<usize> {
        self.space.send_broadcast(mask, msg, self.pid)
    }
}

impl PortClient for IpcClient {
    fn port_create(&self) -> SysResult<PortId> {
        self.space.create_port()
    }

    fn port_delete(&self, port: PortId) -> SysResult<()> {
        self.space.delete_port(port)
    }

    fn port_send(&self, port: PortId, msg: &IpcMessage) -> SysResult<()> {
        self.space.send(port, msg, self.pid)
    }

    fn port_receive(&self, port: PortId, out: &mut IpcMessage) -> SysResult<ProcessId> {
        self.space.receive(port, out)
    }

    fn port_try_receive(
        &self,
        port: PortId,
        out: &mut IpcMessage,
    ) -> SysResult<Option<ProcessId>> {
        self.space.try_receive(port, out)
    }

    fn port_set_broadcast_mask(&self, port: PortId, mask: BroadcastMask) -> SysResult<()> {
        self.space.set_broadcast_mask(port, mask)
    }
}
