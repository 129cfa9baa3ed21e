//! # Device Server
//!
//! Lado servidor do devman: um processo que anuncia dispositivos e atende
//! OPEN/READ/WRITE/CLOSE na sua porta local.
//!
//! ## Despacho
//!
//! Cada dispositivo tem no máximo UMA requisição em voo:
//!
//! ```text
//!            READ/WRITE (Idle)
//!   Idle ─────────────────────────► Busy ──┐ READ/WRITE (Busy): enfileira
//!    ▲                               │ ◄───┘
//!    └──── finished, fila vazia ─────┘ finished, fila não vazia:
//!                                      despacha a cabeça, continua Busy
//! ```
//!
//! Toda a estrutura é mutada só pelo loop do servidor (`&mut self`); o
//! único lock envolvido é o do núcleo de IPC.

use alloc::boxed::Box;

use super::config::DevmanConfig;
use super::connection::{ConnHandle, Connection};
use super::device::{Device, DeviceCaps, DeviceId, DeviceOps, DeviceState, DeviceType};
use super::protocol::{
    Announce, CloseRequest, DevMsg, IoReply, IoRequest, OpenReply, OpenRequest,
};
use super::request::{DeviceRequest, RequestId, RequestOp, RequestStatus};
use super::shmem::SharedMemory;
use crate::ipc::{IpcMessage, PortClient, PortId};
use crate::klib::HashTable;
use crate::mm::{SlabCache, SlabKey};
use crate::sys::{SysError, SysResult};

/// Handler para mensagens que o servidor não trata (LOOKUP, desconhecidas).
pub type MessageHandler = Box<dyn FnMut(&IpcMessage) + Send>;

/// Servidor de dispositivos.
pub struct DeviceServer<C: PortClient> {
    ipc: C,
    shmem: Box<dyn SharedMemory + Send>,
    /// Porta onde chegam OPEN/READ/WRITE/CLOSE
    local_port: PortId,
    /// Porta do devman (destino dos ANNOUNCE)
    devman_port: PortId,
    next_id: u64,
    table: HashTable<DeviceId, SlabKey>,
    devices: SlabCache<Device>,
    conns: SlabCache<Connection>,
    requests: SlabCache<DeviceRequest>,
    handler: Option<MessageHandler>,
}

impl<C: PortClient> DeviceServer<C> {
    /// Cria o servidor e sua porta local.
    pub fn new(
        ipc: C,
        shmem: Box<dyn SharedMemory + Send>,
        devman_port: PortId,
        config: DevmanConfig,
    ) -> SysResult<Self> {
        let local_port = ipc.port_create()?;
        crate::kinfo!("(DevMan) Servidor iniciado, porta=", local_port.0);

        Ok(Self {
            ipc,
            shmem,
            local_port,
            devman_port,
            next_id: 0,
            table: HashTable::new(config.table_buckets),
            devices: SlabCache::new("dev", config.max_devices),
            conns: SlabCache::new("dev_conn", config.max_connections),
            requests: SlabCache::new("dev_req", config.max_requests),
            handler: None,
        })
    }

    pub fn local_port(&self) -> PortId {
        self.local_port
    }

    pub fn set_handler(&mut self, handler: MessageHandler) {
        self.handler = Some(handler);
    }

    // =========================================================================
    // REGISTRO
    // =========================================================================

    /// Registra um dispositivo e anuncia ao devman.
    ///
    /// Se o ANNOUNCE não puder ser enviado o dispositivo é desfeito e o
    /// erro do envio é devolvido.
    pub fn announce(
        &mut self,
        device_type: DeviceType,
        ops: Box<dyn DeviceOps>,
    ) -> SysResult<DeviceId> {
        let id = DeviceId(self.next_id);
        let key = self
            .devices
            .alloc(Device::new(id, device_type, ops))
            .ok_or(SysError::ResourceExhausted)?;
        self.next_id += 1;
        self.table.insert(id, key);

        let msg = Announce {
            device_type,
            port: self.local_port,
            device: id,
        }
        .encode();

        if let Err(err) = self.ipc.port_send(self.devman_port, &msg) {
            crate::kwarn!("(DevMan) announce: falha ao enviar, device=", id.0);
            self.table.remove(&id);
            self.devices.free(key);
            return Err(err);
        }

        crate::kinfo!("(DevMan) Dispositivo anunciado, id=", id.0);
        Ok(id)
    }

    // =========================================================================
    // LOOP
    // =========================================================================

    /// Loop de recepção. Só retorna quando o receive falha.
    pub fn run(&mut self, handler: Option<MessageHandler>) -> SysResult<()> {
        if let Some(handler) = handler {
            self.set_handler(handler);
        }

        let mut msg = IpcMessage::default();
        loop {
            if let Err(err) = self.ipc.port_receive(self.local_port, &mut msg) {
                crate::kerror!("(DevMan) receive falhou, encerrando loop");
                return Err(err);
            }
            self.handle_message(&msg);
        }
    }

    /// Trata uma mensagem recebida na porta local.
    pub fn handle_message(&mut self, msg: &IpcMessage) {
        match DevMsg::from_code(msg.code()) {
            Some(DevMsg::Open) => {
                if let Some(req) = OpenRequest::decode(msg) {
                    self.do_open(&req);
                }
            }
            Some(DevMsg::Close) => {
                if let Some(req) = CloseRequest::decode(msg) {
                    self.do_close(&req);
                }
            }
            Some(DevMsg::Read) | Some(DevMsg::Write) => {
                if let Some(req) = IoRequest::decode(msg) {
                    self.do_io(&req);
                }
            }
            _ => match self.handler.as_mut() {
                Some(handler) => handler(msg),
                None => crate::ktrace!("(DevMan) mensagem descartada, código=", msg.code()),
            },
        }
    }

    // =========================================================================
    // OPEN / CLOSE
    // =========================================================================

    fn do_open(&mut self, req: &OpenRequest) {
        let reply = match self.open_connection(req) {
            Ok(handle) => {
                crate::kdebug!("(DevMan) open: conexão=", handle.to_raw());
                OpenReply::ok(handle, req.tag)
            }
            Err(err) => {
                crate::kdebug!("(DevMan) open falhou, device=", req.device.0);
                OpenReply::err(err, req.tag)
            }
        };
        self.reply(req.reply_port, &reply.encode());
    }

    fn open_connection(&mut self, req: &OpenRequest) -> SysResult<ConnHandle> {
        let dev_key = *self.table.get(&req.device).ok_or(SysError::NotFound)?;

        let conn_key = self
            .conns
            .alloc(Connection::new(req.device, req.shm))
            .ok_or(SysError::ResourceExhausted)?;

        let mapping = match self.shmem.accept(req.shm) {
            Ok(mapping) => mapping,
            Err(err) => {
                self.conns.free(conn_key);
                return Err(err);
            }
        };

        if let Some(conn) = self.conns.get_mut(conn_key) {
            conn.base = mapping.base;
            conn.size = mapping.size;
        }

        let opened = match self.devices.get_mut(dev_key) {
            Some(dev) if dev.caps.contains(DeviceCaps::OPEN) => {
                dev.ops.open(req.device).map_err(SysError::from)
            }
            Some(_) => Ok(()),
            None => Err(SysError::NotFound),
        };

        if let Err(err) = opened {
            self.shmem.close(req.shm);
            self.conns.free(conn_key);
            return Err(err);
        }

        Ok(ConnHandle(conn_key))
    }

    /// Fecha a conexão assim que ela não tiver requisições pendentes.
    fn do_close(&mut self, req: &CloseRequest) {
        let handle = ConnHandle::from_raw(req.conn);
        let Some(conn) = self.conns.get_mut(handle.0) else {
            crate::kdebug!("(DevMan) close: conexão desconhecida=", req.conn);
            return;
        };

        conn.closing = true;
        if conn.outstanding == 0 {
            self.release_connection(handle);
        }
    }

    fn release_connection(&mut self, handle: ConnHandle) {
        if let Some(conn) = self.conns.free(handle.0) {
            self.shmem.close(conn.shm);
            crate::kdebug!("(DevMan) conexão liberada=", handle.to_raw());
        }
    }

    // =========================================================================
    // READ / WRITE
    // =========================================================================

    fn do_io(&mut self, io: &IoRequest) {
        match self.submit(io) {
            Ok(Some((id, result))) => {
                // Hook completou na hora
                if let Err(err) = self.request_finished(id, result) {
                    crate::kerror!("(DevMan) conclusão síncrona inválida");
                    crate::kerror!(err.as_str());
                }
            }
            Ok(None) => {}
            Err(err) => {
                crate::kdebug!("(DevMan) requisição rejeitada, conn=", io.conn);
                let reply = IoReply {
                    op: io.op,
                    result: err.as_code(),
                    tag: io.tag,
                };
                self.reply(io.reply_port, &reply.encode());
            }
        }
    }

    /// Cria a requisição e a coloca em voo ou na fila.
    ///
    /// Devolve `Some` quando o hook completou sincronamente.
    fn submit(&mut self, io: &IoRequest) -> SysResult<Option<(RequestId, i64)>> {
        let handle = ConnHandle::from_raw(io.conn);
        let conn = match self.conns.get(handle.0) {
            Some(conn) if !conn.closing => conn,
            _ => return Err(SysError::BadHandle),
        };

        let size = usize::try_from(io.size).map_err(|_| SysError::InvalidArgument)?;
        if size > conn.size {
            return Err(SysError::InvalidArgument);
        }

        let device = conn.device;
        let dev_key = *self.table.get(&device).ok_or(SysError::NotFound)?;

        let request = DeviceRequest {
            op: io.op,
            device,
            conn: handle,
            base: conn.base,
            size,
            reply_port: io.reply_port,
            tag: io.tag,
        };
        let id = RequestId(
            self.requests
                .alloc(request)
                .ok_or(SysError::ResourceExhausted)?,
        );

        if let Some(conn) = self.conns.get_mut(handle.0) {
            conn.outstanding += 1;
        }

        let busy = match self.devices.get_mut(dev_key) {
            Some(dev) if dev.request.is_some() => {
                dev.queue.push_back(id);
                true
            }
            Some(_) => false,
            None => return Err(SysError::NotFound),
        };

        if busy {
            crate::ktrace!("(DevMan) dispositivo ocupado, enfileirado=", device.0);
            return Ok(None);
        }
        Ok(self.perform(dev_key, id).map(|result| (id, result)))
    }

    /// Coloca `id` em voo no dispositivo e chama o hook.
    fn perform(&mut self, dev_key: SlabKey, id: RequestId) -> Option<i64> {
        let request = self.requests.get(id.0)?;
        let dev = self.devices.get_mut(dev_key)?;
        dev.request = Some(id);

        let status = match request.op {
            RequestOp::Read if dev.caps.contains(DeviceCaps::READ) => dev.ops.read(id, request),
            RequestOp::Write if dev.caps.contains(DeviceCaps::WRITE) => {
                dev.ops.write(id, request)
            }
            _ => RequestStatus::Pending,
        };

        match status {
            RequestStatus::Complete(result) => Some(result),
            RequestStatus::Pending => None,
        }
    }

    /// Completa a requisição em voo de um dispositivo.
    ///
    /// Envia a resposta, libera a requisição e despacha a próxima da fila.
    /// Conclusões síncronas encadeadas são processadas aqui mesmo, em loop.
    pub fn request_finished(&mut self, id: RequestId, result: i64) -> SysResult<()> {
        let mut next = self.finish_one(id, result)?;
        while let Some((id, result)) = next {
            next = self.finish_one(id, result)?;
        }
        Ok(())
    }

    fn finish_one(&mut self, id: RequestId, result: i64) -> SysResult<Option<(RequestId, i64)>> {
        let request = *self.requests.get(id.0).ok_or(SysError::NotFound)?;
        let dev_key = *self.table.get(&request.device).ok_or(SysError::NotFound)?;

        match self.devices.get(dev_key) {
            Some(dev) if dev.request == Some(id) => {}
            Some(_) => return Err(SysError::InvalidArgument),
            None => return Err(SysError::NotFound),
        }

        let reply = IoReply {
            op: request.op,
            result,
            tag: request.tag,
        };
        self.reply(request.reply_port, &reply.encode());
        self.requests.free(id.0);

        let close_now = match self.conns.get_mut(request.conn.0) {
            Some(conn) => {
                conn.outstanding = conn.outstanding.saturating_sub(1);
                conn.closing && conn.outstanding == 0
            }
            None => false,
        };
        if close_now {
            self.release_connection(request.conn);
        }

        let head = match self.devices.get_mut(dev_key) {
            Some(dev) => {
                let head = dev.queue.pop_front();
                if head.is_none() {
                    dev.request = None;
                }
                head
            }
            None => None,
        };

        Ok(head.and_then(|next| self.perform(dev_key, next).map(|r| (next, r))))
    }

    /// Envia uma resposta; falha de envio só é logada.
    fn reply(&self, port: PortId, msg: &IpcMessage) {
        if let Err(err) = self.ipc.port_send(port, msg) {
            crate::kwarn!("(DevMan) resposta não entregue, porta=", port.0);
            crate::ktrace!(err.as_str());
        }
    }

    // =========================================================================
    // INTROSPECÇÃO
    // =========================================================================

    pub fn device_state(&self, id: DeviceId) -> Option<DeviceState> {
        self.device(id).map(Device::state)
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        let key = self.table.get(&id)?;
        self.devices.get(*key)
    }

    pub fn request(&self, id: RequestId) -> Option<&DeviceRequest> {
        self.requests.get(id.0)
    }

    pub fn connection(&self, handle: ConnHandle) -> Option<&Connection> {
        self.conns.get(handle.0)
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn connection_count(&self) -> usize {
        self.conns.len()
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }
}
