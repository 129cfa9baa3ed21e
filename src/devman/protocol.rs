//! # Protocolo do Device Manager
//!
//! Mensagens de seis palavras trocadas entre clientes, o servidor de
//! dispositivos e o devman. Palavra 0 é sempre o código (ou o resultado,
//! na resposta de OPEN).
//!
//! | Mensagem   | Palavras                                        |
//! |------------|-------------------------------------------------|
//! | ANNOUNCE   | `[ANNOUNCE, tipo, porta_local, device, 0, 0]`   |
//! | OPEN       | `[OPEN, device, shm, porta_resp, tag, 0]`       |
//! | CLOSE      | `[CLOSE, conn, 0, 0, 0, 0]`                     |
//! | READ/WRITE | `[código, conn, tamanho, tag, porta_resp, 0]`   |
//! | resp. OPEN | `[resultado, conn, tag, 0, 0, 0]`               |
//! | resp. IO   | `[READ_REPLY/WRITE_REPLY, resultado, tag, ...]` |
//!
//! Resultados negativos são `SysError::as_code`.

use super::connection::ConnHandle;
use super::device::{DeviceId, DeviceType};
use super::request::RequestOp;
use super::shmem::ShmId;
use crate::ipc::{IpcMessage, PortId};
use crate::sys::{SysError, SysResult};

/// Códigos de mensagem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum DevMsg {
    Announce = 1000,
    Lookup = 1001,
    Open = 1002,
    Close = 1003,
    Read = 1004,
    Write = 1005,
    ReadReply = 1006,
    WriteReply = 1007,
}

impl DevMsg {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1000 => Some(Self::Announce),
            1001 => Some(Self::Lookup),
            1002 => Some(Self::Open),
            1003 => Some(Self::Close),
            1004 => Some(Self::Read),
            1005 => Some(Self::Write),
            1006 => Some(Self::ReadReply),
            1007 => Some(Self::WriteReply),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> u64 {
        self as u64
    }
}

impl RequestOp {
    pub const fn request_code(self) -> DevMsg {
        match self {
            Self::Read => DevMsg::Read,
            Self::Write => DevMsg::Write,
        }
    }

    pub const fn reply_code(self) -> DevMsg {
        match self {
            Self::Read => DevMsg::ReadReply,
            Self::Write => DevMsg::WriteReply,
        }
    }
}

// =============================================================================
// ANNOUNCE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announce {
    pub device_type: DeviceType,
    pub port: PortId,
    pub device: DeviceId,
}

impl Announce {
    pub fn encode(&self) -> IpcMessage {
        IpcMessage::from_words([
            DevMsg::Announce.code(),
            self.device_type as u64,
            self.port.0,
            self.device.0,
            0,
            0,
        ])
    }

    pub fn decode(msg: &IpcMessage) -> Option<Self> {
        if msg.code() != DevMsg::Announce.code() {
            return None;
        }
        Some(Self {
            device_type: DeviceType::from_u64(msg.word(1)),
            port: PortId(msg.word(2)),
            device: DeviceId(msg.word(3)),
        })
    }
}

// =============================================================================
// OPEN / CLOSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenRequest {
    pub device: DeviceId,
    pub shm: ShmId,
    pub reply_port: PortId,
    pub tag: u64,
}

impl OpenRequest {
    pub fn encode(&self) -> IpcMessage {
        IpcMessage::from_words([
            DevMsg::Open.code(),
            self.device.0,
            self.shm.0,
            self.reply_port.0,
            self.tag,
            0,
        ])
    }

    pub fn decode(msg: &IpcMessage) -> Option<Self> {
        if msg.code() != DevMsg::Open.code() {
            return None;
        }
        Some(Self {
            device: DeviceId(msg.word(1)),
            shm: ShmId(msg.word(2)),
            reply_port: PortId(msg.word(3)),
            tag: msg.word(4),
        })
    }
}

/// Resposta de OPEN: `result` 0 + handle, ou código negativo + 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenReply {
    pub result: i64,
    pub conn: u64,
    pub tag: u64,
}

impl OpenReply {
    pub fn ok(conn: ConnHandle, tag: u64) -> Self {
        Self {
            result: 0,
            conn: conn.to_raw(),
            tag,
        }
    }

    pub fn err(err: SysError, tag: u64) -> Self {
        Self {
            result: err.as_code(),
            conn: 0,
            tag,
        }
    }

    pub fn encode(&self) -> IpcMessage {
        IpcMessage::from_words([self.result as u64, self.conn, self.tag, 0, 0, 0])
    }

    pub fn decode(msg: &IpcMessage) -> Self {
        Self {
            result: msg.word(0) as i64,
            conn: msg.word(1),
            tag: msg.word(2),
        }
    }

    /// Handle aberto, ou o erro reportado pelo servidor.
    pub fn connection(&self) -> SysResult<ConnHandle> {
        match SysError::from_code(self.result) {
            Some(err) => Err(err),
            None => Ok(ConnHandle::from_raw(self.conn)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseRequest {
    pub conn: u64,
}

impl CloseRequest {
    pub fn encode(&self) -> IpcMessage {
        let mut msg = IpcMessage::new(DevMsg::Close.code());
        msg.data[1] = self.conn;
        msg
    }

    pub fn decode(msg: &IpcMessage) -> Option<Self> {
        if msg.code() != DevMsg::Close.code() {
            return None;
        }
        Some(Self { conn: msg.word(1) })
    }
}

// =============================================================================
// READ / WRITE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoRequest {
    pub op: RequestOp,
    pub conn: u64,
    pub size: u64,
    pub tag: u64,
    pub reply_port: PortId,
}

impl IoRequest {
    pub fn encode(&self) -> IpcMessage {
        IpcMessage::from_words([
            self.op.request_code().code(),
            self.conn,
            self.size,
            self.tag,
            self.reply_port.0,
            0,
        ])
    }

    pub fn decode(msg: &IpcMessage) -> Option<Self> {
        let op = match DevMsg::from_code(msg.code())? {
            DevMsg::Read => RequestOp::Read,
            DevMsg::Write => RequestOp::Write,
            _ => return None,
        };
        Some(Self {
            op,
            conn: msg.word(1),
            size: msg.word(2),
            tag: msg.word(3),
            reply_port: PortId(msg.word(4)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoReply {
    pub op: RequestOp,
    pub result: i64,
    pub tag: u64,
}

impl IoReply {
    pub fn encode(&self) -> IpcMessage {
        IpcMessage::from_words([
            self.op.reply_code().code(),
            self.result as u64,
            self.tag,
            0,
            0,
            0,
        ])
    }

    pub fn decode(msg: &IpcMessage) -> Option<Self> {
        let op = match DevMsg::from_code(msg.code())? {
            DevMsg::ReadReply => RequestOp::Read,
            DevMsg::WriteReply => RequestOp::Write,
            _ => return None,
        };
        Some(Self {
            op,
            result: msg.word(1) as i64,
            tag: msg.word(2),
        })
    }
}
