//! Abstração de dispositivo servido pelo devman.

use alloc::boxed::Box;
use alloc::collections::VecDeque;

use bitflags::bitflags;

use super::request::{DeviceRequest, RequestId, RequestStatus};
use crate::sys::SysError;

/// ID de dispositivo (local ao servidor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub u64);

/// Tipo de dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum DeviceType {
    Block = 0,
    Char = 1,
    Network = 2,
    Input = 3,
    Display = 4,
    Timer = 5,
    Bus = 6,
    Unknown = 255,
}

impl DeviceType {
    pub fn from_u64(value: u64) -> Self {
        match value {
            0 => Self::Block,
            1 => Self::Char,
            2 => Self::Network,
            3 => Self::Input,
            4 => Self::Display,
            5 => Self::Timer,
            6 => Self::Bus,
            _ => Self::Unknown,
        }
    }
}

bitflags! {
    /// Hooks que o driver implementa.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceCaps: u32 {
        const OPEN = 1 << 0;
        const READ = 1 << 1;
        const WRITE = 1 << 2;
    }
}

/// Erro de driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    NotSupported,
    Busy,
    IoError,
}

/// Qualquer falha reportada por hook vira `OperationFailed` na resposta.
impl From<DriverError> for SysError {
    fn from(_err: DriverError) -> Self {
        SysError::OperationFailed
    }
}

/// Operações de hardware de um dispositivo.
///
/// Só os hooks presentes em [`caps`](Self::caps) são chamados. Um hook de
/// leitura/escrita ausente deixa a requisição em voo até alguém chamar
/// `DeviceServer::request_finished` por fora.
pub trait DeviceOps: Send {
    fn caps(&self) -> DeviceCaps;

    /// Chamado a cada OPEN aceito
    fn open(&mut self, _device: DeviceId) -> Result<(), DriverError> {
        Ok(())
    }

    /// Inicia uma leitura para o buffer de `request`
    fn read(&mut self, _id: RequestId, _request: &DeviceRequest) -> RequestStatus {
        RequestStatus::Pending
    }

    /// Inicia uma escrita a partir do buffer de `request`
    fn write(&mut self, _id: RequestId, _request: &DeviceRequest) -> RequestStatus {
        RequestStatus::Pending
    }
}

/// Estado de despacho
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Nenhuma requisição em voo
    Idle,
    /// Uma requisição em voo (e talvez outras na fila)
    Busy,
}

/// Representação de um dispositivo
pub struct Device {
    pub id: DeviceId,
    pub device_type: DeviceType,
    pub(crate) ops: Box<dyn DeviceOps>,
    pub(crate) caps: DeviceCaps,
    /// Requisição em voo
    pub(crate) request: Option<RequestId>,
    /// Requisições aguardando, em ordem de chegada
    pub(crate) queue: VecDeque<RequestId>,
}

impl Device {
    pub fn new(id: DeviceId, device_type: DeviceType, ops: Box<dyn DeviceOps>) -> Self {
        let caps = ops.caps();
        Self {
            id,
            device_type,
            ops,
            caps,
            request: None,
            queue: VecDeque::new(),
        }
    }

    pub fn state(&self) -> DeviceState {
        if self.request.is_some() {
            DeviceState::Busy
        } else {
            DeviceState::Idle
        }
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.request
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}
