//! Requisições de IO.

use super::connection::ConnHandle;
use super::device::DeviceId;
use crate::ipc::PortId;
use crate::mm::SlabKey;

/// Operação
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOp {
    Read,
    Write,
}

/// Identifica uma requisição viva (para completar fora de banda).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub(crate) SlabKey);

/// Requisição de leitura/escrita
#[derive(Debug, Clone, Copy)]
pub struct DeviceRequest {
    pub op: RequestOp,
    pub device: DeviceId,
    pub conn: ConnHandle,
    /// Buffer compartilhado da conexão
    pub base: usize,
    pub size: usize,
    /// Para onde vai a resposta
    pub reply_port: PortId,
    /// Devolvido sem interpretação na resposta
    pub tag: u64,
}

/// Resultado de um hook de leitura/escrita.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// Driver completa depois via `request_finished`
    Pending,
    /// Completou dentro do hook
    Complete(i64),
}
