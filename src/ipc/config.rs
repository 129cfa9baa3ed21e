//! Configuração do núcleo de IPC.

/// Portas vivas simultâneas (slab de portas).
pub const PORT_POOL_CAPACITY: usize = 256;

/// Mensagens enfileiradas somando todas as portas (slab de mensagens).
pub const MESSAGE_POOL_CAPACITY: usize = 4096;

/// Buckets da tabela id → porta.
pub const PORT_TABLE_BUCKETS: usize = 64;

/// Limites de um [`IpcSpace`](super::IpcSpace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpcConfig {
    pub max_ports: usize,
    pub max_messages: usize,
    pub table_buckets: usize,
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self {
            max_ports: PORT_POOL_CAPACITY,
            max_messages: MESSAGE_POOL_CAPACITY,
            table_buckets: PORT_TABLE_BUCKETS,
        }
    }
}
