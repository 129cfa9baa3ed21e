//! Configuração do servidor de dispositivos.

/// Dispositivos anunciados por servidor.
pub const DEVICE_POOL_CAPACITY: usize = 64;

/// Conexões abertas simultâneas.
pub const CONNECTION_POOL_CAPACITY: usize = 256;

/// Requisições em voo ou enfileiradas, somando todos os dispositivos.
pub const REQUEST_POOL_CAPACITY: usize = 512;

/// Buckets da tabela id → dispositivo.
pub const DEVICE_TABLE_BUCKETS: usize = 32;

/// Limites de um [`DeviceServer`](super::DeviceServer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevmanConfig {
    pub max_devices: usize,
    pub max_connections: usize,
    pub max_requests: usize,
    pub table_buckets: usize,
}

impl Default for DevmanConfig {
    fn default() -> Self {
        Self {
            max_devices: DEVICE_POOL_CAPACITY,
            max_connections: CONNECTION_POOL_CAPACITY,
            max_requests: REQUEST_POOL_CAPACITY,
            table_buckets: DEVICE_TABLE_BUCKETS,
        }
    }
}
