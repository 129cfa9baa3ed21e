//! # Device Manager (lado servidor)
//!
//! Biblioteca usada por processos de driver: anuncia dispositivos ao
//! devman e atende o protocolo OPEN/READ/WRITE/CLOSE, serializando as
//! requisições de cada dispositivo.
//!
//! Tudo é construído sobre portas ([`crate::ipc`]); memória compartilhada
//! carrega só os dados em massa.

pub mod config;
pub mod connection;
pub mod device;
pub mod protocol;
pub mod request;
pub mod server;
pub mod shmem;

#[cfg(test)]
mod tests;

pub use config::DevmanConfig;
pub use connection::{ConnHandle, Connection};
pub use device::{Device, DeviceCaps, DeviceId, DeviceOps, DeviceState, DeviceType, DriverError};
pub use request::{DeviceRequest, RequestId, RequestOp, RequestStatus};
pub use server::{DeviceServer, MessageHandler};
pub use shmem::{SharedMemory, ShmId, ShmMapping};
