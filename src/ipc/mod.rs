//! # Inter-Process Communication (IPC)
//!
//! Troca de mensagens por portas: cada porta é uma fila FIFO de mensagens
//! de seis palavras com receive bloqueante.
//!
//! ## Garantias
//!
//! - **FIFO por porta**: mensagens são recebidas na ordem de envio
//! - **FIFO de waiters**: cada send acorda o receiver bloqueado mais antigo
//! - **IDs únicos**: um ID de porta nunca é reutilizado
//! - **Sem perda de wake**: depende do contrato de
//!   [`Scheduler`](crate::sched::Scheduler)

pub mod client;
pub mod config;
pub mod message;
pub mod port;
pub mod space;

#[cfg(test)]
mod tests;

pub use client::{IpcClient, PortClient};
pub use config::IpcConfig;
pub use message::{BroadcastMask, IpcMessage, MSG_WORDS};
pub use port::PortId;
pub use space::IpcSpace;
