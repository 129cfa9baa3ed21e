//! # Synchronization Primitives
//!
//! ## Regras
//!
//! - **Spinlock**: seções curtas, interrupções mascaradas, nunca atravessa
//!   um ponto de suspensão
//! - Todo o estado de portas fica sob UM spinlock global (ver `ipc::space`)

/// Spinlock (busy-wait, não dorme)
pub mod spinlock;

pub use spinlock::{Spinlock, SpinlockGuard};
