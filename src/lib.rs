//! Forge IPC.
//!
//! Núcleo de comunicação entre processos do Redstone OS (portas com
//! receive bloqueante) e a biblioteca de servidor do devman, que
//! serializa as requisições de cada dispositivo sobre essas portas.
//!
//! Scheduler, memória compartilhada, controle de interrupções e console
//! são colaboradores externos, consumidos via traits.

#![cfg_attr(not(any(test, feature = "hosted")), no_std)]

// Habilitar alocação dinâmica (necessário para Vec/Box/Arc)
extern crate alloc;

// --- Infraestrutura ---
#[macro_use]
pub mod debug; // Console + macros k*!
pub mod arch; // Controle de interrupções
pub mod klib; // Utilitários Internos (HashTable)
pub mod mm; // Slab caches
pub mod sync; // Spinlock
pub mod sys; // Erros

// --- Subsistemas ---
pub mod devman; // Servidor de dispositivos
pub mod ipc; // Portas e mensagens
pub mod sched; // Interface com o scheduler
pub mod syscall; // Interface com Userspace

pub use ipc::{IpcClient, IpcSpace, PortClient, PortId};
pub use sys::{SysError, SysResult};
