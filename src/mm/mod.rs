//! # Memory Management
//!
//! Só o necessário para o núcleo de IPC: caches de objetos de tamanho
//! fixo ([`slab::SlabCache`]) para portas, mensagens, dispositivos,
//! conexões e requisições.

pub mod slab;

pub use slab::{SlabCache, SlabKey};
