//! # Debug / Logging
//!
//! Saída de diagnóstico do núcleo de IPC.
//!
//! O console em si é externo (serial, framebuffer, buffer de log do host).
//! Este módulo só define o ponto de instalação ([`console`]) e os macros
//! `k*!` ([`klog`]) que escrevem nele.

/// Sink de console e primitivas `emit_*`
pub mod console;

/// Macros de log com filtro em tempo de compilação
pub mod klog;

pub use console::{install_console, ConsoleSink};
