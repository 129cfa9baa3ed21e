//! # Hardware Abstraction Layer (HAL)
//!
//! O núcleo de IPC só precisa de uma coisa do hardware: mascarar
//! interrupções na CPU atual enquanto segura o lock global de portas.
//!
//! A plataforma (x86_64 real, ou o host nos testes) instala um
//! [`InterruptControl`] e o resto do código chama [`Cpu`], que encaminha
//! para ele. Sem controle instalado, as operações são no-op.

pub mod irq;

pub use irq::{install_interrupt_control, Cpu, InterruptControl};
