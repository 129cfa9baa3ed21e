//! # Syscall Layer (IPC)
//!
//! Fronteira entre processos de usuário e o [`IpcSpace`](crate::ipc::IpcSpace).
//!
//! ## Convenção
//!
//! - Número da syscall em `SyscallArgs::num`, argumentos em `arg1..arg6`
//! - Retorno `isize`: valor >= 0 em sucesso, `-SysError` em falha
//! - Payloads (`[u64; 6]`) são copiados de/para buffers do chamador

pub mod abi;
pub mod dispatch;
pub mod ipc;
pub mod numbers;

pub use abi::SyscallArgs;
pub use dispatch::dispatch;
