//! System Definitions (ABI).
//!
//! Tipos de erro compartilhados entre kernel e servidores.

pub mod error;

pub use error::{result_to_isize, SysError, SysResult};
