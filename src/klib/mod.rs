//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno.

/// Tabela hash (lookup chave -> item)
pub mod hash;

#[cfg(test)]
pub(crate) mod testing;

pub use hash::HashTable;
