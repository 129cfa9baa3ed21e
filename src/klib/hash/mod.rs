//! Tabelas hash do kernel.

mod hashtable;

pub use hashtable::HashTable;
