//! Hash Table
//!
//! Mapeia Chaves -> Valores com acesso O(1) médio.
//!
//! - Encadeamento para colisões (Vec de Buckets).
//! - Número de buckets fixo, definido na criação (sem rehash).
//! - Hash FNV-1a via trait `Hash` do core (em no_std não há `RandomState`).

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

pub struct FnvHasher {
    state: u64,
}

impl FnvHasher {
    fn new() -> Self {
        Self {
            state: 0xcbf29ce484222325,
        }
    }
}

impl Hasher for FnvHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(0x100000001b3);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
}

pub struct HashTable<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Cria tabela com `buckets` baldes (mínimo 1).
    pub fn new(buckets: usize) -> Self {
        let count = buckets.max(1);
        let mut table = Vec::with_capacity(count);
        for _ in 0..count {
            table.push(Vec::new());
        }
        Self {
            buckets: table,
            len: 0,
        }
    }

    fn get_bucket_index(&self, key: &K) -> usize {
        let mut hasher = FnvHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.buckets.len()
    }

    /// Insere ou substitui. Retorna o valor anterior, se havia.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.get_bucket_index(&key);
        let bucket = &mut self.buckets[index];

        // Verifica se chave já existe para atualizar
        for entry in bucket.iter_mut() {
            if entry.key == key {
                return Some(core::mem::replace(&mut entry.value, value));
            }
        }

        bucket.push(Entry { key, value });
        self.len += 1;
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.get_bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|e| e.key == *key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.get_bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|e| e.key == *key)
            .map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.get_bucket_index(key);
        let bucket = &mut self.buckets[index];

        if let Some(pos) = bucket.iter().position(|e| e.key == *key) {
            self.len -= 1;
            return Some(bucket.swap_remove(pos).value);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Itera sobre os valores (ordem não especificada).
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.buckets.iter().flat_map(|b| b.iter().map(|e| &e.value))
    }
}

#[cfg(test)]
mod tests {
    use super::HashTable;

    #[test]
    fn test_insert_get_remove() {
        let mut table: HashTable<u64, &str> = HashTable::new(4);
        assert!(table.is_empty());
        assert_eq!(table.insert(1, "um"), None);
        assert_eq!(table.insert(2, "dois"), None);
        assert_eq!(table.get(&1), Some(&"um"));
        assert_eq!(table.len(), 2);

        assert_eq!(table.remove(&1), Some("um"));
        assert_eq!(table.get(&1), None);
        assert_eq!(table.remove(&1), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_existing_key_replaces() {
        let mut table: HashTable<u64, u32> = HashTable::new(2);
        table.insert(9, 1);
        assert_eq!(table.insert(9, 2), Some(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&9), Some(&2));
    }

    #[test]
    fn test_collisions_with_single_bucket() {
        let mut table: HashTable<u64, u64> = HashTable::new(1);
        for k in 0..32 {
            table.insert(k, k * 10);
        }
        for k in 0..32 {
            assert_eq!(table.get(&k), Some(&(k * 10)));
        }
        if let Some(v) = table.get_mut(&5) {
            *v = 0;
        }
        assert_eq!(table.get(&5), Some(&0));
        assert_eq!(table.values().count(), 32);
    }
}
