//! Slab cache de objetos de tamanho fixo.
//!
//! Cada cache tem capacidade máxima definida na criação e reserva o vetor
//! de slots de uma vez, então `alloc` nunca realoca no caminho quente.
//! Esgotar a capacidade é o único "backpressure" do sistema.
//!
//! Slots são identificados por [`SlabKey`] = índice + geração. Liberar um
//! slot incrementa a geração, então uma chave antiga nunca enxerga o
//! objeto que reutilizou o slot.

use alloc::vec::Vec;

/// Referência para um objeto vivo no cache (índice + geração).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlabKey {
    index: u32,
    generation: u32,
}

impl SlabKey {
    /// Empacota em 64 bits: geração nos 32 bits altos.
    ///
    /// Gerações começam em 1, então `0` nunca é uma chave válida.
    pub const fn to_raw(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self {
            index: raw as u32,
            generation: (raw >> 32) as u32,
        }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Cache de objetos `T` com capacidade fixa.
pub struct SlabCache<T> {
    name: &'static str,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    capacity: usize,
    in_use: usize,
}

impl<T> SlabCache<T> {
    /// Cria cache vazio com no máximo `capacity` objetos vivos.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            capacity,
            in_use: 0,
        }
    }

    /// Aloca um slot para `value`. `None` se o cache está cheio.
    pub fn alloc(&mut self, value: T) -> Option<SlabKey> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.in_use += 1;
            return Some(SlabKey {
                index,
                generation: slot.generation,
            });
        }

        if self.slots.len() >= self.capacity {
            crate::ktrace!("(Slab) cache cheio: ", self.capacity);
            crate::ktrace!(self.name);
            return None;
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            value: Some(value),
        });
        self.in_use += 1;
        Some(SlabKey {
            index,
            generation: 1,
        })
    }

    /// Libera o slot e devolve o objeto. `None` se a chave está velha.
    pub fn free(&mut self, key: SlabKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        let value = slot.value.take()?;

        // Pula 0 para manter `to_raw() != 0` em qualquer chave válida
        slot.generation = match slot.generation.wrapping_add(1) {
            0 => 1,
            g => g,
        };
        self.free.push(key.index);
        self.in_use -= 1;
        Some(value)
    }

    pub fn get(&self, key: SlabKey) -> Option<&T> {
        let slot = self.slots.get(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, key: SlabKey) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Objetos vivos.
    pub fn len(&self) -> usize {
        self.in_use
    }

    pub fn is_empty(&self) -> bool {
        self.in_use == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.in_use >= self.capacity
    }
}
