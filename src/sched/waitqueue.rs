//! Wait queues de receivers bloqueados.
//!
//! Diferente da wait queue do scheduler, esta não bloqueia nem acorda
//! ninguém sozinha: ela só guarda `ThreadRef`s em ordem FIFO. Quem usa
//! (a porta) decide quando suspender e quando chamar `wake_up`, sempre
//! sob o lock do registry.

use alloc::collections::VecDeque;

use super::ThreadRef;

/// Fila FIFO de threads aguardando um evento.
#[derive(Debug, Default)]
pub struct WaitQueue {
    waiters: VecDeque<ThreadRef>,
}

impl WaitQueue {
    /// Cria nova waitqueue vazia
    pub const fn new() -> Self {
        Self {
            waiters: VecDeque::new(),
        }
    }

    /// Coloca `thread` no fim da fila.
    pub fn add(&mut self, thread: ThreadRef) {
        self.waiters.push_back(thread);
    }

    /// Retira a thread mais antiga.
    pub fn pop(&mut self) -> Option<ThreadRef> {
        self.waiters.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    /// Esvazia a fila, na ordem de chegada.
    pub fn drain(&mut self) -> impl Iterator<Item = ThreadRef> + '_ {
        self.waiters.drain(..)
    }
}
