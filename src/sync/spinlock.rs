//! Spinlock com interrupções mascaradas.

use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};

/// Spinlock - usa busy-wait, NÃO pode dormir
///
/// Além de exclusão mútua, desabilita interrupções na CPU atual enquanto o
/// guard existir e restaura o estado anterior ao soltar.
///
/// # Quando usar
///
/// - Seções críticas MUITO curtas (registry de portas, filas de mensagens)
///
/// # Quando NÃO usar
///
/// - Através de um ponto de suspensão: o guard precisa ser solto ANTES de
///   chamar `Scheduler::suspend_current`
pub struct Spinlock<T> {
    inner: spin::Mutex<T>,
}

impl<T> Spinlock<T> {
    /// Cria novo spinlock
    pub const fn new(data: T) -> Self {
        Self {
            inner: spin::Mutex::new(data),
        }
    }

    /// Adquire o lock
    pub fn lock(&self) -> SpinlockGuard<'_, T> {
        // Desabilitar interrupções antes de adquirir
        let interrupts_enabled = crate::arch::Cpu::interrupts_enabled();
        crate::arch::Cpu::disable_interrupts();

        SpinlockGuard {
            guard: ManuallyDrop::new(self.inner.lock()),
            interrupts_were_enabled: interrupts_enabled,
        }
    }

    /// Tenta adquirir sem bloquear
    pub fn try_lock(&self) -> Option<SpinlockGuard<'_, T>> {
        let interrupts_enabled = crate::arch::Cpu::interrupts_enabled();
        crate::arch::Cpu::disable_interrupts();

        match self.inner.try_lock() {
            Some(guard) => Some(SpinlockGuard {
                guard: ManuallyDrop::new(guard),
                interrupts_were_enabled: interrupts_enabled,
            }),
            None => {
                // Não conseguiu, restaurar interrupções
                if interrupts_enabled {
                    crate::arch::Cpu::enable_interrupts();
                }
                None
            }
        }
    }
}

/// Guard do spinlock - libera ao sair do escopo
pub struct SpinlockGuard<'a, T> {
    guard: ManuallyDrop<spin::MutexGuard<'a, T>>,
    interrupts_were_enabled: bool,
}

impl<T> Deref for SpinlockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for SpinlockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for SpinlockGuard<'_, T> {
    fn drop(&mut self) {
        // Liberar lock ANTES de reabilitar interrupções
        // SAFETY: o guard interno é solto exatamente uma vez, aqui
        unsafe { ManuallyDrop::drop(&mut self.guard) };

        if self.interrupts_were_enabled {
            crate::arch::Cpu::enable_interrupts();
        }
    }
}
