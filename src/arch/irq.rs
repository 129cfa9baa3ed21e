//! Controle de interrupções da CPU atual.

use spin::RwLock;

/// Interface de mascaramento de interrupções (CLI/STI e equivalentes).
pub trait InterruptControl: Send + Sync {
    /// Desabilita interrupções na CPU atual.
    fn disable_interrupts(&self);

    /// Habilita interrupções na CPU atual.
    fn enable_interrupts(&self);

    /// Verifica se as interrupções estão habilitadas na CPU atual.
    fn interrupts_enabled(&self) -> bool;
}

static CONTROL: RwLock<Option<&'static dyn InterruptControl>> = RwLock::new(None);

/// Instala o controle de interrupções da plataforma.
pub fn install_interrupt_control(control: &'static dyn InterruptControl) {
    *CONTROL.write() = Some(control);
}

/// Fachada estática usada pelo resto do crate (`Cpu::disable_interrupts()`).
pub struct Cpu;

impl Cpu {
    #[inline]
    fn control() -> Option<&'static dyn InterruptControl> {
        *CONTROL.read()
    }

    /// Desabilita interrupções (no-op sem plataforma instalada).
    #[inline]
    pub fn disable_interrupts() {
        if let Some(control) = Self::control() {
            control.disable_interrupts();
        }
    }

    /// Habilita interrupções (no-op sem plataforma instalada).
    #[inline]
    pub fn enable_interrupts() {
        if let Some(control) = Self::control() {
            control.enable_interrupts();
        }
    }

    /// Estado atual; `false` sem plataforma instalada.
    #[inline]
    pub fn interrupts_enabled() -> bool {
        Self::control().map_or(false, |c| c.interrupts_enabled())
    }
}
