//! Infraestrutura compartilhada pelos testes de host.

use std::cell::Cell;
use std::string::String;
use std::sync::{Mutex, Once};

use crate::arch::InterruptControl;
use crate::debug::ConsoleSink;

// =============================================================================
// CONSOLE GRAVADOR
// =============================================================================

/// Sink que acumula tudo em memória.
pub struct RecordingSink {
    buffer: Mutex<String>,
}

impl ConsoleSink for RecordingSink {
    fn write_str(&self, s: &str) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push_str(s);
        }
    }
}

static RECORDER: RecordingSink = RecordingSink {
    buffer: Mutex::new(String::new()),
};
static RECORDER_INIT: Once = Once::new();

/// Instala o gravador como console (idempotente).
pub fn install_recorder() {
    RECORDER_INIT.call_once(|| crate::debug::install_console(&RECORDER));
}

/// Cópia de tudo que foi logado até agora, por qualquer teste.
pub fn captured_log() -> String {
    RECORDER
        .buffer
        .lock()
        .map(|b| b.clone())
        .unwrap_or_default()
}

// =============================================================================
// INTERRUPÇÕES POR THREAD
// =============================================================================

std::thread_local! {
    static IRQ_ENABLED: Cell<bool> = Cell::new(false);
}

/// Cada thread do host faz o papel de uma CPU com sua própria flag IF.
pub struct ThreadLocalIrq;

impl InterruptControl for ThreadLocalIrq {
    fn disable_interrupts(&self) {
        IRQ_ENABLED.with(|f| f.set(false));
    }

    fn enable_interrupts(&self) {
        IRQ_ENABLED.with(|f| f.set(true));
    }

    fn interrupts_enabled(&self) -> bool {
        IRQ_ENABLED.with(|f| f.get())
    }
}

static THREAD_IRQ: ThreadLocalIrq = ThreadLocalIrq;
static IRQ_INIT: Once = Once::new();

/// Instala o controle de interrupções por thread (idempotente).
pub fn install_thread_local_irq() {
    IRQ_INIT.call_once(|| crate::arch::install_interrupt_control(&THREAD_IRQ));
}
