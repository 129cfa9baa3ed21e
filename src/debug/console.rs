//! Console de log.
//!
//! Os macros `k*!` nunca formatam com `core::fmt`: emitem pedaços de texto
//! e valores em hexadecimal, como o driver serial do kernel faz.

use spin::RwLock;

/// Destino das linhas de log (console do kernel, serial, buffer de teste).
pub trait ConsoleSink: Send + Sync {
    /// Escreve um trecho de texto (sem quebra de linha implícita).
    fn write_str(&self, s: &str);
}

/// Sink instalado. `None` descarta tudo.
static CONSOLE: RwLock<Option<&'static dyn ConsoleSink>> = RwLock::new(None);

/// Instala o sink de console, substituindo o anterior.
pub fn install_console(sink: &'static dyn ConsoleSink) {
    *CONSOLE.write() = Some(sink);
}

/// Emite uma string crua.
#[inline]
pub fn emit_str(s: &str) {
    if let Some(sink) = *CONSOLE.read() {
        sink.write_str(s);
    }
}

/// Emite um valor em hexadecimal (`0x...`, sem zeros à esquerda).
pub fn emit_hex(value: u64) {
    let mut buf = [0u8; 18];
    emit_str(hex_str(value, &mut buf));
}

/// Renderiza `value` como `0x...` dentro de `buf`.
fn hex_str(value: u64, buf: &mut [u8; 18]) -> &str {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    buf[0] = b'0';
    buf[1] = b'x';

    // Quantidade de nibbles significativos (mínimo 1)
    let nibbles = if value == 0 {
        1
    } else {
        (64 - value.leading_zeros() as usize + 3) / 4
    };

    for i in 0..nibbles {
        let shift = (nibbles - 1 - i) * 4;
        buf[2 + i] = DIGITS[((value >> shift) & 0xF) as usize];
    }

    // SAFETY: apenas dígitos ASCII foram escritos
    unsafe { core::str::from_utf8_unchecked(&buf[..2 + nibbles]) }
}

/// Emite quebra de linha.
#[inline]
pub fn emit_nl() {
    emit_str("\n");
}
