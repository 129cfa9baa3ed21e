//! # Syscall Arguments

/// Máximo de argumentos suportados
pub const MAX_ARGS: usize = 6;

/// Argumentos de syscall já extraídos dos registradores
///
/// Convenção de registradores (x86_64):
/// - RAX: número da syscall
/// - RDI: arg1
/// - RSI: arg2
/// - RDX: arg3
/// - R10: arg4 (RCX é destruído por syscall)
/// - R8:  arg5
/// - R9:  arg6
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SyscallArgs {
    pub num: usize,
    pub arg1: usize,
    pub arg2: usize,
    pub arg3: usize,
    pub arg4: usize,
    pub arg5: usize,
    pub arg6: usize,
}

impl SyscallArgs {
    /// Argumentos vazios
    pub const fn empty() -> Self {
        Self {
            num: 0,
            arg1: 0,
            arg2: 0,
            arg3: 0,
            arg4: 0,
            arg5: 0,
            arg6: 0,
        }
    }

    /// Syscall `num` com até dois argumentos (o resto zerado).
    pub const fn with(num: usize, arg1: usize, arg2: usize) -> Self {
        let mut args = Self::empty();
        args.num = num;
        args.arg1 = arg1;
        args.arg2 = arg2;
        args
    }
}
