//! # Syscall Dispatch
//!
//! Tabela estática de handlers indexada por número de syscall.

use crate::ipc::IpcSpace;
use crate::sys::{result_to_isize, SysError, SysResult};

use super::abi::SyscallArgs;
use super::ipc;
use super::numbers::*;

/// Tipo de handler de syscall
pub type SyscallHandler = unsafe fn(&IpcSpace, &SyscallArgs) -> SysResult<usize>;

/// Tamanho da tabela
pub const TABLE_SIZE: usize = 64;

/// Tabela de syscalls
///
/// None = syscall não implementada.
pub static SYSCALL_TABLE: [Option<SyscallHandler>; TABLE_SIZE] = {
    let mut table: [Option<SyscallHandler>; TABLE_SIZE] = [None; TABLE_SIZE];

    // === IPC (0x30-0x3F) ===
    table[SYS_IPC_PORT_CREATE] = Some(ipc::sys_port_create_wrapper);
    table[SYS_IPC_PORT_DELETE] = Some(ipc::sys_port_delete_wrapper);
    table[SYS_IPC_PORT_SEND] = Some(ipc::sys_port_send_wrapper);
    table[SYS_IPC_PORT_RECEIVE] = Some(ipc::sys_port_receive_wrapper);
    table[SYS_IPC_PORT_SET_BROADCAST] = Some(ipc::sys_port_set_broadcast_wrapper);
    table[SYS_IPC_PORT_SEND_BROADCAST] = Some(ipc::sys_port_send_broadcast_wrapper);
    table[SYS_IPC_PORT_PENDING] = Some(ipc::sys_port_pending_wrapper);

    table
};

/// Executa a syscall descrita em `args`.
///
/// # Safety
/// Ponteiros em `args` precisam ser válidos para o handler chamado
/// (ver `syscall::ipc`).
pub unsafe fn dispatch(space: &IpcSpace, args: &SyscallArgs) -> isize {
    let handler = SYSCALL_TABLE.get(args.num).copied().flatten();
    let result = match handler {
        Some(handler) => handler(space, args),
        None => {
            crate::kwarn!("(Syscall) syscall desconhecida: ", args.num);
            Err(SysError::NotImplemented)
        }
    };
    result_to_isize(result)
}
