//! # IPC Port Operations
//!
//! Handlers das syscalls de porta. Cada `*_wrapper` desempacota
//! [`SyscallArgs`] e chama a implementação.
//!
//! Ponteiros de usuário são validados só contra nulo: o mapeamento do
//! espaço de endereçamento é responsabilidade de quem instala o dispatch.

use crate::ipc::{BroadcastMask, IpcMessage, IpcSpace, PortId, MSG_WORDS};
use crate::sched::ProcessId;
use crate::sys::{SysError, SysResult};

use super::abi::SyscallArgs;

// === WRAPPERS ===

pub unsafe fn sys_port_create_wrapper(space: &IpcSpace, _args: &SyscallArgs) -> SysResult<usize> {
    sys_ipc_port_create(space)
}

pub unsafe fn sys_port_delete_wrapper(space: &IpcSpace, args: &SyscallArgs) -> SysResult<usize> {
    sys_ipc_port_delete(space, args.arg1 as u64)
}

pub unsafe fn sys_port_send_wrapper(space: &IpcSpace, args: &SyscallArgs) -> SysResult<usize> {
    sys_ipc_port_send(space, args.arg1 as u64, args.arg2 as *const u64)
}

pub unsafe fn sys_port_receive_wrapper(space: &IpcSpace, args: &SyscallArgs) -> SysResult<usize> {
    sys_ipc_port_receive(space, args.arg1 as u64, args.arg2 as *mut u64)
}

pub unsafe fn sys_port_set_broadcast_wrapper(
    space: &IpcSpace,
    args: &SyscallArgs,
) -> SysResult<usize> {
    sys_ipc_port_set_broadcast_mask(space, args.arg1 as u64, args.arg2 as u64)
}

pub unsafe fn sys_port_send_broadcast_wrapper(
    space: &IpcSpace,
    args: &SyscallArgs,
) -> SysResult<usize> {
    sys_ipc_port_send_broadcast(space, args.arg1 as u64, args.arg2 as *const u64)
}

pub unsafe fn sys_port_pending_wrapper(space: &IpcSpace, args: &SyscallArgs) -> SysResult<usize> {
    sys_ipc_port_pending(space, args.arg1 as u64)
}

// === CÓPIA DE PAYLOAD ===

/// Copia `[u64; 6]` do usuário.
///
/// # Safety
/// `ptr` não-nulo precisa apontar para 6 palavras legíveis.
unsafe fn copy_in(ptr: *const u64) -> SysResult<IpcMessage> {
    if ptr.is_null() {
        return Err(SysError::BadAddress);
    }
    let mut data = [0u64; MSG_WORDS];
    core::ptr::copy_nonoverlapping(ptr, data.as_mut_ptr(), MSG_WORDS);
    Ok(IpcMessage::from_words(data))
}

/// Copia a mensagem para o usuário.
///
/// # Safety
/// `ptr` não-nulo precisa apontar para 6 palavras graváveis.
unsafe fn copy_out(ptr: *mut u64, msg: &IpcMessage) {
    core::ptr::copy_nonoverlapping(msg.data.as_ptr(), ptr, MSG_WORDS);
}

// === PIDS ===

/// PID como valor de retorno.
///
/// O retorno da syscall é `isize` e negativos são erros, então PIDs que
/// passam de `isize::MAX` não são representáveis na ABI.
fn pid_to_ret(pid: ProcessId) -> SysResult<usize> {
    isize::try_from(pid.0)
        .map(|pid| pid as usize)
        .map_err(|_| SysError::InvalidArgument)
}

/// Processo atual como remetente (mesma faixa de [`pid_to_ret`]).
fn current_sender(space: &IpcSpace) -> SysResult<ProcessId> {
    let sender = space.scheduler().current_process();
    pid_to_ret(sender)?;
    Ok(sender)
}

// === IMPLEMENTAÇÕES ===

/// Cria uma porta
///
/// # Returns
/// ID da porta
pub fn sys_ipc_port_create(space: &IpcSpace) -> SysResult<usize> {
    space.create_port().map(|id| id.0 as usize)
}

/// Remove uma porta
pub fn sys_ipc_port_delete(space: &IpcSpace, port: u64) -> SysResult<usize> {
    space.delete_port(PortId(port)).map(|_| 0)
}

/// Envia mensagem em nome do processo atual
///
/// # Safety
/// Ver [`copy_in`].
pub unsafe fn sys_ipc_port_send(space: &IpcSpace, port: u64, msg_ptr: *const u64) -> SysResult<usize> {
    let msg = copy_in(msg_ptr)?;
    let sender = current_sender(space)?;
    space.send(PortId(port), &msg, sender).map(|_| 0)
}

/// Recebe mensagem (bloqueante)
///
/// O ponteiro é validado antes de bloquear: uma mensagem retirada da
/// fila nunca se perde por causa de um buffer nulo.
///
/// # Returns
/// PID do remetente. Um remetente fora da faixa da ABI (só possível via
/// envio direto pelo kernel) devolve `InvalidArgument`, com o payload já
/// copiado.
///
/// # Safety
/// Ver [`copy_out`].
pub unsafe fn sys_ipc_port_receive(space: &IpcSpace, port: u64, msg_ptr: *mut u64) -> SysResult<usize> {
    if msg_ptr.is_null() {
        return Err(SysError::BadAddress);
    }
    let mut msg = IpcMessage::default();
    let sender = space.receive(PortId(port), &mut msg)?;
    copy_out(msg_ptr, &msg);
    pid_to_ret(sender)
}

/// Define a máscara de broadcast (bits desconhecidos são rejeitados)
pub fn sys_ipc_port_set_broadcast_mask(space: &IpcSpace, port: u64, mask: u64) -> SysResult<usize> {
    let mask = BroadcastMask::from_bits(mask).ok_or(SysError::InvalidArgument)?;
    space.set_broadcast_mask(PortId(port), mask).map(|_| 0)
}

/// Broadcast em nome do processo atual
///
/// # Returns
/// Número de portas que receberam a mensagem
///
/// # Safety
/// Ver [`copy_in`].
pub unsafe fn sys_ipc_port_send_broadcast(
    space: &IpcSpace,
    mask: u64,
    msg_ptr: *const u64,
) -> SysResult<usize> {
    let mask = BroadcastMask::from_bits(mask).ok_or(SysError::InvalidArgument)?;
    let msg = copy_in(msg_ptr)?;
    let sender = current_sender(space)?;
    space.send_broadcast(mask, &msg, sender)
}

/// Mensagens aguardando na porta
pub fn sys_ipc_port_pending(space: &IpcSpace, port: u64) -> SysResult<usize> {
    space.pending(PortId(port))
}
