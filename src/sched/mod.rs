//! # Scheduler (interface)
//!
//! O núcleo de IPC não escolhe quem roda: ele só precisa saber quem é a
//! thread atual, suspendê-la e acordar outra. Essas três operações chegam
//! pelo trait [`Scheduler`], implementado pelo kernel (ou por
//! [`hosted::HostScheduler`] em testes e ambientes hospedados).

pub mod waitqueue;

#[cfg(any(test, feature = "hosted"))]
pub mod hosted;

pub use waitqueue::WaitQueue;

/// Referência não-proprietária para uma thread.
///
/// Só serve para o scheduler encontrar a thread de novo: a fila de espera
/// nunca é dona da thread que guarda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadRef(pub u64);

impl ThreadRef {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// ID do processo dono de uma thread (remetente de mensagens).
///
/// Na fronteira de syscall o PID volta em `isize`: só a faixa
/// `0..=isize::MAX` é representável.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub u64);

impl ProcessId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Operações de escalonamento consumidas pelo IPC.
///
/// # Contrato de wake pendente
///
/// Um `wake_up(t)` entregue ANTES de `t` chegar em `suspend_current` não
/// pode se perder: o próximo `suspend_current` de `t` retorna imediatamente.
/// O receive bloqueante enfileira a thread, solta o lock e só depois
/// suspende, então depende disso.
pub trait Scheduler: Send + Sync {
    /// Thread em execução.
    fn current(&self) -> ThreadRef;

    /// Processo da thread em execução.
    fn current_process(&self) -> ProcessId;

    /// Suspende a thread atual até um `wake_up` (ou consome um pendente).
    fn suspend_current(&self);

    /// Torna `thread` executável de novo.
    fn wake_up(&self, thread: ThreadRef);
}
