//! Scheduler hospedado: threads do host fazem o papel de threads do kernel.
//!
//! `suspend_current` vira `std::thread::park` e `wake_up` vira `unpark`.
//! Cada thread tem um token de wake pendente, então um wake que chega
//! antes do suspend é consumido pelo suspend seguinte (park sozinho já
//! tolera isso, mas também acorda espuriamente).
//!
//! Uma thread do host sai do mapa de cada scheduler em que se registrou
//! quando termina (destrutor de thread-local).

use alloc::collections::BTreeMap;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, Thread};

use spin::Mutex;

use super::{ProcessId, Scheduler, ThreadRef};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

type ThreadMap = Mutex<BTreeMap<ThreadRef, HostThread>>;

/// Mapas em que a thread atual está registrada.
struct Registrations {
    maps: Vec<(ThreadRef, Weak<ThreadMap>)>,
}

impl Drop for Registrations {
    fn drop(&mut self) {
        for (id, map) in self.maps.drain(..) {
            if let Some(map) = map.upgrade() {
                map.lock().remove(&id);
            }
        }
    }
}

std::thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
    static PROCESS_ID: Cell<u64> = const { Cell::new(0) };
    static REGISTRATIONS: RefCell<Registrations> =
        const { RefCell::new(Registrations { maps: Vec::new() }) };
}

/// ID estável da thread do host que chama.
fn host_thread_id() -> u64 {
    THREAD_ID.with(|id| {
        if id.get() == 0 {
            id.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

/// Associa a thread atual a um processo (vira o `sender` das mensagens).
pub fn bind_process(pid: ProcessId) {
    PROCESS_ID.with(|p| p.set(pid.0));
}

struct HostThread {
    handle: Thread,
    wake_pending: Arc<AtomicBool>,
}

/// Implementação de [`Scheduler`] sobre `std::thread`.
pub struct HostScheduler {
    threads: Arc<ThreadMap>,
}

impl HostScheduler {
    pub fn new() -> Self {
        Self {
            threads: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Registra a thread atual (se ainda não estiver) e devolve seu token.
    fn register_current(&self) -> (ThreadRef, Arc<AtomicBool>) {
        let id = ThreadRef(host_thread_id());
        let (token, inserted) = {
            let mut threads = self.threads.lock();
            match threads.get(&id) {
                Some(entry) => (entry.wake_pending.clone(), false),
                None => {
                    let token = Arc::new(AtomicBool::new(false));
                    threads.insert(
                        id,
                        HostThread {
                            handle: thread::current(),
                            wake_pending: token.clone(),
                        },
                    );
                    (token, true)
                }
            }
        };

        if inserted {
            let map = Arc::downgrade(&self.threads);
            // Durante o teardown da thread o registro já foi destruído
            let _ = REGISTRATIONS.try_with(|r| r.borrow_mut().maps.push((id, map)));
        }
        (id, token)
    }

    /// Threads do host atualmente registradas.
    pub fn registered_threads(&self) -> usize {
        self.threads.lock().len()
    }
}

impl Default for HostScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for HostScheduler {
    fn current(&self) -> ThreadRef {
        self.register_current().0
    }

    fn current_process(&self) -> ProcessId {
        ProcessId(PROCESS_ID.with(|p| p.get()))
    }

    fn suspend_current(&self) {
        let (_, token) = self.register_current();
        while !token.swap(false, Ordering::AcqRel) {
            thread::park();
        }
    }

    fn wake_up(&self, thread: ThreadRef) {
        let threads = self.threads.lock();
        match threads.get(&thread) {
            Some(target) => {
                target.wake_pending.store(true, Ordering::Release);
                target.handle.unpark();
            }
            None => {
                crate::ktrace!("(Sched) wake_up de thread desconhecida: ", thread.0);
            }
        }
    }
}
