//! Cenários do núcleo de IPC com threads reais do host.


use alloc::sync::Arc;
use std::time::{Duration, Instant};

use crate::ipc::{IpcConfig, IpcSpace};
use crate::klib::testing;
use crate::sched::hosted::HostScheduler;

pub(super) fn new_space(config: IpcConfig) -> Arc<IpcSpace> {
    testing::install_thread_local_irq();
    testing::install_recorder();
    Arc::new(IpcSpace::new(config, Arc::new(HostScheduler::new())))
}

/// Espera `cond` ficar verdadeira (com limite, para não travar a suíte).
pub(super) fn wait_until(mut cond: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        assert!(Instant::now() < deadline, "condição não atingida a tempo");
        std::thread::sleep(Duration::from_millis(1));
    }
}
