//! Cenários do servidor de dispositivos sobre um espaço de IPC real.

mod dispatch;
mod registration;

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;

use crate::devman::protocol::{IoRequest, OpenReply, OpenRequest};
use crate::devman::*;
use crate::ipc::{IpcClient, IpcConfig, IpcMessage, IpcSpace, PortId};
use crate::klib::testing;
use crate::sched::hosted::HostScheduler;
use crate::sched::ProcessId;
use crate::sys::{SysError, SysResult};

/// Região pequena (512 bytes) para testar limite de tamanho.
pub(super) const SMALL_SHM: ShmId = ShmId(2);
pub(super) const BIG_SHM: ShmId = ShmId(1);
pub(super) const CLIENT: ProcessId = ProcessId(1);

// =============================================================================
// MEMÓRIA COMPARTILHADA FALSA
// =============================================================================

pub(super) struct FakeShm {
    regions: BTreeMap<ShmId, ShmMapping>,
    closed: Arc<Mutex<Vec<ShmId>>>,
}

impl SharedMemory for FakeShm {
    fn accept(&self, id: ShmId) -> SysResult<ShmMapping> {
        self.regions.get(&id).copied().ok_or(SysError::NotFound)
    }

    fn close(&self, id: ShmId) {
        self.closed.lock().unwrap().push(id);
    }
}

// =============================================================================
// DRIVER ROTEIRIZADO
// =============================================================================

#[derive(Default)]
pub(super) struct DriverLog {
    pub opens: Vec<DeviceId>,
    pub calls: Vec<(RequestId, DeviceRequest)>,
}

pub(super) struct ScriptedDriver {
    caps: DeviceCaps,
    open_result: Result<(), DriverError>,
    /// Status devolvidos pelos hooks, em ordem; vazio = Pending
    script: VecDeque<RequestStatus>,
    log: Arc<Mutex<DriverLog>>,
}

impl ScriptedDriver {
    pub fn new(caps: DeviceCaps) -> (Self, Arc<Mutex<DriverLog>>) {
        let log = Arc::new(Mutex::new(DriverLog::default()));
        let driver = Self {
            caps,
            open_result: Ok(()),
            script: VecDeque::new(),
            log: log.clone(),
        };
        (driver, log)
    }

    pub fn failing_open(mut self, err: DriverError) -> Self {
        self.open_result = Err(err);
        self
    }

    pub fn with_script(mut self, script: &[RequestStatus]) -> Self {
        self.script = script.iter().copied().collect();
        self
    }

    fn record(&mut self, id: RequestId, request: &DeviceRequest) -> RequestStatus {
        self.log.lock().unwrap().calls.push((id, *request));
        self.script.pop_front().unwrap_or(RequestStatus::Pending)
    }
}

impl DeviceOps for ScriptedDriver {
    fn caps(&self) -> DeviceCaps {
        self.caps
    }

    fn open(&mut self, device: DeviceId) -> Result<(), DriverError> {
        self.log.lock().unwrap().opens.push(device);
        self.open_result
    }

    fn read(&mut self, id: RequestId, request: &DeviceRequest) -> RequestStatus {
        self.record(id, request)
    }

    fn write(&mut self, id: RequestId, request: &DeviceRequest) -> RequestStatus {
        self.record(id, request)
    }
}

pub(super) fn all_caps() -> DeviceCaps {
    DeviceCaps::OPEN | DeviceCaps::READ | DeviceCaps::WRITE
}

// =============================================================================
// FIXTURE
// =============================================================================

pub(super) struct Fixture {
    pub space: Arc<IpcSpace>,
    pub devman_port: PortId,
    pub client_port: PortId,
    pub server: DeviceServer<IpcClient>,
    pub closed: Arc<Mutex<Vec<ShmId>>>,
}

pub(super) fn fixture(config: DevmanConfig) -> Fixture {
    testing::install_thread_local_irq();
    testing::install_recorder();

    let space = Arc::new(IpcSpace::new(
        IpcConfig::default(),
        Arc::new(HostScheduler::new()),
    ));
    let devman_port = space.create_port().unwrap();
    let client_port = space.create_port().unwrap();

    let closed = Arc::new(Mutex::new(Vec::new()));
    let mut regions = BTreeMap::new();
    regions.insert(BIG_SHM, ShmMapping { base: 0x1000, size: 4096 });
    regions.insert(SMALL_SHM, ShmMapping { base: 0x8000, size: 512 });
    let shmem = FakeShm {
        regions,
        closed: closed.clone(),
    };

    let ipc = IpcClient::new(space.clone(), ProcessId(100));
    let server = DeviceServer::new(ipc, Box::new(shmem), devman_port, config).unwrap();

    Fixture {
        space,
        devman_port,
        client_port,
        server,
        closed,
    }
}

impl Fixture {
    pub fn announce(&mut self, driver: ScriptedDriver) -> DeviceId {
        let id = self.server.announce(DeviceType::Block, Box::new(driver)).unwrap();
        // Descarta o ANNOUNCE para não poluir as asserções
        let mut out = IpcMessage::default();
        self.space.try_receive(self.devman_port, &mut out).unwrap();
        id
    }

    /// Próxima resposta na porta do cliente, sem bloquear.
    pub fn next_reply(&self) -> Option<IpcMessage> {
        let mut out = IpcMessage::default();
        self.space
            .try_receive(self.client_port, &mut out)
            .unwrap()
            .map(|_| out)
    }

    pub fn open(&mut self, device: DeviceId, shm: ShmId, tag: u64) -> OpenReply {
        let req = OpenRequest {
            device,
            shm,
            reply_port: self.client_port,
            tag,
        };
        self.server.handle_message(&req.encode());
        let reply = self.next_reply().expect("OPEN sem resposta");
        OpenReply::decode(&reply)
    }

    pub fn open_ok(&mut self, device: DeviceId, shm: ShmId) -> ConnHandle {
        self.open(device, shm, 0).connection().unwrap()
    }

    pub fn io(&mut self, op: RequestOp, conn: ConnHandle, size: u64, tag: u64) {
        let req = IoRequest {
            op,
            conn: conn.to_raw(),
            size,
            tag,
            reply_port: self.client_port,
        };
        self.server.handle_message(&req.encode());
    }

    pub fn in_flight(&self, device: DeviceId) -> Option<RequestId> {
        self.server.device(device).and_then(Device::in_flight)
    }
}
