use super::*;
use crate::devman::protocol::IoReply;

fn reply(fx: &Fixture) -> IoReply {
    IoReply::decode(&fx.next_reply().expect("sem resposta")).expect("não é resposta de IO")
}

#[test]
fn test_idle_busy_idle() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, log) = ScriptedDriver::new(all_caps());
    let dev = fx.announce(driver);
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 256, 0x51);
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Busy));
    assert!(fx.next_reply().is_none());

    let (id, request) = log.lock().unwrap().calls[0];
    assert_eq!(request.op, RequestOp::Read);
    assert_eq!((request.base, request.size), (0x1000, 256));
    assert_eq!(request.reply_port, fx.client_port);
    assert_eq!(fx.in_flight(dev), Some(id));

    fx.server.request_finished(id, 256).unwrap();
    let done = reply(&fx);
    assert_eq!((done.op, done.result, done.tag), (RequestOp::Read, 256, 0x51));
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
    assert_eq!(fx.server.request_count(), 0);
}

#[test]
fn test_busy_device_queues_in_arrival_order() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, log) = ScriptedDriver::new(all_caps());
    let dev = fx.announce(driver);
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 10, 1);
    fx.io(RequestOp::Write, conn, 20, 2);
    fx.io(RequestOp::Read, conn, 30, 3);

    // Só a primeira chegou ao driver
    assert_eq!(log.lock().unwrap().calls.len(), 1);
    assert_eq!(fx.server.device(dev).map(Device::queued), Some(2));

    for (expected_tag, expected_op) in [(1, RequestOp::Read), (2, RequestOp::Write), (3, RequestOp::Read)] {
        let id = fx.in_flight(dev).unwrap();
        let request = *fx.server.request(id).unwrap();
        assert_eq!((request.tag, request.op), (expected_tag, expected_op));

        fx.server.request_finished(id, request.size as i64).unwrap();
        let done = reply(&fx);
        assert_eq!((done.tag, done.result), (expected_tag, request.size as i64));
    }

    assert_eq!(log.lock().unwrap().calls.len(), 3);
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
}

#[test]
fn test_synchronous_completion_on_idle_device() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, _) = ScriptedDriver::new(all_caps());
    let dev = fx.announce(driver.with_script(&[RequestStatus::Complete(64)]));
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Write, conn, 64, 8);
    let done = reply(&fx);
    assert_eq!((done.op, done.result, done.tag), (RequestOp::Write, 64, 8));
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
}

#[test]
fn test_chained_synchronous_completions() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, _) = ScriptedDriver::new(all_caps());
    let script = [
        RequestStatus::Pending,
        RequestStatus::Complete(11),
        RequestStatus::Complete(22),
    ];
    let dev = fx.announce(driver.with_script(&script));
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 1, 1);
    fx.io(RequestOp::Read, conn, 1, 2);
    fx.io(RequestOp::Read, conn, 1, 3);

    let first = fx.in_flight(dev).unwrap();
    fx.server.request_finished(first, 5).unwrap();

    let results: Vec<(u64, i64)> = (0..3).map(|_| {
        let r = reply(&fx);
        (r.tag, r.result)
    }).collect();
    assert_eq!(results, [(1, 5), (2, 11), (3, 22)]);
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
    assert_eq!(fx.server.request_count(), 0);
}

#[test]
fn test_devices_are_serialized_independently() {
    let mut fx = fixture(DevmanConfig::default());
    let (disk, disk_log) = ScriptedDriver::new(all_caps());
    let (tty, tty_log) = ScriptedDriver::new(all_caps());
    let a = fx.announce(disk);
    let b = fx.announce(tty);
    let conn_a = fx.open_ok(a, BIG_SHM);
    let conn_b = fx.open_ok(b, SMALL_SHM);

    fx.io(RequestOp::Read, conn_a, 1, 1);
    fx.io(RequestOp::Read, conn_a, 1, 2);
    fx.io(RequestOp::Write, conn_b, 1, 3);

    // Dispositivo B não espera pela fila de A
    assert_eq!(disk_log.lock().unwrap().calls.len(), 1);
    assert_eq!(tty_log.lock().unwrap().calls.len(), 1);
    assert_eq!(fx.server.device(a).map(Device::queued), Some(1));
    assert_eq!(fx.server.device_state(b), Some(DeviceState::Busy));
}

#[test]
fn test_request_larger_than_region_is_rejected() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, log) = ScriptedDriver::new(all_caps());
    let dev = fx.announce(driver);
    let conn = fx.open_ok(dev, SMALL_SHM);

    fx.io(RequestOp::Read, conn, 513, 4);
    let refused = reply(&fx);
    assert_eq!((refused.result, refused.tag), (SysError::InvalidArgument.as_code(), 4));
    assert!(log.lock().unwrap().calls.is_empty());
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
}

#[test]
fn test_forged_handle_is_rejected() {
    let mut fx = fixture(DevmanConfig::default());
    fx.announce(ScriptedDriver::new(all_caps()).0);

    fx.io(RequestOp::Write, ConnHandle::from_raw(0x7777_0000_0001), 1, 6);
    let refused = reply(&fx);
    assert_eq!((refused.op, refused.result), (RequestOp::Write, SysError::BadHandle.as_code()));
}

#[test]
fn test_request_pool_exhaustion_does_not_queue() {
    let mut fx = fixture(DevmanConfig {
        max_requests: 1,
        ..DevmanConfig::default()
    });
    let dev = fx.announce(ScriptedDriver::new(all_caps()).0);
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 1, 1);
    fx.io(RequestOp::Read, conn, 1, 2);

    let refused = reply(&fx);
    assert_eq!((refused.result, refused.tag), (SysError::ResourceExhausted.as_code(), 2));
    assert_eq!(fx.server.device(dev).map(Device::queued), Some(0));
    assert_eq!(fx.server.connection(conn).map(|c| c.outstanding), Some(1));
}

#[test]
fn test_absent_hook_keeps_request_in_flight() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, log) = ScriptedDriver::new(DeviceCaps::OPEN | DeviceCaps::WRITE);
    let dev = fx.announce(driver);
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 32, 12);
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Busy));
    assert!(log.lock().unwrap().calls.is_empty());
    assert!(fx.next_reply().is_none());

    // Completada por fora (ex.: interrupção)
    let id = fx.in_flight(dev).unwrap();
    fx.server.request_finished(id, 0).unwrap();
    assert_eq!(reply(&fx).tag, 12);
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
}

#[test]
fn test_finishing_queued_or_stale_request_fails() {
    let mut fx = fixture(DevmanConfig::default());
    let dev = fx.announce(ScriptedDriver::new(all_caps()).0);
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 1, 1);
    fx.io(RequestOp::Read, conn, 1, 2);

    let queued = fx.server.device(dev).map(|d| d.queue[0]).unwrap();
    assert_eq!(fx.server.request_finished(queued, 0), Err(SysError::InvalidArgument));

    let current = fx.in_flight(dev).unwrap();
    fx.server.request_finished(current, 0).unwrap();
    assert_eq!(fx.server.request_finished(current, 0), Err(SysError::NotFound));
}

#[test]
fn test_lost_reply_port_does_not_stall_device() {
    let mut fx = fixture(DevmanConfig::default());
    let dev = fx.announce(ScriptedDriver::new(all_caps()).0);
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 1, 1);
    fx.io(RequestOp::Read, conn, 1, 2);
    fx.space.delete_port(fx.client_port).unwrap();

    let first = fx.in_flight(dev).unwrap();
    fx.server.request_finished(first, 0).unwrap();
    let second = fx.in_flight(dev).unwrap();
    assert_ne!(first, second);
    fx.server.request_finished(second, 0).unwrap();
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Idle));
}

/// Registra quantas respostas já esperam na porta do cliente a cada hook.
struct ReplyObserver {
    space: Arc<IpcSpace>,
    client_port: PortId,
    seen: Arc<Mutex<Vec<usize>>>,
}

impl DeviceOps for ReplyObserver {
    fn caps(&self) -> DeviceCaps {
        all_caps()
    }

    fn read(&mut self, _id: RequestId, _request: &DeviceRequest) -> RequestStatus {
        let pending = self.space.pending(self.client_port).unwrap();
        self.seen.lock().unwrap().push(pending);
        RequestStatus::Pending
    }
}

#[test]
fn test_reply_sent_before_next_request_dispatched() {
    let mut fx = fixture(DevmanConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let dev = fx
        .server
        .announce(
            DeviceType::Block,
            Box::new(ReplyObserver {
                space: fx.space.clone(),
                client_port: fx.client_port,
                seen: seen.clone(),
            }),
        )
        .unwrap();
    let conn = fx.open_ok(dev, BIG_SHM);

    fx.io(RequestOp::Read, conn, 1, 1);
    fx.io(RequestOp::Read, conn, 1, 2);
    assert_eq!(*seen.lock().unwrap(), [0]);

    let first = fx.in_flight(dev).unwrap();
    fx.server.request_finished(first, 1).unwrap();

    // R2 só chega ao driver depois da resposta de R1 estar na fila
    assert_eq!(*seen.lock().unwrap(), [0, 1]);
    assert_eq!(reply(&fx).tag, 1);
    assert_eq!(fx.server.device_state(dev), Some(DeviceState::Busy));
}
