use super::*;

#[test]
fn test_announce_sends_to_devman_port() {
    let mut fx = fixture(DevmanConfig::default());
    let (driver, _) = ScriptedDriver::new(all_caps());
    let id = fx.server.announce(DeviceType::Char, Box::new(driver)).unwrap();
    assert_eq!(id, DeviceId(0));

    let mut out = IpcMessage::default();
    assert_eq!(
        fx.space.try_receive(fx.devman_port, &mut out),
        Ok(Some(ProcessId(100)))
    );
    assert_eq!(
        out.data,
        [1000, DeviceType::Char as u64, fx.server.local_port().0, 0, 0, 0]
    );
}

#[test]
fn test_device_ids_increase() {
    let mut fx = fixture(DevmanConfig::default());
    let first = fx.announce(ScriptedDriver::new(all_caps()).0);
    let second = fx.announce(ScriptedDriver::new(all_caps()).0);
    assert!(second > first);
    assert_eq!(fx.server.device_state(first), Some(DeviceState::Idle));
    assert_eq!(fx.server.device_count(), 2);
}

#[test]
fn test_failed_announce_rolls_back() {
    let mut fx = fixture(DevmanConfig::default());
    fx.space.delete_port(fx.devman_port).unwrap();

    let (driver, _) = ScriptedDriver::new(all_caps());
    assert_eq!(
        fx.server.announce(DeviceType::Block, Box::new(driver)),
        Err(SysError::NotFound)
    );
    assert_eq!(fx.server.device_count(), 0);
    assert!(fx.server.device(DeviceId(0)).is_none());
}

#[test]
fn test_device_pool_exhaustion() {
    let mut fx = fixture(DevmanConfig {
        max_devices: 1,
        ..DevmanConfig::default()
    });
    fx.announce(ScriptedDriver::new(all_caps()).0);

    let (driver, _) = ScriptedDriver::new(all_caps());
    assert_eq!(
        fx.server.announce(DeviceType::Block, Box::new(driver)),
        Err(SysError::ResourceExhausted)
    );

    // Nada chegou ao devman
    let mut out = IpcMessage::default();
    assert_eq!(fx.space.try_receive(fx.devman_port, &mut out), Ok(None));
}
