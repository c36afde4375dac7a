mod common;

#[cfg(test)]
mod tests {
    use myrtio_lamp::{HttpMethod, LampMode, MemoryStore, Request, SharedDevice, Timestamp};

    use crate::common::boot_device;

    #[test]
    fn test_shared_device_serializes_access() {
        let shared = SharedDevice::new(boot_device(MemoryStore::new()));

        shared.with(|device| device.set_power(true));
        let mode = shared.with(|device| {
            device.set_mode(LampMode::Purr).unwrap();
            device.lamp().mode()
        });
        assert_eq!(mode, LampMode::Purr);

        let status = shared.with(|device| {
            device.advance(Timestamp::ZERO);
            device
                .handle(&Request::new(HttpMethod::Get, "/api/paw"), Timestamp::ZERO)
                .text()
                .contains(r#""led_on":true"#)
        });
        assert!(status);

        let device = shared.into_inner();
        assert_eq!(device.lamp().state().next_deadline(), Some(Timestamp::from_millis(160)));
    }

    #[test]
    fn test_shared_device_across_threads() {
        let shared = SharedDevice::new(boot_device(MemoryStore::new()));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        shared.with(|device| {
                            let on = device.lamp().is_on();
                            device.set_power(!on);
                        });
                    }
                });
            }
        });

        // 100 toggles in total
        assert!(!shared.with(|device| device.lamp().is_on()));
    }
}
