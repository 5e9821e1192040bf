//! Tests for the ring context and transfer engine

#[cfg(test)]
mod tests {
    use crate::{
        config::{HookConfig, RingConfig},
        cursor::ConcurrencyMode,
        error::{ErrorCode, HookError, RingError},
        hooks::{EventKind, RingEvent, Subscription},
        ring::RingBuffer,
    };

    fn fail_everything(_: &mut RingEvent<'_>) -> Result<(), HookError> {
        Err(HookError::new("refused"))
    }

    #[test]
    fn test_ring_buffer_basic() {
        let mut storage = [0u8; 4];
        let ring = RingBuffer::new(&mut storage, RingConfig::new(4, 1)).unwrap();

        assert!(ring.is_empty().unwrap());
        assert_eq!(ring.capacity(), 4);
        assert_eq!(ring.usable_capacity(), 3);

        ring.write(&[1, 2], 2).unwrap();
        assert_eq!(ring.filled().unwrap(), 2);
        assert!(!ring.is_empty().unwrap());

        let mut out = [0u8; 2];
        ring.read(&mut out, 2).unwrap();
        assert_eq!(out, [1, 2]);
        assert!(ring.is_empty().unwrap());
    }

    #[test]
    fn test_ring_buffer_full() {
        let mut storage = [0u8; 3];
        let ring = RingBuffer::new(&mut storage, RingConfig::new(3, 1)).unwrap();

        ring.write(&[1, 2], 2).unwrap();
        assert!(ring.is_full().unwrap());

        let err = ring.write(&[3], 1).unwrap_err();
        assert!(matches!(
            err,
            RingError::Full {
                requested: 1,
                available: 0
            }
        ));
        assert_eq!(ring.write_index(), 2);
    }

    #[test]
    fn test_ring_buffer_wrap_around() {
        let mut storage = [0u8; 5 * 2];
        let ring = RingBuffer::new(&mut storage, RingConfig::new(5, 2)).unwrap();
        let mut out = [0u8; 8];

        ring.write(&[0, 0, 1, 1, 2, 2], 3).unwrap();
        ring.read(&mut out, 2).unwrap();
        assert_eq!(&out[..4], &[0, 0, 1, 1]);

        // Write cursor at 3: two slots to the end, one after wrapping
        ring.write(&[3, 3, 4, 4, 5, 5], 3).unwrap();
        assert_eq!(ring.write_index(), 1);
        assert!(ring.is_full().unwrap());

        ring.read(&mut out, 4).unwrap();
        assert_eq!(out, [2, 2, 3, 3, 4, 4, 5, 5]);
        assert!(ring.is_empty().unwrap());
    }

    #[test]
    fn test_fill_drain_scenario() {
        // 11 slots, 10 usable
        let mut storage = [0u8; 11];
        let ring = RingBuffer::new(&mut storage, RingConfig::new(11, 1)).unwrap();
        let mut out = [0u8; 10];

        ring.write(&[1, 2, 3, 4, 5, 6, 7, 8], 8).unwrap();
        assert_eq!(ring.filled().unwrap(), 8);
        assert_eq!(ring.unfilled().unwrap(), 2);

        ring.read(&mut out[..2], 2).unwrap();
        assert_eq!(ring.filled().unwrap(), 6);

        ring.write(&[9, 10, 11, 12], 4).unwrap();
        assert_eq!(ring.filled().unwrap(), 10);
        assert!(ring.is_full().unwrap());

        ring.read(&mut out, 10).unwrap();
        assert!(ring.is_empty().unwrap());
        assert_eq!(out, [3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut storage = [0u8; 8];

        assert!(RingBuffer::new(&mut storage, RingConfig::new(1, 1)).is_err());
        assert!(RingBuffer::new(&mut storage, RingConfig::new(8, 0)).is_err());
        // Storage too small for 5 elements of 2 bytes
        assert!(RingBuffer::new(&mut storage, RingConfig::new(5, 2)).is_err());
        assert!(RingBuffer::with_hooks(
            &mut storage,
            RingConfig::new(8, 1),
            HookConfig::new(fail_everything, Subscription::NONE),
        )
        .is_err());

        let ring = RingBuffer::new(&mut storage, RingConfig::new(4, 2)).unwrap();
        let mut out = [0u8; 2];
        assert_eq!(ring.write(&[1, 2], 0).unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.read(&mut out, 0).unwrap_err().code(), ErrorCode::InvalidArgs);
        // Source shorter than count * element_size
        assert_eq!(ring.write(&[1, 2, 3], 2).unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.read(&mut out, 2).unwrap_err().code(), ErrorCode::InvalidArgs);
        assert!(ring.is_empty().unwrap());
    }

    #[test]
    fn test_null_raw_storage_rejected() {
        let result = unsafe {
            RingBuffer::from_raw_parts(std::ptr::null_mut(), RingConfig::new(4, 1), HookConfig::none())
        };
        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidArgs);
    }

    #[test]
    fn test_deinit_resets_context() {
        let mut storage = [0u8; 4];
        let mut ring = RingBuffer::new(&mut storage, RingConfig::new(4, 1)).unwrap();
        ring.write(&[7, 7], 2).unwrap();

        ring.deinit().unwrap();
        assert!(!ring.is_initialized());
        assert_eq!(ring.capacity(), 0);
        assert_eq!(ring.element_size(), 0);
        assert_eq!(ring.read_index(), 0);
        assert_eq!(ring.write_index(), 0);
        assert!(ring.subscription().is_empty());

        let mut out = [0u8; 1];
        assert_eq!(ring.write(&[1], 1).unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.read(&mut out, 1).unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.filled().unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.unfilled().unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.is_empty().unwrap_err().code(), ErrorCode::InvalidArgs);
        assert_eq!(ring.is_full().unwrap_err().code(), ErrorCode::InvalidArgs);
        assert!(ring.set_hooks(HookConfig::none()).is_err());
        drop(ring);

        // Deinit never touches the bytes themselves
        assert_eq!(storage, [7, 7, 0, 0]);
    }

    #[test]
    fn test_deinit_is_idempotent() {
        let mut storage = [0u8; 4];
        let mut ring = RingBuffer::new(&mut storage, RingConfig::new(4, 1)).unwrap();
        ring.write(&[3], 1).unwrap();

        ring.deinit().unwrap();
        ring.deinit().unwrap();
        assert!(!ring.is_initialized());
        assert_eq!(ring.capacity(), 0);
        assert_eq!(ring.write_index(), 0);
        assert_eq!(ring.filled().unwrap_err().code(), ErrorCode::InvalidArgs);
    }

    #[test]
    fn test_reinit_after_deinit() {
        let mut first = [0u8; 4];
        let mut second = [0u8; 6];
        let mut ring = RingBuffer::new(&mut first, RingConfig::new(4, 1)).unwrap();
        ring.write(&[1], 1).unwrap();
        ring.deinit().unwrap();

        ring.reinit(&mut second, RingConfig::new(3, 2), HookConfig::none())
            .unwrap();
        assert!(ring.is_initialized());
        assert_eq!(ring.capacity(), 3);
        assert!(ring.is_empty().unwrap());

        ring.write(&[5, 6, 7, 8], 2).unwrap();
        assert!(ring.is_full().unwrap());
    }

    #[test]
    fn test_hook_reconfiguration() {
        let mut storage = [0u8; 8];
        let mut ring = RingBuffer::new(&mut storage, RingConfig::new(8, 1)).unwrap();

        ring.set_hooks(HookConfig::new(fail_everything, Subscription::WRITE))
            .unwrap();
        let err = ring.write(&[1], 1).unwrap_err();
        assert!(matches!(
            err,
            RingError::Event {
                kind: EventKind::Write,
                ..
            }
        ));
        assert_eq!(ring.write_index(), 0);

        let orphan = HookConfig {
            subscription: Subscription::READ,
            ..HookConfig::none()
        };
        assert!(ring.set_hooks(orphan).is_err());

        ring.set_hooks(HookConfig::none()).unwrap();
        ring.write(&[1], 1).unwrap();
        assert_eq!(ring.filled().unwrap(), 1);
    }

    #[test]
    fn test_locked_mode_requires_lock_hooks() {
        let mut storage = [0u8; 8];
        let config = RingConfig::new(8, 1).with_mode(ConcurrencyMode::ExternallyLocked);

        assert!(RingBuffer::new(&mut storage, config).is_err());

        let noop = |_: &mut RingEvent<'_>| -> Result<(), HookError> { Ok(()) };
        let mut ring =
            RingBuffer::with_hooks(&mut storage, config, HookConfig::new(noop, Subscription::LOCKING))
                .unwrap();
        assert_eq!(ring.mode(), ConcurrencyMode::ExternallyLocked);
        assert!(ring.set_hooks(HookConfig::none()).is_err());
    }

    #[test]
    fn test_locked_mode_transfers_match_lock_free() {
        let noop = |_: &mut RingEvent<'_>| -> Result<(), HookError> { Ok(()) };
        let mut free_storage = [0u8; 5];
        let mut locked_storage = [0u8; 5];
        let free = RingBuffer::new(&mut free_storage, RingConfig::new(5, 1)).unwrap();
        let locked = RingBuffer::with_hooks(
            &mut locked_storage,
            RingConfig::new(5, 1).with_mode(ConcurrencyMode::ExternallyLocked),
            HookConfig::new(noop, Subscription::LOCKING),
        )
        .unwrap();

        let mut free_out = [0u8; 4];
        let mut locked_out = [0u8; 4];
        for ring in [&free, &locked] {
            ring.write(&[1, 2, 3], 3).unwrap();
        }
        free.read(&mut free_out[..2], 2).unwrap();
        locked.read(&mut locked_out[..2], 2).unwrap();
        for ring in [&free, &locked] {
            ring.write(&[4, 5, 6], 3).unwrap();
        }
        free.read(&mut free_out, 4).unwrap();
        locked.read(&mut locked_out, 4).unwrap();

        assert_eq!(free_out, [3, 4, 5, 6]);
        assert_eq!(locked_out, free_out);
        assert_eq!(locked.read_index(), free.read_index());
        assert_eq!(locked.write_index(), free.write_index());
        assert_eq!(locked.write_index(), 1);
    }

    #[test]
    fn test_split_handles() {
        let mut storage = [0u8; 6];
        let mut ring = RingBuffer::new(&mut storage, RingConfig::new(3, 2)).unwrap();
        let (mut producer, mut consumer) = ring.split();

        assert_eq!(producer.unfilled().unwrap(), 2);
        producer.write(&[1, 2, 3, 4], 2).unwrap();
        assert!(producer.is_full().unwrap());
        assert_eq!(consumer.filled().unwrap(), 2);

        let mut out = [0u8; 4];
        consumer.read(&mut out, 2).unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
        assert!(consumer.is_empty().unwrap());
        assert_eq!(consumer.element_size(), 2);
    }

    #[test]
    fn test_info_snapshot() {
        let mut storage = [0u8; 12];
        let ring = RingBuffer::new(&mut storage, RingConfig::new(6, 2)).unwrap();
        ring.write(&[0; 6], 3).unwrap();

        let info = ring.info();
        assert_eq!(info.capacity, 6);
        assert_eq!(info.element_size, 2);
        assert_eq!(info.read_index, 0);
        assert_eq!(info.write_index, 3);
    }
}
