//! Several producers and consumers sharing one ring through lock hooks

use hookring::{
    ConcurrencyMode, EventKind, HookConfig, HookError, RingBuffer, RingConfig, RingError,
    RingEvent, Subscription,
};
use parking_lot::lock_api::RawMutex as _;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

const PRODUCERS: usize = 3;
const CONSUMERS: usize = 2;
const PER_PRODUCER: usize = 10_000;

fn main() {
    env_logger::init();

    println!("Locked MPMC Example");
    println!("===================");

    run().expect("MPMC example failed");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mutex = Arc::new(parking_lot::RawMutex::INIT);
    let locks = Arc::new(AtomicUsize::new(0));

    let handler_locks = locks.clone();
    let handler = move |event: &mut RingEvent<'_>| -> Result<(), HookError> {
        match event.kind() {
            EventKind::Lock => {
                mutex.lock();
                handler_locks.fetch_add(1, Ordering::Relaxed);
            }
            // SAFETY: paired with the lock event of the same operation
            EventKind::Unlock => unsafe { mutex.unlock() },
            EventKind::Read | EventKind::Write => {}
        }
        Ok(())
    };

    let mut storage = [0u8; 32 * 4];
    let config = RingConfig::new(32, 4).with_mode(ConcurrencyMode::ExternallyLocked);
    let ring = RingBuffer::with_hooks(
        &mut storage,
        config,
        HookConfig::new(handler, Subscription::LOCKING),
    )?;

    let total = PRODUCERS * PER_PRODUCER;
    let consumed = AtomicUsize::new(0);

    let sums: Vec<u64> = thread::scope(|scope| {
        for producer in 0..PRODUCERS {
            let ring = &ring;
            scope.spawn(move || {
                for i in 0..PER_PRODUCER {
                    let value = (producer * PER_PRODUCER + i) as u32;
                    while let Err(RingError::Full { .. }) = ring.write(&value.to_le_bytes(), 1) {
                        thread::yield_now();
                    }
                }
            });
        }

        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                scope.spawn(|| {
                    let mut sum = 0u64;
                    let mut buf = [0u8; 4];
                    while consumed.load(Ordering::SeqCst) < total {
                        if ring.read(&mut buf, 1).is_ok() {
                            sum += u32::from_le_bytes(buf) as u64;
                            consumed.fetch_add(1, Ordering::SeqCst);
                        } else {
                            thread::yield_now();
                        }
                    }
                    sum
                })
            })
            .collect();

        consumers
            .into_iter()
            .map(|handle| handle.join().unwrap_or(0))
            .collect()
    });

    let expected: u64 = (0..total as u64).sum();
    for (i, sum) in sums.iter().enumerate() {
        println!("Consumer {} checksum: {}", i, sum);
    }
    println!(
        "Total: {} (expected {}), lock events: {}",
        sums.iter().sum::<u64>(),
        expected,
        locks.load(Ordering::Relaxed)
    );

    Ok(())
}
