//! Producer-consumer pipeline over a stack-allocated ring
//!
//! Run with `RUST_LOG=hookring=trace` to see every segment copy.

use hookring::{
    EventPayload, HookConfig, HookError, RingBuffer, RingConfig, RingError, RingEvent,
    Subscription,
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Instant,
};

/// Fixed-size sensor sample, 8 bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    channel: u16,
    sequence: u16,
    value: f32,
}

impl Sample {
    const SIZE: usize = 8;

    fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.channel.to_le_bytes());
        out[2..4].copy_from_slice(&self.sequence.to_le_bytes());
        out[4..8].copy_from_slice(&self.value.to_le_bytes());
        out
    }

    fn decode(bytes: &[u8]) -> Self {
        Self {
            channel: u16::from_le_bytes([bytes[0], bytes[1]]),
            sequence: u16::from_le_bytes([bytes[2], bytes[3]]),
            value: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }
}

fn main() {
    env_logger::init();

    println!("SPSC Pipeline Example");
    println!("=====================");

    basic_example().expect("Basic example failed");

    println!("\n{}", "=".repeat(50));

    threaded_example().expect("Threaded example failed");
}

fn basic_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n1. Basic write / read");

    let mut storage = [0u8; 5 * Sample::SIZE];
    let ring = RingBuffer::new(&mut storage, RingConfig::new(5, Sample::SIZE))?;
    println!(
        "Ring: {} slots, {} usable, {} bytes per element",
        ring.capacity(),
        ring.usable_capacity(),
        ring.element_size()
    );

    for sequence in 0..4u16 {
        let sample = Sample {
            channel: 1,
            sequence,
            value: sequence as f32 * 0.5,
        };
        ring.write(&sample.encode(), 1)?;
        println!("  Produced: {:?}", sample);
    }

    match ring.write(&[0u8; Sample::SIZE], 1) {
        Err(RingError::Full { requested, available }) => {
            println!("  Ring full: requested {}, available {}", requested, available)
        }
        other => println!("  Unexpected: {:?}", other),
    }

    let mut buf = [0u8; 4 * Sample::SIZE];
    ring.read(&mut buf, 4)?;
    for chunk in buf.chunks_exact(Sample::SIZE) {
        println!("  Consumed: {:?}", Sample::decode(chunk));
    }

    Ok(())
}

fn threaded_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n2. Threaded pipeline with byte accounting");

    let bytes = Arc::new(AtomicUsize::new(0));
    let counted = bytes.clone();
    let accounting = move |event: &mut RingEvent<'_>| -> Result<(), HookError> {
        if let EventPayload::Write { source, .. } = event.payload() {
            counted.fetch_add(source.len(), Ordering::Relaxed);
        }
        event.copy_through();
        Ok(())
    };

    let capacity = 64;
    let samples = 100_000u32;
    let mut storage = vec![0u8; capacity * Sample::SIZE];
    let mut ring = RingBuffer::with_hooks(
        &mut storage,
        RingConfig::new(capacity, Sample::SIZE),
        HookConfig::new(accounting, Subscription::WRITE),
    )?;
    let (mut producer, mut consumer) = ring.split();

    let start = Instant::now();
    let received = thread::scope(|scope| {
        scope.spawn(move || {
            for i in 0..samples {
                let sample = Sample {
                    channel: (i % 4) as u16,
                    sequence: i as u16,
                    value: i as f32,
                };
                while let Err(RingError::Full { .. }) = producer.write(&sample.encode(), 1) {
                    thread::yield_now();
                }
            }
        });

        let mut received = 0u32;
        let mut buf = [0u8; Sample::SIZE];
        while received < samples {
            match consumer.read(&mut buf, 1) {
                Ok(()) => {
                    let sample = Sample::decode(&buf);
                    debug_assert_eq!(sample.sequence, received as u16);
                    received += 1;
                }
                Err(RingError::Empty { .. }) => thread::yield_now(),
                Err(e) => return Err(e),
            }
        }
        Ok(received)
    })?;

    let elapsed = start.elapsed();
    println!("Received {} samples in {:?}", received, elapsed);
    println!("Bytes through write hook: {}", bytes.load(Ordering::Relaxed));
    println!(
        "Throughput: {:.0} samples/s",
        received as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}
