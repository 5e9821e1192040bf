//! The ring context: storage binding, geometry, cursors and hooks

use std::{marker::PhantomData, ptr::NonNull};

use log::debug;

use crate::{
    config::{HookConfig, RingConfig},
    cursor::{ConcurrencyMode, Cursor, SideClaim},
    error::{Result, RingError},
    hooks::{ContextInfo, HookDispatcher, Subscription},
};

/// Fixed-capacity circular buffer over caller-owned storage
///
/// The ring never allocates or frees its storage. It borrows
/// `capacity * element_size` bytes for `'a` and moves whole elements in and
/// out of them, one slot always left unused.
///
/// Reads and writes take `&self`, so a producer and a consumer can share a
/// ring across threads. Lifecycle changes ([`RingBuffer::deinit`],
/// [`RingBuffer::reinit`], [`RingBuffer::set_hooks`]) take `&mut self` and
/// therefore cannot overlap a transfer.
#[derive(Debug)]
pub struct RingBuffer<'a> {
    /// Start of the backing storage, `None` once deinitialized
    pub(super) storage: Option<NonNull<u8>>,
    /// Element slots, including the reserved one
    pub(super) capacity: usize,
    /// Bytes per element
    pub(super) element_size: usize,
    /// Next slot to consume (consumer-owned)
    pub(super) read_index: Cursor,
    /// Next slot to produce (producer-owned)
    pub(super) write_index: Cursor,
    pub(super) producer: SideClaim,
    pub(super) consumer: SideClaim,
    pub(super) mode: ConcurrencyMode,
    pub(super) hooks: HookDispatcher,
    pub(super) _storage: PhantomData<&'a mut [u8]>,
}

// The storage pointer is only dereferenced inside slot ranges that the
// cursors hand to exactly one side at a time.
unsafe impl Send for RingBuffer<'_> {}
unsafe impl Sync for RingBuffer<'_> {}

/// Where a live ring's storage is and how it is carved up
#[derive(Debug, Clone, Copy)]
pub(super) struct Geometry {
    pub(super) base: NonNull<u8>,
    pub(super) capacity: usize,
    pub(super) element_size: usize,
}

impl<'a> RingBuffer<'a> {
    /// Bind a ring without hooks to `storage`
    pub fn new(storage: &'a mut [u8], config: RingConfig) -> Result<Self> {
        Self::with_hooks(storage, config, HookConfig::none())
    }

    /// Bind a ring to `storage` with user hooks
    ///
    /// `storage` must hold at least `capacity * element_size` bytes; any
    /// excess is left untouched.
    pub fn with_hooks(storage: &'a mut [u8], config: RingConfig, hooks: HookConfig) -> Result<Self> {
        validate(&config, &hooks)?;
        check_storage_len(storage.len(), &config)?;

        let base = NonNull::new(storage.as_mut_ptr())
            .ok_or_else(|| RingError::invalid_args("storage", "Storage pointer is null"))?;

        Ok(Self::bind(base, config, hooks))
    }

    /// Bind a ring to raw storage, such as a memory-mapped or DMA region
    ///
    /// # Safety
    ///
    /// `storage` must be valid for reads and writes of
    /// `config.capacity * config.element_size` bytes for `'a`, and nothing else
    /// may access those bytes while the ring is bound to them except through
    /// the ring's own hooks.
    pub unsafe fn from_raw_parts(
        storage: *mut u8,
        config: RingConfig,
        hooks: HookConfig,
    ) -> Result<Self> {
        let base = NonNull::new(storage)
            .ok_or_else(|| RingError::invalid_args("storage", "Storage pointer is null"))?;
        validate(&config, &hooks)?;

        Ok(Self::bind(base, config, hooks))
    }

    fn bind(base: NonNull<u8>, config: RingConfig, hooks: HookConfig) -> Self {
        debug!(
            "ring init: capacity={} element_size={} mode={:?} subscription={:?}",
            config.capacity, config.element_size, config.mode, hooks.subscription
        );

        Self {
            storage: Some(base),
            capacity: config.capacity,
            element_size: config.element_size,
            read_index: Cursor::new(0),
            write_index: Cursor::new(0),
            producer: SideClaim::default(),
            consumer: SideClaim::default(),
            mode: config.mode,
            hooks: HookDispatcher::from_config(hooks),
            _storage: PhantomData,
        }
    }

    /// Rebind this context to new storage, discarding any buffered data
    ///
    /// On error the context is left as it was.
    pub fn reinit(&mut self, storage: &'a mut [u8], config: RingConfig, hooks: HookConfig) -> Result<()> {
        *self = Self::with_hooks(storage, config, hooks)?;
        Ok(())
    }

    /// Reset every field to its neutral state
    ///
    /// The storage itself is not touched. Resetting an already neutral
    /// context is a no-op. Transfers, queries and [`RingBuffer::set_hooks`]
    /// fail with `InvalidArgs` until [`RingBuffer::reinit`] is called.
    pub fn deinit(&mut self) -> Result<()> {
        if self.storage.is_none() {
            return Ok(());
        }

        self.storage = None;
        self.capacity = 0;
        self.element_size = 0;
        self.read_index.reset();
        self.write_index.reset();
        self.mode = ConcurrencyMode::default();
        self.hooks = HookDispatcher::default();
        debug!("ring deinit");

        Ok(())
    }

    /// Replace the hook configuration between operations
    pub fn set_hooks(&mut self, hooks: HookConfig) -> Result<()> {
        self.geometry()?;
        hooks.validate_for(self.mode)?;

        debug!("ring hooks replaced: subscription={:?}", hooks.subscription);
        self.hooks = HookDispatcher::from_config(hooks);
        Ok(())
    }

    /// Whether the context is bound to storage
    pub fn is_initialized(&self) -> bool {
        self.storage.is_some()
    }

    /// Element slots in the storage, including the reserved one
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most elements the ring can hold at once
    pub fn usable_capacity(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn mode(&self) -> ConcurrencyMode {
        self.mode
    }

    /// Event kinds currently routed to the user handler
    pub fn subscription(&self) -> Subscription {
        self.hooks.subscription()
    }

    /// Current consumer position
    pub fn read_index(&self) -> usize {
        self.read_index.load_peer()
    }

    /// Current producer position
    pub fn write_index(&self) -> usize {
        self.write_index.load_peer()
    }

    /// Snapshot handed to hooks
    pub fn info(&self) -> ContextInfo {
        ContextInfo {
            capacity: self.capacity,
            element_size: self.element_size,
            read_index: self.read_index(),
            write_index: self.write_index(),
        }
    }

    pub(super) fn geometry(&self) -> Result<Geometry> {
        let base = self.storage.ok_or_else(RingError::not_initialized)?;
        Ok(Geometry {
            base,
            capacity: self.capacity,
            element_size: self.element_size,
        })
    }
}

fn validate(config: &RingConfig, hooks: &HookConfig) -> Result<()> {
    config.validate()?;
    hooks.validate_for(config.mode)
}

fn check_storage_len(len: usize, config: &RingConfig) -> Result<()> {
    let needed = config.storage_bytes()?;
    if len < needed {
        return Err(RingError::invalid_args(
            "storage",
            format!("Storage holds {} bytes, ring needs {}", len, needed),
        ));
    }
    Ok(())
}
