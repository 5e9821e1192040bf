//! Ring and hook configuration

use std::{any::Any, fmt, sync::Arc};

use crate::{
    cursor::ConcurrencyMode,
    error::{Result, RingError},
    hooks::{EventHandler, Subscription},
};

/// Default number of element slots, including the reserved one
pub const DEFAULT_CAPACITY: usize = 256;

/// Smallest usable capacity: one data slot plus the reserved slot
pub const MIN_CAPACITY: usize = 2;

/// Slots kept permanently empty to tell a full ring from an empty one
pub const RESERVED_SLOTS: usize = 1;

/// Geometry and concurrency mode of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    /// Number of element slots in the backing storage
    pub capacity: usize,
    /// Size of one element in bytes
    pub element_size: usize,
    /// How producers and consumers share the ring
    pub mode: ConcurrencyMode,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            element_size: 1,
            mode: ConcurrencyMode::LockFree,
        }
    }
}

impl RingConfig {
    /// Create a lock-free configuration with the given geometry
    pub fn new(capacity: usize, element_size: usize) -> Self {
        Self {
            capacity,
            element_size,
            ..Default::default()
        }
    }

    /// Set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set element size
    pub fn with_element_size(mut self, element_size: usize) -> Self {
        self.element_size = element_size;
        self
    }

    /// Set concurrency mode
    pub fn with_mode(mut self, mode: ConcurrencyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of elements the ring can hold at once
    pub fn usable_capacity(&self) -> usize {
        self.capacity.saturating_sub(RESERVED_SLOTS)
    }

    /// Bytes of backing storage the ring needs
    pub fn storage_bytes(&self) -> Result<usize> {
        self.capacity.checked_mul(self.element_size).ok_or_else(|| {
            RingError::invalid_args("capacity", "capacity * element_size overflows usize")
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(RingError::invalid_args(
                "capacity",
                format!("Capacity must be at least {}", MIN_CAPACITY),
            ));
        }

        if self.element_size == 0 {
            return Err(RingError::invalid_args(
                "element_size",
                "Element size cannot be zero",
            ));
        }

        self.storage_bytes().map(|_| ())
    }
}

/// User hook registration
///
/// A handler and a non-empty subscription always come together: a handler
/// with nothing subscribed, or a subscription with no handler, is rejected.
#[derive(Clone, Default)]
pub struct HookConfig {
    /// Handler for subscribed events
    pub handler: Option<Arc<dyn EventHandler>>,
    /// Events routed to the handler; the rest use built-in behavior
    pub subscription: Subscription,
    /// Opaque value passed to the handler with every event
    pub user_data: Option<Arc<dyn Any + Send + Sync>>,
}

impl HookConfig {
    /// No hooks: raw copies and no locking
    pub fn none() -> Self {
        Self::default()
    }

    /// Route the subscribed events to `handler`
    pub fn new<H: EventHandler + 'static>(handler: H, subscription: Subscription) -> Self {
        Self::shared(Arc::new(handler), subscription)
    }

    /// Route the subscribed events to a handler that is shared elsewhere
    pub fn shared(handler: Arc<dyn EventHandler>, subscription: Subscription) -> Self {
        Self {
            handler: Some(handler),
            subscription,
            user_data: None,
        }
    }

    /// Attach user data
    pub fn with_user_data<T: Any + Send + Sync>(mut self, user_data: T) -> Self {
        self.user_data = Some(Arc::new(user_data));
        self
    }

    /// Validate the handler/subscription pairing
    pub fn validate(&self) -> Result<()> {
        match (&self.handler, self.subscription.is_empty()) {
            (Some(_), true) => Err(RingError::invalid_args(
                "subscription",
                "A handler requires at least one subscribed event",
            )),
            (None, false) => Err(RingError::invalid_args(
                "handler",
                "Subscribed events require a handler",
            )),
            _ => Ok(()),
        }
    }

    /// Validate against the ring's concurrency mode
    pub fn validate_for(&self, mode: ConcurrencyMode) -> Result<()> {
        self.validate()?;

        if mode == ConcurrencyMode::ExternallyLocked
            && !self.subscription.contains(Subscription::LOCKING)
        {
            return Err(RingError::invalid_args(
                "mode",
                "Externally locked rings must subscribe to lock and unlock",
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for HookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookConfig")
            .field("handler", &self.handler.is_some())
            .field("subscription", &self.subscription)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}
