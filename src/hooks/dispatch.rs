//! Routing of events to user handlers or to the built-in behavior

use std::{any::Any, fmt, sync::Arc};

use super::{ContextInfo, EventKind, EventPayload, RingEvent, Subscription};
use crate::{config::HookConfig, error::HookError};

/// A user hook
///
/// Read and write handlers must either perform the copy described by the
/// event payload or return an error. Lock and unlock handlers may block; any
/// error they return is discarded, since those events cannot fail an
/// operation.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &mut RingEvent<'_>) -> Result<(), HookError>;
}

impl<F> EventHandler for F
where
    F: Fn(&mut RingEvent<'_>) -> Result<(), HookError> + Send + Sync,
{
    fn handle(&self, event: &mut RingEvent<'_>) -> Result<(), HookError> {
        self(event)
    }
}

/// Built-in handler: plain byte copies, no locking
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCopy;

impl EventHandler for RawCopy {
    fn handle(&self, event: &mut RingEvent<'_>) -> Result<(), HookError> {
        event.copy_through();
        Ok(())
    }
}

static RAW_COPY: RawCopy = RawCopy;

/// Per-ring routing table, resolved once when hooks are configured
#[derive(Clone, Default)]
pub(crate) struct HookDispatcher {
    routes: [Option<Arc<dyn EventHandler>>; 4],
    subscription: Subscription,
    user_data: Option<Arc<dyn Any + Send + Sync>>,
}

impl HookDispatcher {
    /// Build the routing table for an already validated configuration
    pub(crate) fn from_config(config: HookConfig) -> Self {
        let HookConfig {
            handler,
            subscription,
            user_data,
        } = config;

        let mut routes: [Option<Arc<dyn EventHandler>>; 4] = Default::default();
        if let Some(handler) = handler {
            for kind in EventKind::ALL {
                if subscription.includes(kind) {
                    routes[kind.slot()] = Some(Arc::clone(&handler));
                }
            }
        }

        Self {
            routes,
            subscription,
            user_data,
        }
    }

    pub(crate) fn subscription(&self) -> Subscription {
        self.subscription
    }

    fn route(&self, kind: EventKind) -> &dyn EventHandler {
        match &self.routes[kind.slot()] {
            Some(handler) => handler.as_ref(),
            None => &RAW_COPY,
        }
    }

    fn raise(&self, context: ContextInfo, payload: EventPayload<'_>) -> Result<(), HookError> {
        let mut event = RingEvent::new(context, self.user_data.as_deref(), payload);
        let kind = event.kind();
        self.route(kind).handle(&mut event)
    }

    pub(crate) fn read(
        &self,
        context: ContextInfo,
        source: &[u8],
        destination: &mut [u8],
    ) -> Result<(), HookError> {
        self.raise(
            context,
            EventPayload::Read {
                source,
                destination,
            },
        )
    }

    pub(crate) fn write(
        &self,
        context: ContextInfo,
        source: &[u8],
        destination: &mut [u8],
    ) -> Result<(), HookError> {
        self.raise(
            context,
            EventPayload::Write {
                source,
                destination,
            },
        )
    }

    pub(crate) fn lock(&self, context: ContextInfo) {
        let _ = self.raise(context, EventPayload::Lock);
    }

    pub(crate) fn unlock(&self, context: ContextInfo) {
        let _ = self.raise(context, EventPayload::Unlock);
    }
}

impl fmt::Debug for HookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDispatcher")
            .field("subscription", &self.subscription)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}
