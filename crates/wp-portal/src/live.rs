//! Live Update Subscriber.
//!
//! A mounted view owns exactly one [`SubscriptionGuard`]. The pump future
//! appends every delivered `NewWave` to the store until the guard drops.

use crate::store::ViewStore;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::stream::LocalBoxStream;
use futures::{FutureExt, StreamExt};
use std::rc::Rc;
use tracing::{debug, info, warn};
use wp_contract::Result;
use wp_types::NewWaveEvent;

pub struct LiveFeed {
    guard: SubscriptionGuard,
    pump: LocalBoxFuture<'static, ()>,
}

impl LiveFeed {
    pub(crate) fn new(
        events: LocalBoxStream<'static, Result<NewWaveEvent>>,
        store: Rc<ViewStore>,
    ) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        let pump = Abortable::new(pump(events, store), registration)
            .map(|outcome| {
                if outcome.is_err() {
                    debug!("NewWave pump stopped");
                }
            })
            .boxed_local();

        Self {
            guard: SubscriptionGuard { handle },
            pump,
        }
    }

    /// The host spawns the pump on its local executor and keeps the guard
    /// for as long as the view stays mounted.
    pub fn into_parts(self) -> (SubscriptionGuard, LocalBoxFuture<'static, ()>) {
        (self.guard, self.pump)
    }
}

async fn pump(mut events: LocalBoxStream<'static, Result<NewWaveEvent>>, store: Rc<ViewStore>) {
    while let Some(item) = events.next().await {
        match item {
            Ok(event) => {
                info!(
                    from = %event.from,
                    timestamp = event.timestamp,
                    message = %event.message,
                    "NewWave"
                );
                store.push_wave(event.into());
            }
            Err(err) => warn!(%err, "NewWave delivery failed"),
        }
    }
}

/// Detaches the `NewWave` listener when dropped.
pub struct SubscriptionGuard {
    handle: AbortHandle,
}

impl SubscriptionGuard {
    pub fn is_attached(&self) -> bool {
        !self.handle.is_aborted()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        debug!("detaching NewWave listener");
        self.handle.abort();
    }
}
