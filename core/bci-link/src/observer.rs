//! Error observer link and the network-error notification channel.
//!
//! This is the single place where failures are logged. Application errors
//! are logged and the response is delivered unchanged so partial data stays
//! usable. Transport failures that survive the retry link are logged and
//! announced to every registered [`NetworkErrorObserver`].

use crate::error::{LinkError, LinkResult, TransportErrorKind};
use crate::link::Link;
use crate::operation::{GraphQlResponse, Operation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::error;

/// Notification that an operation failed at the transport level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkErrorEvent {
    /// Name of the failing operation.
    pub operation: String,
    /// Human-readable failure reason.
    pub message: String,
    /// HTTP status, when the endpoint answered.
    pub status: Option<u16>,
    pub occurred_at: DateTime<Utc>,
}

/// Receives network-error notifications.
///
/// Called synchronously on the task that observed the failure; implementors
/// must return quickly and must not block.
pub trait NetworkErrorObserver: Send + Sync {
    fn on_network_error(&self, event: &NetworkErrorEvent);
}

impl<F> NetworkErrorObserver for F
where
    F: Fn(&NetworkErrorEvent) + Send + Sync,
{
    fn on_network_error(&self, event: &NetworkErrorEvent) {
        self(event)
    }
}

/// Handle returned by [`NetworkErrorNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of network-error observers.
#[derive(Default)]
pub struct NetworkErrorNotifier {
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn NetworkErrorObserver>)>>,
    next_id: AtomicU64,
}

impl NetworkErrorNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for all future events.
    pub fn subscribe(&self, observer: Arc<dyn NetworkErrorObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut observers = self
            .observers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        observers.push((id, observer));
        id
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .observers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .map(|observers| observers.len())
            .unwrap_or(0)
    }

    /// Delivers an event to every observer.
    pub fn notify(&self, event: &NetworkErrorEvent) {
        // Snapshot so observers may subscribe or unsubscribe from a callback.
        let observers: Vec<Arc<dyn NetworkErrorObserver>> = match self.observers.read() {
            Ok(guard) => guard.iter().map(|(_, o)| Arc::clone(o)).collect(),
            Err(poisoned) => poisoned.get_ref().iter().map(|(_, o)| Arc::clone(o)).collect(),
        };
        for observer in observers {
            observer.on_network_error(event);
        }
    }
}

/// Logs every failure of the inner link and announces transport failures.
pub struct ErrorLink<L> {
    inner: L,
    notifier: Arc<NetworkErrorNotifier>,
}

impl<L: Link> ErrorLink<L> {
    pub fn new(inner: L, notifier: Arc<NetworkErrorNotifier>) -> Self {
        Self { inner, notifier }
    }

    pub fn notifier(&self) -> &Arc<NetworkErrorNotifier> {
        &self.notifier
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: Link> Link for ErrorLink<L> {
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
        let result = self.inner.execute(operation).await;

        match &result {
            Ok(response) => {
                for err in &response.errors {
                    error!(
                        "[GraphQL error {}]: Message: {}, Location: [{}], Path: {}",
                        operation.name(),
                        err.message,
                        err.locations_display(),
                        err.path_display()
                    );
                }
            }
            Err(LinkError::Transport { kind, message, .. }) => {
                error!("[Network error {}]: {}", operation.name(), message);
                self.notifier.notify(&NetworkErrorEvent {
                    operation: operation.name().to_string(),
                    message: message.clone(),
                    status: TransportErrorKind::status(*kind),
                    occurred_at: Utc::now(),
                });
            }
            Err(other) => {
                error!("[Link error {}]: {}", operation.name(), other);
            }
        }

        result
    }
}
