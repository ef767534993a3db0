//! Write handles: `[mutate, {data, loading, error, called}]`.

use crate::client::BciClient;
use crate::error::{ClientError, ClientResult};
use crate::operation::Mutation;
use crate::result::MutationState;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

type CompletedFn<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ErrorFn = Arc<dyn Fn(&ClientError) + Send + Sync>;

/// Callbacks invoked when a write finishes.
pub struct MutationOptions<T> {
    pub on_completed: Option<CompletedFn<T>>,
    pub on_error: Option<ErrorFn>,
}

impl<T> MutationOptions<T> {
    pub fn new() -> Self {
        Self {
            on_completed: None,
            on_error: None,
        }
    }

    /// Called with the payload of every successful write.
    pub fn on_completed<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_completed = Some(Arc::new(f));
        self
    }

    /// Called with the real failure of every failed write.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&ClientError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }
}

impl<T> Default for MutationOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MutationOptions<T> {
    fn clone(&self) -> Self {
        Self {
            on_completed: self.on_completed.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> fmt::Debug for MutationOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationOptions")
            .field("on_completed", &self.on_completed.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// A bound write operation and the state of its latest call.
pub struct MutationHandle<M: Mutation> {
    client: BciClient,
    options: MutationOptions<M::Data>,
    state: Arc<Mutex<MutationState<M::Data>>>,
}

impl<M: Mutation> Clone for MutationHandle<M> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            options: self.options.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<M: Mutation> MutationHandle<M> {
    pub(crate) fn new(client: BciClient, options: MutationOptions<M::Data>) -> Self {
        Self {
            client,
            options,
            state: Arc::new(Mutex::new(MutationState::default())),
        }
    }

    /// Runs the write, updates the state and fires the matching callback.
    ///
    /// The outcome is also returned, so callers may use either style.
    pub async fn mutate(&self, variables: &M::Variables) -> ClientResult<M::Data> {
        {
            let mut state = self.lock();
            state.called = true;
            state.loading = true;
            state.error = None;
        }

        let result = self.client.mutate::<M>(variables).await;

        {
            let mut state = self.lock();
            state.loading = false;
            match &result {
                Ok(data) => {
                    state.data = Some(data.clone());
                    state.error = None;
                }
                Err(err) => {
                    state.data = None;
                    state.error = Some(err.clone());
                }
            }
        }

        match &result {
            Ok(data) => {
                if let Some(on_completed) = &self.options.on_completed {
                    on_completed(data);
                }
            }
            Err(err) => {
                if let Some(on_error) = &self.options.on_error {
                    on_error(err);
                }
            }
        }
        result
    }

    /// Snapshot of `{data, loading, error, called}`.
    pub fn state(&self) -> MutationState<M::Data> {
        self.lock().clone()
    }

    /// Returns the handle to its never-called state.
    pub fn reset(&self) {
        *self.lock() = MutationState::default();
    }

    fn lock(&self) -> MutexGuard<'_, MutationState<M::Data>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
