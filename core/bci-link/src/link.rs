//! Link abstraction.
//!
//! A link takes an operation and produces a GraphQL response. Links compose
//! by wrapping: the error observer wraps the retry policy, which wraps the
//! HTTP transport. Callers only ever see the outermost link.

use crate::error::LinkResult;
use crate::operation::{GraphQlResponse, Operation};
use async_trait::async_trait;
use std::sync::Arc;

/// One stage of the request pipeline.
///
/// `Ok` means a GraphQL response was obtained, which may still carry
/// application errors. `Err` is reserved for failures where no response
/// exists.
#[async_trait]
pub trait Link: Send + Sync {
    /// Executes the operation and returns its response.
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse>;
}

#[async_trait]
impl<L: Link + ?Sized> Link for Arc<L> {
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
        (**self).execute(operation).await
    }
}

#[async_trait]
impl<L: Link + ?Sized> Link for Box<L> {
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
        (**self).execute(operation).await
    }
}

/// Scripted links for tests.
pub mod mock {
    use super::*;
    use crate::error::LinkError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A link that replays queued outcomes and records every operation name
    /// it was asked to execute.
    ///
    /// When the queue is empty the fallback outcome is returned, which makes
    /// "always fails" scripts a single call.
    pub struct ScriptedLink {
        script: Mutex<VecDeque<LinkResult<GraphQlResponse>>>,
        fallback: LinkResult<GraphQlResponse>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedLink {
        /// A link whose every call returns `outcome`.
        pub fn always(outcome: LinkResult<GraphQlResponse>) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                fallback: outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// A link that returns the scripted outcomes in order, then `fallback`.
        pub fn sequence(
            script: Vec<LinkResult<GraphQlResponse>>,
            fallback: LinkResult<GraphQlResponse>,
        ) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Number of operations executed so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Names of the operations executed so far, in order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Link for ScriptedLink {
        async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
            self.calls.lock().unwrap().push(operation.name().to_string());
            let next = self.script.lock().unwrap().pop_front();
            let outcome = next.unwrap_or_else(|| self.fallback.clone());
            outcome.map_err(|err| match err {
                LinkError::Transport { kind, message, .. } => {
                    LinkError::transport(operation.name(), kind, message)
                }
                other => other,
            })
        }
    }
}
