//! Scripted fetcher whose behavior is driven by a controller handle.
//!
//! Each call consumes the next queued behavior; once the queue is empty the
//! fallback behavior applies. Calls, params and credentials are recorded so
//! tests can assert on what reached the fetcher.
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tributary_core::category::{DataOf, ParamsOf};
use tributary_core::{Category, Credentials, FetchError, Fetcher};

/// Instruction for how one fetch call should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided records immediately.
    Return(Vec<T>),
    /// Fail immediately with the provided error.
    Fail(FetchError),
    /// Wait, then return the provided records.
    Delay(Duration, Vec<T>),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

struct InternalState<C: Category> {
    queue: VecDeque<MockBehavior<DataOf<C>>>,
    fallback: MockBehavior<DataOf<C>>,
    params: Vec<ParamsOf<C>>,
    credentials: Vec<Credentials>,
}

/// Fetcher for category `C` that follows a script.
pub struct ScriptedFetcher<C: Category> {
    state: Arc<Mutex<InternalState<C>>>,
    require_credentials: bool,
}

/// Controller handle used by tests to drive a [`ScriptedFetcher`].
pub struct ScriptController<C: Category> {
    state: Arc<Mutex<InternalState<C>>>,
}

impl<C: Category> Clone for ScriptController<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: Category> ScriptedFetcher<C> {
    /// Create a fetcher that falls back to `fallback`, plus its controller.
    ///
    /// The fetcher requires credentials by default.
    #[must_use]
    pub fn new_with_controller(fallback: MockBehavior<DataOf<C>>) -> (Self, ScriptController<C>) {
        let state = Arc::new(Mutex::new(InternalState {
            queue: VecDeque::new(),
            fallback,
            params: Vec::new(),
            credentials: Vec::new(),
        }));
        let fetcher = Self {
            state: Arc::clone(&state),
            require_credentials: true,
        };
        (fetcher, ScriptController { state })
    }

    /// Skip the dispatcher's credential precheck.
    #[must_use]
    pub const fn without_credentials(mut self) -> Self {
        self.require_credentials = false;
        self
    }
}

impl<C: Category> ScriptController<C> {
    /// Queue a behavior for the next unscripted call.
    pub async fn push(&self, behavior: MockBehavior<DataOf<C>>) {
        self.state.lock().await.queue.push_back(behavior);
    }

    /// Replace the behavior used once the queue runs dry.
    pub async fn set_fallback(&self, behavior: MockBehavior<DataOf<C>>) {
        self.state.lock().await.fallback = behavior;
    }

    /// Number of calls that reached the fetcher.
    pub async fn calls(&self) -> usize {
        self.state.lock().await.params.len()
    }

    /// Params received, in call order.
    pub async fn params(&self) -> Vec<ParamsOf<C>> {
        self.state.lock().await.params.clone()
    }

    /// Credentials received, in call order.
    pub async fn credentials(&self) -> Vec<Credentials> {
        self.state.lock().await.credentials.clone()
    }
}

#[async_trait]
impl<C> Fetcher for ScriptedFetcher<C>
where
    C: Category,
    DataOf<C>: Clone,
{
    type Category = C;

    fn require_credentials(&self) -> bool {
        self.require_credentials
    }

    async fn fetch(
        &self,
        params: ParamsOf<C>,
        credentials: &Credentials,
    ) -> Result<Vec<DataOf<C>>, FetchError> {
        // Pick the behavior without holding the lock across the await below.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.params.push(params);
            guard.credentials.push(credentials.clone());
            match guard.queue.pop_front() {
                Some(next) => next,
                None => guard.fallback.clone(),
            }
        };
        match behavior {
            MockBehavior::Return(data) => Ok(data),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Delay(wait, data) => {
                tokio::time::sleep(wait).await;
                Ok(data)
            }
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}
