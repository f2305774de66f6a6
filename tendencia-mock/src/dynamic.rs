use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tendencia_core::{BatchSeries, FetchParams, TrendProvider, TrendsError};

/// Instruction for how the next `interest_over_time` call should behave.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided batch immediately.
    Return(BatchSeries),
    /// Fail immediately with the provided error.
    Fail(TrendsError),
    /// Hang indefinitely (simulate a stalled connection).
    Hang,
}

#[derive(Default)]
struct InternalState {
    script: VecDeque<MockBehavior>,
    calls: Vec<Vec<String>>,
}

/// Controller handle used by tests to drive the scripted provider from the
/// outside.
pub struct ScriptController {
    state: Arc<Mutex<InternalState>>,
}

impl ScriptController {
    /// Append one behavior to the script. Behaviors are consumed in order,
    /// one per provider call.
    pub async fn push(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.script.push_back(behavior);
    }

    /// Append the same behavior `n` times.
    pub async fn push_repeated(&self, behavior: MockBehavior, n: usize) {
        let mut guard = self.state.lock().await;
        for _ in 0..n {
            guard.script.push_back(behavior.clone());
        }
    }

    /// A copy of every batch the provider has been called with, in order.
    pub async fn calls(&self) -> Vec<Vec<String>> {
        let guard = self.state.lock().await;
        guard.calls.clone()
    }

    /// Number of provider calls observed so far.
    pub async fn call_count(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.len()
    }

    /// Drop any unconsumed script entries and the call log.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.script.clear();
        guard.calls.clear();
    }
}

/// A provider that defers all behavior to an external controller.
pub struct ScriptedProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedProvider {
    /// Create a new scripted provider and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn TrendProvider>, ScriptController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = ScriptController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn TrendProvider>, controller)
    }
}

#[async_trait]
impl TrendProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn interest_over_time(
        &self,
        queries: &[String],
        _params: &FetchParams,
    ) -> Result<BatchSeries, TrendsError> {
        // Log the call and take the next behavior without holding the lock
        // across an await point.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(queries.to_vec());
            guard.script.pop_front()
        };

        match behavior {
            Some(MockBehavior::Return(batch)) => Ok(batch),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(TrendsError::provider(self.name, "no scripted behavior")),
        }
    }
}
