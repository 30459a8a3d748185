//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use ocean_llm::{Oracle, OracleError, OracleResult};

/// An [`Oracle`] that replays a fixed list of completions in order.
///
/// Runs out of script → `Other` error, which surfaces as a test failure at
/// the call site that made one request too many.
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    fail: bool,
}

impl ScriptedOracle {
    /// Replay `responses` one per `complete` call.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fail: false,
        }
    }

    /// An oracle whose every call fails with a transport-class error.
    pub fn failing() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fail: true,
        }
    }

    /// How many scripted responses remain unconsumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, _prompt: &str) -> OracleResult<String> {
        if self.fail {
            return Err(OracleError::Auth {
                message: "scripted failure".into(),
            });
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| OracleError::Other {
                message: "scripted oracle exhausted".into(),
            })
    }
}
