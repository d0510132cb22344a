use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use wp_contract::{ContractError, Result, RpcTransport};

/// Replays queued responses per method and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: RefCell<HashMap<String, VecDeque<Result<serde_json::Value>>>>,
    calls: RefCell<Vec<(String, serde_json::Value)>>,
    sleeps: Cell<u32>,
}

impl ScriptedTransport {
    pub fn push_ok(&self, method: &str, value: serde_json::Value) {
        self.push(method, Ok(value));
    }

    pub fn push_err(&self, method: &str, err: ContractError) {
        self.push(method, Err(err));
    }

    fn push(&self, method: &str, response: Result<serde_json::Value>) {
        self.responses
            .borrow_mut()
            .entry(method.to_owned())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.borrow().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(method, _)| method.clone()).collect()
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

#[async_trait(?Send)]
impl RpcTransport for ScriptedTransport {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        self.calls.borrow_mut().push((method.to_owned(), params));
        self.responses
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(ContractError::Transport(format!(
                    "unscripted call to {method}"
                )))
            })
    }

    async fn sleep(&self, _duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}
