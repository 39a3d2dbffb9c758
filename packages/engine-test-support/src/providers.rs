//! Decision providers with scripted behavior.
//!
//! Each provider records what it was asked through a shared [`CallLog`], so
//! tests can assert how many attempts the gate made and which rejection
//! reasons were passed back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dice_engine::ai::{AiError, Candidate, DecisionProvider, Rejection};
use dice_engine::PlayerView;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub player: usize,
    pub round_no: u32,
    pub previous: Option<Rejection>,
}

/// Shared record of provider calls. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, view: &PlayerView, previous: Option<&Rejection>) -> usize {
        let mut calls = self.calls.lock();
        calls.push(Call {
            player: view.player,
            round_no: view.round_no,
            previous: previous.cloned(),
        });
        calls.len() - 1
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

/// Answers from a fixed script, repeating the last entry once exhausted.
pub struct ScriptedProvider {
    script: Vec<Result<Candidate, AiError>>,
    log: CallLog,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<Candidate, AiError>>) -> Self {
        Self {
            script,
            log: CallLog::new(),
        }
    }

    /// Always answer with the same text.
    pub fn always_text(text: &str) -> Self {
        Self::new(vec![Ok(Candidate::text(text))])
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(Candidate::text(*t))).collect())
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn propose(
        &self,
        view: &PlayerView,
        previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        let i = self.log.record(view, previous);
        match self.script.get(i).or_else(|| self.script.last()) {
            Some(answer) => answer.clone(),
            None => Err(AiError::Internal("empty script".into())),
        }
    }
}

/// Fails every call with the given error.
pub struct FailingProvider {
    error: AiError,
    log: CallLog,
}

impl FailingProvider {
    pub fn new(error: AiError) -> Self {
        Self {
            error,
            log: CallLog::new(),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Default for FailingProvider {
    fn default() -> Self {
        Self::new(AiError::Internal("provider unavailable".into()))
    }
}

#[async_trait]
impl DecisionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn propose(
        &self,
        view: &PlayerView,
        previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        self.log.record(view, previous);
        Err(self.error.clone())
    }
}

/// Awaits a tokio sleep before answering.
pub struct SlowProvider {
    delay: Duration,
    answer: Candidate,
    log: CallLog,
}

impl SlowProvider {
    pub fn new(delay: Duration, answer: Candidate) -> Self {
        Self {
            delay,
            answer,
            log: CallLog::new(),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl DecisionProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn propose(
        &self,
        view: &PlayerView,
        previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        self.log.record(view, previous);
        tokio::time::sleep(self.delay).await;
        Ok(self.answer.clone())
    }
}

/// Blocks its thread with `std::thread::sleep`, never yielding, then answers.
pub struct BlockingProvider {
    delay: Duration,
    answer: Candidate,
    log: CallLog,
}

impl BlockingProvider {
    pub fn new(delay: Duration, answer: Candidate) -> Self {
        Self {
            delay,
            answer,
            log: CallLog::new(),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl DecisionProvider for BlockingProvider {
    fn name(&self) -> &str {
        "blocking"
    }

    async fn propose(
        &self,
        view: &PlayerView,
        previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        self.log.record(view, previous);
        std::thread::sleep(self.delay);
        Ok(self.answer.clone())
    }
}
