use crate::domain::model::Solicitation;
use crate::domain::ports::{CompletionModel, SolicitationSource};
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays canned replies in order and records every prompt it sees.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(ScoutError::CompletionError {
                message: "no scripted reply left".to_string(),
            });
        }
        replies
            .remove(0)
            .map_err(|message| ScoutError::CompletionError { message })
    }
}

#[derive(Clone, Default)]
pub struct FixedSource {
    listings: Vec<Solicitation>,
    calls: Arc<AtomicUsize>,
}

impl FixedSource {
    pub fn new(listings: Vec<Solicitation>) -> Self {
        Self {
            listings,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SolicitationSource for FixedSource {
    async fn fetch_open(&self, _portal_url: &str) -> Vec<Solicitation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.listings.clone()
    }
}
