use hawkins_core::{Message, SessionId, Timestamp, TokenUsage};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub message_count: usize,
    pub tool_call_count: usize,
    pub iteration_count: usize,
    pub usage: TokenUsage,
}

#[derive(Debug)]
struct SessionInner {
    messages: Vec<Message>,
    stats: SessionStats,
}

/// Conversation history shared by clones of the same session.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    inner: Arc<RwLock<SessionInner>>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            created_at: Timestamp::now(),
            inner: Arc::new(RwLock::new(SessionInner {
                messages: Vec::new(),
                stats: SessionStats::default(),
            })),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_message(&self, message: Message) {
        let mut inner = self.write();
        inner.stats.message_count += 1;
        inner.messages.push(message);
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.read().messages.len()
    }

    pub fn last_messages(&self, n: usize) -> Vec<Message> {
        let inner = self.read();
        let len = inner.messages.len();
        if n >= len {
            inner.messages.clone()
        } else {
            inner.messages[len - n..].to_vec()
        }
    }

    pub fn clear(&self) {
        self.write().messages.clear();
    }

    pub fn stats(&self) -> SessionStats {
        self.read().stats.clone()
    }

    pub fn increment_tool_calls(&self, count: usize) {
        self.write().stats.tool_call_count += count;
    }

    pub fn increment_iterations(&self) {
        self.write().stats.iteration_count += 1;
    }

    pub fn add_usage(&self, usage: &TokenUsage) {
        self.write().stats.usage.accumulate(usage);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
