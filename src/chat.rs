//! Chat message list shared between the conversation view and its input bar.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub message: String,
}

/// Sender details stamped on each new message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

/// Ordered message list with sequential ids
#[derive(Debug, Default)]
pub struct ChatStore {
    messages: Vec<Message>,
    next_id: u64,
    has_initial_response: bool,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its id. Blank text is ignored.
    pub fn push(&mut self, author: &Author, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            message: text.to_string(),
        });
        Some(self.next_id)
    }

    /// Swap the last message for a new one, keeping its id.
    ///
    /// Used to turn a typing placeholder into the real reply. Appends when empty.
    pub fn replace_last(&mut self, author: &Author, text: &str) -> u64 {
        match self.messages.last_mut() {
            Some(last) => {
                last.name = author.name.clone();
                last.avatar = author.avatar.clone();
                last.message = text.to_string();
                last.id
            }
            None => {
                self.next_id += 1;
                self.messages.push(Message {
                    id: self.next_id,
                    name: author.name.clone(),
                    avatar: author.avatar.clone(),
                    message: text.to_string(),
                });
                self.next_id
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_initial_response(&self) -> bool {
        self.has_initial_response
    }

    pub fn set_has_initial_response(&mut self, value: bool) {
        self.has_initial_response = value;
    }
}

/// Cloneable handle to one [`ChatStore`]
#[derive(Debug, Clone, Default)]
pub struct ChatHandle {
    inner: Arc<RwLock<ChatStore>>,
}

impl ChatHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, author: &Author, text: &str) -> Option<u64> {
        self.inner.write().await.push(author, text)
    }

    pub async fn replace_last(&self, author: &Author, text: &str) -> u64 {
        let mut store = self.inner.write().await;
        store.set_has_initial_response(true);
        store.replace_last(author, text)
    }

    /// Snapshot of the current list
    pub async fn messages(&self) -> Vec<Message> {
        self.inner.read().await.messages().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn has_initial_response(&self) -> bool {
        self.inner.read().await.has_initial_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_blank_is_skipped() {
        let me = Author::new("Asha");
        let mut store = ChatStore::new();
        assert_eq!(store.push(&me, "hi"), Some(1));
        assert_eq!(store.push(&me, "   "), None);
        assert_eq!(store.push(&me, " still there? "), Some(2));
        assert_eq!(store.messages()[1].message, "still there?");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_last_keeps_id() {
        let me = Author::new("Asha");
        let seller = Author {
            name: "Jane Doe".to_string(),
            avatar: Some("https://cdn.test/jane.png".to_string()),
        };
        let mut store = ChatStore::new();
        store.push(&me, "is the desk available?");
        store.push(&seller, "...");

        assert_eq!(store.replace_last(&seller, "Yes, pick it up today."), 2);
        let last = &store.messages()[1];
        assert_eq!(last.message, "Yes, pick it up today.");
        assert_eq!(last.avatar.as_deref(), Some("https://cdn.test/jane.png"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_last_on_empty_appends() {
        let mut store = ChatStore::new();
        assert_eq!(store.replace_last(&Author::new("Jane"), "hello"), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn handles_share_one_store() {
        let view = ChatHandle::new();
        let input = view.clone();
        let me = Author::new("Asha");

        input.push(&me, "hello").await;
        assert!(!view.has_initial_response().await);
        input.replace_last(&Author::new("Jane Doe"), "hey!").await;

        assert_eq!(view.len().await, 1);
        assert_eq!(view.messages().await[0].name, "Jane Doe");
        assert!(view.has_initial_response().await);
    }
}
