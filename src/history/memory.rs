//! In-memory navigation history.
//!
//! Used for tests and for hosts without a browser history.

use std::sync::Mutex;

use serde_json::Value;

use crate::history::location::{keyed_state, Location};
use crate::history::{Action, History, HistoryError, HistoryEvent, NavigateOptions};
use crate::routing::segment::split_query;
use crate::store::{Listeners, Subscription};

#[derive(Debug, Clone)]
struct Entry {
    pathname: String,
    search: String,
    state: Option<Value>,
}

impl Entry {
    fn parse(uri: &str, state: Option<Value>) -> Self {
        let (pathname, search) = split_query(uri);
        Self {
            pathname: pathname.to_string(),
            search: search.unwrap_or_default().to_string(),
            state,
        }
    }

    fn location(&self) -> Location {
        Location::with_state(&self.pathname, &self.search, self.state.clone())
    }
}

#[derive(Debug)]
struct Stack {
    entries: Vec<Entry>,
    index: usize,
}

/// A history stack held in memory.
#[derive(Debug)]
pub struct MemoryHistory {
    stack: Mutex<Stack>,
    listeners: Listeners<HistoryEvent>,
}

impl MemoryHistory {
    pub fn new(initial_uri: &str) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![Entry::parse(initial_uri, None)],
                index: 0,
            }),
            listeners: Listeners::new(),
        }
    }

    /// Every entry's uri, oldest first.
    pub fn entries(&self) -> Vec<String> {
        let stack = self.stack.lock().expect("history mutex poisoned");
        stack.entries.iter().map(|e| e.location().href()).collect()
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.stack.lock().expect("history mutex poisoned").index
    }

    /// Move `delta` entries through the stack, clamped to its ends.
    ///
    /// Listeners receive a [`Action::Pop`] event when the position changes.
    pub fn go(&self, delta: isize) {
        let location = {
            let mut stack = self.stack.lock().expect("history mutex poisoned");
            let last = stack.entries.len() - 1;
            let target = stack.index.saturating_add_signed(delta).min(last);
            if target == stack.index {
                return;
            }
            stack.index = target;
            stack.entries[target].location()
        };

        tracing::debug!(pathname = %location.pathname, "history pop");
        self.listeners.notify(&HistoryEvent {
            location,
            action: Action::Pop,
        });
    }

    pub fn back(&self) {
        self.go(-1);
    }

    pub fn forward(&self) {
        self.go(1);
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let stack = self.stack.lock().expect("history mutex poisoned");
        stack.entries[stack.index].location()
    }

    fn listen(&self, listener: Box<dyn Fn(&HistoryEvent) + Send + Sync>) -> Subscription {
        self.listeners.add(listener)
    }

    fn navigate(&self, to: &str, options: NavigateOptions) -> Result<(), HistoryError> {
        let entry = Entry::parse(to, Some(keyed_state(options.state)));
        let location = entry.location();

        let action = {
            let mut stack = self.stack.lock().expect("history mutex poisoned");
            if options.replace {
                let index = stack.index;
                stack.entries[index] = entry;
                Action::Replace
            } else {
                let next = stack.index + 1;
                stack.entries.truncate(next);
                stack.entries.push(entry);
                stack.index = next;
                Action::Push
            }
        };

        tracing::debug!(to, ?action, "history navigate");
        self.listeners.notify(&HistoryEvent { location, action });
        Ok(())
    }
}
