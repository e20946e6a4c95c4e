//! View-local collection state with stale-response protection.
//!
//! Every request gets a [`LoadToken`] from a shared [`TokenSource`]. A [`Resource`] only accepts
//! the completion of its most recent load; completions of superseded loads are dropped, since the
//! requests themselves are never cancelled.

use std::fmt::Display;
use tracing::{debug, error};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct LoadToken(u64);

impl Display for LoadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing tokens, so tokens are never reused across views.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct TokenSource {
    issued: u64,
}

impl TokenSource {
    pub fn next_token(&mut self) -> LoadToken {
        self.issued += 1;
        LoadToken(self.issued)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Settled {
    Replaced,
    Stale,
    Failed,
}

#[derive(Clone, Debug)]
pub struct Resource<T> {
    label: &'static str,
    items: Vec<T>,
    latest: Option<LoadToken>,
    mutations: Vec<LoadToken>,
    loaded: bool,
}

impl<T> Resource<T> {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            items: Vec::new(),
            latest: None,
            mutations: Vec::new(),
            loaded: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether any load has succeeded yet.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.latest.is_some()
    }

    /// Starts a load, superseding any load still in flight.
    pub fn begin(&mut self, tokens: &mut TokenSource) -> LoadToken {
        let token = tokens.next_token();
        if let Some(previous) = self.latest.replace(token) {
            debug!(resource = self.label, %previous, %token, "Superseding in-flight load");
        }
        token
    }

    /// Applies the completion of a load. Only the latest load may replace the collection; a failed
    /// load leaves it untouched.
    pub fn settle<E: Display>(&mut self, token: LoadToken, result: Result<Vec<T>, E>) -> Settled {
        if self.latest != Some(token) {
            debug!(resource = self.label, %token, "Discarding stale response");
            return Settled::Stale;
        }
        self.latest = None;

        match result {
            Ok(items) => {
                debug!(resource = self.label, count = items.len(), "Loaded");
                self.items = items;
                self.loaded = true;
                Settled::Replaced
            }
            Err(err) => {
                error!(resource = self.label, error = %err, "Error fetching {}", self.label);
                Settled::Failed
            }
        }
    }

    pub fn begin_mutation(&mut self, tokens: &mut TokenSource) -> LoadToken {
        let token = tokens.next_token();
        self.mutations.push(token);
        token
    }

    /// Forgets a finished mutation. Returns `false` if this resource never issued the token.
    pub fn finish_mutation(&mut self, token: LoadToken) -> bool {
        let Some(position) = self.mutations.iter().position(|issued| *issued == token) else {
            return false;
        };
        self.mutations.swap_remove(position);
        true
    }

    #[must_use]
    pub fn owns(&self, token: LoadToken) -> bool {
        self.latest == Some(token) || self.mutations.contains(&token)
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Removes the first matching entry, keeping the order of everything else.
    pub fn remove_first(&mut self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let position = self.items.iter().position(predicate)?;
        Some(self.items.remove(position))
    }
}
