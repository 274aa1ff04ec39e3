//! Ancestor chains: the names on the active recursion path.

use std::collections::HashSet;

/// Ordered names currently being visited, with a hash index for membership.
///
/// A name occurs at most once; re-entering it is a cycle.
#[derive(Debug, Clone, Default)]
pub struct AncestorChain {
    order: Vec<String>,
    index: HashSet<String>,
}

impl AncestorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooted(name: impl Into<String>) -> Self {
        let mut chain = Self::new();
        chain.push(name);
        chain
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Extend the chain. Returns `false` and leaves the chain unchanged when
    /// `name` is already present.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if !self.index.insert(name.clone()) {
            return false;
        }
        self.order.push(name);
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        let name = self.order.pop()?;
        self.index.remove(&name);
        Some(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}
