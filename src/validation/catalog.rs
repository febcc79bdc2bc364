//! Known-prompt catalogs consulted during validation.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Source of valid prompt task identifiers.
///
/// Implemented for the common collection shapes so that callers can pass
/// whatever their prompt registry already exposes.
///
/// # Example
///
/// ```rust
/// use flowmind::validation::PromptCatalog;
///
/// let prompts = ["triage", "resolve"];
/// assert!(prompts.contains_prompt("triage"));
/// assert!(!prompts.contains_prompt("escalate"));
/// ```
pub trait PromptCatalog {
    fn contains_prompt(&self, prompt_task: &str) -> bool;
}

impl<S: AsRef<str>> PromptCatalog for [S] {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.iter().any(|p| p.as_ref() == prompt_task)
    }
}

impl<S: AsRef<str>, const N: usize> PromptCatalog for [S; N] {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.as_slice().contains_prompt(prompt_task)
    }
}

impl<S: AsRef<str>> PromptCatalog for Vec<S> {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.as_slice().contains_prompt(prompt_task)
    }
}

impl PromptCatalog for HashSet<String> {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.contains(prompt_task)
    }
}

impl PromptCatalog for HashSet<&str> {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.contains(prompt_task)
    }
}

impl PromptCatalog for BTreeSet<String> {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.contains(prompt_task)
    }
}

impl<V> PromptCatalog for HashMap<String, V> {
    fn contains_prompt(&self, prompt_task: &str) -> bool {
        self.contains_key(prompt_task)
    }
}
