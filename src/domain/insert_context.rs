//! Immutable per-process context for link creation.

use std::collections::HashSet;

use anyhow::Result;

/// Alphabets and limits driving link creation.
///
/// Built once at startup from validated configuration and shared read-only
/// across requests. The generation alphabet is kept both as a set (membership
/// checks) and as an ordered sequence (uniform random choice in O(1)).
#[derive(Debug, Clone)]
pub struct InsertContext {
    /// Characters a generated code may contain.
    pub link_alphabet: HashSet<char>,
    /// The generation alphabet as an indexable sequence.
    pub link_alphabet_seq: Vec<char>,
    /// Characters a user-chosen code may contain: generation alphabet plus
    /// the configured extension characters.
    pub allowed_alphabet: HashSet<char>,
    /// Length of generated codes.
    pub link_length: usize,
    /// Maximum length of a scheme-stripped destination.
    pub max_destination_length: usize,
    /// Number of generation attempts before giving up.
    pub tries: u32,
}

impl InsertContext {
    /// Derives the context from configured alphabet strings and limits.
    ///
    /// # Errors
    ///
    /// Returns an error if an alphabet is empty or a limit is zero. Callers
    /// are expected to have validated the configuration already; this is the
    /// last line of defense before the context becomes immutable.
    pub fn new(
        link_alphabet: &str,
        extension_alphabet: &str,
        link_length: usize,
        max_destination_length: usize,
        tries: u32,
    ) -> Result<Self> {
        if link_alphabet.is_empty() {
            anyhow::bail!("link alphabet must not be empty");
        }
        if extension_alphabet.is_empty() {
            anyhow::bail!("extension alphabet must not be empty");
        }
        if link_length == 0 {
            anyhow::bail!("link length must be at least 1");
        }
        if max_destination_length == 0 {
            anyhow::bail!("max destination length must be at least 1");
        }
        if tries == 0 {
            anyhow::bail!("creation tries must be at least 1");
        }

        let link_set: HashSet<char> = link_alphabet.chars().collect();
        // Deduplicated sequence so each character is drawn with equal weight.
        let link_seq: Vec<char> = link_set.iter().copied().collect();

        let mut allowed = link_set.clone();
        allowed.extend(extension_alphabet.chars());

        Ok(Self {
            link_alphabet: link_set,
            link_alphabet_seq: link_seq,
            allowed_alphabet: allowed,
            link_length,
            max_destination_length,
            tries,
        })
    }

    /// Returns true if every character of `code` is in the allowed alphabet.
    ///
    /// The empty string vacuously passes, matching the presence-based
    /// explicit-code semantics of the create path.
    pub fn is_allowed_code(&self, code: &str) -> bool {
        code.chars().all(|c| self.allowed_alphabet.contains(&c))
    }
}
