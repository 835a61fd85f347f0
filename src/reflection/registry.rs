//! Model name resolution with typo suggestions

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{ModelSuggestion, ReflectionError};
use crate::store::FieldStore;

/// Number of suggestions surfaced with a `ModelNotFound` failure
const SUGGESTION_LIMIT: usize = 4;

/// Explicit snapshot of the known-model set
///
/// Taken from the store at construction time and passed around explicitly;
/// there is no hidden process-wide cache. Call [`ModelRegistry::refresh`] if
/// the underlying store can change during a session.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeSet<String>,
}

impl ModelRegistry {
    /// Snapshot the known-model set from a store
    pub fn from_store<S: FieldStore + ?Sized>(store: &S) -> Self {
        let models = store.known_models();
        debug!("model registry snapshot holds {} models", models.len());
        Self { models }
    }

    /// Re-snapshot the known-model set
    pub fn refresh<S: FieldStore + ?Sized>(&mut self, store: &S) {
        self.models = store.known_models();
    }

    /// The known model names, ordered
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(String::as_str)
    }

    /// Resolve a candidate model name to its canonical spelling
    ///
    /// Matching is case-insensitive. On a miss, every known model is ranked
    /// by normalized Levenshtein similarity against the candidate and the top
    /// matches ride along on the `ModelNotFound` failure as advisory
    /// suggestions; the lookup still fails.
    pub fn resolve(&self, candidate: &str) -> Result<String, ReflectionError> {
        if self.models.contains(candidate) {
            return Ok(candidate.to_string());
        }
        let lowered = candidate.to_lowercase();
        if let Some(canonical) = self.models.iter().find(|m| m.to_lowercase() == lowered) {
            return Ok(canonical.clone());
        }

        let mut suggestions: Vec<ModelSuggestion> = self
            .models
            .iter()
            .map(|model| ModelSuggestion {
                model: model.clone(),
                score: similarity(&lowered, &model.to_lowercase()),
            })
            .collect();
        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.model.cmp(&b.model))
        });
        suggestions.truncate(SUGGESTION_LIMIT);

        debug!("model '{}' not found, ranked {} suggestions", candidate, suggestions.len());
        Err(ReflectionError::ModelNotFound {
            model: candidate.to_string(),
            suggestions,
        })
    }
}

/// Normalized similarity between two strings (0.0-1.0, higher is closer)
fn similarity(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(s1, s2) as f64 / max_len as f64)
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len1][len2]
}
