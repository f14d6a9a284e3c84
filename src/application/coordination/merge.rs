//! Dataset Merge
//!
//! Keyed override-merge of built-in defaults with a remote dataset.

use std::collections::HashMap;
use std::hash::Hash;

use crate::shared::errors::QueryError;

/// Merge `defaults` with the outcome of a remote fetch.
///
/// Remote records replace defaults with the same key and remote-only keys are
/// added. A failed fetch counts as an empty remote set, so the result is
/// exactly the defaults. Iteration order of the result is unspecified.
pub fn merge_with_defaults<T, K, F>(
    defaults: impl IntoIterator<Item = T>,
    remote: Result<Vec<T>, QueryError>,
    key: F,
) -> HashMap<K, T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut merged: HashMap<K, T> = defaults.into_iter().map(|item| (key(&item), item)).collect();

    match remote {
        Ok(items) => {
            for item in items {
                merged.insert(key(&item), item);
            }
        }
        Err(error) => {
            tracing::warn!(
                error = %error,
                kind = error.kind(),
                defaults = merged.len(),
                "Remote query failed, using built-in defaults"
            );
        }
    }

    merged
}
