//! URL slug derivation for categories and posts.

use crate::error::AppError;
use serde_json::json;
use std::future::Future;

/// Suffixes tried after the base slug (`-2` through `-33`).
const MAX_SUFFIX_ATTEMPTS: usize = 32;

/// Lowercase, ASCII, hyphen-separated slug of `input`.
///
/// Non-ASCII letters are transliterated, so `"Programación"` becomes
/// `"programacion"`.
pub fn derive_slug(input: &str) -> Result<String, AppError> {
    let candidate = slug::slugify(input.trim());

    if candidate.is_empty() {
        return Err(AppError::field(
            "slug",
            format!("Cannot derive a slug from {:?}", input),
        ));
    }

    Ok(candidate)
}

/// Returns a slug derived from `input` that `exists` reports as free,
/// appending `-2`, `-3`, ... on collision.
pub async fn unique_slug<F, Fut>(input: &str, mut exists: F) -> Result<String, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let base = derive_slug(input)?;

    if !exists(base.clone()).await? {
        return Ok(base);
    }

    for attempt in 2..=MAX_SUFFIX_ATTEMPTS + 1 {
        let candidate = format!("{base}-{attempt}");
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }

    Err(AppError::conflict(
        "Could not find a free slug",
        json!({ "slug": base }),
    ))
}
