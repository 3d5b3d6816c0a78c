//! Slug derivation for add-on identifiers
//!
//! The slug names the add-on inside the browser: it appears in chrome URLs
//! (`chrome://<slug>/content/...`) and preference keys
//! (`extensions.<slug>.boolpref`), so it is restricted to alphanumerics
//! and underscores.

/// Slugs longer than this are truncated
const MAX_SLUG_LEN: usize = 50;

/// Fallback when nothing of the input survives sanitization
const FALLBACK_SLUG: &str = "addon";

/// Derive a slug from a display name.
///
/// Lowercases, maps spaces and hyphens to underscores, drops everything
/// that is not alphanumeric or an underscore, and truncates to
/// [`MAX_SLUG_LEN`] characters. Returns `"addon"` when the result is
/// empty or all underscores.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .take(MAX_SLUG_LEN)
        .collect();

    if slug.chars().all(|c| c == '_') {
        // Also covers the empty string
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
