use std::collections::HashSet;

use deunicode::deunicode;

/// Fallback used when a name contains nothing sluggable.
pub const FALLBACK_SLUG: &str = "cheese";

/// Slugs that collide with fixed routes and are never handed out.
pub const RESERVED_SLUGS: &[&str] = &["add"];

/// Derive a URL-safe slug from a display name.
///
/// The name is folded to ASCII first (`Paški` becomes `Paski`). Letters and
/// digits are kept lowercased; runs of whitespace, `-` and `_` collapse into a
/// single `-`; everything else is dropped.
pub fn slugify(name: &str) -> String {
    let mut out = String::new();
    let mut prev_dash = false;
    for c in deunicode(name).chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    let slug = out.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// The `n`-th candidate for `base`: `base`, `base-2`, `base-3`, ...
pub fn candidate(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}

/// Whether `slug` may be assigned to a record.
pub fn is_assignable(slug: &str) -> bool {
    !RESERVED_SLUGS.contains(&slug)
}

/// Smallest free candidate for `base` that is not in `taken` and not reserved.
pub fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    (1..)
        .map(|n| candidate(base, n))
        .find(|slug| is_assignable(slug) && !taken.contains(slug))
        .unwrap_or_else(|| base.to_string())
}
