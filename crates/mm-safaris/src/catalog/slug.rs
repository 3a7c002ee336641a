use unicode_normalization::UnicodeNormalization;

/// Derive a URL-safe slug from a display name.
///
/// Characters are decomposed and folded to ASCII, lowercased, and every run of
/// non-alphanumeric characters becomes a single hyphen. The result never starts
/// or ends with a hyphen and slugifying it again returns it unchanged.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.nfkd().filter(char::is_ascii) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Whether an operator-supplied slug is already in canonical form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
