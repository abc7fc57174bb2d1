//! Anchors for section headings.

/// Derive the anchor for a numeric section label.
///
/// Both converters link sections through this function, so identical
/// labels always produce identical anchors.
///
/// # Examples
///
/// ```
/// use rfcmd::markdown::derive_anchor;
///
/// assert_eq!(derive_anchor("3.2.1"), "section-3-2-1");
/// assert_eq!(derive_anchor("1"), "section-1");
/// ```
pub fn derive_anchor(label: &str) -> String {
    let label = label.trim().trim_end_matches('.');
    format!("section-{}", label.replace('.', "-"))
}

/// Slug for a heading without an explicit anchor.
///
/// ASCII letters and digits are kept lowercased. Whitespace, `-` and `_`
/// separate words; anything else is dropped.
///
/// ```
/// use rfcmd::markdown::slugify;
///
/// assert_eq!(slugify("Security Considerations"), "security-considerations");
/// assert_eq!(slugify("Authors' Addresses"), "authors-addresses");
/// assert_eq!(slugify("  IANA   Registry_Values "), "iana-registry-values");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
    }
    slug
}
