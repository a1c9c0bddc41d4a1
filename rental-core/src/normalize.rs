//! Input normalization applied as fields are edited.

/// Longest ZIP/postal code kept, in digits.
pub const MAX_ZIP_DIGITS: usize = 10;

/// Phone numbers are exactly this many digits.
pub const PHONE_DIGITS: usize = 10;

/// Longest comment accepted, in characters.
pub const MAX_COMMENT_CHARS: usize = 255;

/// Project types offered on the details step, in display order.
pub const PROJECT_TYPES: &[&str] = &[
    "Roofing",
    "Landscaping",
    "General Construction",
    "Restoration",
    "Home Renovation",
    "Commercial Project",
    "Other",
];

/// Strip everything but ASCII digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a ZIP code: digits only, at most [`MAX_ZIP_DIGITS`].
pub fn normalize_zip(input: &str) -> String {
    digits_only(input).chars().take(MAX_ZIP_DIGITS).collect()
}

/// Normalize a phone edit.
///
/// Returns `None` when the edit would exceed [`PHONE_DIGITS`]; the
/// previous value should be kept in that case.
pub fn normalize_phone(input: &str) -> Option<String> {
    let digits = digits_only(input);
    (digits.len() <= PHONE_DIGITS).then_some(digits)
}

/// Cap comments at [`MAX_COMMENT_CHARS`] characters.
pub fn truncate_comments(input: &str) -> String {
    input.chars().take(MAX_COMMENT_CHARS).collect()
}

/// Characters of comment space left.
pub fn comments_remaining(input: &str) -> usize {
    MAX_COMMENT_CHARS.saturating_sub(input.chars().count())
}

/// Slug for a project type label: `General Construction` → `general-construction`.
pub fn project_type_slug(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Display label for a project type slug, falling back to the slug itself.
pub fn project_type_label(slug: &str) -> &str {
    PROJECT_TYPES
        .iter()
        .copied()
        .find(|label| project_type_slug(label) == slug)
        .unwrap_or(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_keeps_digits_and_caps_length() {
        assert_eq!(normalize_zip("17601-1234"), "176011234");
        assert_eq!(normalize_zip(" 1 7 6 0 1 "), "17601");
        assert_eq!(normalize_zip("12345678901234"), "1234567890");
    }

    #[test]
    fn phone_rejects_overlong_edits() {
        assert_eq!(normalize_phone("(717) 425-2683").as_deref(), Some("7174252683"));
        assert_eq!(normalize_phone("71742526830"), None);
        assert_eq!(normalize_phone("").as_deref(), Some(""));
    }

    #[test]
    fn comments_are_capped() {
        let long = "x".repeat(300);
        assert_eq!(truncate_comments(&long).chars().count(), 255);
        assert_eq!(comments_remaining("hello"), 250);
        assert_eq!(comments_remaining(&long), 0);
    }

    #[test]
    fn project_type_slugs_round_trip_to_labels() {
        assert_eq!(project_type_slug("General Construction"), "general-construction");
        assert_eq!(project_type_label("home-renovation"), "Home Renovation");
        assert_eq!(project_type_label("custom-thing"), "custom-thing");
    }
}
