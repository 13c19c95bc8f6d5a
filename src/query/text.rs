//! Text predicates
//!
//! Substring, prefix and suffix matching over a projected string
//! field. The short-named functions are case-insensitive (the common
//! case for player-facing search); the `_case` variants take the
//! sensitivity explicitly. An empty search text matches nothing and
//! returns immediately.

/// Case handling for text predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// Exact byte-for-byte comparison
    Sensitive,
    /// Unicode-lowercased comparison
    Insensitive,
}

fn match_text<T, F, M>(
    records: &[T],
    selector: F,
    text: &str,
    case: CaseSensitivity,
    matches: M,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
    M: Fn(&str, &str) -> bool,
{
    if text.is_empty() {
        return Vec::new();
    }

    let needle = match case {
        CaseSensitivity::Sensitive => text.to_string(),
        CaseSensitivity::Insensitive => text.to_lowercase(),
    };

    records
        .iter()
        .filter(|record| {
            let haystack = match case {
                CaseSensitivity::Sensitive => selector(record),
                CaseSensitivity::Insensitive => selector(record).to_lowercase(),
            };
            matches(&haystack, &needle)
        })
        .cloned()
        .collect()
}

/// Records whose projected text contains `text`, case-insensitive.
pub fn contains_text<T, F>(records: &[T], selector: F, text: &str) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    contains_text_case(records, selector, text, CaseSensitivity::Insensitive)
}

/// Records whose projected text contains `text`.
pub fn contains_text_case<T, F>(
    records: &[T],
    selector: F,
    text: &str,
    case: CaseSensitivity,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    match_text(records, selector, text, case, |haystack, needle| {
        haystack.contains(needle)
    })
}

/// Records whose projected text starts with `text`, case-insensitive.
pub fn starts_with_text<T, F>(records: &[T], selector: F, text: &str) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    starts_with_text_case(records, selector, text, CaseSensitivity::Insensitive)
}

/// Records whose projected text starts with `text`.
pub fn starts_with_text_case<T, F>(
    records: &[T],
    selector: F,
    text: &str,
    case: CaseSensitivity,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    match_text(records, selector, text, case, |haystack, needle| {
        haystack.starts_with(needle)
    })
}

/// Records whose projected text ends with `text`, case-insensitive.
pub fn ends_with_text<T, F>(records: &[T], selector: F, text: &str) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    ends_with_text_case(records, selector, text, CaseSensitivity::Insensitive)
}

/// Records whose projected text ends with `text`.
pub fn ends_with_text_case<T, F>(
    records: &[T],
    selector: F,
    text: &str,
    case: CaseSensitivity,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    match_text(records, selector, text, case, |haystack, needle| {
        haystack.ends_with(needle)
    })
}
