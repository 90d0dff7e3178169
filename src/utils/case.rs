//! Identifier case conversion for derived switch and variable names.

/// Split an identifier into words.
///
/// Boundaries fall on separators (`_`, `-`, `.`, whitespace), on a
/// lowercase-to-uppercase transition, between letters and digits, and
/// before the last capital of an acronym run, so `HTTPServer` splits into
/// `HTTP` and `Server`.
pub fn split_words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.') || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || prev.is_ascii_digit() != c.is_ascii_digit()
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `Float64Field1` -> `float-64-field-1`
pub fn to_kebab(ident: &str) -> String {
    split_words(ident).iter().map(|w| w.to_lowercase()).collect::<Vec<_>>().join("-")
}

/// `Float64Field1` -> `FLOAT_64_FIELD_1`
pub fn to_screaming_snake(ident: &str) -> String {
    split_words(ident).iter().map(|w| w.to_uppercase()).collect::<Vec<_>>().join("_")
}
