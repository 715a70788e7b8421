//! Name derivation
//!
//! Converts between the three name shapes the tool juggles: space-delimited
//! human phrases ("user profile"), camel-case identifiers ("UserProfile") and
//! snake-case plural table names ("user_profiles").

/// Split a phrase on a delimiter, dropping empty tokens.
fn words(phrase: &str, delimiter: char) -> Vec<&str> {
    phrase
        .trim()
        .split(delimiter)
        .filter(|word| !word.trim().is_empty())
        .collect()
}

/// Lowercase a word, then uppercase its first character.
pub fn camelize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "user profile" -> "UserProfile"
pub fn camel_from_spaced(name: &str) -> String {
    words(name, ' ').into_iter().map(camelize).collect()
}

/// "user profile" -> "user_profile"
pub fn snake_from_spaced(name: &str) -> String {
    words(name, ' ')
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// "user_profile" -> "UserProfile"
pub fn camel_from_snake(name: &str) -> String {
    words(name, '_').into_iter().map(camelize).collect()
}

/// "UserProfile" -> "user_profile"
///
/// Splits strictly at uppercase-letter boundaries: every character that is
/// not its own lowercase form starts a new segment. That makes "ID" come out
/// as "i_d" - mechanical, not linguistically smart, and kept that way on
/// purpose so the mapping stays reversible and predictable.
pub fn snake_from_camel(name: &str) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut segment = String::new();

    for letter in name.chars() {
        let is_upper = letter.to_lowercase().to_string() != letter.to_string();

        if is_upper {
            if !segment.is_empty() {
                segments.push(segment.clone());
                segment.clear();
            }
            segment.push(letter);
        } else {
            segment.push(letter);
        }
    }

    if !segment.is_empty() {
        segments.push(segment);
    }

    segments
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Pluralize a singular English word with simple heuristics.
///
/// The empty string maps to the empty string.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        format!("{}es", word)
    } else if word.ends_with('y')
        && !word.ends_with("ay")
        && !word.ends_with("ey")
        && !word.ends_with("oy")
        && !word.ends_with("uy")
    {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{}s", word)
    }
}

/// Singularize a plural English word. Inverse of [`pluralize`] for the
/// suffixes it produces; unknown shapes are returned unchanged.
pub fn depluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }

    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return stem.to_string();
        }
    }

    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }

    word.to_string()
}
