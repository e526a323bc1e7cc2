//! String transformation utilities for code generation

/// Uppercases the first character of `s` and leaves the rest untouched.
///
/// Used to turn lower-cased service ids into type or package prefixes.
///
/// # Examples
/// ```
/// use svcgen::core::utils::capitalize_first_letter;
///
/// assert_eq!(capitalize_first_letter("abcd"), "Abcd");
/// assert_eq!(capitalize_first_letter("dynamoDb"), "DynamoDb");
/// assert_eq!(capitalize_first_letter(""), "");
/// ```
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
