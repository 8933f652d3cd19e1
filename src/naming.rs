//! Package id <-> implementation class name conventions
//!
//! A plugin package directory is named with lowercase words joined by `_`
//! (`back_translation`); the class it must register is the same words
//! capitalized and concatenated (`BackTranslation`).

/// Convert a package id to the class name it is expected to register
pub fn to_implementation_name(package_id: &str) -> String {
    package_id
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a class name back to its package id
pub fn to_package_id(class_name: &str) -> String {
    let mut package_id = String::with_capacity(class_name.len() + 4);
    for (index, ch) in class_name.chars().enumerate() {
        if ch.is_uppercase() && index > 0 {
            package_id.push('_');
        }
        package_id.extend(ch.to_lowercase());
    }
    package_id
}

/// Whether `name` is a package id the scanner accepts.
///
/// Every `_`-separated word must start with a lowercase ASCII letter and
/// continue with lowercase letters or digits, so the id survives a round trip
/// through [`to_implementation_name`] and [`to_package_id`].
pub fn is_valid_package_id(name: &str) -> bool {
    !name.is_empty()
        && name.split('_').all(|word| {
            let mut chars = word.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}
