//! Built-in transformation packages
//!
//! Every subdirectory is both a Rust module and a scanned plugin package: it
//! holds the implementation (`mod.rs`) and the fixtures (`test.json`).

use crate::plugin::PluginCatalog;
use crate::HarnessError;

pub mod butter_fingers_perturbation;
pub mod contraction_expansions;
pub mod gender_culture_diverse_name;
pub mod numeric_to_word;
pub mod pronoun_swap_contrast;
pub mod redundant_context_for_qa;
pub mod simple_negation;

/// Register every built-in transformation package
pub fn register(catalog: &mut PluginCatalog) -> Result<(), HarnessError> {
    catalog.register(butter_fingers_perturbation::registration())?;
    catalog.register(contraction_expansions::registration())?;
    catalog.register(gender_culture_diverse_name::registration())?;
    catalog.register(numeric_to_word::registration())?;
    catalog.register(pronoun_swap_contrast::registration())?;
    catalog.register(redundant_context_for_qa::registration())?;
    catalog.register(simple_negation::registration())?;
    Ok(())
}

/// Split a whitespace token into its word and trailing punctuation
pub(crate) fn split_trailing_punctuation(token: &str) -> (&str, &str) {
    let end = token
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
        .len();
    token.split_at(end)
}

/// Give `replacement` the leading capitalisation of `original`
pub(crate) fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trailing_punctuation() {
        assert_eq!(split_trailing_punctuation("fine!"), ("fine", "!"));
        assert_eq!(split_trailing_punctuation("can't,"), ("can't", ","));
        assert_eq!(split_trailing_punctuation("word"), ("word", ""));
        assert_eq!(split_trailing_punctuation("..."), ("", "..."));
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Don't", "do not"), "Do not");
        assert_eq!(match_case("he", "she"), "she");
        assert_eq!(match_case("He", ""), "");
    }
}
