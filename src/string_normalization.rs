use unidecode::unidecode;

/// Folds an artist name or query into the form used for matching:
/// ASCII transliteration, lowercase, single spaces.
pub fn clean_str(input: &str) -> String {
    unidecode(input)
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

pub fn name_matches(name: &str, normalized_query: &str) -> bool {
    !normalized_query.is_empty() && clean_str(name).contains(normalized_query)
}
