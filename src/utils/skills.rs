/// Splits comma-separated free text into an ordered list of skills.
///
/// Entries are trimmed and blanks dropped; order and duplicates are kept as
/// typed.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_skills`] for pre-filling an edit form.
pub fn join_skills(skills: &[String]) -> String {
    skills.join(", ")
}
