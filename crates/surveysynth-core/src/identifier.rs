use std::collections::HashMap;

use deunicode::deunicode;

/// Maximum length of a canonical column identifier.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Normalize a raw column label into a storage-safe ASCII identifier.
///
/// Transliterates to ASCII, collapses every maximal run of non-word
/// characters into a single `_`, prefixes `v_` when the result is empty or
/// does not start with a letter, and truncates to [`MAX_IDENTIFIER_LEN`].
/// Total: every input yields a valid identifier.
pub fn normalize_label(raw: &str) -> String {
    let ascii = deunicode(raw);
    let mut name = match regex::Regex::new(r"\W+") {
        Ok(re) => re.replace_all(&ascii, "_").into_owned(),
        Err(_) => ascii,
    };
    let letter_initial = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false);
    if !letter_initial {
        name = format!("v_{name}");
    }
    name.truncate(MAX_IDENTIFIER_LEN);
    name
}

/// Allocates unique canonical identifiers for one table's columns.
///
/// The first occurrence of a base name keeps it; later occurrences get a
/// `_<n>` suffix where `n` is the 1-based count of prior collisions for
/// that base. State is scoped to a single table and discarded afterwards.
#[derive(Debug, Default)]
pub struct IdentifierAllocator {
    seen: HashMap<String, usize>,
}

impl IdentifierAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `raw` and resolve collisions against earlier allocations.
    pub fn allocate(&mut self, raw: &str) -> String {
        let base = normalize_label(raw);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base.clone()
        } else {
            format!("{base}_{count}")
        };
        *count += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn collapses_non_word_runs() {
        assert_eq!(normalize_label("What is your name?"), "What_is_your_name_");
        assert_eq!(normalize_label("a - b"), "a_b");
    }

    #[test]
    fn prefixes_non_letter_initial_labels() {
        assert_eq!(normalize_label("123 age"), "v_123_age");
        assert_eq!(normalize_label(""), "v_");
        assert_eq!(normalize_label("???"), "v__");
    }

    #[test]
    fn transliterates_to_ascii() {
        let name = normalize_label("عمر الطفل بالسنوات");
        assert!(name.is_ascii());
        assert!(name.chars().next().unwrap().is_ascii_alphabetic());
    }

    #[test]
    fn truncates_long_labels() {
        let raw = "a".repeat(200);
        assert_eq!(normalize_label(&raw).len(), MAX_IDENTIFIER_LEN);
    }

    #[test]
    fn suffixes_collisions_in_order() {
        let mut allocator = IdentifierAllocator::new();
        assert_eq!(allocator.allocate("Q 1"), "Q_1");
        assert_eq!(allocator.allocate("Q-1"), "Q_1_1");
        assert_eq!(allocator.allocate("Q_1"), "Q_1_2");
    }

    #[test]
    fn allocations_are_unique_and_deterministic() {
        let labels = ["Age", "age?", "Age", "", "123", "123"];

        let mut first = IdentifierAllocator::new();
        let run_a: Vec<String> = labels.iter().map(|l| first.allocate(l)).collect();
        let mut second = IdentifierAllocator::new();
        let run_b: Vec<String> = labels.iter().map(|l| second.allocate(l)).collect();

        assert_eq!(run_a, run_b);
        let unique: HashSet<&String> = run_a.iter().collect();
        assert_eq!(unique.len(), run_a.len());
        for name in &run_a {
            assert!(name.chars().next().unwrap().is_ascii_alphabetic());
        }
    }
}
