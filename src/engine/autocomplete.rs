/// Incremental substring search over the school list.
#[derive(Debug, Clone, PartialEq)]
pub struct Autocomplete {
    entries: Vec<String>,
    limit: usize,
    query: String,
    suggestions: Vec<String>,
}

impl Autocomplete {
    /// Entries are sorted lexically once, up front.
    pub fn new(mut entries: Vec<String>, limit: usize) -> Self {
        entries.sort();
        Self {
            entries,
            limit,
            query: String::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Case-insensitive containment, source order, at most `limit` results.
    pub fn matches(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.to_lowercase().contains(&needle))
            .take(self.limit)
            .cloned()
            .collect()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.suggestions = self.matches(query);
    }

    /// Fill the box with the chosen name and close the list.
    pub fn select(&mut self, name: &str) -> String {
        self.query = name.to_string();
        self.suggestions.clear();
        self.query.clone()
    }

    /// Click outside: close without touching the query.
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schools() -> Vec<String> {
        [
            "University of Florida",
            "Florida State University",
            "Florida Polytechnic University",
            "Florida Atlantic University",
            "Florida International University",
            "Florida Gulf Coast University",
            "Florida A&M University",
            "Georgia Tech",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let ac = Autocomplete::new(schools(), 6);
        assert!(ac.matches("").is_empty());
    }

    #[test]
    fn test_caps_at_limit_in_source_order() {
        let ac = Autocomplete::new(schools(), 6);
        let hits = ac.matches("florida");
        assert_eq!(hits.len(), 6, "7 schools match, only 6 may be shown");
        let expected: Vec<String> = ac
            .entries()
            .iter()
            .filter(|e| e.to_lowercase().contains("florida"))
            .take(6)
            .cloned()
            .collect();
        assert_eq!(hits, expected);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let ac = Autocomplete::new(schools(), 6);
        assert_eq!(ac.matches("GEORGIA"), vec!["Georgia Tech".to_string()]);
        assert_eq!(
            ac.matches("tEcH"),
            vec![
                "Florida Polytechnic University".to_string(),
                "Georgia Tech".to_string()
            ]
        );
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let ac = Autocomplete::new(schools(), 6);
        assert!(ac.matches("zzz").is_empty());
    }

    #[test]
    fn test_entries_sorted_lexically() {
        let ac = Autocomplete::new(schools(), 6);
        let mut sorted = schools();
        sorted.sort();
        assert_eq!(ac.entries(), sorted.as_slice());
    }

    #[test]
    fn test_select_closes_list_and_sets_query() {
        let mut ac = Autocomplete::new(schools(), 6);
        ac.set_query("georgia");
        assert!(ac.is_open());
        let chosen = ac.select("Georgia Tech");
        assert_eq!(chosen, "Georgia Tech");
        assert_eq!(ac.query(), "Georgia Tech");
        assert!(!ac.is_open());
    }

    #[test]
    fn test_dismiss_keeps_query() {
        let mut ac = Autocomplete::new(schools(), 6);
        ac.set_query("flor");
        ac.dismiss();
        assert!(!ac.is_open());
        assert_eq!(ac.query(), "flor");
    }
}
