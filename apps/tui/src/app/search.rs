use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use india_internship_map::domain::{Region, REGIONS};

/// Regions matching `query` by name or code, best match first. An empty
/// query lists every region.
pub fn matching_regions(query: &str) -> Vec<&'static Region> {
    let query = query.trim();
    if query.is_empty() {
        return REGIONS.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<_> = REGIONS
        .iter()
        .filter_map(|region| {
            let by_name = matcher.fuzzy_match(region.name, query);
            let by_code = matcher.fuzzy_match(region.code, query);
            by_name.max(by_code).map(|score| (region, score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
    scored.into_iter().map(|(region, _)| region).collect()
}

/// The `/` search prompt.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub highlighted: usize,
}

impl SearchState {
    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
        self.highlighted = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.highlighted = 0;
    }

    pub fn matches(&self) -> Vec<&'static Region> {
        matching_regions(&self.query)
    }

    pub fn highlight_next(&mut self) {
        let len = self.matches().len();
        if len > 0 {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }

    pub fn highlight_prev(&mut self) {
        let len = self.matches().len();
        if len > 0 {
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    pub fn choice(&self) -> Option<&'static Region> {
        self.matches().get(self.highlighted).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(query: &str) -> Option<&'static str> {
        matching_regions(query).first().map(|region| region.code)
    }

    #[test]
    fn finds_states_by_partial_name() {
        assert_eq!(first("karn"), Some("IN-KA"));
        assert_eq!(first("bengal"), Some("IN-WB"));
        assert_eq!(first("Tamil"), Some("IN-TN"));
    }

    #[test]
    fn finds_states_by_code() {
        assert_eq!(first("in-dl"), Some("IN-DL"));
    }

    #[test]
    fn empty_query_lists_everything_and_nonsense_lists_nothing() {
        assert_eq!(matching_regions("  ").len(), REGIONS.len());
        assert!(matching_regions("zzzq").is_empty());
    }

    #[test]
    fn highlight_wraps_over_matches() {
        let mut search = SearchState::default();
        for ch in "pradesh".chars() {
            search.push(ch);
        }
        let matches = search.matches();
        assert!(matches.len() >= 4);

        search.highlight_prev();
        assert_eq!(search.highlighted, matches.len() - 1);
        search.highlight_next();
        assert_eq!(search.choice().map(|r| r.code), Some(matches[0].code));

        search.pop();
        assert_eq!(search.highlighted, 0);
    }
}
