//! Line selection for INFO output

use crate::info::Category;

/// Decide whether one raw INFO line is displayed.
///
/// Empty lines and `#` section headers never survive. With no prefixes the
/// answer is `show_all`; otherwise the line must start with one of them.
pub fn keep<S: AsRef<str>>(line: &str, prefixes: &[S], show_all: bool) -> bool {
    if line.is_empty() || line.starts_with('#') {
        return false;
    }
    if prefixes.is_empty() {
        return show_all;
    }
    prefixes
        .iter()
        .any(|prefix| line.starts_with(prefix.as_ref()))
}

/// Key-prefix filter applied to every node's output during a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFilter {
    prefixes: Vec<String>,
    show_all: bool,
}

impl LineFilter {
    pub fn new(prefixes: Vec<String>, show_all: bool) -> Self {
        Self { prefixes, show_all }
    }

    /// Filter with the category's default for an empty prefix list.
    pub fn for_category(category: Category, prefixes: Vec<String>) -> Self {
        Self::new(prefixes, category.shows_all_by_default())
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn keep(&self, line: &str) -> bool {
        keep(line, self.prefixes.as_slice(), self.show_all)
    }

    /// Surviving lines of `text`, in their original order.
    pub fn apply(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter(|line| self.keep(line))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_headers_and_blanks_never_kept() {
        for line in ["", "# Memory", "#"] {
            assert!(!keep(line, NONE, true));
            assert!(!keep(line, NONE, false));
            assert!(!keep(line, &["#", ""], true));
        }
    }

    #[test]
    fn test_no_prefixes() {
        assert!(keep("used_memory:1024", NONE, true));
        assert!(!keep("used_memory:1024", NONE, false));
    }

    #[test]
    fn test_prefix_match() {
        let prefixes = ["used_memory", "role"];
        assert!(keep("used_memory_human:1.00K", &prefixes, false));
        assert!(keep("role:master", &prefixes, true));
        assert!(!keep("connected_slaves:2", &prefixes, true));
        // literal, case-sensitive
        assert!(!keep("Role:master", &prefixes, true));
        assert!(!keep("xrole:master", &prefixes, true));
        assert!(keep("a.b:1", &["a."], true));
        assert!(!keep("axb:1", &["a."], true));
    }

    #[test]
    fn test_apply_keeps_order_and_strips_crlf() {
        let text = "# Replication\r\nrole:master\r\nconnected_slaves:1\r\n\
                    slave0:ip=10.0.0.2,port=6380\r\n\r\nmaster_repl_offset:42\r\n";
        let filter = LineFilter::new(vec!["master".into(), "role".into()], false);
        assert_eq!(filter.apply(text), vec!["role:master", "master_repl_offset:42"]);

        let everything = LineFilter::for_category(Category::Stats, vec![]);
        assert_eq!(everything.apply(text).len(), 4);

        let nothing = LineFilter::for_category(Category::Replication, vec![]);
        assert!(nothing.apply(text).is_empty());
    }

    #[test]
    fn test_line_matching_many_prefixes_kept_once() {
        let filter = LineFilter::new(vec!["used".into(), "used_memory".into()], true);
        assert_eq!(filter.apply("used_memory:1\n"), vec!["used_memory:1"]);
    }
}
