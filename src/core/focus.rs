//! Focus-set resolution — which identifiers lie on the active path.
//!
//! An open leaf `"notes/2024/june.md"` puts itself *and* every ancestor
//! container (`"notes"`, `"notes/2024"`) in focus.  The set is rebuilt from
//! scratch on every call so closed items never linger.

use std::collections::HashSet;

/// Separator between identifier segments.
pub const PATH_SEPARATOR: char = '/';

/// The identifiers eligible for in-focus treatment: every open leaf plus all
/// of its proper ancestor prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusedSet {
    paths: HashSet<String>,
}

impl FocusedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Insert `path` and each of its proper prefixes.
    ///
    /// Every prefix is a slice of `path` ending just before a separator, so
    /// segments are reproduced verbatim (empty ones included) and a
    /// root-level leaf contributes only itself.
    fn insert_with_ancestors(&mut self, path: &str) {
        if !self.paths.insert(path.to_owned()) {
            // Seen before — its ancestors are already in the set.
            return;
        }

        for (end, _) in path.match_indices(PATH_SEPARATOR) {
            self.paths.insert(path[..end].to_owned());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for FocusedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert_with_ancestors(path.as_ref());
        }
        set
    }
}

/// Compute the focused set for the given open leaf identifiers.
///
/// Duplicates and ordering in `open` do not affect the result.
pub fn resolve<I, S>(open: I) -> FocusedSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: FocusedSet = open.into_iter().collect();
    tracing::debug!(focused = set.len(), "resolved focus set");
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: &FocusedSet) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let set = resolve(Vec::<String>::new());
        assert!(set.is_empty());
    }

    #[test]
    fn root_level_leaf_has_no_ancestors() {
        let set = resolve(["A"]);
        assert_eq!(sorted(&set), vec!["A"]);
    }

    #[test]
    fn nested_leaf_brings_every_prefix() {
        let set = resolve(["A/B/C"]);
        assert_eq!(sorted(&set), vec!["A", "A/B", "A/B/C"]);
    }

    #[test]
    fn shared_ancestor_is_stored_once() {
        let set = resolve(["A/B", "A/C"]);
        assert_eq!(sorted(&set), vec!["A", "A/B", "A/C"]);
    }

    #[test]
    fn duplicates_and_order_do_not_matter() {
        let a = resolve(["x/y/z.md", "x/w.md", "x/y/z.md"]);
        let b = resolve(["x/w.md", "x/y/z.md"]);
        assert_eq!(a, b);
        assert_eq!(sorted(&a), vec!["x", "x/w.md", "x/y", "x/y/z.md"]);
    }

    #[test]
    fn leaf_that_is_also_an_ancestor_of_another() {
        // "A/B" is open itself and is also a prefix of "A/B/C".
        let set = resolve(["A/B/C", "A/B"]);
        assert_eq!(sorted(&set), vec!["A", "A/B", "A/B/C"]);
    }

    #[test]
    fn result_holds_exactly_inputs_and_their_prefixes() {
        let open = ["docs/guide/intro.md", "src/main.rs", "README.md"];
        let set = resolve(open);

        let mut expected: Vec<&str> = vec![
            "docs",
            "docs/guide",
            "docs/guide/intro.md",
            "src",
            "src/main.rs",
            "README.md",
        ];
        expected.sort_unstable();
        assert_eq!(sorted(&set), expected);
        assert!(!set.contains("docs/guide/intro"));
        assert!(!set.contains(""));
    }

    #[test]
    fn leading_separator_keeps_its_segments() {
        let set = resolve(["/A/B"]);
        assert_eq!(sorted(&set), vec!["", "/A", "/A/B"]);
        assert!(!set.contains("A"));
    }

    #[test]
    fn every_member_is_a_prefix_of_some_input() {
        let open = ["/A/B", "x//y", "z/"];
        let set = resolve(open);
        for member in set.iter() {
            assert!(
                open.iter().any(|leaf| *leaf == member
                    || (leaf.starts_with(member) && leaf[member.len()..].starts_with(PATH_SEPARATOR))),
                "{member:?} is not a prefix of any open item"
            );
        }
        assert_eq!(sorted(&resolve(["x//y"])), vec!["x", "x/", "x//y"]);
    }
}
