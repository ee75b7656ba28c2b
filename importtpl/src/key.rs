//! Combined keys.
//!
//! A combined key addresses one schema position, e.g.
//! `source_information__source__0__source_link`. The flattener names rows
//! with it and the unflattener reads answers by it, so both must derive it
//! through [`combine`].

/// Separator between key segments.
pub const KEY_SEPARATOR: &str = "__";

/// Join `key` below `parent`. Root keys have no parent.
pub fn combine(key: impl std::fmt::Display, parent: Option<&str>) -> String {
    match parent {
        None => key.to_string(),
        Some(parent) => format!("{parent}{KEY_SEPARATOR}{key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OptionKey;

    #[test]
    fn test_combine() {
        assert_eq!(combine("title", None), "title");
        assert_eq!(combine("title", Some("event")), "event__title");
        assert_eq!(combine(3, Some("list")), "list__3");
        assert_eq!(combine(true, Some("flag")), "flag__true");
        assert_eq!(
            combine(OptionKey::from("source__0"), Some("source_information")),
            "source_information__source__0"
        );
    }

    #[test]
    fn test_combine_empty_parent_is_still_a_parent() {
        assert_eq!(combine("a", Some("")), "__a");
    }
}
