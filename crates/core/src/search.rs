//! Live product search over rendered cards.
//!
//! Filtering walks the cards that are on the page at the time of the call: a
//! card whose name contains the query stays visible with every occurrence
//! marked, any other card is hidden. An empty query restores every card and
//! its plain name. Cards rendered later are not touched.

use regex::{Regex, RegexBuilder};

/// A run of name text, marked when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            marked: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            marked: true,
        }
    }
}

/// A rendered product card the filter can show, hide and mark.
pub trait FilterableCard {
    /// The card's plain name text, `None` if the card has no name element.
    fn name(&self) -> Option<String>;

    /// Show or hide the card.
    fn set_visible(&self, visible: bool);

    /// Replace the name with highlighted segments.
    fn mark_name(&self, segments: &[Segment]);

    /// Replace the name with its plain text, dropping any marks.
    fn restore_name(&self);
}

/// Result of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The query was blank; every card is visible and unmarked.
    Cleared,
    /// Cards were filtered.
    Filtered { shown: usize, hidden: usize },
}

/// Trim and lowercase a raw query; `None` when nothing is left.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Case-insensitive literal matcher for the trimmed query.
fn matcher(raw: &str) -> Option<Regex> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(trimmed))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Split `name` into segments, marking every case-insensitive occurrence of
/// the trimmed query.
///
/// Concatenating the segments' text always gives back `name`.
#[must_use]
pub fn highlight(name: &str, raw_query: &str) -> Vec<Segment> {
    let Some(re) = matcher(raw_query) else {
        return vec![Segment::plain(name)];
    };
    segments_with(&re, name)
}

fn segments_with(re: &Regex, name: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(name) {
        if m.start() > last {
            segments.push(Segment::plain(name.get(last..m.start()).unwrap_or_default()));
        }
        segments.push(Segment::marked(m.as_str()));
        last = m.end();
    }
    if last < name.len() || segments.is_empty() {
        segments.push(Segment::plain(name.get(last..).unwrap_or_default()));
    }
    segments
}

/// Filter `cards` by `raw_query`.
pub fn apply_filter<C, I>(cards: I, raw_query: &str) -> FilterOutcome
where
    C: FilterableCard,
    I: IntoIterator<Item = C>,
{
    let Some(query) = normalize(raw_query) else {
        for card in cards {
            card.set_visible(true);
            card.restore_name();
        }
        return FilterOutcome::Cleared;
    };
    let re = matcher(raw_query);

    let (mut shown, mut hidden) = (0, 0);
    for card in cards {
        let Some(name) = card.name() else {
            continue;
        };
        if name.to_lowercase().contains(&query) {
            card.set_visible(true);
            match &re {
                Some(re) => card.mark_name(&segments_with(re, &name)),
                None => card.restore_name(),
            }
            shown += 1;
        } else {
            card.set_visible(false);
            hidden += 1;
        }
    }

    tracing::debug!(query = %query, shown, hidden, "search filter applied");
    FilterOutcome::Filtered { shown, hidden }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    /// A card that keeps its visible state the way the DOM would.
    #[derive(Debug)]
    struct FakeCard {
        original: String,
        visible: RefCell<bool>,
        markup: RefCell<Vec<Segment>>,
    }

    impl FakeCard {
        fn new(name: &str) -> Self {
            Self {
                original: name.to_string(),
                visible: RefCell::new(true),
                markup: RefCell::new(vec![Segment::plain(name)]),
            }
        }

        fn text(&self) -> String {
            self.markup.borrow().iter().map(|s| s.text.as_str()).collect()
        }

        fn has_marks(&self) -> bool {
            self.markup.borrow().iter().any(|s| s.marked)
        }
    }

    impl FilterableCard for &FakeCard {
        fn name(&self) -> Option<String> {
            Some(self.text())
        }

        fn set_visible(&self, visible: bool) {
            *self.visible.borrow_mut() = visible;
        }

        fn mark_name(&self, segments: &[Segment]) {
            *self.markup.borrow_mut() = segments.to_vec();
        }

        fn restore_name(&self) {
            let text = self.text();
            *self.markup.borrow_mut() = vec![Segment::plain(&text)];
        }
    }

    fn cards() -> Vec<FakeCard> {
        ["Vibe Tote", "Arc Tote", "Mini Clutch", "Luna Clutch"]
            .into_iter()
            .map(FakeCard::new)
            .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ToTe "), Some("tote".to_string()));
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_highlight_marks_every_occurrence_case_insensitively() {
        assert_eq!(
            highlight("Tote to TOTE", "tote"),
            vec![
                Segment::marked("Tote"),
                Segment::plain(" to "),
                Segment::marked("TOTE"),
            ]
        );
    }

    #[test]
    fn test_highlight_treats_query_literally() {
        assert_eq!(
            highlight("Bag (XL)", "(xl)"),
            vec![Segment::plain("Bag "), Segment::marked("(XL)")]
        );
        assert_eq!(highlight("Bag", ".*"), vec![Segment::plain("Bag")]);
    }

    #[test]
    fn test_filter_hides_and_marks() {
        let cards = cards();
        let outcome = apply_filter(cards.iter(), " tote");
        assert_eq!(outcome, FilterOutcome::Filtered { shown: 2, hidden: 2 });
        assert!(*cards[0].visible.borrow());
        assert!(cards[1].has_marks());
        assert!(!*cards[2].visible.borrow());
        assert!(!cards[2].has_marks());
    }

    #[test]
    fn test_refilter_replaces_previous_marks() {
        let cards = cards();
        apply_filter(cards.iter(), "clutch");
        apply_filter(cards.iter(), "mini");
        assert_eq!(
            *cards[2].markup.borrow(),
            vec![Segment::marked("Mini"), Segment::plain(" Clutch")]
        );
        assert!(!*cards[3].visible.borrow());
    }

    #[test]
    fn test_empty_query_restores_original_text() {
        let cards = cards();
        apply_filter(cards.iter(), "o");
        apply_filter(cards.iter(), "clutch");
        assert_eq!(apply_filter(cards.iter(), ""), FilterOutcome::Cleared);
        for card in &cards {
            assert!(*card.visible.borrow());
            assert!(!card.has_marks());
            assert_eq!(card.text(), card.original);
        }
    }
}
