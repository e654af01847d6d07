use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Fields a list filter can look at.
pub trait Filterable {
    /// The field the text search runs against (group name, job title,
    /// member full name).
    fn display_text(&self) -> Cow<'_, str>;

    /// Value compared against [`FilterState::category`].
    fn category(&self) -> Option<&str>;

    /// Value compared against [`FilterState::kind`].
    fn kind(&self) -> Option<&str>;
}

/// Exact-match selector with an "everything" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    /// Wire and CLI spelling of [`Selector::All`].
    pub const ALL: &'static str = "ALL";

    pub fn only(value: impl Into<String>) -> Self {
        Selector::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case(Self::ALL) {
            Ok(Selector::All)
        } else {
            Ok(Selector::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(Self::ALL),
            Selector::Only(value) => f.write_str(value),
        }
    }
}

/// Client-side filter buffer of a list view.
///
/// Predicates combine with AND. An empty query and `All` selectors match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub category: Selector,
    pub kind: Selector,
}

impl FilterState {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Selector) -> Self {
        self.category = category;
        self
    }

    pub fn with_kind(mut self, kind: Selector) -> Self {
        self.kind = kind;
        self
    }

    /// True when the filter lets every entity through.
    pub fn is_identity(&self) -> bool {
        self.search_query.is_empty() && self.category.is_all() && self.kind.is_all()
    }

    pub fn matches<E: Filterable>(&self, entity: &E) -> bool {
        Matcher::new(self).matches(entity)
    }
}

/// A [`FilterState`] with the query lowercased once.
struct Matcher<'a> {
    needle: String,
    state: &'a FilterState,
}

impl<'a> Matcher<'a> {
    fn new(state: &'a FilterState) -> Self {
        Self {
            needle: state.search_query.to_lowercase(),
            state,
        }
    }

    fn matches<E: Filterable>(&self, entity: &E) -> bool {
        self.state.category.matches(entity.category())
            && self.state.kind.matches(entity.kind())
            && (self.needle.is_empty()
                || entity.display_text().to_lowercase().contains(&self.needle))
    }
}

/// Derive the visible subset of `list`, preserving order.
pub fn filter<'a, E: Filterable>(list: &'a [E], state: &FilterState) -> Vec<&'a E> {
    if state.is_identity() {
        return list.iter().collect();
    }
    let matcher = Matcher::new(state);
    list.iter().filter(|e| matcher.matches(*e)).collect()
}
