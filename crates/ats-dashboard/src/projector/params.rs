use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Sentinel accepted by the status selector meaning "no status filtering".
pub const ALL_STATUSES: &str = "all";

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_VISIBLE_PER_STAGE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Blank input and the `all` sentinel (any case) disable filtering.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_STATUSES) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_STATUSES,
            Self::Only(status) => status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flip the comparator result rather than the list so ties keep input order.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort direction '{0}' (expected asc or desc)")]
pub struct ParseSortDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortDirectionError(value.to_string())),
        }
    }
}

/// Stages the user has expanded past the default preview count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionSet(BTreeSet<String>);

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the stage was already expanded.
    pub fn expand(&mut self, stage: impl Into<String>) -> bool {
        self.0.insert(stage.into())
    }

    pub fn collapse(&mut self, stage: &str) -> bool {
        self.0.remove(stage)
    }

    pub fn toggle(&mut self, stage: &str) {
        if !self.collapse(stage) {
            self.expand(stage);
        }
    }

    pub fn is_expanded(&self, stage: &str) -> bool {
        self.0.contains(stage)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Every user-controlled input that shapes the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParameters {
    pub search: String,
    pub status: StatusFilter,
    pub sort_key: Option<String>,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
    pub expansion: ExpansionSet,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort_key: None,
            direction: SortDirection::Ascending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            expansion: ExpansionSet::new(),
        }
    }
}

impl ViewParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_expanded(mut self, stage: impl Into<String>) -> Self {
        self.expansion.expand(stage);
        self
    }
}
