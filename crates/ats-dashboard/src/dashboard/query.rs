use serde::Deserialize;

use crate::projector::{ExpansionSet, SortDirection, StatusFilter, ViewParameters};
use crate::records::{EntityKind, Projectable};

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Query-string form of [`ViewParameters`].
///
/// `expanded` is a comma separated list of stage identifiers.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub expanded: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewParameterError {
    #[error("{kind} cannot be sorted by '{key}'")]
    UnknownSortKey { kind: EntityKind, key: String },
    #[error("invalid sort direction '{0}' (expected asc or desc)")]
    InvalidDirection(String),
}

impl ViewQuery {
    /// Resolve against `defaults`, validating the sort key for `R`.
    ///
    /// Navigation values are never rejected: page size is clamped to
    /// `1..=MAX_PAGE_SIZE` here and the page itself is clamped by the projector.
    pub fn into_parameters<R: Projectable>(
        self,
        defaults: ViewParameters,
    ) -> Result<ViewParameters, ViewParameterError> {
        let mut params = defaults;

        if let Some(search) = self.search {
            params.search = search;
        }
        if let Some(status) = self.status {
            params.status = StatusFilter::parse(&status);
        }
        if let Some(key) = self.sort.filter(|key| !key.trim().is_empty()) {
            let key = key.trim().to_string();
            if !R::is_sortable_by(&key) {
                return Err(ViewParameterError::UnknownSortKey { kind: R::KIND, key });
            }
            params.sort_key = Some(key);
        }
        if let Some(direction) = self.direction {
            params.direction = direction
                .parse::<SortDirection>()
                .map_err(|_| ViewParameterError::InvalidDirection(direction))?;
        }
        if let Some(page) = self.page {
            params.page = page;
        }
        if let Some(page_size) = self.page_size {
            params.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        }
        if let Some(expanded) = self.expanded {
            params.expansion = expanded
                .split(',')
                .map(str::trim)
                .filter(|stage| !stage.is_empty())
                .collect::<ExpansionSet>();
        }

        Ok(params)
    }
}
