use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::records::Projectable;

use super::filter::filter;
use super::group::{group_by_stage, StageGroup};
use super::paginate::{paginate, Page};
use super::params::ViewParameters;
use super::sort::sort;

/// Everything the rendering layer needs for one list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedView<R> {
    /// Filtered records in display (sorted) order.
    pub filtered: Vec<R>,
    pub paged: Vec<R>,
    pub stage_groups: Vec<StageGroup<R>>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<R> ProjectedView<R> {
    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    /// True when nothing passed the filters; render an explicit "no results" state.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

impl<R: Serialize> Serialize for ProjectedView<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProjectedView", 7)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("is_empty", &self.is_empty())?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("page_size", &self.page_size)?;
        state.serialize_field("total_pages", &self.total_pages)?;
        state.serialize_field("records", &self.paged)?;
        state.serialize_field("stage_groups", &self.stage_groups)?;
        state.end()
    }
}

/// Run filter, sort, paginate, and stage grouping in one pass.
///
/// Pagination and grouping both work on the sorted filtered list, so a page
/// and a stage preview show records in the same order.
pub fn project<R>(
    records: &[R],
    params: &ViewParameters,
    visible_per_stage: usize,
) -> ProjectedView<R>
where
    R: Projectable + Clone,
{
    let filtered = filter(records, &params.search, &params.status);
    let filtered = match params.sort_key.as_deref() {
        Some(key) => sort(&filtered, key, params.direction),
        None => filtered,
    };

    let Page {
        paged,
        page,
        total_pages,
    } = paginate(&filtered, params.page, params.page_size);
    let stage_groups = group_by_stage(&filtered, &params.expansion, visible_per_stage);

    ProjectedView {
        filtered,
        paged,
        stage_groups,
        page,
        page_size: params.page_size.max(1),
        total_pages,
    }
}
