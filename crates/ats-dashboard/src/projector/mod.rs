//! Pure list projection: filter, sort, paginate, and stage grouping over an
//! already fetched record collection. Nothing here performs I/O or fails; bad
//! navigation input is clamped and missing fields fall back to empty values.

mod filter;
mod group;
mod paginate;
mod params;
mod sort;
mod view;

pub use filter::{filter, matches_search, observed_statuses};
pub use group::{group_by_stage, StageGroup};
pub use paginate::{clamp_page, paginate, total_pages, Page};
pub use params::{
    ExpansionSet, ParseSortDirectionError, SortDirection, StatusFilter, ViewParameters,
    ALL_STATUSES, DEFAULT_PAGE_SIZE, DEFAULT_VISIBLE_PER_STAGE,
};
pub use sort::sort;
pub use view::{project, ProjectedView};

#[cfg(test)]
pub(crate) mod tests {
    use crate::records::{Candidate, Job, Projectable, RecordId};

    pub(crate) fn job(id: &str, status: &str, title: &str) -> Job {
        Job {
            id: RecordId::from(id),
            title: Some(title.to_string()),
            department: None,
            location: None,
            employment_type: None,
            status: status.to_string(),
            openings: None,
            salary_min: None,
            salary_max: None,
            created_at: None,
        }
    }

    pub(crate) fn candidate(id: &str, status: &str, rating: Option<f64>) -> Candidate {
        Candidate {
            id: RecordId::from(id),
            name: Some(format!("Candidate {id}")),
            email: None,
            phone: None,
            job_title: None,
            status: status.to_string(),
            experience_years: None,
            rating,
            created_at: None,
        }
    }

    pub(crate) fn ids<R: Projectable>(records: &[R]) -> Vec<&str> {
        records
            .iter()
            .map(|record| record.record_id().as_str())
            .collect()
    }
}
