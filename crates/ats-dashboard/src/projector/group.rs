use std::collections::HashMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::records::Projectable;

use super::params::ExpansionSet;

/// Records sharing one pipeline stage.
///
/// `records` always holds every member so groups partition their input; the
/// preview limit only affects [`StageGroup::visible_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct StageGroup<R> {
    stage: String,
    records: Vec<R>,
    visible: usize,
    expanded: bool,
}

impl<R> StageGroup<R> {
    fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            records: Vec::new(),
            visible: 0,
            expanded: false,
        }
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn visible_records(&self) -> &[R] {
        &self.records[..self.visible]
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn hidden(&self) -> usize {
        self.records.len() - self.visible
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Drives the "view all" affordance.
    pub fn is_truncated(&self) -> bool {
        self.visible < self.records.len()
    }
}

impl<R: Serialize> Serialize for StageGroup<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StageGroup", 6)?;
        state.serialize_field("stage", &self.stage)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("hidden", &self.hidden())?;
        state.serialize_field("expanded", &self.expanded)?;
        state.serialize_field("truncated", &self.is_truncated())?;
        state.serialize_field("records", self.visible_records())?;
        state.end()
    }
}

/// Group records by status in first-seen stage order.
///
/// Stages in `expansion` show every record; the rest show at most
/// `visible_per_stage`.
pub fn group_by_stage<R>(
    records: &[R],
    expansion: &ExpansionSet,
    visible_per_stage: usize,
) -> Vec<StageGroup<R>>
where
    R: Projectable + Clone,
{
    let mut groups: Vec<StageGroup<R>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let status = record.status();
        let position = *positions.entry(status).or_insert_with(|| {
            groups.push(StageGroup::new(status));
            groups.len() - 1
        });
        groups[position].records.push(record.clone());
    }

    for group in &mut groups {
        group.expanded = expansion.is_expanded(&group.stage);
        group.visible = if group.expanded {
            group.records.len()
        } else {
            group.records.len().min(visible_per_stage)
        };
    }

    groups
}
