use serde::Serialize;

/// One page of an already filtered and sorted list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    pub paged: Vec<R>,
    /// The page actually shown after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Always at least one page, even for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice out `page` (1-based). Out-of-range pages clamp to the nearest valid one
/// and a zero page size behaves as one.
pub fn paginate<R: Clone>(records: &[R], page: usize, page_size: usize) -> Page<R> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(records.len(), page_size);
    let page = clamp_page(page, total_pages);

    let start = (page - 1).saturating_mul(page_size).min(records.len());
    let end = start.saturating_add(page_size).min(records.len());

    Page {
        paged: records[start..end].to_vec(),
        page,
        total_pages,
    }
}
