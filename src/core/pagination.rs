/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` items
#[inline]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Stage 7 - slice out a 1-based page
///
/// Pages past the end yield an empty slice. Page 0 is treated as page 1.
pub fn page_slice<T>(items: &[T], page: u32, page_size: usize) -> &[T] {
    let page = page.max(1) as usize;
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
