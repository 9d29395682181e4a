pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the 1-based `page` window of `items`.
///
/// Pages past the end, and pages below 1, are empty.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = match (page as u64 - 1).checked_mul(QUESTIONS_PER_PAGE as u64) {
        Some(start) if start < items.len() as u64 => start as usize,
        _ => return &[],
    };
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
