/// Thins out a slice evenly to at most `max_items` elements.
///
/// Every `stride`:th element is taken starting from the first one, where the stride is the
/// slice length divided by `max_items` (rounded down, never less than one). Collection stops
/// as soon as `max_items` elements are taken, so trailing elements may be left out when the
/// length is not a multiple of `max_items`. A slice already within bounds is returned as is.
///
/// # Arguments
///
/// * 'items' - the items to thin out
/// * 'max_items' - upper bound on the number of returned items
pub fn filter_evenly<T: Clone>(items: &[T], max_items: usize) -> Vec<T> {
    let n = items.len();
    if n <= max_items {
        return items.to_vec();
    }

    let stride = (n / max_items.max(1)).max(1);

    items.iter()
        .step_by(stride)
        .take(max_items)
        .cloned()
        .collect()
}
