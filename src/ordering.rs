use std::cmp::Ordering;

fn as_index(label: &str) -> Option<&str> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = label.trim_start_matches('0');
    Some(trimmed)
}

pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (as_index(a), as_index(b)) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
