use crate::ports::{DomPort, LoggerPort};

/// Parses a badge label the way `parseInt` would: leading whitespace, an
/// optional sign, then as many digits as there are.
pub fn parse_count(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Adds `delta` to every badge matching `selector`. Badges whose label is not
/// a number are left alone.
pub fn adjust<D: DomPort>(dom: &D, logger: &dyn LoggerPort, selector: &str, delta: i64) {
    if delta == 0 {
        return;
    }
    for badge in dom.query_all(selector) {
        let label = dom.text(&badge);
        match parse_count(&label) {
            Some(count) => dom.set_text(&badge, &count.saturating_add(delta).to_string()),
            None => logger.warn(&format!("Ignoring badge with non-numeric label '{label}'")),
        }
    }
}

/// Overwrites every badge matching `selector` with `count`.
pub fn set<D: DomPort>(dom: &D, selector: &str, count: i64) {
    for badge in dom.query_all(selector) {
        dom.set_text(&badge, &count.to_string());
    }
}
