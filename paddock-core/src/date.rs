use chrono::NaiveDate;

// `d` matches one ASCII digit, anything else matches itself.
fn has_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

/// Parse the date shapes the upstream emits.
///
/// Accepts `YYYY-MM-DD`, `DD-MM-YYYY`, and timestamps that start with
/// `YYYY-MM-DD` followed by `T` or a space. The digits must name a real
/// calendar day. Anything else is `None`.
#[must_use]
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if has_shape(s, "dddd-dd-dd") {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    }
    if has_shape(s, "dd-dd-dddd") {
        return NaiveDate::parse_from_str(s, "%d-%m-%Y").ok();
    }
    let head = s.get(..10)?;
    match s.as_bytes().get(10) {
        Some(b'T' | b' ') if has_shape(head, "dddd-dd-dd") => {
            NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

/// [`parse_day`] rendered as `YYYY-MM-DD`.
#[must_use]
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_day(raw).map(to_ymd)
}

/// Render as `YYYY-MM-DD`.
#[must_use]
pub fn to_ymd(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Render as `DD-MM-YYYY`.
#[must_use]
pub fn to_dmy(day: NaiveDate) -> String {
    day.format("%d-%m-%Y").to_string()
}
