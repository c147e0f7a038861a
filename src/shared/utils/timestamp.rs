use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub fn format_rfc3339(at: OffsetDateTime) -> String {
    // Formatting a UTC timestamp as RFC 3339 only fails for years outside 0..=9999.
    at.format(&Rfc3339).unwrap_or_default()
}

pub fn now_rfc3339() -> String {
    format_rfc3339(OffsetDateTime::now_utc())
}
