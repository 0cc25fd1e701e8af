use chrono::{SecondsFormat, Utc};

/// RFC 3339 UTC timestamp with microseconds, used for record and event times.
pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::now_utc_iso;

    #[test]
    fn timestamp_parses_as_rfc3339_utc() -> anyhow::Result<()> {
        let stamp = now_utc_iso();
        let parsed = DateTime::parse_from_rfc3339(&stamp)?;
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(stamp.ends_with("+00:00"));
        Ok(())
    }
}
