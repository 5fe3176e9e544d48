pub mod account;
pub mod assets;
pub mod auth;
pub mod home;
pub mod lessons;
pub mod posts;
pub mod quiz;
pub mod uploads;

/// Resolve a user's stored image reference to a URL. The placeholder ships
/// as an embedded asset; uploaded files are served from the uploads dir.
pub(crate) fn avatar_url(image_file: &str) -> String {
    if image_file == "default.svg" {
        "/assets/img/default.svg".to_string()
    } else {
        format!("/uploads/{}", image_file)
    }
}

/// SQLite timestamps are `YYYY-MM-DD HH:MM:SS`; listings show a readable
/// date. Falls back to the raw value if it ever fails to parse.
pub(crate) fn display_date(timestamp: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_avatar_comes_from_assets() {
        assert_eq!(avatar_url("default.svg"), "/assets/img/default.svg");
    }

    #[test]
    fn uploaded_avatar_comes_from_uploads() {
        assert_eq!(avatar_url("ab12.png"), "/uploads/ab12.png");
    }

    #[test]
    fn display_date_formats_sqlite_timestamps() {
        assert_eq!(display_date("2026-08-07 09:15:00"), "August 7, 2026");
    }

    #[test]
    fn display_date_passes_through_unparseable_values() {
        assert_eq!(display_date("whenever"), "whenever");
    }
}
