use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::error;

const EMBEDDED_INDEX: &str = include_str!("../templates/index.html");
const NOW_PLACEHOLDER: &str = "{{ now }}";

/// Reads the index template from disk, falling back to the copy built into
/// the binary when the file is missing or unreadable.
pub async fn load_template(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(template) => template,
        Err(e) => {
            error!("Error reading template {}: {}", path.display(), e);
            EMBEDDED_INDEX.to_string()
        }
    }
}

pub fn render(template: &str, now: DateTime<Utc>) -> String {
    template.replace(NOW_PLACEHOLDER, &format_timestamp(now))
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn substitutes_every_placeholder() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let html = render("<p>{{ now }}</p><i>{{ now }}</i>", now);
        assert_eq!(html, "<p>2024-01-02 03:04:05 UTC</p><i>2024-01-02 03:04:05 UTC</i>");
    }

    #[test]
    fn embedded_template_carries_placeholder() {
        assert!(EMBEDDED_INDEX.contains(NOW_PLACEHOLDER));
        assert!(EMBEDDED_INDEX.contains("/check"));
    }

    #[tokio::test]
    async fn missing_file_uses_embedded_copy() {
        let template = load_template(Path::new("/nonexistent/index.html")).await;
        assert_eq!(template, EMBEDDED_INDEX);
    }

    #[tokio::test]
    async fn reads_template_from_disk() {
        let path = std::env::temp_dir().join(format!("status-page-index-{}.html", std::process::id()));
        tokio::fs::write(&path, "<h1>{{ now }}</h1>").await.unwrap();
        let template = load_template(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(template, "<h1>{{ now }}</h1>");
    }
}
