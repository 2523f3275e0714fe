use crate::timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub text: String,
    pub date_time: String,
}

impl DiaryEntry {
    pub fn new(text: String) -> Self {
        Self::with_date_time(text, timestamp::now())
    }

    pub fn with_date_time(text: String, date_time: String) -> Self {
        DiaryEntry { text, date_time }
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.date_time, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_stored_field_names() {
        let entry = DiaryEntry::with_date_time("Hello".into(), "2024-01-02 03:04:05".into());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"text":"Hello","dateTime":"2024-01-02 03:04:05"}"#);
    }

    #[test]
    fn render_puts_timestamp_above_text() {
        let entry = DiaryEntry::with_date_time(
            "line one\nline two".into(),
            "2024-01-02 03:04:05".into(),
        );
        assert_eq!(entry.render(), "2024-01-02 03:04:05\nline one\nline two");
    }
}
