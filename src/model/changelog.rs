// File: ./src/model/changelog.rs
// Change-log records produced by the weekly collector.
use serde::Deserialize;
use serde_json::Value;

/// Exact `result` string the collector writes when nothing changed.
pub const NO_CHANGE_RESULT: &str = "변경 없음";
/// English spelling of the same marker, written by translated collectors.
pub const NO_CHANGE_RESULT_EN: &str = "no change";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    Changed,
    NoChange,
}

impl LogStatus {
    pub fn from_result(result: &str) -> Self {
        if result == NO_CHANGE_RESULT || result == NO_CHANGE_RESULT_EN {
            LogStatus::NoChange
        } else {
            LogStatus::Changed
        }
    }

    pub fn label(&self) -> String {
        match self {
            LogStatus::Changed => rust_i18n::t!("pill_changed").to_string(),
            LogStatus::NoChange => rust_i18n::t!("pill_no_change").to_string(),
        }
    }
}

/// One change-log record.
///
/// The full JSON record is kept: the query is matched against its whole
/// serialized text, including fields that are never displayed. That text is
/// lowercased once here so filtering stays a plain substring test.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct LogRecord {
    pub date: String,
    pub result: String,
    pub summary: String,
    pub report: Option<String>,
    pub added: usize,
    pub removed: usize,
    search_text: String,
}

impl From<Value> for LogRecord {
    fn from(raw: Value) -> Self {
        let text = |key: &str| raw.get(key).and_then(super::loose_text).unwrap_or_default();
        let count = |key: &str| raw.get(key).and_then(Value::as_array).map_or(0, Vec::len);
        let report = raw
            .get("report")
            .and_then(super::loose_text)
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Self {
            date: text("date"),
            result: text("result"),
            summary: text("summary"),
            report,
            added: count("added"),
            removed: count("removed"),
            search_text: raw.to_string().to_lowercase(),
        }
    }
}

impl LogRecord {
    pub fn status(&self) -> LogStatus {
        LogStatus::from_result(&self.result)
    }

    /// Lowercased JSON text of the whole original record.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn with_report(mut self, report: Option<String>) -> Self {
        self.report = report;
        self
    }
}

/// The change-log document: `{ "records": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChangeLog {
    #[serde(default)]
    pub records: Vec<LogRecord>,
}
