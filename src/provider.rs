// 🛰️ Provider Payloads - Typed view over raw provider responses
//
// Raw JSON never reaches the engine. It is decoded here into explicit
// variants that ProfileBuilder matches exhaustively:
//
//   ProviderAResult = Success | NotFound | Failure
//   ProviderBResult = Breaches | NoBreaches | Failure
//
// Provider B entries are decoded one by one: an unreadable entry is set
// aside (reported as rejected) and never takes its siblings down with it.
//
// Responses are acquired through `BreachSource`. Fetching over HTTP is out of
// scope; `SnapshotSource` reads responses that were saved to disk earlier.

use crate::error::{LeakError, Result};
use crate::model::{LeakEvent, ProviderTag};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// ============================================================================
// PROVIDER A (LeakCheck-style)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakSource {
    pub name: String,

    /// "YYYY-MM", absent or empty when the provider does not know
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakCheckHit {
    pub found: u64,

    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub sources: Vec<LeakSource>,
}

impl LeakCheckHit {
    pub fn events(&self) -> Vec<LeakEvent> {
        self.sources
            .iter()
            .map(|s| LeakEvent::new(&s.name, s.date.as_deref(), ProviderTag::LeakCheck))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderAResult {
    Success(LeakCheckHit),
    NotFound,
    Failure(String),
}

impl ProviderAResult {
    /// Decode a raw response body. Never fails: anything unexpected is a `Failure`.
    pub fn from_json(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => ProviderAResult::Failure(payload_error(ProviderTag::LeakCheck, format!("invalid JSON: {}", e))),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value.get("success").and_then(Value::as_bool) {
            Some(true) => match serde_json::from_value::<LeakCheckHit>(value) {
                Ok(hit) => ProviderAResult::Success(hit),
                Err(e) => ProviderAResult::Failure(payload_error(ProviderTag::LeakCheck, e.to_string())),
            },
            Some(false) => ProviderAResult::NotFound,
            None => ProviderAResult::Failure(payload_error(
                ProviderTag::LeakCheck,
                "missing success indicator".to_string(),
            )),
        }
    }

    /// Leak events, empty unless the lookup succeeded with hits
    pub fn events(&self) -> Vec<LeakEvent> {
        match self {
            ProviderAResult::Success(hit) if hit.found > 0 => hit.events(),
            _ => Vec::new(),
        }
    }

    pub fn fields(&self) -> &[String] {
        match self {
            ProviderAResult::Success(hit) if hit.found > 0 => &hit.fields,
            _ => &[],
        }
    }
}

// ============================================================================
// PROVIDER B (HIBP-style)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreachEntry {
    pub name: String,

    /// "YYYY-MM-DD"; empty when the provider sent null or nothing
    #[serde(default, deserialize_with = "null_as_default")]
    pub breach_date: String,

    /// "YYYY-MM-DDTHH:MM:SSZ"; empty when the provider sent null or nothing
    #[serde(default, deserialize_with = "null_as_default")]
    pub added_date: String,

    /// Raw markup
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub data_classes: Vec<String>,
}

/// `null` decodes like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn payload_error(provider: ProviderTag, reason: String) -> String {
    LeakError::ProviderPayload {
        provider: provider.name().to_string(),
        reason,
    }
    .to_string()
}

impl BreachEntry {
    pub fn event(&self) -> LeakEvent {
        LeakEvent::new(&self.name, Some(&self.breach_date), ProviderTag::Hibp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderBResult {
    Breaches {
        entries: Vec<BreachEntry>,

        /// One reason per list element that could not be decoded
        rejected: Vec<String>,
    },
    NoBreaches,
    Failure(String),
}

impl ProviderBResult {
    /// Breach list with nothing rejected
    pub fn breaches(entries: Vec<BreachEntry>) -> Self {
        ProviderBResult::Breaches {
            entries,
            rejected: Vec::new(),
        }
    }

    pub fn from_json(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => ProviderBResult::Failure(payload_error(ProviderTag::Hibp, format!("invalid JSON: {}", e))),
        }
    }

    pub fn from_value(value: Value) -> Self {
        let items = match value {
            Value::Array(items) => items,
            _ => {
                return ProviderBResult::Failure(payload_error(
                    ProviderTag::Hibp,
                    "expected a list of breaches".to_string(),
                ))
            }
        };
        if items.is_empty() {
            return ProviderBResult::NoBreaches;
        }

        let mut entries = Vec::with_capacity(items.len());
        let mut rejected = Vec::new();
        for (idx, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<BreachEntry>(item) {
                Ok(entry) => entries.push(entry),
                Err(e) => rejected.push(payload_error(ProviderTag::Hibp, format!("entry {}: {}", idx, e))),
            }
        }
        ProviderBResult::Breaches { entries, rejected }
    }

    pub fn entries(&self) -> &[BreachEntry] {
        match self {
            ProviderBResult::Breaches { entries, .. } => entries,
            ProviderBResult::NoBreaches | ProviderBResult::Failure(_) => &[],
        }
    }

    pub fn rejected(&self) -> &[String] {
        match self {
            ProviderBResult::Breaches { rejected, .. } => rejected,
            ProviderBResult::NoBreaches | ProviderBResult::Failure(_) => &[],
        }
    }
}

// ============================================================================
// BREACH SOURCE - Composable trait
// ============================================================================

/// Where provider responses come from.
///
/// Implementations absorb their own transport errors into `Failure` variants;
/// acquiring a response never aborts a run.
pub trait BreachSource: Send + Sync {
    fn leakcheck(&self, email: &str) -> ProviderAResult;

    fn hibp(&self, email: &str) -> ProviderBResult;
}

/// Reads responses saved as `<dir>/<email>.leakcheck.json` and
/// `<dir>/<email>.hibp.json`. A `<email>.hibp.404` marker stands for
/// "no breaches" (Provider B answers 404 for clean accounts).
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(LeakError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("snapshot directory not found: {}", dir.display()),
            )));
        }
        Ok(SnapshotSource {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, email: &str, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", email.trim(), suffix))
    }

    fn read(&self, email: &str, suffix: &str) -> std::result::Result<String, String> {
        let path = self.path_for(email, suffix);
        fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))
    }
}

impl BreachSource for SnapshotSource {
    fn leakcheck(&self, email: &str) -> ProviderAResult {
        match self.read(email, "leakcheck.json") {
            Ok(body) => ProviderAResult::from_json(&body),
            Err(reason) => ProviderAResult::Failure(reason),
        }
    }

    fn hibp(&self, email: &str) -> ProviderBResult {
        match self.read(email, "hibp.json") {
            Ok(body) => ProviderBResult::from_json(&body),
            Err(_) if self.path_for(email, "hibp.404").exists() => ProviderBResult::NoBreaches,
            Err(reason) => ProviderBResult::Failure(reason),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leakcheck_success() {
        let body = r#"{"success": true, "found": 2, "fields": ["password", "username"],
            "sources": [{"name": "Acme", "date": "2023-05"}, {"name": "Old", "date": ""}]}"#;
        let result = ProviderAResult::from_json(body);
        let events = result.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].render(), "Acme (2023-05)");
        assert_eq!(result.fields(), &["password".to_string(), "username".to_string()]);
    }

    #[test]
    fn test_leakcheck_zero_found_has_no_events() {
        let body = r#"{"success": true, "found": 0, "fields": ["email"], "sources": []}"#;
        let result = ProviderAResult::from_json(body);
        assert!(matches!(result, ProviderAResult::Success(_)));
        assert!(result.events().is_empty());
        assert!(result.fields().is_empty());
    }

    #[test]
    fn test_leakcheck_not_found() {
        let result = ProviderAResult::from_json(r#"{"success": false, "error": "Not found"}"#);
        assert_eq!(result, ProviderAResult::NotFound);
    }

    #[test]
    fn test_leakcheck_missing_success_is_failure() {
        assert!(matches!(ProviderAResult::from_json(r#"{"found": 1}"#), ProviderAResult::Failure(_)));
        assert!(matches!(ProviderAResult::from_json(r#"{"success": "yes"}"#), ProviderAResult::Failure(_)));
        assert!(matches!(ProviderAResult::from_json("<html>"), ProviderAResult::Failure(_)));
    }

    #[test]
    fn test_leakcheck_null_date() {
        let body = r#"{"success": true, "found": 1, "fields": [], "sources": [{"name": "X", "date": null}]}"#;
        let events = ProviderAResult::from_json(body).events();
        assert_eq!(events[0].date, None);
    }

    #[test]
    fn test_hibp_breaches() {
        let body = r#"[{"Name": "Adobe", "BreachDate": "2013-10-04", "AddedDate": "2013-12-04T00:00:00Z",
            "Description": "<p>Big</p>", "DataClasses": ["Email addresses", "Passwords"]}]"#;
        let result = ProviderBResult::from_json(body);
        let entries = result.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event().render(), "Adobe (2013-10-04)");
        assert_eq!(entries[0].data_classes.len(), 2);
    }

    #[test]
    fn test_hibp_empty_list_is_no_breaches() {
        assert_eq!(ProviderBResult::from_json("[]"), ProviderBResult::NoBreaches);
    }

    #[test]
    fn test_hibp_unexpected_shape_is_failure() {
        assert!(matches!(ProviderBResult::from_json(r#"{"statusCode": 429}"#), ProviderBResult::Failure(_)));
        assert!(ProviderBResult::Failure("x".into()).entries().is_empty());
    }

    #[test]
    fn test_hibp_bad_entry_rejected_alone() {
        let body = r#"[
            {"Name": "Good", "BreachDate": "2023-11-01", "AddedDate": "2023-11-20T00:00:00Z", "DataClasses": ["Passwords"]},
            {"Title": "no name here"},
            42
        ]"#;
        let result = ProviderBResult::from_json(body);
        assert_eq!(result.entries().len(), 1);
        assert_eq!(result.entries()[0].name, "Good");
        assert_eq!(result.rejected().len(), 2);
        assert!(result.rejected()[0].contains("entry 1"));
    }

    #[test]
    fn test_hibp_null_fields_decode_as_empty() {
        let body = r#"[{"Name": "Odd", "BreachDate": null, "AddedDate": null, "Description": null, "DataClasses": null}]"#;
        let result = ProviderBResult::from_json(body);
        assert!(result.rejected().is_empty());
        let odd = &result.entries()[0];
        assert_eq!(odd.breach_date, "");
        assert!(odd.data_classes.is_empty());
        assert_eq!(odd.event().render(), "Odd ()");
    }

    #[test]
    fn test_failure_reason_names_provider() {
        match ProviderAResult::from_json("<html>") {
            ProviderAResult::Failure(reason) => assert!(reason.starts_with("unexpected LeakCheck payload")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a@x.io.leakcheck.json"), r#"{"success": false}"#).unwrap();
        fs::write(dir.path().join("a@x.io.hibp.404"), "").unwrap();

        let source = SnapshotSource::new(dir.path()).unwrap();
        assert_eq!(source.leakcheck("a@x.io"), ProviderAResult::NotFound);
        assert_eq!(source.hibp("a@x.io"), ProviderBResult::NoBreaches);
        assert!(matches!(source.leakcheck("b@x.io"), ProviderAResult::Failure(_)));
        assert!(matches!(source.hibp("b@x.io"), ProviderBResult::Failure(_)));
    }

    #[test]
    fn test_snapshot_source_missing_dir() {
        assert!(SnapshotSource::new(Path::new("/definitely/not/here")).is_err());
    }
}
