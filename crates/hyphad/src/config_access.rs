//! Typed get/set access to single config entries.
//!
//! Keys are dot-addressable paths into the stored config document. Writes
//! read the whole document through the repository handle, splice the coerced
//! value in (creating intermediate objects along the path), and write the
//! document back.

use serde_json::{Map, Value};
use thiserror::Error;

use hypha_repo::{Repo, RepoError};

/// Write-time interpretation of a raw input value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Store the raw string as provided.
    #[default]
    Literal,
    /// Store a boolean: `true` only when the raw value is exactly `"true"`.
    Bool,
    /// Parse the raw value as JSON and store the parsed document.
    Json,
}

/// Errors surfaced by config entry access.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the stored document failed.
    #[error("failed to read config entry: {0}")]
    Read(#[source] RepoError),
    /// Writing the updated document failed.
    #[error("failed to write config entry: {0}")]
    Write(#[source] RepoError),
    /// The raw value was not valid JSON.
    #[error("invalid JSON value: {0}")]
    Parse(#[source] serde_json::Error),
    /// No entry exists at the requested path.
    #[error("no config entry named '{key}'")]
    UnknownKey {
        /// The path that resolved to nothing.
        key: String,
    },
    /// The empty string is not a valid key.
    #[error("config keys must not be empty")]
    EmptyKey,
}

/// Accessor bound to one repository handle.
///
/// `get` and `set` are independent, unordered operations; callers that
/// depend on repository availability must wait for the boot attempt's
/// `Ready` signal before invoking them.
pub struct ConfigAccessor<'repo> {
    repo: &'repo dyn Repo,
}

impl<'repo> ConfigAccessor<'repo> {
    /// Binds an accessor to the given repository.
    #[must_use]
    pub fn new(repo: &'repo dyn Repo) -> Self {
        Self { repo }
    }

    /// Reads the entry at `key`.
    ///
    /// Structured values are returned structurally, not serialised, so the
    /// caller can distinguish scalar from object output.
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        validate_key(key)?;
        let document = self.repo.read_config().map_err(ConfigError::Read)?;
        lookup(&document, key)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownKey {
                key: key.to_owned(),
            })
    }

    /// Coerces `raw` according to `mode` and stores it at `key`.
    ///
    /// A failed JSON parse aborts before anything reaches the repository, so
    /// there is never a partial write.
    pub fn set(&self, key: &str, raw: &str, mode: WriteMode) -> Result<(), ConfigError> {
        validate_key(key)?;
        let value = coerce(raw, mode)?;
        let mut document = self.repo.read_config().map_err(ConfigError::Read)?;
        splice(&mut document, key, value);
        self.repo
            .write_config(&document)
            .map_err(ConfigError::Write)
    }
}

fn validate_key(key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::EmptyKey);
    }
    Ok(())
}

fn coerce(raw: &str, mode: WriteMode) -> Result<Value, ConfigError> {
    match mode {
        // Strict comparison against the literal "true": any other input,
        // "false" included, stores boolean false.
        WriteMode::Bool => Ok(Value::Bool(raw == "true")),
        WriteMode::Json => serde_json::from_str(raw).map_err(ConfigError::Parse),
        WriteMode::Literal => Ok(Value::String(raw.to_owned())),
    }
}

fn lookup<'doc>(document: &'doc Value, key: &str) -> Option<&'doc Value> {
    key.split('.')
        .try_fold(document, |node, segment| node.get(segment))
}

fn splice(document: &mut Value, key: &str, value: Value) {
    if !matches!(document, Value::Object(_)) {
        *document = Value::Object(Map::new());
    }
    let Value::Object(map) = document else {
        return;
    };
    match key.split_once('.') {
        Some((head, rest)) => {
            let child = map.entry(head.to_owned()).or_insert(Value::Null);
            splice(child, rest, value);
        }
        None => {
            map.insert(key.to_owned(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::RecordingRepo;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("true", json!(true))]
    #[case("false", json!(false))]
    #[case("yes", json!(false))]
    #[case("TRUE", json!(false))]
    fn bool_mode_stores_true_only_for_the_literal_string(
        #[case] raw: &str,
        #[case] expected: Value,
    ) {
        let repo = RecordingRepo::open_with(json!({}));
        let accessor = ConfigAccessor::new(&repo);

        accessor
            .set("Discovery.Enabled", raw, WriteMode::Bool)
            .expect("set must succeed");

        assert_eq!(
            accessor
                .get("Discovery.Enabled")
                .expect("entry must exist"),
            expected
        );
    }

    #[rstest]
    fn malformed_json_fails_without_touching_the_repo() {
        let repo = RecordingRepo::open_with(json!({}));
        let accessor = ConfigAccessor::new(&repo);

        let error = accessor
            .set("Addresses", "{not json", WriteMode::Json)
            .expect_err("set must fail");

        assert!(matches!(error, ConfigError::Parse(_)));
        assert_eq!(repo.write_calls(), 0);
    }

    #[rstest]
    fn json_mode_round_trips_structured_values() {
        let repo = RecordingRepo::open_with(json!({}));
        let accessor = ConfigAccessor::new(&repo);
        let document = r#"{"Swarm": ["/ip4/0.0.0.0/tcp/4002"], "API": "/ip4/127.0.0.1/tcp/5002"}"#;

        accessor
            .set("Addresses", document, WriteMode::Json)
            .expect("set must succeed");

        assert_eq!(
            accessor.get("Addresses").expect("entry must exist"),
            json!({"Swarm": ["/ip4/0.0.0.0/tcp/4002"], "API": "/ip4/127.0.0.1/tcp/5002"})
        );
    }

    #[rstest]
    fn literal_mode_stores_the_raw_string() {
        let repo = RecordingRepo::open_with(json!({}));
        let accessor = ConfigAccessor::new(&repo);

        accessor
            .set("Datastore.Path", "/var/lib/hypha", WriteMode::Literal)
            .expect("set must succeed");

        assert_eq!(
            accessor.get("Datastore.Path").expect("entry must exist"),
            json!("/var/lib/hypha")
        );
    }

    #[rstest]
    fn dot_paths_create_intermediate_objects() {
        let repo = RecordingRepo::open_with(json!({"a": "scalar"}));
        let accessor = ConfigAccessor::new(&repo);

        accessor
            .set("a.b.c", "1", WriteMode::Json)
            .expect("set must succeed");

        assert_eq!(
            accessor.get("a").expect("entry must exist"),
            json!({"b": {"c": 1}})
        );
    }

    #[rstest]
    fn get_distinguishes_missing_entries_from_read_failures() {
        let repo = RecordingRepo::open_with(json!({"a": 1}));
        let accessor = ConfigAccessor::new(&repo);

        assert!(matches!(
            accessor.get("b").expect_err("entry must be absent"),
            ConfigError::UnknownKey { .. }
        ));

        repo.fail_read();
        assert!(matches!(
            accessor.get("a").expect_err("read must fail"),
            ConfigError::Read(_)
        ));
    }

    #[rstest]
    fn empty_keys_are_rejected() {
        let repo = RecordingRepo::open_with(json!({}));
        let accessor = ConfigAccessor::new(&repo);

        assert!(matches!(
            accessor.get("").expect_err("get must fail"),
            ConfigError::EmptyKey
        ));
        assert!(matches!(
            accessor
                .set("", "1", WriteMode::Literal)
                .expect_err("set must fail"),
            ConfigError::EmptyKey
        ));
        assert_eq!(repo.write_calls(), 0);
    }
}
