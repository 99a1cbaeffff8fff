//! Node options and the pure resolver merging caller patches over defaults.
//!
//! Callers hand the node an [`OptionsPatch`] where every field is optional
//! and the `init`/`start` flags follow the loose interpretation inherited
//! from the wire format: only the literal boolean `false` disables either
//! behaviour, any other value (including `null`, `0`, and `""`) leaves the
//! default of `true` in force.

use camino::Utf8PathBuf;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::defaults::{DEFAULT_KEY_BITS, default_repo_path};

/// Parameters applied when the repository is initialised during boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOptions {
    /// Key length recorded in the freshly initialised repository.
    pub bits: u32,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
        }
    }
}

/// Whether and how the repository is initialised during boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitDirective {
    /// Skip initialisation; the repository is expected to already exist.
    Disabled,
    /// Initialise the repository with the supplied parameters.
    Enabled(InitOptions),
}

impl InitDirective {
    /// Interprets a loosely typed flag value.
    ///
    /// Only the literal `false` disables initialisation. An object carries
    /// parameters (missing or malformed `bits` fall back to the default).
    /// Every other value enables initialisation with default parameters.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(false) => Self::Disabled,
            Value::Object(params) => {
                let bits = params
                    .get("bits")
                    .and_then(Value::as_u64)
                    .and_then(|bits| u32::try_from(bits).ok())
                    .unwrap_or(DEFAULT_KEY_BITS);
                Self::Enabled(InitOptions { bits })
            }
            _ => Self::Enabled(InitOptions::default()),
        }
    }

    /// Returns true unless initialisation was explicitly disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Initialisation parameters, when enabled.
    #[must_use]
    pub fn options(&self) -> Option<&InitOptions> {
        match self {
            Self::Enabled(options) => Some(options),
            Self::Disabled => None,
        }
    }
}

impl Default for InitDirective {
    fn default() -> Self {
        Self::Enabled(InitOptions::default())
    }
}

impl<'de> Deserialize<'de> for InitDirective {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Opt-in feature flags for functionality that is not yet stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExperimentalOptions {
    /// Enables the experimental pubsub subsystem.
    pub pubsub: bool,
}

fn deserialize_loose_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(!matches!(value, Value::Bool(false))))
}

/// Caller-supplied overrides applied on top of the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    /// Initialisation flag or parameter record.
    pub init: Option<InitDirective>,
    /// Whether boot brings up the networking layers.
    #[serde(deserialize_with = "deserialize_loose_flag")]
    pub start: Option<bool>,
    /// Repository location override.
    pub repo: Option<Utf8PathBuf>,
    /// Config overrides merged into the stored document after init.
    pub config: Option<Map<String, Value>>,
    /// Experimental feature flags.
    pub experimental: Option<ExperimentalOptions>,
}

impl OptionsPatch {
    /// Patch for embedding a node against an existing repository without
    /// initialising it or bringing up networking.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            init: Some(InitDirective::Disabled),
            start: Some(false),
            ..Self::default()
        }
    }

    /// Overrides the repository location.
    #[must_use]
    pub fn with_repo(mut self, repo: impl Into<Utf8PathBuf>) -> Self {
        self.repo = Some(repo.into());
        self
    }
}

/// Fully resolved node options, constructed once and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOptions {
    /// Whether and how to initialise the repository.
    pub init: InitDirective,
    /// Whether boot brings up the networking layers.
    pub start: bool,
    /// Repository location.
    pub repo: Utf8PathBuf,
    /// Config overrides merged during boot, when initialisation ran.
    pub config: Option<Map<String, Value>>,
    /// Experimental feature flags.
    pub experimental: ExperimentalOptions,
}

impl NodeOptions {
    /// Resolves caller overrides over the built-in defaults.
    ///
    /// Pure merge with no error conditions: the patch wins where present and
    /// defaults fill the gaps. Malformed nested values surface later as
    /// failures in the steps that consume them.
    #[must_use]
    pub fn resolve(patch: OptionsPatch) -> Self {
        Self {
            init: patch.init.unwrap_or_default(),
            start: patch.start.unwrap_or(true),
            repo: patch.repo.unwrap_or_else(default_repo_path),
            config: patch.config,
            experimental: patch.experimental.unwrap_or_default(),
        }
    }
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self::resolve(OptionsPatch::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{InitDirective, NodeOptions, OptionsPatch};
    use crate::defaults::DEFAULT_KEY_BITS;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn patch_from(value: Value) -> OptionsPatch {
        serde_json::from_value(value).expect("patch must deserialise")
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"init": null}))]
    #[case(json!({"init": 0}))]
    #[case(json!({"init": ""}))]
    #[case(json!({"init": true}))]
    fn init_defaults_to_enabled(#[case] raw: Value) {
        let options = NodeOptions::resolve(patch_from(raw));
        assert!(options.init.is_enabled());
        assert_eq!(
            options.init.options().map(|init| init.bits),
            Some(DEFAULT_KEY_BITS)
        );
    }

    #[rstest]
    fn only_literal_false_disables_init() {
        let options = NodeOptions::resolve(patch_from(json!({"init": false})));
        assert_eq!(options.init, InitDirective::Disabled);
    }

    #[rstest]
    #[case(json!({"init": {"bits": 1024}}), 1024)]
    #[case(json!({"init": {}}), DEFAULT_KEY_BITS)]
    #[case(json!({"init": {"bits": "garbage"}}), DEFAULT_KEY_BITS)]
    fn init_parameters_override_bits(#[case] raw: Value, #[case] expected_bits: u32) {
        let options = NodeOptions::resolve(patch_from(raw));
        assert_eq!(
            options.init.options().map(|init| init.bits),
            Some(expected_bits)
        );
    }

    #[rstest]
    #[case(json!({}), true)]
    #[case(json!({"start": null}), true)]
    #[case(json!({"start": 0}), true)]
    #[case(json!({"start": "no"}), true)]
    #[case(json!({"start": true}), true)]
    #[case(json!({"start": false}), false)]
    fn start_is_false_only_when_explicit(#[case] raw: Value, #[case] expected: bool) {
        let options = NodeOptions::resolve(patch_from(raw));
        assert_eq!(options.start, expected);
    }

    #[rstest]
    fn config_overrides_are_carried_through() {
        let options = NodeOptions::resolve(patch_from(json!({
            "config": {"Addresses": {"API": "/ip4/127.0.0.1/tcp/6000"}}
        })));
        let config = options.config.expect("config overrides must survive");
        assert_eq!(
            config.get("Addresses"),
            Some(&json!({"API": "/ip4/127.0.0.1/tcp/6000"}))
        );
    }

    #[rstest]
    fn offline_patch_disables_init_and_start() {
        let options = NodeOptions::resolve(OptionsPatch::offline().with_repo("/tmp/repo"));
        assert_eq!(options.init, InitDirective::Disabled);
        assert!(!options.start);
        assert_eq!(options.repo, "/tmp/repo");
    }

    #[rstest]
    fn experimental_pubsub_flag_round_trips() {
        let options = NodeOptions::resolve(patch_from(json!({
            "experimental": {"pubsub": true}
        })));
        assert!(options.experimental.pubsub);
    }
}
