//! Engine configuration
//!
//! The global toggles that change how records are marshalled. An engine
//! takes its configuration at construction and never changes it afterwards.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Language used when the environment names no usable locale
pub const FALLBACK_LANGUAGE: &str = "en";

/// Configuration for an [`Engine`](crate::Engine)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Raise on unresolvable related records instead of leaving the member unset
    pub strict_mode: bool,
    /// Write scalar values as typed literals; when off, every scalar is an
    /// untyped string literal
    pub strong_typing: bool,
    /// Keep only literals tagged with the member's declared language
    pub enable_lang_aware: bool,
    /// Synthesize a predicate (base namespace + member name) for members
    /// without an explicit one; when off such members are not mapped
    pub infer_missing_bindings: bool,
    /// Require the persistence marker on every mapped type
    pub enforce_entity_marker: bool,
    /// Language code preferred when a value has no untagged literal
    pub default_language: String,
    /// Prefix declarations registered when the engine is created
    pub namespaces: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            strong_typing: true,
            enable_lang_aware: false,
            infer_missing_bindings: true,
            enforce_entity_marker: false,
            default_language: locale_language(),
            namespaces: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration document
    ///
    /// Missing keys take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a configuration from flat key/value properties
    ///
    /// Boolean toggles are matched by name, case-insensitively. Unknown keys
    /// and unparsable values are ignored. `ns_list` is a comma-separated
    /// list of prefixes whose namespace URIs are the values of the keys of
    /// the same name.
    pub fn from_properties(props: &HashMap<String, String>) -> Self {
        let mut config = Self::default();

        for (key, value) in props {
            let Ok(flag) = value.trim().parse::<bool>() else {
                continue;
            };
            match key.to_ascii_lowercase().as_str() {
                "strict_mode" => config.strict_mode = flag,
                "strong_typing" => config.strong_typing = flag,
                "enable_lang_aware" => config.enable_lang_aware = flag,
                "infer_missing_bindings" => config.infer_missing_bindings = flag,
                "enforce_entity_marker" | "enforce_entity_annotation" => {
                    config.enforce_entity_marker = flag
                }
                _ => {}
            }
        }

        if let Some(lang) = props.get("default_language") {
            config.default_language = lang.trim().to_string();
        }

        if let Some(list) = props.get("ns_list") {
            for prefix in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                if let Some(uri) = props.get(prefix) {
                    config.namespaces.insert(prefix.to_string(), uri.clone());
                }
            }
        }

        config
    }
}

/// Language code of the process locale (`LC_ALL`, then `LANG`)
///
/// `en_US.UTF-8` yields `en`. Empty, `C` and `POSIX` fall back to
/// [`FALLBACK_LANGUAGE`].
pub fn locale_language() -> String {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|locale| language_of(&locale))
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

fn language_of(locale: &str) -> Option<String> {
    let lang = locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or_default()
        .trim();
    match lang {
        "" | "C" | "POSIX" => None,
        lang => Some(lang.to_ascii_lowercase()),
    }
}
