//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Sources merge in order: a YAML file (or inline snippet), then
//! `AUDITA_`-prefixed environment variables. `${VAR}` placeholders anywhere
//! in the merged tree are expanded (recursively, depth-capped) before the
//! strongly typed config materialises — the API key normally arrives as
//! `${GEMINI_API_KEY}`.

use audita_common::{AnalysisSettings, AuditaError};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAX_EXPANSION_PASSES: usize = 8;

#[derive(Debug, Deserialize)]
pub struct AuditaConfig {
    pub version: Option<String>,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// The tag is `kind`; the payload lives alongside it.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(default = "default_gemini_endpoint")]
        endpoint: String,
    },
}

fn default_gemini_model() -> String {
    "gemini-3-pro-preview".into()
}
fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/".into()
}

impl AuditaConfig {
    /// Fail fast on credentials that are missing or never got expanded,
    /// instead of letting the provider return an opaque auth error later.
    pub fn validate(&self) -> audita_common::Result<()> {
        let ProviderConfig::Gemini { api_key, .. } = &self.provider;
        if api_key.trim().is_empty() {
            return Err(AuditaError::Config(
                "provider.api_key is empty; set GEMINI_API_KEY".to_string(),
            ));
        }
        if api_key.contains("${") {
            return Err(AuditaError::Config(format!(
                "provider.api_key still contains an unresolved placeholder: {api_key}"
            )));
        }
        Ok(())
    }
}

fn expand_env(value: &mut Value) {
    match value {
        Value::String(s) if s.contains('$') => {
            for _ in 0..MAX_EXPANSION_PASSES {
                let expanded = match shellexpand::env(s.as_str()) {
                    Ok(cow) => cow.into_owned(),
                    Err(_) => break,
                };
                if expanded == *s {
                    break;
                }
                *s = expanded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(expand_env),
        Value::Object(map) => map.values_mut().for_each(expand_env),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct AuditaConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for AuditaConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditaConfigLoader {
    /// Start with the defaults: `AUDITA_`-prefixed env overrides, `__` as
    /// the nesting separator.
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("AUDITA").separator("__"));
        Self { builder }
    }

    /// Attach a config file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet (tests, CLI overrides).
    ///
    /// ```
    /// use audita_config::{AuditaConfigLoader, ProviderConfig};
    ///
    /// let cfg = AuditaConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// provider:
    ///   kind: "gemini"
    ///   api_key: "inline-key"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// let ProviderConfig::Gemini { model, endpoint, .. } = &cfg.provider;
    /// assert_eq!(model, "gemini-3-pro-preview");
    /// assert!(endpoint.starts_with("https://generativelanguage"));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// The merged tree passes through `${VAR}` expansion before the typed
    /// structs materialise.
    pub fn load(self) -> Result<AuditaConfig, ConfigError> {
        let merged = self.builder.build()?;

        let mut tree: Value = merged.try_deserialize()?;
        expand_env(&mut tree);

        serde_json::from_value(tree).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_placeholders_in_strings() {
        temp_env::with_var("AUDITA_TEST_KEY", Some("sk-123"), || {
            let mut v = json!("prefix-${AUDITA_TEST_KEY}-suffix");
            expand_env(&mut v);
            assert_eq!(v, json!("prefix-sk-123-suffix"));
        });
    }

    #[test]
    fn expands_inside_arrays_and_objects() {
        temp_env::with_vars(
            [("AUDITA_CITY", Some("Quito")), ("AUDITA_CC", Some("EC"))],
            || {
                let mut v = json!(["x-$AUDITA_CITY", { "loc": "${AUDITA_CITY}-${AUDITA_CC}" }, 7, null]);
                expand_env(&mut v);
                assert_eq!(v, json!(["x-Quito", { "loc": "Quito-EC" }, 7, null]));
            },
        );
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("AUDITA_INNER", Some("core")),
                ("AUDITA_OUTER", Some("wrap-${AUDITA_INNER}")),
            ],
            || {
                let mut v = json!("${AUDITA_OUTER}");
                expand_env(&mut v);
                assert_eq!(v, json!("wrap-core"));
            },
        );
    }

    #[test]
    fn terminates_on_cyclic_definitions() {
        temp_env::with_vars(
            [("AUDITA_A", Some("${AUDITA_B}")), ("AUDITA_B", Some("${AUDITA_A}"))],
            || {
                let mut v = json!("x=${AUDITA_A}");
                // Only termination matters here; the cycle stays unresolved.
                expand_env(&mut v);
                assert!(v.as_str().unwrap().contains("${"));
            },
        );
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${AUDITA_DOES_NOT_EXIST}");
        expand_env(&mut v);
        assert_eq!(v, json!("hi-${AUDITA_DOES_NOT_EXIST}"));
    }

    #[test]
    fn api_key_arrives_through_the_environment() {
        temp_env::with_var("TEST_GEMINI_KEY", Some("injected-from-env"), || {
            let cfg = AuditaConfigLoader::new()
                .with_yaml_str(
                    r#"
version: "1"
provider:
  kind: "gemini"
  api_key: "${TEST_GEMINI_KEY}"
analysis:
  timeout_secs: 30
"#,
                )
                .load()
                .expect("valid configuration");

            let ProviderConfig::Gemini { api_key, .. } = &cfg.provider;
            assert_eq!(api_key, "injected-from-env");
            assert_eq!(cfg.analysis.timeout_secs, 30);
            cfg.validate().expect("resolved key validates");
        });
    }

    #[test]
    fn unresolved_or_empty_key_fails_validation() {
        let cfg = AuditaConfigLoader::new()
            .with_yaml_str(
                r#"
provider:
  kind: "gemini"
  api_key: "${AUDITA_KEY_THAT_IS_NOT_SET}"
"#,
            )
            .load()
            .expect("loads before validation");
        assert!(cfg.validate().is_err());

        let cfg = AuditaConfigLoader::new()
            .with_yaml_str(
                r#"
provider:
  kind: "gemini"
  api_key: ""
"#,
            )
            .load()
            .expect("loads before validation");
        assert!(cfg.validate().is_err());
    }
}
