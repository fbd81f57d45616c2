use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::SourceFormat;

/// Top-level project configuration loaded from `.apiport.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiportConfig {
    /// Default input file for `apiport import`.
    pub input: String,
    /// Declared source format, validated against detection.
    pub expect: Option<SourceFormat>,
    pub output: OutputConfig,
}

impl Default for ApiportConfig {
    fn default() -> Self {
        Self {
            input: "api-spec.json".to_string(),
            expect: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output serialization options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Write to this path instead of stdout when set.
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apiport.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApiportConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ApiportConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apiport configuration
input: api-spec.json
# expect: openapi          # openapi | swagger | postman | curl

output:
  format: json             # json | yaml
  # path: canonical.json   # omit to print to stdout
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiportConfig::default();
        assert_eq!(config.input, "api-spec.json");
        assert!(config.expect.is_none());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: petstore.json
expect: swagger
output:
  format: yaml
  path: out.yaml
"#;
        let config: ApiportConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "petstore.json");
        assert_eq!(config.expect, Some(SourceFormat::Swagger));
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert_eq!(config.output.path.as_deref(), Some("out.yaml"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "input: api.json\n";
        let config: ApiportConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.json");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_default_content_parses() {
        let config: ApiportConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.input, "api-spec.json");
    }
}
