use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::mock::resolver::DEFAULT_LIST_COUNT;
use crate::mock::{DefaultPlaceholders, MockOptions};

/// Top-level project configuration loaded from `.swk.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwkConfig {
    pub input: String,
    pub client: ClientConfig,
    pub mock: MockConfig,
}

impl Default for SwkConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            client: ClientConfig::default(),
            mock: MockConfig::default(),
        }
    }
}

/// Client code options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every request URL. Falls back to the document `basePath`.
    pub base_path: Option<String>,
    /// Import line that brings `request` into scope in generated modules.
    pub request_import: String,
    pub no_jsdoc: bool,
    /// Project-supplied minijinja template replacing the built-in client
    /// module layout.
    pub template: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            request_import: "import request from '@/utils/request'".to_string(),
            no_jsdoc: false,
            template: None,
        }
    }
}

/// Mock template options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub list_count: usize,
    pub placeholders: DefaultPlaceholders,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            list_count: DEFAULT_LIST_COUNT,
            placeholders: DefaultPlaceholders::default(),
        }
    }
}

impl MockConfig {
    pub fn options(&self) -> MockOptions {
        MockOptions::new(self.list_count, self.placeholders.clone())
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swk.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwkConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: SwkConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swk configuration
input: swagger.json

client:
  # base_path: /api          # defaults to the document basePath
  request_import: "import request from '@/utils/request'"
  no_jsdoc: false
  # template: templates/api.ts.j2   # replaces the built-in module layout

mock:
  list_count: 6             # repeat count for array members (`rows|6`)
  placeholders:
    string: "@ctitle(2, 8)"
    date_time: "@now(yyyy-MM-dd) @date(HH:mm:ss)"
    integer: "@integer(0, 1000)"
    boolean: "@boolean()"
"#
}
