use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default URL of the OpenShift Cluster Manager API
pub const DEFAULT_URL: &str = "https://api.openshift.com";

const DEFAULT_CONFIG_FILE: &str = ".rosa.yaml";

/// Top-level configuration loaded from `.rosa.yaml` or an explicit path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
  /// Base URL of the OpenShift Cluster Manager API
  #[serde(default = "default_url")]
  pub url: String,

  /// Bearer token sent with every request to the API
  #[serde(default)]
  pub token: Option<String>,
}

fn default_url() -> String {
  DEFAULT_URL.to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      url: default_url(),
      token: None,
    }
  }
}

impl Config {
  /// Values from the environment (`OCM_URL`, `OCM_TOKEN`) take precedence over the file
  pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
    if let Some(url) = url.filter(|u| !u.is_empty()) {
      self.url = url;
    }
    if let Some(token) = token.filter(|t| !t.is_empty()) {
      self.token = Some(token);
    }

    self
  }
}

/// Load configuration from an explicit path, the default `.rosa.yaml` in the
/// current working directory, or fall back to `Config::default()`, then apply
/// any environment overrides.
pub fn load(path: Option<&str>) -> Result<Config> {
  let config = load_from(path, std::env::current_dir().ok().as_deref())?;

  Ok(config.with_overrides(std::env::var("OCM_URL").ok(), std::env::var("OCM_TOKEN").ok()))
}

fn load_from(path: Option<&str>, base_dir: Option<&std::path::Path>) -> Result<Config> {
  if let Some(p) = path {
    let contents = std::fs::read_to_string(p).with_context(|| format!("Failed to read config file: {p}"))?;
    let config: Config =
      serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config file: {p}"))?;
    return Ok(config);
  }

  if let Some(dir) = base_dir {
    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
      let contents = std::fs::read_to_string(&default_path)
        .with_context(|| format!("Failed to read config file: {}", default_path.display()))?;
      let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", default_path.display()))?;
      return Ok(config);
    }
  }

  Ok(Config::default())
}
