pub mod path;
pub mod resources;

use anyhow::{Context, Result, bail};
use reqwest::{RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub use path::ResourcePath;
pub use resources::{AddOn, AddOnParameter, CreateManagedServiceArgs, ManagedService, OperatorIamRole};

use crate::config::Config;

/// Error body returned by the API for any non-successful request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiError {
  #[serde(default)]
  pub kind: String,
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub href: String,
  #[serde(default)]
  pub code: String,
  #[serde(default)]
  pub reason: String,
}

/// Authenticated connection to the OpenShift Cluster Manager API
#[derive(Debug)]
pub struct Connection {
  client: reqwest::Client,
  url: Url,
  token: String,
}

impl Connection {
  pub fn builder() -> ConnectionBuilder {
    ConnectionBuilder::default()
  }

  /// Open a connection using the URL and token from the configuration
  pub fn from_config(config: &Config) -> Result<Self> {
    let mut builder = Self::builder().url(&config.url);
    if let Some(token) = &config.token {
      builder = builder.token(token);
    }

    builder.build()
  }

  /// Base URL the connection sends requests to
  pub fn url(&self) -> &Url {
    &self.url
  }

  fn endpoint(&self, path: &ResourcePath) -> Result<Url> {
    let endpoint = format!("{}{path}", self.url.as_str().trim_end_matches('/'));
    Url::parse(&endpoint).with_context(|| format!("Invalid resource URL '{endpoint}'"))
  }

  pub(crate) fn get(&self, path: &ResourcePath) -> Result<RequestBuilder> {
    Ok(self.client.get(self.endpoint(path)?).bearer_auth(&self.token))
  }

  pub(crate) fn post(&self, path: &ResourcePath) -> Result<RequestBuilder> {
    Ok(self.client.post(self.endpoint(path)?).bearer_auth(&self.token))
  }

  /// Release the connection and any pooled sockets it holds
  pub fn close(self) -> Result<()> {
    drop(self.client);
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct ConnectionBuilder {
  url: Option<String>,
  token: Option<String>,
  user_agent: Option<String>,
}

impl ConnectionBuilder {
  pub fn url(mut self, url: impl Into<String>) -> Self {
    self.url = Some(url.into());
    self
  }

  pub fn token(mut self, token: impl Into<String>) -> Self {
    self.token = Some(token.into());
    self
  }

  pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = Some(user_agent.into());
    self
  }

  pub fn build(self) -> Result<Connection> {
    let token = match self.token {
      Some(token) if !token.is_empty() => token,
      _ => bail!("Not logged in, run the 'rosa login' command"),
    };

    let raw_url = self.url.unwrap_or_else(|| crate::config::DEFAULT_URL.to_string());
    let url = Url::parse(&raw_url).with_context(|| format!("Invalid API URL '{raw_url}'"))?;

    let user_agent = self
      .user_agent
      .unwrap_or_else(|| format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;

    Ok(Connection { client, url, token })
  }
}

/// Send the request and decode the JSON response body
///
/// Non-successful responses are turned into an error carrying the API's reason
pub(crate) async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
  let response = request.send().await?;
  let status = response.status();

  if !status.is_success() {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiError>(&body) {
      Ok(err) if !err.reason.is_empty() => {
        bail!("{} (status {}, code {})", err.reason, status.as_u16(), err.code)
      }
      _ => bail!("Unexpected response status {status}: {body}"),
    }
  }

  Ok(response.json::<T>().await?)
}
