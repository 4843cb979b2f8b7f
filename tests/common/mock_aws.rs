use std::{
  collections::{HashMap, HashSet},
  sync::Mutex,
};

use anyhow::{Result, bail};

use rosa_services::aws::Creator;
use rosa_services::clients::AwsClients;

/// Mock AWS client for testing. Roles are keyed by role type.
/// Every lookup and validation is recorded so tests can assert on the calls made.
#[derive(Default)]
pub struct MockAwsClients {
  pub role_arns: HashMap<String, Vec<String>>,
  pub creator: Creator,
  pub existing_roles: HashSet<String>,
  pub region: Option<String>,
  pub role_lookups: Mutex<Vec<String>>,
  pub validated_names: Mutex<Vec<String>>,
}

impl MockAwsClients {
  pub fn lookups(&self) -> Vec<String> {
    self.role_lookups.lock().unwrap().clone()
  }

  pub fn validated(&self) -> Vec<String> {
    self.validated_names.lock().unwrap().clone()
  }
}

impl AwsClients for MockAwsClients {
  async fn find_role_arns(&self, role_type: &str, _version: &str) -> Result<Vec<String>> {
    self.role_lookups.lock().unwrap().push(role_type.to_string());
    Ok(self.role_arns.get(role_type).cloned().unwrap_or_default())
  }

  async fn get_creator(&self) -> Result<Creator> {
    Ok(self.creator.clone())
  }

  async fn validate_role_name_available(&self, name: &str) -> Result<()> {
    self.validated_names.lock().unwrap().push(name.to_string());
    if self.existing_roles.contains(name) {
      bail!("A role named '{name}' already exists. Please make sure to select a unique prefix");
    }
    Ok(())
  }

  fn region(&self) -> Result<String> {
    match &self.region {
      Some(region) => Ok(region.clone()),
      None => bail!("No AWS region found"),
    }
  }
}

/// Mock that returns errors for all methods, for error path testing
pub struct MockAwsClientsError;

impl AwsClients for MockAwsClientsError {
  async fn find_role_arns(&self, _role_type: &str, _version: &str) -> Result<Vec<String>> { bail!("mock AWS error") }
  async fn get_creator(&self) -> Result<Creator> { bail!("mock AWS error") }
  async fn validate_role_name_available(&self, _name: &str) -> Result<()> { bail!("mock AWS error") }
  fn region(&self) -> Result<String> { bail!("mock AWS error") }
}
