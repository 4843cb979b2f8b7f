use anyhow::{Context, Result};

use crate::{
  aws::{Creator, resources as aws_resources},
  ocm::{self, AddOn, Connection, CreateManagedServiceArgs, ManagedService},
};

/// Trait abstracting all AWS API operations used by the CLI
pub trait AwsClients {
  fn find_role_arns(&self, role_type: &str, version: &str) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
  fn get_creator(&self) -> impl std::future::Future<Output = Result<Creator>> + Send;
  fn validate_role_name_available(&self, name: &str) -> impl std::future::Future<Output = Result<()>> + Send;
  fn region(&self) -> Result<String>;
}

/// Trait abstracting all OpenShift Cluster Manager API operations used by the CLI
pub trait OcmClients {
  fn get_addon(&self, id: &str) -> impl std::future::Future<Output = Result<AddOn>> + Send;
  fn create_managed_service(
    &self,
    args: &CreateManagedServiceArgs,
  ) -> impl std::future::Future<Output = Result<ManagedService>> + Send;
  fn list_managed_services(&self, size: i32) -> impl std::future::Future<Output = Result<Vec<ManagedService>>> + Send;
}

/// Real AWS client implementation wrapping the SDK clients
pub struct RealAwsClients {
  iam: aws_sdk_iam::Client,
  sts: aws_sdk_sts::Client,
  region: Option<String>,
}

impl RealAwsClients {
  pub fn new(config: &aws_config::SdkConfig) -> Self {
    Self {
      iam: aws_sdk_iam::Client::new(config),
      sts: aws_sdk_sts::Client::new(config),
      region: config.region().map(|r| r.to_string()),
    }
  }
}

impl AwsClients for RealAwsClients {
  async fn find_role_arns(&self, role_type: &str, version: &str) -> Result<Vec<String>> {
    aws_resources::find_role_arns(&self.iam, role_type, version).await
  }

  async fn get_creator(&self) -> Result<Creator> {
    aws_resources::get_creator(&self.sts).await
  }

  async fn validate_role_name_available(&self, name: &str) -> Result<()> {
    aws_resources::validate_role_name_available(&self.iam, name).await
  }

  fn region(&self) -> Result<String> {
    self
      .region
      .clone()
      .context("No AWS region found. Use the --region flag or set the AWS_REGION environment variable")
  }
}

impl OcmClients for Connection {
  async fn get_addon(&self, id: &str) -> Result<AddOn> {
    ocm::resources::get_addon(self, id).await
  }

  async fn create_managed_service(&self, args: &CreateManagedServiceArgs) -> Result<ManagedService> {
    ocm::resources::create_managed_service(self, args).await
  }

  async fn list_managed_services(&self, size: i32) -> Result<Vec<ManagedService>> {
    ocm::resources::list_managed_services(self, size).await
  }
}
