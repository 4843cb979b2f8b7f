use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::ocm::{Connection, ResourcePath, send};

/// Add-on as defined by the cluster management service
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddOn {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub parameters: Option<AddOnParameterList>,
}

impl AddOn {
  /// Parameters declared by the add-on, empty when the add-on has none
  pub fn parameters(&self) -> &[AddOnParameter] {
    self.parameters.as_ref().map(|list| list.items.as_slice()).unwrap_or_default()
  }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddOnParameterList {
  #[serde(default)]
  pub items: Vec<AddOnParameter>,
}

/// A single input accepted by an add-on
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddOnParameter {
  pub id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub value_type: String,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub default_value: Option<String>,
}

/// IAM role assumed by an in-cluster operator
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorIamRole {
  pub name: String,
  pub namespace: String,
  pub role_arn: String,
}

/// Everything required to request a new managed service
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateManagedServiceArgs {
  pub service_name: String,
  pub cluster_name: String,

  pub aws_role_arn: String,
  pub aws_support_role_arn: String,
  pub aws_control_plane_role_arn: String,
  pub aws_worker_role_arn: String,
  pub aws_account_id: String,
  pub aws_region: String,
  pub aws_operator_iam_role_list: Vec<OperatorIamRole>,

  /// Add-on parameter values keyed by parameter ID
  pub parameters: BTreeMap<String, String>,
}

/// Managed service as returned by the service management service
#[derive(Clone, Debug, Default, Serialize, Deserialize, Tabled)]
#[tabled(rename_all = "UpperCase")]
pub struct ManagedService {
  #[serde(default)]
  pub id: String,
  #[tabled(skip)]
  #[serde(default)]
  pub href: String,
  #[serde(default)]
  pub service: String,
  #[tabled(rename = "STATE")]
  #[serde(default)]
  pub service_state: String,
  #[tabled(skip)]
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<ServiceParameter>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceParameter {
  pub id: String,
  pub value: String,
}

#[derive(Debug, Default, Deserialize)]
struct ManagedServiceList {
  #[serde(default)]
  items: Vec<ManagedService>,
}

/// Request body of the create managed service call
#[derive(Debug, Serialize)]
pub(crate) struct ManagedServiceRequest {
  service: String,
  parameters: Vec<ServiceParameter>,
  cluster: ClusterRequest,
}

#[derive(Debug, Serialize)]
struct ClusterRequest {
  name: String,
  region: CloudRegion,
  aws: AwsRequest,
}

#[derive(Debug, Serialize)]
struct CloudRegion {
  id: String,
}

#[derive(Debug, Serialize)]
struct AwsRequest {
  account_id: String,
  sts: StsRequest,
}

#[derive(Debug, Serialize)]
struct StsRequest {
  role_arn: String,
  support_role_arn: String,
  instance_iam_roles: InstanceIamRoles,
  operator_iam_roles: Vec<OperatorIamRole>,
}

#[derive(Debug, Serialize)]
struct InstanceIamRoles {
  master_role_arn: String,
  worker_role_arn: String,
}

impl From<&CreateManagedServiceArgs> for ManagedServiceRequest {
  fn from(args: &CreateManagedServiceArgs) -> Self {
    Self {
      service: args.service_name.clone(),
      parameters: args
        .parameters
        .iter()
        .map(|(id, value)| ServiceParameter {
          id: id.clone(),
          value: value.clone(),
        })
        .collect(),
      cluster: ClusterRequest {
        name: args.cluster_name.clone(),
        region: CloudRegion {
          id: args.aws_region.clone(),
        },
        aws: AwsRequest {
          account_id: args.aws_account_id.clone(),
          sts: StsRequest {
            role_arn: args.aws_role_arn.clone(),
            support_role_arn: args.aws_support_role_arn.clone(),
            instance_iam_roles: InstanceIamRoles {
              master_role_arn: args.aws_control_plane_role_arn.clone(),
              worker_role_arn: args.aws_worker_role_arn.clone(),
            },
            operator_iam_roles: args.aws_operator_iam_role_list.clone(),
          },
        },
      },
    }
  }
}

/// Get the add-on with the given ID, including its parameter schema
pub async fn get_addon(connection: &Connection, id: &str) -> Result<AddOn> {
  let request = connection.get(&ResourcePath::addon(id))?;

  send(request).await.with_context(|| format!("Failed to get add-on '{id}'"))
}

/// Request the creation of a new managed service
pub async fn create_managed_service(connection: &Connection, args: &CreateManagedServiceArgs) -> Result<ManagedService> {
  let body = ManagedServiceRequest::from(args);
  let request = connection.post(&ResourcePath::services())?.json(&body);

  send(request).await
}

/// List up to `size` managed services in a single request
pub async fn list_managed_services(connection: &Connection, size: i32) -> Result<Vec<ManagedService>> {
  if size < 0 {
    bail!("Invalid services count");
  }

  let request = connection.get(&ResourcePath::services())?.query(&[("size", size)]);
  let list: ManagedServiceList = send(request).await?;

  Ok(list.items)
}
