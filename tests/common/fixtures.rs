use std::collections::HashMap;

use rosa_services::Service;
use rosa_services::aws::Creator;
use rosa_services::ocm::resources::{AddOn, AddOnParameter, AddOnParameterList};

use super::mock_aws::MockAwsClients;

pub const ACCOUNT_ID: &str = "123456789012";

/// ARN of a role in the test account
pub fn role_arn(name: &str) -> String {
  format!("arn:aws:iam::{ACCOUNT_ID}:role/{name}")
}

/// Account roles created with the given prefix, keyed by role type
pub fn account_roles(prefix: &str) -> HashMap<String, Vec<String>> {
  HashMap::from([
    ("installer".to_string(), vec![role_arn(&format!("{prefix}-Installer-Role"))]),
    ("support".to_string(), vec![role_arn(&format!("{prefix}-Support-Role"))]),
    (
      "instance_controlplane".to_string(),
      vec![role_arn(&format!("{prefix}-ControlPlane-Role"))],
    ),
    ("instance_worker".to_string(), vec![role_arn(&format!("{prefix}-Worker-Role"))]),
  ])
}

/// Account with the default account roles, STS credentials, and a region configured
pub fn healthy_aws() -> MockAwsClients {
  MockAwsClients {
    role_arns: account_roles("ManagedOpenShift"),
    creator: Creator {
      account_id: ACCOUNT_ID.to_string(),
      arn: format!("arn:aws:sts::{ACCOUNT_ID}:assumed-role/admin/session"),
      is_sts: true,
    },
    region: Some("us-east-1".to_string()),
    ..Default::default()
  }
}

/// Add-on declaring a parameter for each of the given IDs
pub fn addon(id: &str, parameter_ids: &[&str]) -> AddOn {
  AddOn {
    id: id.to_string(),
    name: id.to_string(),
    parameters: Some(AddOnParameterList {
      items: parameter_ids
        .iter()
        .map(|param| AddOnParameter {
          id: param.to_string(),
          name: param.to_string(),
          value_type: "string".to_string(),
          ..Default::default()
        })
        .collect(),
    }),
  }
}

/// Arguments for `create service` with a fixed operator roles prefix
pub fn service_args(service: &str, cluster_name: &str, parameters: &[&str]) -> Service {
  Service {
    service: service.to_string(),
    cluster_name: cluster_name.to_string(),
    openshift_version: "4.9".to_string(),
    operator_roles_prefix: Some(format!("{cluster_name}-abcd")),
    region: None,
    parameters: parameters.iter().map(|p| p.to_string()).collect(),
  }
}
