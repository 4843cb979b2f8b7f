use anyhow::{Context, Result, bail};
use aws_sdk_iam::{Client as IamClient, types::Role};
use aws_sdk_sts::Client as StsClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  aws::{
    arn::Arn,
    roles::{self, TAG_OPENSHIFT_VERSION, TAG_ROLE_TYPE},
  },
  version,
};

/// Identity of the AWS credentials in use
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
  pub account_id: String,
  pub arn: String,
  /// Whether the caller is using temporary credentials from an assumed role
  pub is_sts: bool,
}

/// Get the identity of the caller from STS
pub async fn get_creator(client: &StsClient) -> Result<Creator> {
  let identity = client.get_caller_identity().send().await?;

  let account_id = identity.account().context("Caller identity is missing the account ID")?;
  let arn = identity.arn().context("Caller identity is missing the ARN")?;
  let parsed: Arn = arn.parse()?;

  Ok(Creator {
    account_id: account_id.to_string(),
    arn: arn.to_string(),
    is_sts: parsed.resource.starts_with("assumed-role/"),
  })
}

async fn list_roles(client: &IamClient) -> Result<Vec<Role>> {
  let mut roles = Vec::new();
  let mut marker = None;

  loop {
    let output = client.list_roles().set_marker(marker).send().await?;
    roles.extend(output.roles().iter().cloned());

    if !output.is_truncated() {
      break;
    }
    marker = output.marker().map(str::to_string);
  }

  Ok(roles)
}

/// Returns true when the role's tags mark it as the given role type and its
/// policies are recent enough for the given OpenShift version
///
/// Roles without a version tag are considered compatible
pub(crate) fn role_matches(tags: &[(&str, &str)], role_type: &str, version: &str) -> Result<bool> {
  let mut is_tagged = false;

  for (key, value) in tags {
    match *key {
      TAG_ROLE_TYPE => {
        if *value == role_type {
          is_tagged = true;
        }
      }
      TAG_OPENSHIFT_VERSION => {
        if !version::is_supported(value, version)? {
          return Ok(false);
        }
      }
      _ => {}
    }
  }

  Ok(is_tagged)
}

/// Find the ARNs of all account roles of the given type that support the OpenShift version
pub async fn find_role_arns(client: &IamClient, role_type: &str, version: &str) -> Result<Vec<String>> {
  let Some(account_role) = roles::account_role(role_type) else {
    bail!("Unknown account role type '{role_type}'");
  };

  if let Some(min_version) = account_role.min_version {
    if !version::is_supported(version, min_version)? {
      debug!("{} role requires OpenShift {min_version} or later", account_role.name);
      return Ok(Vec::new());
    }
  }

  let mut arns = Vec::new();
  for role in list_roles(client).await? {
    if !role.role_name().contains(account_role.name) {
      continue;
    }

    let output = client.list_role_tags().role_name(role.role_name()).send().await?;
    let tags: Vec<(&str, &str)> = output.tags().iter().map(|tag| (tag.key(), tag.value())).collect();

    if role_matches(&tags, role_type, version)
      .with_context(|| format!("Invalid version tag on role {}", role.role_name()))?
    {
      arns.push(role.arn().to_string());
    }
  }

  Ok(arns)
}

/// Ensure no IAM role with the given name exists yet
pub async fn validate_role_name_available(client: &IamClient, name: &str) -> Result<()> {
  match client.get_role().role_name(name).send().await {
    Ok(_) => bail!("A role named '{name}' already exists. Please make sure to select a unique prefix"),
    Err(err) => {
      let err = err.into_service_error();
      if err.is_no_such_entity_exception() {
        return Ok(());
      }

      Err(err).with_context(|| format!("Failed to check availability of role '{name}'"))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_matches_type_tag() {
    let tags = [(TAG_ROLE_TYPE, "installer")];
    assert!(role_matches(&tags, "installer", "4.9").unwrap());
    assert!(!role_matches(&tags, "support", "4.9").unwrap());
  }

  #[test]
  fn role_without_type_tag_does_not_match() {
    let tags = [(TAG_OPENSHIFT_VERSION, "4.10"), ("owner", "team-a")];
    assert!(!role_matches(&tags, "installer", "4.9").unwrap());
  }

  #[test]
  fn role_with_older_policies_is_skipped() {
    let tags = [(TAG_ROLE_TYPE, "installer"), (TAG_OPENSHIFT_VERSION, "4.8")];
    assert!(!role_matches(&tags, "installer", "4.9").unwrap());
  }

  #[test]
  fn role_with_newer_policies_matches() {
    let tags = [(TAG_OPENSHIFT_VERSION, "4.10"), (TAG_ROLE_TYPE, "installer")];
    assert!(role_matches(&tags, "installer", "4.9").unwrap());
  }

  #[test]
  fn role_with_invalid_version_tag_errors() {
    let tags = [(TAG_ROLE_TYPE, "installer"), (TAG_OPENSHIFT_VERSION, "latest")];
    assert!(role_matches(&tags, "installer", "4.9").is_err());
  }
}
