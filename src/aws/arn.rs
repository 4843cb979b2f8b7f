use std::{fmt, str::FromStr};

use anyhow::{Result, bail};

/// An Amazon Resource Name split into its components
///
/// `arn:<partition>:<service>:<region>:<account-id>:<resource>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arn {
  pub partition: String,
  pub service: String,
  pub region: String,
  pub account_id: String,
  pub resource: String,
}

impl Arn {
  /// Returns the IAM role name from a `role/<path/>name` resource
  ///
  /// Anything after the first `/` is kept, matching how role ARNs are
  /// written for roles created without a path
  pub fn role_name(&self) -> Result<&str> {
    match self.resource.split_once('/') {
      Some((kind, name)) if kind == "role" && !name.is_empty() => Ok(name),
      _ => bail!("ARN '{self}' does not reference an IAM role"),
    }
  }
}

impl FromStr for Arn {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    let parts: Vec<&str> = s.splitn(6, ':').collect();
    if parts.len() != 6 || parts[0] != "arn" {
      bail!("Invalid ARN '{s}'");
    }

    Ok(Self {
      partition: parts[1].to_string(),
      service: parts[2].to_string(),
      region: parts[3].to_string(),
      account_id: parts[4].to_string(),
      resource: parts[5].to_string(),
    })
  }
}

impl fmt::Display for Arn {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "arn:{}:{}:{}:{}:{}",
      self.partition, self.service, self.region, self.account_id, self.resource
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_role_arn() {
    let arn: Arn = "arn:aws:iam::123456789012:role/ManagedOpenShift-Installer-Role".parse().unwrap();
    assert_eq!(arn.partition, "aws");
    assert_eq!(arn.service, "iam");
    assert_eq!(arn.region, "");
    assert_eq!(arn.account_id, "123456789012");
    assert_eq!(arn.role_name().unwrap(), "ManagedOpenShift-Installer-Role");
  }

  #[test]
  fn parse_assumed_role_keeps_session() {
    let arn: Arn = "arn:aws:sts::123456789012:assumed-role/admin/session".parse().unwrap();
    assert_eq!(arn.resource, "assumed-role/admin/session");
    assert!(arn.role_name().is_err());
  }

  #[test]
  fn parse_invalid_arn() {
    assert!("not-an-arn".parse::<Arn>().is_err());
    assert!("arn:aws:iam".parse::<Arn>().is_err());
  }

  #[test]
  fn display_round_trips() {
    let raw = "arn:aws-us-gov:iam::123456789012:role/prefix-Worker-Role";
    let arn: Arn = raw.parse().unwrap();
    assert_eq!(arn.to_string(), raw);
  }
}
