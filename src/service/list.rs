use anyhow::{Context, Result};
use tabled::{
  Table,
  settings::{Padding, Style},
};

use crate::{clients::OcmClients, ocm::ManagedService};

/// Maximum number of managed services fetched in a single request
pub const PAGE_SIZE: i32 = 1000;

/// Fetch up to `PAGE_SIZE` managed services
pub async fn list_services<O: OcmClients>(ocm: &O) -> Result<Vec<ManagedService>> {
  ocm
    .list_managed_services(PAGE_SIZE)
    .await
    .context("Failed to retrieve list of managed services")
}

/// Render the services as a borderless table of ID, service name, and state
///
/// Columns are separated by two spaces and the header row is always present
pub fn to_stdout_table(services: &[ManagedService]) -> String {
  let mut table = Table::new(services);
  table.with(Style::empty()).with(Padding::new(0, 2, 0, 0));

  table
    .to_string()
    .lines()
    .map(str::trim_end)
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn service(id: &str, name: &str, state: &str) -> ManagedService {
    ManagedService {
      id: id.to_string(),
      service: name.to_string(),
      service_state: state.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn empty_list_renders_header_only() {
    let output = to_stdout_table(&[]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["ID", "SERVICE", "STATE"]);
  }

  #[test]
  fn rows_follow_header() {
    let output = to_stdout_table(&[
      service("1ab2", "managed-api-service", "ready"),
      service("3cd4", "rhoam", "installing"),
    ]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
      lines[1].split_whitespace().collect::<Vec<_>>(),
      vec!["1ab2", "managed-api-service", "ready"]
    );
    assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["3cd4", "rhoam", "installing"]);
  }

  #[test]
  fn columns_are_aligned() {
    let output = to_stdout_table(&[service("1ab2", "managed-api-service", "ready")]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0].find("SERVICE"), lines[1].find("managed-api-service"));
    assert_eq!(lines[0].find("STATE"), lines[1].find("ready"));
  }
}
