use std::sync::Mutex;

use anyhow::{Result, bail};

use rosa_services::clients::OcmClients;
use rosa_services::ocm::{AddOn, CreateManagedServiceArgs, ManagedService};

/// Mock OCM client for testing. The create request and list sizes are recorded.
#[derive(Default)]
pub struct MockOcmClients {
  /// Add-on returned by the lookup; `None` makes the lookup fail
  pub addon: Option<AddOn>,
  pub services: Vec<ManagedService>,
  pub fail_create: bool,
  pub created: Mutex<Option<CreateManagedServiceArgs>>,
  pub list_sizes: Mutex<Vec<i32>>,
}

impl MockOcmClients {
  pub fn created_request(&self) -> Option<CreateManagedServiceArgs> {
    self.created.lock().unwrap().clone()
  }
}

impl OcmClients for MockOcmClients {
  async fn get_addon(&self, id: &str) -> Result<AddOn> {
    match &self.addon {
      Some(addon) => Ok(addon.clone()),
      None => bail!("Add-on '{id}' not found"),
    }
  }

  async fn create_managed_service(&self, args: &CreateManagedServiceArgs) -> Result<ManagedService> {
    if self.fail_create {
      bail!("mock OCM error");
    }

    *self.created.lock().unwrap() = Some(args.clone());
    Ok(ManagedService {
      id: "1ab2c3".to_string(),
      href: "/api/service_mgmt/v1/services/1ab2c3".to_string(),
      service: args.service_name.clone(),
      service_state: "installing".to_string(),
      ..Default::default()
    })
  }

  async fn list_managed_services(&self, size: i32) -> Result<Vec<ManagedService>> {
    self.list_sizes.lock().unwrap().push(size);
    Ok(self.services.iter().take(size as usize).cloned().collect())
  }
}
