use std::{fs::File, io::prelude::*};

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{ocm::ManagedService, service};

#[derive(Clone, Copy, Debug, Default, ValueEnum, Serialize, Deserialize)]
pub enum Format {
  /// JSON format used for logging or writing to a *.json file
  Json,
  /// Text format used for writing to stdout
  #[default]
  Text,
}

/// Render the managed services in the requested format
pub fn render(services: &[ManagedService], format: &Format) -> Result<String> {
  let output = match format {
    Format::Json => serde_json::to_string_pretty(services)?,
    Format::Text => service::list::to_stdout_table(services),
  };

  Ok(output)
}

pub(crate) fn output(services: &[ManagedService], format: &Format, filename: &Option<String>) -> Result<()> {
  let output = render(services, format)?;

  match filename {
    Some(filename) => {
      let mut file = File::create(filename)?;
      file.write_all(output.as_bytes())?;
    }
    None => {
      println!("{output}");
    }
  }

  Ok(())
}
