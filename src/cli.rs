use anstyle::{AnsiColor, Color, Style};
use clap::{Args, Parser, Subcommand, builder::Styles};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use serde::{Deserialize, Serialize};

use crate::{output, version};

fn styles() -> Styles {
  Styles::styled()
    .header(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
    .usage(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
    .literal(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Green))))
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
}

#[derive(Parser, Debug)]
#[command(author, about, version)]
#[command(propagate_version = true, styles = styles())]
pub struct Cli {
  #[command(subcommand)]
  pub commands: Commands,

  /// Path to the configuration file, defaults to `.rosa.yaml` in the current directory
  #[arg(long, global = true)]
  pub config: Option<String>,

  #[clap(flatten)]
  pub verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  #[command(arg_required_else_help = true)]
  Create(Create),
  #[command(arg_required_else_help = true)]
  List(List),
}

/// Create a resource
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Create {
  #[command(subcommand)]
  pub command: CreateCommands,
}

#[derive(Debug, Subcommand, Serialize, Deserialize)]
pub enum CreateCommands {
  #[command(arg_required_else_help = true)]
  Service(Service),
}

/// Creates a managed service.
///
/// Managed Services are OpenShift clusters that provide a specific function.
/// Add-on parameters are passed after the named flags as --<parameter-id>=<value>.
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct Service {
  /// Name of the service
  #[arg(long)]
  pub service: String,

  /// Name of the cluster
  #[arg(long = "clusterName", alias = "cluster-name")]
  pub cluster_name: String,

  /// OpenShift version used to select account roles and operator roles
  #[arg(long, default_value = version::DEFAULT)]
  pub openshift_version: String,

  /// Prefix of the operator roles, defaults to the cluster name followed by a random label
  #[arg(long)]
  pub operator_roles_prefix: Option<String>,

  /// The AWS region where the service is provisioned
  #[arg(short, long)]
  pub region: Option<String>,

  /// Add-on parameters, passed as --<parameter-id>=<value>
  #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ADDON_PARAMETERS")]
  pub parameters: Vec<String>,
}

/// List all resources of a specific type
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct List {
  #[command(subcommand)]
  pub command: ListCommands,
}

#[derive(Debug, Subcommand, Serialize, Deserialize)]
pub enum ListCommands {
  Services(Services),
}

/// List managed services
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct Services {
  #[arg(short, long, value_enum, default_value_t)]
  pub format: output::Format,

  /// Write to file instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,
}
