//! `docshim components` command implementation.

use std::path::PathBuf;

use clap::Args;
use docshim_adapter::{Component, component_map};
use docshim_config::Config;

use super::caller_components;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the components command.
#[derive(Args)]
pub(crate) struct ComponentsArgs {
    /// Path to configuration file (default: auto-discover docshim.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ComponentsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let map = component_map(Some(caller_components(&config)));

        output.highlight(&format!("{:<16} {:<10} implementation", "name", "layer"));
        for (name, component, layer) in map.iter() {
            output.print(&format!("{name:<16} {layer:<10} {}", describe(component)))?;
        }
        Ok(())
    }
}

fn describe(component: &Component) -> String {
    match component {
        Component::Host => "host element".to_owned(),
        Component::Native(native) => format!("framework {native:?}"),
        Component::Compat(kind) => format!("compat adapter for <{kind}>"),
        Component::Custom(_) => "custom".to_owned(),
    }
}
