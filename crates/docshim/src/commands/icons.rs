//! `docshim icons` command implementation.

use docshim_icons::IconTable;

use crate::error::CliError;
use crate::output::Output;

/// List every known icon name and the asset it renders as.
pub(crate) fn execute() -> Result<(), CliError> {
    let output = Output::new();
    output.highlight(&format!("{:<12} asset", "name"));
    for (name, handle) in IconTable::global().iter() {
        output.print(&format!("{name:<12} {handle}"))?;
    }
    Ok(())
}
