//! `docshim render` command implementation.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::Term;
use docshim_adapter::{Document, Output as Rendered, Renderer, component_map, to_html};
use docshim_config::{CliSettings, Config, OutputFormat};

use super::caller_components;
use crate::error::CliError;
use crate::output::Output;

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FormatArg {
    Html,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => Self::Html,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON document trees to render.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for rendered files (overrides config; default: stdout).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Path to configuration file (default: auto-discover docshim.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, two inputs map to the same
    /// output file, or any input cannot be read, parsed, rendered or written.
    /// Inputs before the failing one are already written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        self.run(&mut Term::stdout())
    }

    /// Render every input, writing to the output directory or to `stdout`.
    fn run(self, stdout: &mut impl Write) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            format: self.format.map(OutputFormat::from),
            pretty: self.pretty.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let renderer = Renderer::new(component_map(Some(caller_components(&config))));

        let Some(dir) = &config.output_resolved.dir else {
            for input in &self.inputs {
                let body = render_file(&renderer, input, &config)?;
                writeln!(stdout, "{body}")?;
            }
            stdout.flush()?;
            return Ok(());
        };

        let targets = output_paths(dir, &self.inputs, config.render.format)?;
        std::fs::create_dir_all(dir).map_err(|source| CliError::Write {
            path: dir.clone(),
            source,
        })?;
        for (input, target) in self.inputs.iter().zip(&targets) {
            let body = render_file(&renderer, input, &config)?;
            std::fs::write(target, body).map_err(|source| CliError::Write {
                path: target.clone(),
                source,
            })?;
            output.info(&format!("{} -> {}", input.display(), target.display()));
        }
        output.success(&format!("Rendered {} document(s)", self.inputs.len()));
        Ok(())
    }
}

/// Read, validate and render one input file.
fn render_file(renderer: &Renderer, input: &Path, config: &Config) -> Result<String, CliError> {
    let source = std::fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let document = Document::from_json(&source).map_err(|source| CliError::Document {
        path: input.to_path_buf(),
        source,
    })?;
    let rendered = renderer
        .render(&document)
        .map_err(|source| CliError::Render {
            path: input.to_path_buf(),
            source,
        })?;
    tracing::info!(input = %input.display(), nodes = rendered.len(), "Rendered document");

    serialize(&rendered, config.render.format, config.render.pretty)
}

fn serialize(
    rendered: &[Rendered],
    format: OutputFormat,
    pretty: bool,
) -> Result<String, CliError> {
    let body = match format {
        OutputFormat::Html => to_html(rendered),
        OutputFormat::Json if pretty => serde_json::to_string_pretty(rendered)?,
        OutputFormat::Json => serde_json::to_string(rendered)?,
    };
    Ok(body)
}

/// `<dir>/<input stem>.<ext>`
fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "document".into(), |s| s.to_string_lossy());
    dir.join(format!("{stem}.{}", format.extension()))
}

/// Output path for each input, rejecting inputs that would overwrite each other.
fn output_paths(
    dir: &Path,
    inputs: &[PathBuf],
    format: OutputFormat,
) -> Result<Vec<PathBuf>, CliError> {
    let mut seen: BTreeMap<PathBuf, &Path> = BTreeMap::new();
    let mut targets = Vec::with_capacity(inputs.len());
    for input in inputs {
        let target = output_path(dir, input, format);
        if let Some(first) = seen.insert(target.clone(), input) {
            return Err(CliError::OutputCollision {
                target,
                first: first.to_path_buf(),
                second: input.clone(),
            });
        }
        targets.push(target);
    }
    Ok(targets)
}
