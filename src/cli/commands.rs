//! Command dispatch: one function per subcommand.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::ConversionRequest;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Format, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Convert {
            from,
            to,
            input,
            output,
        }) => _convert(
            &container(cli)?,
            ConversionRequest {
                from: *from,
                to: *to,
            },
            input.as_deref(),
            output.as_deref(),
        ),
        Some(Commands::Tree { input }) => _tree(&container(cli)?, input.as_deref()),
        Some(Commands::Detect { input }) => _detect(&container(cli)?, input.as_deref()),
        Some(Commands::Formats) => _formats(&container(cli)?),
        Some(Commands::Config { command }) => _config(command, &project_dir(cli)?),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e).into()),
    }
}

/// Services configured from the layered settings of the project directory.
fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(Some(dir.as_path()))?;
    Ok(ServiceContainer::new(settings)?)
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e).into()),
    }
}

/// Read the selection from a file, or from stdin when no file is given.
fn read_input(container: &ServiceContainer, input: Option<&Path>) -> CliResult<String> {
    match input {
        Some(path) if !container.fs.exists(path) => Err(CliError::NoInput(path.to_path_buf())),
        Some(path) => container
            .fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e).into()),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| InfraError::io("read stdin", e))?;
            Ok(text)
        }
    }
}

#[instrument(skip(container))]
fn _convert(
    container: &ServiceContainer,
    request: ConversionRequest,
    input: Option<&Path>,
    output: Option<&Path>,
) -> CliResult<()> {
    let text = read_input(container, input)?;
    let conversion = container
        .conversion
        .convert(&text, request)
        .ok_or(CliError::NoOutput)?;
    debug!(
        "converted {} -> {} ({} bytes)",
        conversion.from,
        conversion.to,
        conversion.output.len()
    );

    match output {
        Some(path) => {
            container
                .fs
                .write(path, &conversion.output)
                .map_err(|e| CliError::CantCreate {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => print!("{}", conversion.output),
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, input: Option<&Path>) -> CliResult<()> {
    let text = read_input(container, input)?;
    let (arena, report) = container.conversion.parse_tree(&text)?;
    debug!("tree of {} nodes, overrun: {:?}", arena.len(), report.overrun);
    output::info(&arena.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn _detect(container: &ServiceContainer, input: Option<&Path>) -> CliResult<()> {
    let text = read_input(container, input)?;
    let format = Format::detect(&text).ok_or(ApplicationError::NoSelection)?;
    output::info(&format);
    Ok(())
}

fn _formats(container: &ServiceContainer) -> CliResult<()> {
    output::header(&"Supported conversions:");
    for (from, to) in container.conversion.table().pairs() {
        let marker = if from.default_target() == Some(to) {
            " (default)"
        } else {
            ""
        };
        output::detail(&format!("{} -> {}{}", from, to, marker));
    }
    Ok(())
}

fn _config(command: &ConfigCommands, dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(dir))?;
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let describe = |path: &Path| {
                let state = if path.exists() { "found" } else { "not found" };
                format!("{} ({})", path.display(), state)
            };
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", describe(&path))),
                None => output::info(&"global: unavailable"),
            }
            output::info(&format!("local:  {}", describe(&local_config_path(dir))));
        }
    }
    Ok(())
}
