// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use galley::cli::{Cli, Commands};
use galley::commands::{SettingsArgs, cmd_cook, cmd_info, cmd_validate};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cook {
            recipe,
            output,
            deps_root,
            os,
            arch,
            compiler,
            build_type,
            options,
            cmake,
            generator,
            jobs,
            keep_builddir,
        } => cmd_cook(
            &recipe,
            output,
            deps_root,
            &SettingsArgs {
                os,
                arch,
                compiler,
                build_type,
            },
            &options,
            cmake,
            generator,
            jobs,
            keep_builddir,
        ),
        Commands::Info {
            recipe,
            os,
            arch,
            build_type,
        } => cmd_info(
            &recipe,
            &SettingsArgs {
                os,
                arch,
                compiler: None,
                build_type,
            },
        ),
        Commands::Validate { recipe } => cmd_validate(&recipe),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
