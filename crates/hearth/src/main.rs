use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{error, info};

use hearth_core::helpers::Helpers;
use hearth_core::kernel::constants::{APP_NAME, APP_VERSION};
use hearth_core::services::{Cipher, Encrypter};
use hearth_core::{Application, Kernel, KernelError};

/// Hearth: boot an application directory and inspect its services
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Application base path
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Simple ping command for testing
    #[arg(long)]
    ping: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Boot the application and report how long it took
    Boot,
    /// List service ids and aliases known to the container
    Services,
    /// Read configuration values
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Read environment variables
    Env {
        #[command(subcommand)]
        command: EnvCommand,
    },
    /// Print the URL of a named route
    Route {
        /// Route name
        name: String,
        /// Route parameters as key=value
        params: Vec<String>,
        /// Prefix the application URL
        #[arg(long)]
        absolute: bool,
    },
    /// Manage encryption keys
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print a value as JSON
    Get {
        /// Dotted key, e.g. `database.default`
        key: String,
    },
}

#[derive(Subcommand, Debug)]
enum EnvCommand {
    /// Print a variable
    Get {
        key: String,
    },
}

#[derive(Subcommand, Debug)]
enum KeyCommand {
    /// Print a new random key, hex encoded, for APP_KEY
    Generate {
        /// Cipher the key is for
        #[arg(long, default_value = "AES-256-GCM")]
        cipher: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    // Key generation needs no application
    if let Some(Commands::Key { command: KeyCommand::Generate { cipher } }) = &args.command {
        return match cipher.parse::<Cipher>() {
            Ok(cipher) => {
                println!("{}", Encrypter::generate_key_hex(cipher));
                ExitCode::SUCCESS
            }
            Err(e) => fail(e),
        };
    }

    let mut kernel = Kernel::builder(&args.base_path)
        .with_default_providers()
        .install_global(true)
        .build();
    if let Err(e) = kernel.boot().await {
        eprintln!("Failed to boot application: {}", e);
        return ExitCode::FAILURE;
    }
    if !kernel.is_booted() {
        println!("Installation in progress, nothing booted.");
        return ExitCode::SUCCESS;
    }
    let app = match kernel.app() {
        Ok(app) => app,
        Err(e) => return fail(e),
    };

    let result = match args.command {
        None | Some(Commands::Boot) => {
            let elapsed = kernel.elapsed().unwrap_or_default();
            println!("{} v{} booted in {:?}", APP_NAME, APP_VERSION, elapsed);
            println!("Base path: {}", app.base_path().display());
            println!("Public path: {}", app.public_path().display());
            Ok(())
        }
        Some(Commands::Services) => list_services(&app),
        Some(Commands::Config { command: ConfigCommand::Get { key } }) => config_get(&app, &key),
        Some(Commands::Env { command: EnvCommand::Get { key } }) => match app.environment().get(&key) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => Err(KernelError::Other(format!("Environment variable '{}' is not set", key))),
        },
        Some(Commands::Route { name, params, absolute }) => route_url(&app, &name, &params, absolute),
        Some(Commands::Key { .. }) => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn fail(e: KernelError) -> ExitCode {
    error!("Command failed: {}", e);
    eprintln!("Error: {}", e);
    ExitCode::FAILURE
}

fn list_services(app: &Arc<Application>) -> Result<(), KernelError> {
    let container = app.container();
    let aliases = container.aliases();
    println!("Services:");
    for id in container.ids() {
        let names = aliases.aliases_for(&id);
        if names.is_empty() {
            println!("  - {}", id);
        } else {
            println!("  - {} ({})", id, names.join(", "));
        }
    }
    println!("Providers:");
    for provider in container.providers() {
        println!("  - {} [{}]", provider.name(), provider.kind());
    }
    Ok(())
}

fn config_get(app: &Arc<Application>, key: &str) -> Result<(), KernelError> {
    let value = app
        .config()?
        .get(key)
        .ok_or_else(|| KernelError::Other(format!("Config key '{}' is not set", key)))?;
    match value.as_str() {
        Some(s) => println!("{}", s),
        None => println!("{}", value),
    }
    Ok(())
}

fn route_url(app: &Arc<Application>, name: &str, params: &[String], absolute: bool) -> Result<(), KernelError> {
    let mut parsed = BTreeMap::new();
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| KernelError::Other(format!("Route parameter '{}' is not key=value", param)))?;
        parsed.insert(key.to_string(), value.to_string());
    }
    let url = app.route(name, &parsed, absolute)?;
    info!("Resolved route '{}'", name);
    println!("{}", url);
    Ok(())
}
