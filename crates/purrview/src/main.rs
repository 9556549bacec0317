// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purrview - browse the cat breed catalog from the terminal.
//!
//! This is the binary entry point for the Purrview client.

mod browse;
mod context;
mod session;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use purrview_config::model::PurrviewConfig;
use purrview_core::PurrviewError;

use crate::context::ClientContext;

/// Purrview - browse the cat breed catalog from the terminal.
#[derive(Parser, Debug)]
#[command(name = "purrview", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and store the session locally.
    Login {
        /// Account email address.
        email: String,
    },
    /// Create an account and log in with it.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value_t = 0)]
        age: u32,
    },
    /// Forget the stored session.
    Logout,
    /// Show the profile of the logged-in user.
    Profile {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show session state and API reachability.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// List breeds one page at a time.
    Breeds {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search breeds by name.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one breed with its image gallery.
    Breed {
        id: String,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Route the command stands for, checked by the route guard before it runs.
    fn route(&self) -> Option<&'static str> {
        match self {
            Commands::Login { .. } => Some("/login"),
            Commands::Register { .. } => Some("/register"),
            Commands::Profile { .. } => Some("/profile"),
            Commands::Breeds { .. } | Commands::Search { .. } | Commands::Breed { .. } => {
                Some("/cats")
            }
            Commands::Logout | Commands::Status { .. } => None,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let loaded = match &cli.config {
        Some(path) => purrview_config::load_and_validate_path(path),
        None => purrview_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            purrview_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.client.log_level);

    let Some(command) = cli.command else {
        println!("purrview: use --help for available commands");
        return;
    };

    if let Err(e) = run(command, config).await {
        eprintln!("purrview: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: PurrviewConfig) -> Result<(), PurrviewError> {
    let ctx = ClientContext::from_config(config)?;

    if let Some(route) = command.route() {
        if let Err(redirect) = ctx.enter(route) {
            eprintln!("purrview: {redirect}");
            std::process::exit(2);
        }
    }

    match command {
        Commands::Login { email } => session::run_login(&ctx, email).await,
        Commands::Register {
            name,
            email,
            phone,
            age,
        } => {
            let form = session::Registration {
                name,
                email,
                phone,
                age,
            };
            session::run_register(&ctx, form).await
        }
        Commands::Logout => {
            session::run_logout(&ctx);
            Ok(())
        }
        Commands::Profile { json } => session::run_profile(&ctx, json).await,
        Commands::Status { json, plain } => {
            status::run_status(&ctx, json, plain).await;
            Ok(())
        }
        Commands::Breeds { page, json } => browse::run_breeds(&ctx, page, json).await,
        Commands::Search { query, page, json } => {
            browse::run_search(&ctx, &query, page, json).await
        }
        Commands::Breed { id, json } => browse::run_breed(&ctx, &id, json).await,
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("purrview={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn catalog_commands_need_a_session() {
        let cli = Cli::parse_from(["purrview", "search", "beng", "--page", "2"]);
        let command = cli.command.unwrap();
        assert_eq!(command.route(), Some("/cats"));
        assert!(matches!(command, Commands::Search { page: 2, .. }));
    }

    #[test]
    fn login_is_anonymous_only_and_status_is_unguarded() {
        let login = Cli::parse_from(["purrview", "login", "ana@example.com"]);
        assert_eq!(login.command.unwrap().route(), Some("/login"));
        let status = Cli::parse_from(["purrview", "status", "--plain"]);
        assert_eq!(status.command.unwrap().route(), None);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["purrview", "breeds", "--config", "/tmp/p.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
    }

    #[test]
    #[serial]
    fn password_variable_does_not_break_config_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("purrview.toml");
        std::fs::write(&path, "[catalog]\npage_size = 12\n").unwrap();

        // SAFETY: serialized with every other test touching this variable.
        unsafe { std::env::set_var(session::PASSWORD_ENV_VAR, "correct-horse") };
        let result = purrview_config::load_and_validate_path(&path);
        unsafe { std::env::remove_var(session::PASSWORD_ENV_VAR) };

        assert_eq!(result.unwrap().catalog.page_size, 12);
    }
}
