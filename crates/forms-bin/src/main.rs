mod check;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use authforms_common::Role;
use authforms_lib::{
    auth::{hash_password_secure, CsrfToken},
    config::Settings,
    storage::{FlatFileUserStore, UserStore},
    AppState,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::check::FormKind;

#[derive(Parser)]
#[command(name = "authforms", about = "Validate account form submissions")]
struct Cli {
    /// Settings file (toml, yaml or json); defaults to ./config.*
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a JSON submission and print per-field errors
    Check {
        #[arg(value_enum)]
        form: FormKind,
        /// Submission file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// JSON array of stored users
        #[arg(long, default_value = "data/users.json")]
        users: PathBuf,
        /// Name of the account the form acts on
        #[arg(long)]
        as_user: Option<String>,
        /// Role offered by a role-change form, repeatable
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Token issued when the form was rendered
        #[arg(long)]
        csrf: Option<String>,
    },
    /// Print a form's fields and submit label
    Fields {
        #[arg(value_enum)]
        form: FormKind,
    },
    /// Read a password on stdin and print its hash for the users file
    Hash,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("loading settings")?;

    // Initialize tracing; RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check {
            form,
            input,
            users,
            as_user,
            roles,
            csrf,
        } => {
            let submission = read_input(input.as_ref())?;
            let store = FlatFileUserStore::new(&users)?;
            let state = AppState::new(store, settings);

            let user = match &as_user {
                Some(name) => Some(
                    state
                        .store
                        .find_by_name(name)
                        .await?
                        .with_context(|| format!("no user named '{name}' in {}", users.display()))?,
                ),
                None => None,
            };
            let token = csrf.map(CsrfToken::from_issued);
            let roles: Vec<Role> = roles.into_iter().map(Role::new).collect();

            let mut ctx = state.context();
            if let Some(user) = &user {
                ctx = ctx.with_user(user);
            }
            if let Some(token) = &token {
                ctx = ctx.with_csrf(token);
            }

            let report = form.check(submission, &ctx, &roles).await?;
            tracing::info!(form = report.form, valid = report.valid, "checked submission");
            println!("{}", serde_json::to_string_pretty(&report)?);

            Ok(if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Command::Fields { form } => {
            println!("{}", serde_json::to_string_pretty(&form.layout())?);
            Ok(ExitCode::SUCCESS)
        },
        Command::Hash => {
            let mut plain = String::new();
            std::io::stdin().read_line(&mut plain)?;
            let len = plain.trim_end_matches(['\r', '\n']).len();
            plain.truncate(len);
            println!("{}", hash_password_secure(&mut plain)?);
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<serde_json::Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        },
    };
    serde_json::from_str(&raw).context("submission is not valid JSON")
}
