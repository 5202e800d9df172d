//! Command-line arguments and command dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dailybook_application::{ApiError, RequestOptions};
use dailybook_domain::{
    HttpMethod, LoginRequest, PageRequest, QueryParam, RegisterRequest, ResponseExpectation,
};
use dailybook_infrastructure::DailybookClient;
use serde_json::Value;

/// Dailybook API client.
#[derive(Debug, Parser)]
#[command(name = "dailybook", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./dailybook.toml if present)
    #[arg(long, global = true, env = "DAILYBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        /// Account username
        #[arg(long)]
        username: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "DAILYBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        /// Account username
        #[arg(long)]
        username: String,
        /// Account password
        #[arg(long, env = "DAILYBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the local session
    Logout,
    /// Print the logged-in username
    Whoami,
    /// Print the session state
    Status,
    /// List entries from followed authors
    Feed {
        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// List your own entries
    Entries,
    /// List notifications
    Notifications {
        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Send an arbitrary request to an API path
    Get {
        /// Path below the base URL, e.g. /api/entries/public
        path: String,
        /// Query parameter as key=value, repeatable
        #[arg(long = "query", short = 'q')]
        query: Vec<QueryParam>,
        /// Do not send credentials
        #[arg(long)]
        no_auth: bool,
        /// Print the body as text instead of JSON
        #[arg(long)]
        text: bool,
    },
}

/// Runs one command against the API.
///
/// # Errors
///
/// Returns the first error from the API or from local session storage.
pub async fn run(
    client: &DailybookClient,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let message = client
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                })
                .await?;
            println!("{message}");
        }
        Command::Login { username, password } => {
            client.login(&LoginRequest::new(username, password)).await?;
            let name = client.current_username().await.unwrap_or_default();
            println!("Logged in as {name}");
        }
        Command::Logout => {
            client.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match client.current_username().await {
            Some(name) => println!("{name}"),
            None => println!("Not authenticated"),
        },
        Command::Status => println!("{}", client.token_status().await.display_message()),
        Command::Feed { page } => {
            print_json(
                &client
                    .feed_entries(PageRequest::new(page, PageRequest::DEFAULT_SIZE))
                    .await?,
            )?;
        }
        Command::Entries => print_json(&client.my_entries().await?)?,
        Command::Notifications { page } => {
            print_json(
                &client
                    .notifications(PageRequest::new(page, PageRequest::DEFAULT_SIZE))
                    .await?,
            )?;
        }
        Command::Get {
            path,
            query,
            no_auth,
            text,
        } => {
            let mut options =
                RequestOptions::method(HttpMethod::Get).query(query.into_iter().collect());
            if no_auth {
                options = options.anonymous();
            }
            if text {
                let body = client
                    .pipeline()
                    .request_text(&path, options.expect(ResponseExpectation::Text))
                    .await?;
                println!("{body}");
            } else {
                let body: Value = client.pipeline().request_json(&path, options).await?;
                print_json(&body)?;
            }
        }
    }
    Ok(())
}

/// Returns a follow-up suggestion for a failed command, if one applies.
#[must_use]
pub fn hint(err: &(dyn std::error::Error + 'static)) -> Option<&'static str> {
    err.downcast_ref::<ApiError>()
        .filter(|err| err.is_auth_rejection())
        .map(|_| "Run `dailybook login` to sign in again.")
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
