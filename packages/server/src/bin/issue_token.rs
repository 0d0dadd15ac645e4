//! Mint a signed identity token for local development
//!
//! Stands in for the external identity provider: looks a user up by email
//! (or takes an explicit id and role) and prints a bearer token signed with
//! the server's `JWT_SECRET`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::common::Role;
use server_core::config::Config;
use server_core::domains::auth::JwtService;
use server_core::domains::users::User;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "issue_token")]
#[command(about = "Issue a development identity token")]
struct Cli {
    /// Token lifetime in hours
    #[arg(long, default_value_t = 24)]
    ttl_hours: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look the user up in the database by email
    Email { email: String },

    /// Sign claims for an explicit user id and role, no database access
    Raw {
        user_id: Uuid,
        /// HR, BUDDY, NEWCOMER, RELOCATING_EMPLOYEE or OFFICE_SEEKER
        role: Role,
        #[arg(long, default_value = "dev@example.com")]
        email: String,
    },
}

#[derive(Serialize)]
struct Issued {
    user_id: Uuid,
    email: String,
    role: Role,
    token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let jwt = JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())
        .with_ttl(chrono::Duration::hours(cli.ttl_hours));

    let (user_id, email, role) = match cli.command {
        Commands::Email { email } => {
            let pool = PgPool::connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;
            let Some(user) = User::find_by_email(&email, &pool).await? else {
                bail!("no user with email {}", email);
            };
            if !user.is_active {
                bail!("user {} is deactivated", email);
            }
            (user.id, user.email, user.role)
        }
        Commands::Raw {
            user_id,
            role,
            email,
        } => (user_id, email, role),
    };

    let token = jwt.create_token(user_id, email.clone(), role)?;
    let issued = Issued {
        user_id,
        email,
        role,
        token,
    };
    println!("{}", serde_json::to_string_pretty(&issued)?);

    Ok(())
}
