//! Bootstrap an administrator account
//!
//! Creates the account, or promotes and reactivates it when the email is
//! already registered.

use anyhow::Context;
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use clap::Parser;
use rand::rngs::OsRng;
use sqlx::postgres::PgPoolOptions;

use mix_production_server::{config::AppConfig, models::user::Role, repository::Repository};

#[derive(Parser)]
#[command(name = "create-admin")]
#[command(about = "Create or promote an administrator account")]
struct Args {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("mix_production_server={}", config.logging.level))
        .init();

    if args.password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters");
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repository = Repository::new(pool);
    let email = args.email.trim().to_lowercase();

    let user = match repository.users.find_by_email(&email).await? {
        Some(existing) => {
            tracing::info!(user_id = existing.id, "Promoting existing account");
            repository.users.promote_to_admin(existing.id).await?
        }
        None => {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(args.password.as_bytes(), &salt)
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
                .to_string();
            repository
                .users
                .create(args.name.trim(), &email, &hash, Role::Admin)
                .await?
        }
    };

    println!("Administrator {} <{}> ready (id {})", user.name, user.email, user.id);
    Ok(())
}
