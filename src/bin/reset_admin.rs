//! Creates or resets one recruiter account with the given credentials.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use candidate_portal::{
    config::DatabaseConfig,
    database::pool::{create_pool, run_migrations},
    services::admin_service::{
        AdminService, ResetOutcome, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = DatabaseConfig::from_env()?;
    let pool = match create_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Could not connect to the database: {}", e);
            std::process::exit(1);
        }
    };
    run_migrations(&pool).await?;

    println!("Quick Admin Reset");
    println!("{}", "=".repeat(20));
    let email = prompt_or(
        &format!("Enter admin email (default: {}): ", DEFAULT_ADMIN_EMAIL),
        DEFAULT_ADMIN_EMAIL,
    )?;
    let password = prompt_or(
        &format!("Enter admin password (default: {}): ", DEFAULT_ADMIN_PASSWORD),
        DEFAULT_ADMIN_PASSWORD,
    )?;

    match AdminService::new(pool).quick_reset(&email, &password).await {
        Ok(outcome) => {
            match outcome {
                ResetOutcome::Updated => println!("Updated existing user: {}", email),
                ResetOutcome::Created => println!("Created new admin user: {}", email),
            }
            println!();
            println!("Admin user configured successfully!");
            println!("Email: {}", email);
            println!("Password: {}", masked(&password));
        }
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

fn masked(password: &str) -> String {
    "*".repeat(password.chars().count())
}

fn prompt_or(message: &str, default: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let value = line.trim();
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    })
}
