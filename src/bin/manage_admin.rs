//! Interactive maintenance of recruiter accounts.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use candidate_portal::{
    config::DatabaseConfig,
    database::pool::{create_pool, run_migrations},
    error::Error,
    services::admin_service::{AdminService, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
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
    let admins = AdminService::new(pool);

    loop {
        println!();
        println!("Recruitment Portal - Admin Management");
        println!("{}", "=".repeat(40));
        println!("1. Create new admin user");
        println!("2. Update admin password");
        println!("3. List all admin users");
        println!("4. Delete admin user");
        println!("5. Reset to default admin");
        println!("6. Exit");
        println!();

        let Some(choice) = prompt("Select an option (1-6): ")? else {
            break;
        };
        match choice.as_str() {
            "1" => create_admin(&admins).await?,
            "2" => {
                let email = prompt_line("Enter admin email to update: ")?;
                update_admin(&admins, &email).await?;
            }
            "3" => list_admins(&admins).await?,
            "4" => delete_admin(&admins).await?,
            "5" => reset_default_admin(&admins).await?,
            "6" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid option! Please select 1-6."),
        }
    }

    Ok(())
}

async fn create_admin(admins: &AdminService) -> Result<()> {
    let email = prompt_line("Enter admin email: ")?;
    if email.is_empty() {
        println!("Email cannot be empty!");
        return Ok(());
    }
    if admins.find_user(&email).await?.is_some() {
        println!("User with email {} already exists!", email);
        if confirm("Do you want to update this user? (y/N): ")? {
            update_admin(admins, &email).await?;
        }
        return Ok(());
    }

    let Some(password) = read_new_password("Enter password: ", "Confirm password: ")? else {
        return Ok(());
    };
    match admins.create_admin(&email, &password).await {
        Ok(_) => {
            println!("Admin user created successfully!");
            println!("Email: {}", email);
            println!("Password: {}", "*".repeat(password.chars().count()));
        }
        Err(e) => println!("Error creating admin user: {}", user_message(e)),
    }
    Ok(())
}

async fn update_admin(admins: &AdminService, email: &str) -> Result<()> {
    let Some(password) = read_new_password("Enter new password: ", "Confirm new password: ")?
    else {
        return Ok(());
    };
    match admins.update_admin_password(email, &password).await {
        Ok(()) => println!("Password updated successfully for {}!", email),
        Err(e) => println!("{}", user_message(e)),
    }
    Ok(())
}

async fn list_admins(admins: &AdminService) -> Result<()> {
    let users = admins.list_admins().await?;
    if users.is_empty() {
        println!("No admin users found!");
        return Ok(());
    }
    for (i, user) in users.iter().enumerate() {
        println!("{}. {} (ID: {})", i + 1, user.email, user.id);
        println!("   Created: {}", user.created_at.format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}

async fn delete_admin(admins: &AdminService) -> Result<()> {
    let email = prompt_line("Enter admin email to delete: ")?;
    if !confirm(&format!("Are you sure you want to delete {}? (y/N): ", email))? {
        println!("Deletion cancelled!");
        return Ok(());
    }
    match admins.delete_admin(&email).await {
        Ok(()) => println!("Admin user {} deleted successfully!", email),
        Err(e) => println!("{}", user_message(e)),
    }
    Ok(())
}

async fn reset_default_admin(admins: &AdminService) -> Result<()> {
    let question = format!(
        "This will create/reset {} with password '{}'. Continue? (y/N): ",
        DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD
    );
    if !confirm(&question)? {
        println!("Reset cancelled!");
        return Ok(());
    }
    admins.reset_default_admin().await?;
    println!("Default admin reset successfully!");
    println!("Email: {}", DEFAULT_ADMIN_EMAIL);
    println!("Password: {}", DEFAULT_ADMIN_PASSWORD);
    println!("Please change this password after login!");
    Ok(())
}

fn read_new_password(first: &str, second: &str) -> Result<Option<String>> {
    let password = prompt_line(first)?;
    let confirmation = prompt_line(second)?;
    if password != confirmation {
        println!("Passwords don't match!");
        return Ok(None);
    }
    Ok(Some(password))
}

/// Service errors carry the text meant for the operator.
fn user_message(error: Error) -> String {
    match error {
        Error::BadRequest(msg) | Error::NotFound(msg) | Error::Conflict(msg) => msg,
        other => other.to_string(),
    }
}

fn confirm(question: &str) -> Result<bool> {
    Ok(prompt_line(question)?.eq_ignore_ascii_case("y"))
}

fn prompt_line(message: &str) -> Result<String> {
    Ok(prompt(message)?.unwrap_or_default())
}

/// Returns `None` at end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
