// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `purrview login`, `register`, `logout` and `profile`.

use std::io::IsTerminal;

use purrview_core::{LoginRequest, PurrviewError, RegisterRequest, UserRecord};
use tracing::info;

use crate::context::ClientContext;

/// Environment variable read instead of prompting for a password.
pub const PASSWORD_ENV_VAR: &str = "PURRVIEW_PASSWORD";

/// Get the account password from the environment or an interactive prompt.
///
/// Priority:
/// 1. `PURRVIEW_PASSWORD` environment variable (scripts and CI)
/// 2. Interactive TTY prompt via `rpassword`
pub fn read_password(prompt: &str) -> Result<String, PurrviewError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR) {
        if !password.is_empty() {
            return Ok(password);
        }
    }

    if std::io::stdin().is_terminal() {
        eprint!("{prompt}: ");
        let password = rpassword::read_password()
            .map_err(|e| PurrviewError::Internal(format!("failed to read password: {e}")))?;
        if password.is_empty() {
            return Err(PurrviewError::Internal("empty password not allowed".to_string()));
        }
        return Ok(password);
    }

    Err(PurrviewError::Internal(format!(
        "no password provided. Set {PASSWORD_ENV_VAR} or run interactively."
    )))
}

pub async fn run_login(ctx: &ClientContext, email: String) -> Result<(), PurrviewError> {
    let password = read_password("Password")?;
    let outcome = ctx.auth.login(&LoginRequest { email, password }).await?;
    info!(user_id = %outcome.user.id, "logged in");
    if !outcome.message.is_empty() {
        println!("{}", outcome.message);
    }
    println!("Logged in as {}", describe_user(&outcome.user));
    Ok(())
}

/// Fields collected by `purrview register`, password excluded.
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u32,
}

pub async fn run_register(ctx: &ClientContext, form: Registration) -> Result<(), PurrviewError> {
    let password = read_password("Choose a password")?;
    let request = RegisterRequest {
        name: form.name,
        email: form.email,
        password,
        phone: form.phone,
        age: form.age,
    };
    let outcome = ctx.auth.register(&request).await?;
    info!(user_id = %outcome.user.id, "registered");
    println!("Registered and logged in as {}", describe_user(&outcome.user));
    Ok(())
}

/// Logging out without a stored session only reports it.
pub fn run_logout(ctx: &ClientContext) {
    if ctx.session.has_any_auth_key() {
        ctx.auth.logout();
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
}

pub async fn run_profile(ctx: &ClientContext, json: bool) -> Result<(), PurrviewError> {
    let user = ctx.auth.get_profile().await?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&user).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  {}", user.name);
    println!("  {}", "-".repeat(35));
    for (label, value) in profile_rows(&user) {
        println!("    {label:<9} {value}");
    }
    println!();
    Ok(())
}

fn describe_user(user: &UserRecord) -> String {
    format!("{} <{}>", user.name, user.email)
}

fn profile_rows(user: &UserRecord) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Email:", user.email.clone()),
        ("Phone:", user.phone.clone()),
        ("Age:", user.age.to_string()),
    ];
    if let Some(created) = user.created_at {
        rows.push(("Joined:", created.format("%Y-%m-%d").to_string()));
    }
    rows
}
