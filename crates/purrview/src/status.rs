// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `purrview status` command implementation.
//!
//! Reports the local session state and probes both remote APIs through
//! their health checks.

use std::io::IsTerminal;

use purrview_core::{ApiAdapter, HealthStatus};
use serde::Serialize;

use crate::context::ClientContext;

/// Health of one remote API for `--json` mode.
#[derive(Debug, Serialize, PartialEq)]
pub struct AdapterReport {
    pub name: String,
    pub kind: String,
    pub state: String,
    pub detail: Option<String>,
}

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub authenticated: bool,
    pub user: Option<String>,
    pub session_file: String,
    pub adapters: Vec<AdapterReport>,
}

async fn probe(adapter: &dyn ApiAdapter) -> AdapterReport {
    let (state, detail) = match adapter.health_check().await {
        HealthStatus::Healthy => ("healthy", None),
        HealthStatus::Degraded(reason) => ("degraded", Some(reason)),
        HealthStatus::Unhealthy(reason) => ("unhealthy", Some(reason)),
    };
    AdapterReport {
        name: adapter.name().to_string(),
        kind: adapter.adapter_kind().to_string(),
        state: state.to_string(),
        detail,
    }
}

/// Run the `purrview status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(ctx: &ClientContext, json: bool, plain: bool) {
    let auth = probe(ctx.auth_client.as_ref()).await;
    let catalog = probe(ctx.catalog.as_ref()).await;

    let response = StatusResponse {
        authenticated: ctx.session.is_authenticated(),
        user: ctx.session.current_user().map(|u| u.email),
        session_file: ctx
            .config
            .storage
            .resolved_session_path()
            .display()
            .to_string(),
        adapters: vec![auth, catalog],
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&response, use_color);
    }
}

fn print_status(response: &StatusResponse, use_color: bool) {
    println!();
    println!("  purrview status");
    println!("  {}", "-".repeat(35));

    let session = match &response.user {
        Some(email) if response.authenticated => format!("logged in as {email}"),
        _ => "anonymous".to_string(),
    };
    println!("    Session:  {session}");
    println!("    File:     {}", response.session_file);
    println!();

    for adapter in &response.adapters {
        let detail = adapter
            .detail
            .as_deref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();
        if use_color {
            use colored::Colorize;
            let mark = match adapter.state.as_str() {
                "healthy" => "✓".green(),
                "degraded" => "!".yellow(),
                _ => "✗".red(),
            };
            println!(
                "    {:<9} {} {}{}",
                format!("{}:", adapter.kind),
                mark,
                adapter.state,
                detail
            );
        } else {
            println!(
                "    {:<9} {} {}{}",
                format!("{}:", adapter.kind),
                plain_mark(&adapter.state),
                adapter.state,
                detail
            );
        }
    }
    println!();
}

fn plain_mark(state: &str) -> &'static str {
    match state {
        "healthy" => "[OK]",
        "degraded" => "[WARN]",
        _ => "[FAIL]",
    }
}
