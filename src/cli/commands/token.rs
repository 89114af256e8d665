use anyhow::Context;
use chrono::Duration;
use serde_json::json;

use crate::auth::{issue_session_token, SessionUser};
use crate::cli::OutputFormat;
use crate::config;

pub fn handle(
    sub: String,
    name: Option<String>,
    email: Option<String>,
    ttl_hours: Option<i64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let auth = &config::config().auth;
    let hours = match ttl_hours {
        Some(hours) => hours,
        None => match i64::try_from(auth.session_ttl_hours) {
            Ok(hours) => hours,
            Err(_) => anyhow::bail!("AUTH_SESSION_TTL_HOURS is out of range"),
        },
    };
    if hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive");
    }
    let Some(ttl) = Duration::try_hours(hours) else {
        anyhow::bail!("--ttl-hours is out of range");
    };

    let user = SessionUser { sub, name, email };
    let token = issue_session_token(&auth.secret, user, ttl).context("failed to sign session token")?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "token": token, "cookie": auth.session_cookie, "expires_in_hours": hours })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
