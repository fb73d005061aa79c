//! Session browsing CLI command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// List stored sessions with their derived titles.
///
/// # Examples
///
/// ```bash
/// mentor sessions
/// mentor sessions --json
/// ```
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let summaries = state.chat_service.summaries().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!();
        println!(
            "  {} No sessions stored yet.",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    println!();
    for summary in &summaries {
        println!(
            "  {}  {}",
            style(&summary.session_id).dim(),
            style(&summary.title).cyan()
        );
    }
    println!();

    Ok(())
}
