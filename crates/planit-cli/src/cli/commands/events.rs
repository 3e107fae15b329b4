//! Calendar command handlers.

use anyhow::Result;
use planit_core::context::AppContext;
use planit_core::handlers::CalendarBoard;

use super::output;

pub async fn list(ctx: &AppContext, user_id: Option<i64>) -> Result<()> {
    let ctx = match user_id {
        Some(user_id) => ctx.clone().view_as(user_id)?,
        None => ctx.clone(),
    };
    if let Some(user_id) = ctx.viewed_user_id() {
        println!("Viewing events for user id {user_id}");
    }

    let mut calendar = CalendarBoard::new(&ctx);
    let events = calendar.refresh().await?;

    if events.is_empty() {
        println!("No events yet.");
    } else {
        println!("{}", output::event_table(events));
    }
    Ok(())
}

pub async fn add(ctx: &AppContext, title: &str, date: &str) -> Result<()> {
    let mut calendar = CalendarBoard::new(ctx);
    calendar.add(title, date).await?;

    println!("✓ Event added");
    println!("{}", output::event_table(calendar.events()));
    Ok(())
}
