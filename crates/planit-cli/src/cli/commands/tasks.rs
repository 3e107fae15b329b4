//! Task command handlers.

use anyhow::Result;
use planit_core::context::AppContext;
use planit_core::handlers::TaskBoard;

use super::{output, prompt};

pub async fn list(ctx: &AppContext, user_id: Option<i64>) -> Result<()> {
    let ctx = match user_id {
        Some(user_id) => ctx.clone().view_as(user_id)?,
        None => ctx.clone(),
    };
    if let Some(user_id) = ctx.viewed_user_id() {
        println!("Viewing tasks for user id {user_id}");
    }

    let mut board = TaskBoard::new(&ctx);
    let tasks = board.refresh().await?;

    if tasks.is_empty() {
        println!("No tasks yet. Add one with `planit tasks add --title ...`.");
    } else {
        println!("{}", output::task_table(tasks));
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let mut board = TaskBoard::new(ctx);
    let tasks = board.search(query).await?;

    if tasks.is_empty() {
        println!("No tasks match '{}'.", query.trim());
    } else {
        println!("{}", output::task_table(tasks));
    }
    Ok(())
}

pub async fn add(ctx: &AppContext, title: &str, description: &str) -> Result<()> {
    let mut board = TaskBoard::new(ctx);
    board.add(title, description).await?;

    println!("✓ Task added");
    println!("{}", output::task_table(board.tasks()));
    Ok(())
}

pub async fn toggle(ctx: &AppContext, id: i64) -> Result<()> {
    let mut board = TaskBoard::new(ctx);
    board.refresh().await?;
    let done = board.toggle(id).await?;

    let state = if done { "done" } else { "not done" };
    println!("✓ Task {id} marked as {state}");
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    if !yes && !prompt::confirm("Are you sure you want to delete this task?")? {
        println!("Delete cancelled.");
        return Ok(());
    }

    let mut board = TaskBoard::new(ctx);
    board.delete(id).await?;

    println!("✓ Task {id} deleted");
    Ok(())
}
