//! Auth command handlers.

use anyhow::Result;
use planit_core::config::paths;
use planit_core::context::AppContext;
use planit_core::embedded;
use planit_core::posture::Posture;
use planit_core::session;

use super::prompt;

pub struct LoginOptions {
    pub username: Option<String>,
    pub password: Option<String>,
    pub remember: bool,
    pub forget: bool,
}

pub async fn login(ctx: &AppContext, options: LoginOptions) -> Result<()> {
    let remembered = session::check_stored_credentials(ctx)?;

    let username = match options.username {
        Some(username) => username,
        None if !remembered.username.is_empty() => {
            println!("Using remembered username: {}", remembered.username);
            remembered.username.clone()
        }
        None => prompt::read_line("Username: ")?,
    };

    let password = match options.password {
        Some(password) => password,
        None => match remembered.password.as_deref() {
            Some(password) if username == remembered.username => {
                println!("Using remembered password.");
                password.to_string()
            }
            _ => prompt::read_secret("Password: ")?,
        },
    };

    let remember = !options.forget && (options.remember || remembered.remember_me);

    let user = session::login(ctx, &username, &password, remember).await?;

    println!("✓ Logged in as {} (user id {})", user.username, user.user_id);
    println!("  Session saved to: {}", session_store_path(ctx.posture()).display());
    if remember && ctx.posture().remembers_password() {
        println!("  Username and password remembered on this device.");
    } else if remember {
        println!("  Username remembered on this device.");
    }

    Ok(())
}

pub async fn register(
    ctx: &AppContext,
    username: &str,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt::read_secret("Password: ")?,
    };
    let confirm = match confirm {
        Some(confirm) => confirm,
        None => prompt::read_secret("Confirm password: ")?,
    };

    session::register(ctx, username, &password, &confirm).await?;

    println!("✓ Account created successfully!");
    println!("  Run `planit login --username {}` to sign in.", username.trim());
    Ok(())
}

pub fn logout(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes && !prompt::confirm("Are you sure you want to logout?")? {
        println!("Logout cancelled.");
        return Ok(());
    }

    if session::logout(ctx)? {
        println!("✓ Logged out");
        println!(
            "  Session removed from: {}",
            session_store_path(ctx.posture()).display()
        );
    } else {
        println!("Not logged in (no session found).");
    }

    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    let info = session::load_user_info(ctx)?;

    match (info.username, info.user_id) {
        (Some(username), Some(user_id)) => println!("Logged in as {username} (user id {user_id})"),
        (None, Some(user_id)) => println!("Logged in as user id {user_id}"),
        _ => println!("Not logged in."),
    }
    println!("  Posture: {}", ctx.posture());
    println!("  API: {}", ctx.api().base_url());

    Ok(())
}

pub fn secret(ctx: &AppContext) -> Result<()> {
    let key = embedded::admin_api_key(ctx)?;
    println!("Secret: {key}");
    Ok(())
}

fn session_store_path(posture: Posture) -> std::path::PathBuf {
    match posture {
        Posture::Secure => paths::secure_store_path(),
        Posture::Vulnerable => paths::local_store_path(),
    }
}
