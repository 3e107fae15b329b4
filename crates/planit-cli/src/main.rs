mod cli;

use planit_core::outcome::ActionError;

fn main() {
    if let Err(e) = cli::run() {
        if let Some(action) = e.downcast_ref::<ActionError>() {
            eprintln!("{action}");
            if action.requires_login() {
                eprintln!("Run `planit login` to sign in again.");
            }
        } else {
            eprintln!("{e:#}"); // pretty anyhow chain
        }
        std::process::exit(1);
    }
}
