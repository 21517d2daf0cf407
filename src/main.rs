//! charm_installer - Windows installer builder for Charm.
//!
//! Stages the application and its runtime into a deployment image, optionally
//! signs it, and packages it with NSIS.

use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match charm_deploy::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
