//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and dataset path before
//! starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::{ServerConfig, ServerError};

/// Prompts for each [`ServerConfig`] field, using `defaults` as the
/// suggested values.
///
/// A failed prompt (e.g. no terminal) keeps the default.
#[must_use]
pub fn prompt_config(defaults: ServerConfig) -> ServerConfig {
    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let dataset_path: String = Input::new()
        .with_prompt("Dataset CSV")
        .default(defaults.dataset_path.display().to_string())
        .interact_text()
        .unwrap_or_else(|_| defaults.dataset_path.display().to_string());

    ServerConfig {
        bind_addr,
        port,
        dataset_path: PathBuf::from(dataset_path),
        ..defaults
    }
}

/// Runs the server in interactive mode, prompting for configuration.
///
/// # Errors
///
/// Returns a [`ServerError`] if the underlying server fails to start.
pub async fn run(defaults: ServerConfig) -> Result<(), ServerError> {
    println!("Collision Dashboard Server");
    println!();

    let config = prompt_config(defaults);

    if !Confirm::new()
        .with_prompt(format!(
            "Load {} and start server on {}:{}?",
            config.dataset_path.display(),
            config.bind_addr,
            config.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
