use clap::Subcommand;
use serde_json::json;
use std::io::{BufRead, Write};

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::client::UniClub;
use crate::session::AuthState;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Keep the session after this command exits")]
        remember: bool,
    },

    #[command(about = "Sign out and forget the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, client: &UniClub, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = client.session();

    match cmd {
        AuthCommands::Login {
            email,
            password,
            remember,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };

            let user = session.login(&email, &password, remember).await.map_err(failure)?;
            if !remember {
                tracing::info!("Session not remembered; pass --remember to keep it");
            }
            output_success(
                &output_format,
                &format!("Signed in as {}", user.email),
                Some(json!({ "user": user, "remembered": remember })),
            )
        }
        AuthCommands::Logout => {
            session.logout().await;
            output_success(&output_format, "Signed out", None)
        }
        AuthCommands::Status => {
            let state = session.restore().await;
            match output_format {
                OutputFormat::Json => output_json(&json!({
                    "authenticated": state.is_authenticated(),
                    "user": state.user(),
                })),
                OutputFormat::Text => {
                    match state {
                        AuthState::Authenticated(user) => println!("Signed in as {} ({})", user.email, user.name),
                        _ => println!("Not signed in"),
                    }
                    Ok(())
                }
            }
        }
        AuthCommands::Whoami => {
            let user = match session.restore().await {
                AuthState::Authenticated(user) => user,
                _ => return Err(anyhow::anyhow!("Not signed in; run `uniclub auth login`")),
            };

            match output_format {
                OutputFormat::Json => output_json(&user),
                OutputFormat::Text => {
                    println!("User ID: {}", user.user_id);
                    println!("Name: {}", user.name);
                    println!("Email: {}", user.email);
                    println!("Role: {:?}", user.role);
                    if let Some(school) = &user.school {
                        println!("School: {}", school.name);
                    }
                    Ok(())
                }
            }
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(anyhow::anyhow!("Password is required"));
    }
    Ok(password)
}
