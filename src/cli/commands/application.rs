use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::client::UniClub;

#[derive(Subcommand)]
pub enum ApplicationCommands {
    #[command(about = "List your applications")]
    List,

    #[command(about = "Withdraw an application")]
    Cancel {
        #[arg(help = "Application ID")]
        id: i64,
    },
}

pub async fn handle(cmd: ApplicationCommands, client: &UniClub, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ApplicationCommands::List => {
            let applications = require(client.users().my_applications().await)?;

            if applications.is_empty() {
                return output_empty_collection(&output_format, "applications", "No applications");
            }

            match output_format {
                OutputFormat::Json => output_json(&json!({ "applications": applications })),
                OutputFormat::Text => {
                    println!("{:<8} {:<35} {}", "ID", "RECRUITMENT", "STATUS");
                    println!("{}", "-".repeat(55));
                    for application in &applications {
                        let title = application
                            .recruitment_title
                            .clone()
                            .unwrap_or_else(|| format!("#{}", application.recruitment_id));
                        println!("{:<8} {:<35} {:?}", application.application_id, title, application.status);
                    }
                    Ok(())
                }
            }
        }
        ApplicationCommands::Cancel { id } => {
            client.applications().cancel(id).await.map_err(failure)?;
            output_success(
                &output_format,
                &format!("Application #{} cancelled", id),
                Some(json!({ "application_id": id })),
            )
        }
    }
}
