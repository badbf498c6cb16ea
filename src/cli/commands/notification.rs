use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::client::UniClub;

#[derive(Subcommand)]
pub enum NotificationCommands {
    #[command(about = "List notifications")]
    List,

    #[command(about = "Show the unread count")]
    Unread,

    #[command(about = "Mark one notification as read")]
    Read {
        #[arg(help = "Notification ID")]
        id: i64,
    },

    #[command(about = "Mark every notification as read")]
    ReadAll,
}

pub async fn handle(cmd: NotificationCommands, client: &UniClub, output_format: OutputFormat) -> anyhow::Result<()> {
    let notifications = client.notifications();

    match cmd {
        NotificationCommands::List => {
            let items = require(notifications.notifications().await)?;

            if items.is_empty() {
                return output_empty_collection(&output_format, "notifications", "No notifications");
            }

            match output_format {
                OutputFormat::Json => output_json(&json!({ "notifications": items })),
                OutputFormat::Text => {
                    for notification in &items {
                        let marker = if notification.read { " " } else { "*" };
                        let when = notification
                            .created_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default();
                        println!(
                            "{}{:<7} {:<17} {}",
                            marker, notification.notification_id, when, notification.message
                        );
                    }
                    Ok(())
                }
            }
        }
        NotificationCommands::Unread => {
            let count = require(notifications.unread_count().await)?;
            match output_format {
                OutputFormat::Json => output_json(&json!({ "unread": count })),
                OutputFormat::Text => {
                    println!("{} unread", count);
                    Ok(())
                }
            }
        }
        NotificationCommands::Read { id } => {
            notifications.mark_read(id).await.map_err(failure)?;
            output_success(&output_format, &format!("Notification #{} marked as read", id), None)
        }
        NotificationCommands::ReadAll => {
            notifications.mark_all_read().await.map_err(failure)?;
            output_success(&output_format, "All notifications marked as read", None)
        }
    }
}
