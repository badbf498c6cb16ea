use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::client::UniClub;
use crate::models::{ApplyRequest, RecruitmentSearchParams, RecruitmentStatus};

#[derive(Subcommand)]
pub enum RecruitmentCommands {
    #[command(about = "Search recruitments")]
    Search {
        #[arg(long, help = "Search keyword")]
        keyword: Option<String>,
        #[arg(long, help = "Restrict to one school")]
        school: Option<i64>,
        #[arg(long, help = "Only open recruitments")]
        open: bool,
    },

    #[command(about = "Show one recruitment")]
    Show {
        #[arg(help = "Recruitment ID")]
        id: i64,
    },

    #[command(about = "Apply to a recruitment")]
    Apply {
        #[arg(help = "Recruitment ID")]
        id: i64,
        #[arg(long, help = "Application text")]
        content: String,
    },
}

pub async fn handle(cmd: RecruitmentCommands, client: &UniClub, output_format: OutputFormat) -> anyhow::Result<()> {
    let recruitments = client.recruitments();

    match cmd {
        RecruitmentCommands::Search { keyword, school, open } => {
            let params = RecruitmentSearchParams {
                keyword,
                status: open.then_some(RecruitmentStatus::Open),
                school_id: school,
            };
            let found = require(recruitments.search(&params).await)?;

            if found.is_empty() {
                return output_empty_collection(&output_format, "recruitments", "No recruitments found");
            }

            match output_format {
                OutputFormat::Json => output_json(&json!({ "recruitments": found })),
                OutputFormat::Text => {
                    println!("{:<8} {:<35} {:<20} {}", "ID", "TITLE", "CLUB", "STATUS");
                    println!("{}", "-".repeat(75));
                    for recruitment in &found {
                        println!(
                            "{:<8} {:<35} {:<20} {:?}",
                            recruitment.recruitment_id,
                            recruitment.title,
                            or_dash(recruitment.group_name.as_deref()),
                            recruitment.status
                        );
                    }
                    Ok(())
                }
            }
        }
        RecruitmentCommands::Show { id } => {
            let recruitment = require(recruitments.recruitment(id).await)?;
            match output_format {
                OutputFormat::Json => output_json(&recruitment),
                OutputFormat::Text => {
                    println!("{} (#{})", recruitment.title, recruitment.recruitment_id);
                    println!("Club: {}", or_dash(recruitment.group_name.as_deref()));
                    println!("Status: {:?}", recruitment.status);
                    if let Some(end) = recruitment.end_date {
                        println!("Closes: {}", end.format("%Y-%m-%d %H:%M"));
                    }
                    if let Some(content) = recruitment.content.as_deref().filter(|c| !c.is_empty()) {
                        println!("\n{}", content);
                    }
                    Ok(())
                }
            }
        }
        RecruitmentCommands::Apply { id, content } => {
            let application = recruitments
                .apply(id, &ApplyRequest { content })
                .await
                .map_err(failure)?;
            output_success(
                &output_format,
                &format!("Application #{} submitted", application.application_id),
                Some(json!({ "application": application })),
            )
        }
    }
}
