use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::client::UniClub;
use crate::models::{ClubListParams, ClubListSearch, ClubSort};

#[derive(Subcommand)]
pub enum ClubCommands {
    #[command(about = "List clubs with filtering, sorting and paging")]
    List {
        #[arg(long, help = "Search keyword")]
        keyword: Option<String>,
        #[arg(long, help = "Restrict to one school")]
        school: Option<i64>,
        #[arg(long, help = "Exact category match")]
        category: Option<String>,
        #[arg(long, default_value = "latest", help = "latest, popular or members")]
        sort: ClubSort,
        #[arg(long, default_value_t = 0, help = "Zero-based page")]
        page: usize,
        #[arg(long, default_value_t = 0, help = "Page size (0 for the default)")]
        size: usize,
    },

    #[command(about = "Show one club")]
    Show {
        #[arg(help = "Club ID")]
        id: i64,
    },

    #[command(about = "List club members")]
    Members {
        #[arg(help = "Club ID")]
        id: i64,
    },
}

pub async fn handle(cmd: ClubCommands, client: &UniClub, output_format: OutputFormat) -> anyhow::Result<()> {
    let clubs = client.clubs();

    match cmd {
        ClubCommands::List {
            keyword,
            school,
            category,
            sort,
            page,
            size,
        } => {
            let params = ClubListParams {
                search: ClubListSearch {
                    keyword,
                    school_id: school,
                },
                category,
                sort,
                page,
                size,
            };
            let page = require(clubs.clubs(&params).await)?;

            if page.content.is_empty() {
                return output_empty_collection(&output_format, "clubs", "No clubs found");
            }

            match output_format {
                OutputFormat::Json => output_json(&json!({
                    "clubs": page.content,
                    "total_elements": page.total_elements,
                    "total_pages": page.total_pages,
                    "current_page": page.current_page,
                    "has_next": page.has_next,
                    "has_previous": page.has_previous,
                })),
                OutputFormat::Text => {
                    println!("{:<8} {:<30} {:<15} {:>8}", "ID", "NAME", "CATEGORY", "MEMBERS");
                    println!("{}", "-".repeat(64));
                    for club in &page.content {
                        println!(
                            "{:<8} {:<30} {:<15} {:>8}",
                            club.group_id,
                            club.name,
                            or_dash(club.category.as_deref()),
                            club.member_count
                        );
                    }
                    println!(
                        "\nPage {} of {} ({} clubs)",
                        page.current_page + 1,
                        page.total_pages.max(1),
                        page.total_elements
                    );
                    Ok(())
                }
            }
        }
        ClubCommands::Show { id } => {
            let club = require(clubs.club(id).await)?;
            match output_format {
                OutputFormat::Json => output_json(&club),
                OutputFormat::Text => {
                    println!("{} (#{})", club.name, club.group_id);
                    println!("Category: {}", or_dash(club.category.as_deref()));
                    println!("Members: {}", club.member_count);
                    if let Some(school) = &club.school {
                        println!("School: {}", school.name);
                    }
                    if let Some(description) = club.description.as_deref().filter(|d| !d.is_empty()) {
                        println!("\n{}", description);
                    }
                    Ok(())
                }
            }
        }
        ClubCommands::Members { id } => {
            let members = require(clubs.members(id).await)?;

            if members.is_empty() {
                return output_empty_collection(&output_format, "members", "No members");
            }

            match output_format {
                OutputFormat::Json => output_json(&json!({ "members": members })),
                OutputFormat::Text => {
                    println!("{:<8} {:<20} {:<30} {}", "USER", "NAME", "EMAIL", "ROLE");
                    println!("{}", "-".repeat(70));
                    for member in &members {
                        println!(
                            "{:<8} {:<20} {:<30} {:?}",
                            member.user_id,
                            member.name,
                            or_dash(member.email.as_deref()),
                            member.role
                        );
                    }
                    Ok(())
                }
            }
        }
    }
}
