use std::error::Error;

use clap::{Parser, Subcommand};
use reqwest::{Client, Response, Url};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "shg-cli")]
#[command(about = "CLI for the SHG platform API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, env = "SHG_API_URL", default_value = "http://localhost:5000")]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    Health,
    Login {
        #[arg(short, long)]
        email: String,
        /// member, admin or volunteer
        #[arg(short = 't', long)]
        user_type: String,
    },
    ListShgs {
        #[arg(short, long)]
        state: Option<String>,
    },
    GetShg {
        #[arg(short, long)]
        code: String,
    },
    CreateShg {
        #[arg(short, long)]
        code: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        state: String,
        #[arg(short, long)]
        district: String,
    },
    UpdateShg {
        #[arg(short, long)]
        code: String,
        #[arg(short, long)]
        members: Option<u64>,
        #[arg(short, long)]
        savings: Option<u64>,
    },
    ListLoans {
        /// pending, approved or rejected
        #[arg(short, long)]
        status: Option<String>,
    },
    SubmitLoan {
        #[arg(short = 'c', long)]
        shg_code: String,
        #[arg(short, long)]
        member: String,
        #[arg(short, long)]
        amount: f64,
        #[arg(short, long)]
        purpose: String,
    },
    ApproveLoan {
        #[arg(short, long)]
        id: u64,
        #[arg(short = 'b', long, default_value = "admin")]
        approved_by: String,
        #[arg(short, long)]
        rate: Option<String>,
    },
    RejectLoan {
        #[arg(short, long)]
        id: u64,
    },
    ListVolunteers,
    National,
    Admin,
    ShgDashboard {
        #[arg(short, long)]
        code: String,
    },
    MemberDashboard {
        #[arg(short, long)]
        code: String,
        #[arg(short, long)]
        member: String,
    },
    VolunteerDashboard {
        #[arg(short, long)]
        id: u64,
    },
    Chat {
        #[arg(short, long)]
        message: String,
    },
}

/// Base url plus percent-encoded path segments.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| "api url cannot take a path")?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print(res: Response) -> Result<(), Box<dyn Error>> {
    let status = res.status();
    let text = res.text().await?;
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(value) => serde_json::to_string_pretty(&value)?,
        Err(_) => text,
    };
    if status.is_success() {
        println!("{body}");
    } else {
        println!("Request failed ({status}): {body}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let url = |segments: &[&str]| endpoint(&cli.url, segments);

    let res = match cli.command {
        Commands::Health => client.get(url(&["api", "health"])?).send().await?,
        Commands::Login { email, user_type } => {
            client
                .post(url(&["api", "auth", "login"])?)
                .json(&json!({ "email": email, "password": "", "userType": user_type }))
                .send()
                .await?
        }
        Commands::ListShgs { state } => {
            let target = match state.as_deref() {
                Some(state) => url(&["api", "shgs", "by-state", state])?,
                None => url(&["api", "shgs"])?,
            };
            client.get(target).send().await?
        }
        Commands::GetShg { code } => client.get(url(&["api", "shgs", &code])?).send().await?,
        Commands::CreateShg {
            code,
            name,
            state,
            district,
        } => {
            client
                .post(url(&["api", "shgs"])?)
                .json(&json!({ "code": code, "name": name, "state": state, "district": district }))
                .send()
                .await?
        }
        Commands::UpdateShg { code, members, savings } => {
            let mut patch = Map::new();
            if let Some(members) = members {
                patch.insert("members".into(), members.into());
            }
            if let Some(savings) = savings {
                patch.insert("savings".into(), savings.into());
            }
            client.put(url(&["api", "shgs", &code])?).json(&patch).send().await?
        }
        Commands::ListLoans { status } => {
            let target = match status.as_deref() {
                Some(status) => url(&["api", "loans", "status", status])?,
                None => url(&["api", "loans"])?,
            };
            client.get(target).send().await?
        }
        Commands::SubmitLoan {
            shg_code,
            member,
            amount,
            purpose,
        } => {
            client
                .post(url(&["api", "loans"])?)
                .json(&json!({
                    "shgCode": shg_code,
                    "memberName": member,
                    "amount": amount,
                    "purpose": purpose
                }))
                .send()
                .await?
        }
        Commands::ApproveLoan { id, approved_by, rate } => {
            client
                .put(url(&["api", "loans", &id.to_string(), "approve"])?)
                .json(&json!({ "approvedBy": approved_by, "interestRate": rate }))
                .send()
                .await?
        }
        Commands::RejectLoan { id } => {
            client
                .put(url(&["api", "loans", &id.to_string(), "reject"])?)
                .send()
                .await?
        }
        Commands::ListVolunteers => client.get(url(&["api", "volunteers"])?).send().await?,
        Commands::National => {
            client
                .get(url(&["api", "dashboard", "national-overview"])?)
                .send()
                .await?
        }
        Commands::Admin => client.get(url(&["api", "dashboard", "admin"])?).send().await?,
        Commands::ShgDashboard { code } => {
            client
                .get(url(&["api", "dashboard", "shg", &code])?)
                .send()
                .await?
        }
        Commands::MemberDashboard { code, member } => {
            client
                .get(url(&["api", "dashboard", "member", &code, &member])?)
                .send()
                .await?
        }
        Commands::VolunteerDashboard { id } => {
            client
                .get(url(&["api", "dashboard", "volunteer", &id.to_string()])?)
                .send()
                .await?
        }
        Commands::Chat { message } => {
            client
                .post(url(&["api", "gemini", "chat"])?)
                .json(&json!({ "message": message }))
                .send()
                .await?
        }
    };

    print(res).await
}
