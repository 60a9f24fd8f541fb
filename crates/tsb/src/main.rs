use std::sync::Arc;

use clap::{Parser, Subcommand};

use tsb_core::{
    canned::{CannedTeamRepository, CannedUserRepository},
    config::{Config, Profile},
    ports::{TeamRepository, UserRepository},
    request::TeamRequest,
    Result,
};
use tsb_rest::{JsonTransport, RestTeamRepository, RestUserRepository};

/// Talk to the Users and Teams services the way the bot does.
#[derive(Parser)]
#[command(name = "tsb")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find users by Slack handles (leading `@` optional)
    UsersBySlackNames {
        #[arg(required = true)]
        slack_names: Vec<String>,
    },

    /// Find users by uuids
    UsersByUuids {
        #[arg(required = true)]
        uuids: Vec<String>,
    },

    /// Activate a team made of the given member uuids
    ActivateTeam {
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Deactivate the active team of a member
    DeactivateTeam { uuid: String },

    /// Show the active team of a member
    GetTeam { uuid: String },
}

/// Repository implementations selected for this process.
struct Repositories {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl Repositories {
    fn from_config(cfg: &Config) -> Result<Self> {
        match cfg.profile {
            Profile::Production => {
                let transport = JsonTransport::new(cfg.http_timeout)?;
                Ok(Self {
                    users: Arc::new(RestUserRepository::new(
                        transport.clone(),
                        cfg.users.clone(),
                    )),
                    teams: Arc::new(RestTeamRepository::new(transport, cfg.teams.clone())),
                })
            }
            Profile::Canned => Ok(Self {
                users: Arc::new(CannedUserRepository::new()),
                teams: Arc::new(CannedTeamRepository::new()),
            }),
        }
    }
}

async fn run(repos: &Repositories, command: Command) -> Result<String> {
    let out = match command {
        Command::UsersBySlackNames { slack_names } => {
            serde_json::to_string_pretty(&repos.users.find_users_by_slack_names(slack_names).await?)?
        }
        Command::UsersByUuids { uuids } => {
            serde_json::to_string_pretty(&repos.users.find_users_by_uuids(uuids).await?)?
        }
        Command::ActivateTeam { members } => serde_json::to_string_pretty(
            &repos.teams.activate_team(TeamRequest::new(members)).await?,
        )?,
        Command::DeactivateTeam { uuid } => {
            serde_json::to_string_pretty(&repos.teams.deactivate_team(&uuid).await?)?
        }
        Command::GetTeam { uuid } => serde_json::to_string_pretty(&repos.teams.get_team(&uuid).await?)?,
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tsb_core::logging::init("tsb")?;

    let cfg = Config::load()?;
    tracing::info!("Starting with profile {:?}", cfg.profile);
    let repos = Repositories::from_config(&cfg)?;

    println!("{}", run(&repos, cli.command).await?);
    Ok(())
}
