use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::commands;
use crate::config::Config;
use crate::prompt::StdinReader;
use crate::providers::{load_sdk_config, AwsCodePipeline};

#[derive(Parser)]
#[command(name = "pipehand")]
#[command(author, version, about = "AWS CodePipeline helper", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// AWS named profile used to establish the session
    #[arg(short, long, global = true, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Path to a pipehand.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List pipelines with their latest execution status
    List {
        /// Use a name or part of a name to filter the results
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Start executions of pipelines picked from a menu
    Run {
        /// Use a name or part of a name to filter the runnable pipelines
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Approve or reject pipelines waiting at a manual approval
    Approve {
        /// Use a name or part of a name to filter the approvable pipelines
        #[arg(short, long)]
        name: Option<String>,
        /// Message attached to every submitted approval result
        #[arg(short, long)]
        message: Option<String>,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let profile = self.profile.as_deref().or(config.profile.as_deref());

        let sdk_config = load_sdk_config(profile, config.region.clone()).await;
        let service = AwsCodePipeline::new(&sdk_config)?;
        info!("AWS session established");

        let mut reader = StdinReader;
        match &self.command {
            Commands::List { name } => {
                commands::list::execute(&service, filter(name)).await?;
            }
            Commands::Run { name } => {
                commands::run::execute(&service, &mut reader, filter(name)).await?;
            }
            Commands::Approve { name, message } => {
                commands::approve::execute(&service, &mut reader, filter(name), message.as_deref())
                    .await?;
            }
        }

        Ok(())
    }
}

fn filter(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("")
}
