use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{AuthCommand, CompletionsCommand, ConfigureCommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "adsam", version, about = "AWS SAML authentication tool for AD FS", long_about = None, arg_required_else_help = false)]
pub struct Cli {
    #[arg(
        short = 'p',
        long,
        global = true,
        default_value = "default",
        help = "Configuration profile name"
    )]
    pub profile: String,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Sign on to AD FS and print the SAML assertion")]
    Auth(AuthCommand),
    #[command(about = "Configure AD FS sign-on settings")]
    Configure(ConfigureCommand),
    #[command(about = "Generate shell completion scripts for adsam")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let profile = self.profile;
        let command = self.command.unwrap_or(Commands::Auth(AuthCommand {}));

        match command {
            Commands::Auth(cmd) => cmd.execute(&profile).await,
            Commands::Configure(cmd) => cmd.execute(&profile).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}
