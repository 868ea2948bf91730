//! Command-line entry point for the SMS email bridge.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sms_email_bridge::{
    AliasDirectory, BridgeService, Config, EmailAddress, SendEmailRequest, SimpleLoginClient,
    SmtpMailTransport,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sms-email-bridge", version, about = "Relay email on behalf of a phone number")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send an email with the phone number's alias as the sender
    SendEmail {
        /// Sender phone number in international format
        #[arg(long)]
        phone_number: String,

        /// Recipient address (repeatable)
        #[arg(long, required = true)]
        to: Vec<String>,

        /// Message subject
        #[arg(long)]
        subject: String,

        /// Message body
        #[arg(long)]
        body: String,

        /// Carbon-copy address (repeatable)
        #[arg(long)]
        cc: Vec<String>,

        /// Blind-carbon-copy address (repeatable)
        #[arg(long)]
        bcc: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::SendEmail {
            phone_number,
            to,
            subject,
            body,
            cc,
            bcc,
        } => {
            let client = SimpleLoginClient::new(&config);
            let directory = AliasDirectory::new(
                Arc::new(client),
                EmailAddress::new(config.primary_email.clone())?,
                config.primary_domain.clone(),
            );
            let transport = Arc::new(SmtpMailTransport::new(&config)?);
            let service = BridgeService::new(directory, transport);

            let receipt = service.send_email(&SendEmailRequest {
                phone_number,
                to,
                cc,
                bcc,
                subject,
                body,
            })?;

            info!(alias = %receipt.alias_address, "Dispatch complete");
            println!("sent via {}", receipt.alias_address);
            if let Some(id) = receipt.message_id {
                println!("server reply: {}", id);
            }
        }
    }

    Ok(())
}
