// cli/src/cli/cli.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use audit_log::FileAuditLog;
use client::api::HttpAccessApi;
use client::commands::{CliArgs, Commands, EncounterCommand};
use client::config::load_client_config;
use client::session_store::SessionStore;
use clinical_access::workflow::AccessWorkflow;
use clinical_access::TimelineService;

use crate::cli::handlers_access;
use crate::cli::handlers_auth;
use crate::cli::handlers_timeline;

/// Parse the command line, wire the services and dispatch.
pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();

    let config = load_client_config(args.config.as_deref())
        .context("failed to load client configuration")?;
    debug!("Using backend {}", config.api.base_url);

    let api = Arc::new(
        HttpAccessApi::new(&config.api).context("failed to construct the API client")?,
    );
    let sessions = SessionStore::open(&config.session.path);
    let audit = Arc::new(
        FileAuditLog::open(&config.audit.path).context("failed to open the audit journal")?,
    );

    let mut workflow = AccessWorkflow::new(api.clone(), sessions.clone(), audit.clone()).await;

    match args.command {
        Commands::Login { kind } => handlers_auth::handle_login(&mut workflow, kind).await,
        Commands::Logout => handlers_auth::handle_logout(&mut workflow).await,
        Commands::Whoami => handlers_auth::handle_whoami(&sessions).await,
        Commands::Consent { patient_id } => {
            handlers_access::handle_consent(&mut workflow, &patient_id).await
        }
        Commands::Encounter { action } => match action {
            EncounterCommand::Start {
                patient_id,
                purpose,
                data_type,
                justification,
            } => {
                handlers_access::handle_encounter_start(
                    &mut workflow,
                    &patient_id,
                    purpose.as_deref(),
                    data_type.as_deref(),
                    justification,
                )
                .await
            }
            EncounterCommand::List { patient_id } => {
                let timeline = TimelineService::new(api.clone());
                handlers_timeline::handle_encounter_list(&timeline, &sessions, &patient_id).await
            }
        },
        Commands::BreakGlass(bg) => handlers_access::handle_break_glass(&mut workflow, bg).await,
        Commands::Timeline {
            encounter_id,
            group,
        } => {
            let timeline = TimelineService::new(api.clone());
            handlers_timeline::handle_timeline(
                &timeline,
                &sessions,
                audit.as_ref(),
                &encounter_id,
                group,
            )
            .await
        }
    }
}
