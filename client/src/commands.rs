// client/src/commands.rs
//! Command-line surface of the access client. Kept in the library crate so
//! the binary stays a thin dispatcher.
use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "biotek-cli",
    about = "BioTek clinical access client",
    version
)]
pub struct CliArgs {
    /// Path to a YAML config file (defaults apply when absent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authenticate and persist a session
    Login {
        #[command(subcommand)]
        kind: LoginCommand,
    },
    /// Destroy the persisted session
    Logout,
    /// Show the active session
    Whoami,
    /// Fetch a patient's consent flags
    Consent {
        /// Patient identifier
        patient_id: String,
    },
    /// Encounter operations
    Encounter {
        #[command(subcommand)]
        action: EncounterCommand,
    },
    /// Emergency override: audited, shorter-lived, doctor/admin only
    BreakGlass(BreakGlassArgs),
    /// Fetch the event timeline for an encounter
    Timeline {
        /// Encounter identifier
        encounter_id: String,
        /// Group events by type instead of a flat chronological list
        #[arg(long)]
        group: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum LoginCommand {
    /// Patient login (patient id + password)
    Patient {
        #[arg(long)]
        patient_id: String,
        #[arg(long)]
        password: String,
    },
    /// Staff login (user id + password; the backend names the role)
    Staff {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum EncounterCommand {
    /// Declare a purpose and open an encounter for a patient.
    /// Without --purpose, prints the purposes selectable for this session
    /// and creates nothing.
    Start {
        #[arg(long)]
        patient_id: String,
        /// Declared access purpose (treatment, research, ...)
        #[arg(long)]
        purpose: Option<String>,
        /// Narrow the purpose list to ones authorizing this category
        #[arg(long)]
        data_type: Option<String>,
        /// Optional free-text justification forwarded to the backend
        #[arg(long)]
        justification: Option<String>,
    },
    /// List a patient's encounters
    List {
        #[arg(long)]
        patient_id: String,
    },
}

#[derive(Debug, Args)]
pub struct BreakGlassArgs {
    #[arg(long)]
    pub patient_id: String,
    /// Free-text justification, at least 10 characters
    #[arg(long)]
    pub reason: String,
    /// life_threatening, unconscious, surgical_emergency or mass_casualty
    #[arg(long)]
    pub emergency_type: String,
}
