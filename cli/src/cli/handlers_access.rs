// cli/src/cli/handlers_access.rs
use anyhow::{bail, Result};

use client::commands::BreakGlassArgs;
use clinical_access::workflow::AccessWorkflow;
use models::consent::Consent;
use models::encounter::EmergencyType;
use models::purpose::{DataCategory, Purpose};

fn print_consent(consent: &Consent) {
    println!("Consent for {} (recorded {}):", consent.patient_id, consent.recorded_at.to_rfc3339());
    println!("  genetic:     {}", flag(consent.genetic));
    println!("  imaging:     {}", flag(consent.imaging));
    println!("  ai analysis: {}", flag(consent.ai_analysis));
    println!("  research:    {}", flag(consent.research));
}

fn flag(granted: bool) -> &'static str {
    if granted {
        "granted"
    } else {
        "withheld"
    }
}

pub async fn handle_consent(workflow: &mut AccessWorkflow, patient_id: &str) -> Result<()> {
    match workflow.select_patient(patient_id).await? {
        Some(consent) => print_consent(&consent),
        None => println!("Consent flags for {} are unavailable.", patient_id),
    }
    Ok(())
}

pub async fn handle_encounter_start(
    workflow: &mut AccessWorkflow,
    patient_id: &str,
    purpose: Option<&str>,
    data_type: Option<&str>,
    justification: Option<String>,
) -> Result<()> {
    let data_type = match data_type {
        Some(raw) => Some(raw.parse::<DataCategory>()?),
        None => None,
    };

    match workflow.select_patient(patient_id).await? {
        Some(consent) => print_consent(&consent),
        None => println!("Consent flags unavailable, continuing without them."),
    }

    let mut declaration = workflow.purpose_declaration(data_type).await?;
    if declaration.is_dead_end() {
        bail!("no purpose permits this access for your session; nothing was created");
    }

    let purpose = match purpose {
        Some(raw) => raw.parse::<Purpose>()?,
        None => {
            println!("A purpose must be declared before an encounter is opened.");
            println!("Selectable purposes:");
            for option in declaration.options() {
                println!("  {}", option);
            }
            println!("Re-run with --purpose <purpose> to confirm.");
            return Ok(());
        }
    };

    declaration.select(purpose)?;
    let confirmed = declaration.confirm()?;

    let encounter = workflow.open_encounter(confirmed, justification).await?;
    println!("Encounter {} open for {}.", encounter.encounter_id, encounter.patient_id);
    println!("  purpose: {}", encounter.purpose);
    println!("  expires: {}", encounter.expires_at.to_rfc3339());
    Ok(())
}

pub async fn handle_break_glass(workflow: &mut AccessWorkflow, args: BreakGlassArgs) -> Result<()> {
    let emergency_type = args.emergency_type.parse::<EmergencyType>()?;

    let encounter = workflow
        .break_glass(&args.patient_id, &args.reason, emergency_type)
        .await?;

    println!(
        "EMERGENCY ACCESS GRANTED to {} (encounter {}).",
        encounter.patient_id, encounter.encounter_id
    );
    println!("  expires: {}", encounter.expires_at.to_rfc3339());
    println!("This access is audited, visible to the patient, and the");
    println!("administrators have been notified.");
    Ok(())
}
