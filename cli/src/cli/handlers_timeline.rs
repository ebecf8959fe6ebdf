// cli/src/cli/handlers_timeline.rs
use anyhow::Result;
use log::warn;

use audit_log::{AuditAction, AuditEvent, AuditSink};
use client::session_store::SessionStore;
use clinical_access::timeline::{group_by_type, visible_to};
use clinical_access::TimelineService;
use models::timeline::TimelineEvent;

fn print_event(event: &TimelineEvent) {
    println!(
        "  {}  [{}] {}",
        event.timestamp.to_rfc3339(),
        event.event_type.as_str(),
        event.title
    );
    if !event.summary.is_empty() {
        println!("      {}", event.summary);
    }
}

pub async fn handle_timeline(
    timeline: &TimelineService,
    sessions: &SessionStore,
    audit: &dyn AuditSink,
    encounter_id: &str,
    group: bool,
) -> Result<()> {
    let session = sessions.require().await?;
    let events = timeline.fetch(&session, encounter_id).await?;
    let events = visible_to(session.role, &events);

    let viewed = AuditEvent::new(&session.user_id, session.role, AuditAction::TimelineViewed)
        .for_encounter(encounter_id);
    if let Err(e) = audit.record(viewed).await {
        warn!("Audit journal write failed: {}", e);
    }

    if events.is_empty() {
        println!("No timeline events for encounter {}.", encounter_id);
        return Ok(());
    }

    if group {
        for (event_type, entries) in group_by_type(&events) {
            println!("{} ({})", event_type.as_str(), entries.len());
            for event in &entries {
                print_event(event);
            }
        }
    } else {
        println!("Timeline for encounter {}:", encounter_id);
        for event in &events {
            print_event(event);
        }
    }
    Ok(())
}

pub async fn handle_encounter_list(
    timeline: &TimelineService,
    sessions: &SessionStore,
    patient_id: &str,
) -> Result<()> {
    let session = sessions.require().await?;
    let encounters = timeline.list_encounters(&session, patient_id).await?;

    if encounters.is_empty() {
        println!("No encounters recorded for {}.", patient_id);
        return Ok(());
    }

    println!("Encounters for {}:", patient_id);
    for enc in &encounters {
        let kind = if enc.break_glass { "break-glass" } else { "normal" };
        let expiry = enc
            .expires_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {}  purpose={} kind={} opened={} expires={}",
            enc.encounter_id,
            enc.purpose,
            kind,
            enc.created_at.to_rfc3339(),
            expiry
        );
    }
    Ok(())
}
