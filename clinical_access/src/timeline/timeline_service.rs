// clinical_access/src/timeline/timeline_service.rs
//! Timeline reads for an encounter. Events are immutable and ordered by
//! the server; the client memoizes the fetch, then only groups and
//! filters.
use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use caching::Cache;
use client::api::AccessApi;
use models::errors::AccessResult;
use models::roles::Role;
use models::session::Session;
use models::timeline::{EventType, TimelineEvent};
use models::wire::EncounterSummary;

const TIMELINE_CACHE_CAPACITY: u64 = 64;

pub struct TimelineService {
    api: Arc<dyn AccessApi>,
    cache: Cache<Vec<TimelineEvent>>,
}

impl TimelineService {
    pub fn new(api: Arc<dyn AccessApi>) -> Self {
        TimelineService {
            api,
            cache: Cache::new(TIMELINE_CACHE_CAPACITY),
        }
    }

    /// Fetch an encounter's timeline, serving repeats from the cache.
    pub async fn fetch(
        &self,
        session: &Session,
        encounter_id: &str,
    ) -> AccessResult<Vec<TimelineEvent>> {
        if let Some(events) = self.cache.get(encounter_id).await {
            debug!("Timeline for {} served from cache", encounter_id);
            return Ok(events);
        }
        let resp = self
            .api
            .fetch_timeline(&session.access_token, encounter_id)
            .await?;
        let _ = self
            .cache
            .insert(encounter_id.to_string(), resp.timeline.clone())
            .await;
        Ok(resp.timeline)
    }

    pub async fn list_encounters(
        &self,
        session: &Session,
        patient_id: &str,
    ) -> AccessResult<Vec<EncounterSummary>> {
        let resp = self
            .api
            .list_encounters(&session.access_token, patient_id)
            .await?;
        Ok(resp.encounters)
    }
}

/// Group a flat event list by type. Server (chronological) order is
/// preserved inside each group.
pub fn group_by_type(events: &[TimelineEvent]) -> BTreeMap<EventType, Vec<TimelineEvent>> {
    let mut groups: BTreeMap<EventType, Vec<TimelineEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.event_type).or_default().push(event.clone());
    }
    groups
}

/// Visibility filter: patients see only patient-visible entries, every
/// clinical role sees the full list.
pub fn visible_to(role: Role, events: &[TimelineEvent]) -> Vec<TimelineEvent> {
    events
        .iter()
        .filter(|e| role != Role::Patient || e.is_patient_visible())
        .cloned()
        .collect()
}
