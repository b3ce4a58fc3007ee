// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::domain::models::transcript::{
    ResultVariant, SemesterBlock, StudentIdentity, SubjectRecord, Transcript,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct MemoryCache {
    entries: Mutex<HashMap<String, NormalizedResult>>,
    sets: AtomicUsize,
}

#[async_trait]
impl TranscriptCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<NormalizedResult> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &NormalizedResult, _ttl: Duration) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
    }
}

#[derive(Default)]
struct MemoryRepository {
    rows: Mutex<HashMap<String, NormalizedResult>>,
}

#[async_trait]
impl TranscriptRepository for MemoryRepository {
    async fn get(&self, hall_ticket: &str) -> Result<Option<NormalizedResult>, RepositoryError> {
        Ok(self.rows.lock().unwrap().get(hall_ticket).cloned())
    }

    async fn put(&self, hall_ticket: &str, result: &NormalizedResult) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .unwrap()
            .insert(hall_ticket.to_string(), result.clone());
        Ok(())
    }
}

enum Scripted {
    Found,
    Missing,
    Crash,
}

struct ScriptedSource {
    mode: Scripted,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(mode: Scripted) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TranscriptSource for ScriptedSource {
    async fn scrape_transcript(
        &self,
        hall_ticket: &HallTicketNumber,
    ) -> anyhow::Result<Option<Transcript>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Scripted::Found => Ok(Transcript::from_blocks(vec![block(hall_ticket.as_str())])),
            Scripted::Missing => Ok(None),
            Scripted::Crash => Err(anyhow::anyhow!("portal layout changed")),
        }
    }
}

fn block(hall_ticket: &str) -> SemesterBlock {
    SemesterBlock {
        semester: "1-1".to_string(),
        identity: Arc::new(StudentIdentity {
            hall_ticket: hall_ticket.to_string(),
            name: "A".to_string(),
            father_name: "B".to_string(),
            college_code: "AB".to_string(),
            college: Some("Alpha College".to_string()),
            branch: None,
        }),
        subjects: vec![SubjectRecord {
            subject_code: "S1".to_string(),
            subject_name: "Subject".to_string(),
            exam_code: "X1".to_string(),
            grade: "A".to_string(),
            credits: "3".to_string(),
            semester: "1-1".to_string(),
            attempt: ResultVariant::Regular,
            internal: None,
            external: None,
            total: None,
        }],
    }
}

struct Harness {
    cache: Arc<MemoryCache>,
    repository: Arc<MemoryRepository>,
    source: Arc<ScriptedSource>,
    service: TranscriptService,
}

fn harness(mode: Scripted) -> Harness {
    let cache = Arc::new(MemoryCache::default());
    let repository = Arc::new(MemoryRepository::default());
    let source = Arc::new(ScriptedSource::new(mode));
    let service = TranscriptService::new(
        cache.clone(),
        repository.clone(),
        source.clone(),
        Duration::from_secs(60),
    );
    Harness {
        cache,
        repository,
        source,
        service,
    }
}

#[tokio::test]
async fn test_scrape_persists_and_caches_then_serves_from_cache() {
    let h = harness(Scripted::Found);

    let first = h.service.lookup(" 20j41a0501 ").await.unwrap();
    assert_eq!(first.source, LookupSource::Scraper);
    assert!(!first.cached);
    assert_eq!(first.data.hall_ticket, "20J41A0501");
    assert_eq!(first.data.semesters.len(), 1);
    assert!(h.repository.rows.lock().unwrap().contains_key("20J41A0501"));

    let second = h.service.lookup("20J41A0501").await.unwrap();
    assert_eq!(second.source, LookupSource::Cache);
    assert!(second.cached);
    assert_eq!(second.data, first.data);
    assert_eq!(h.source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_store_hit_populates_cache() {
    let h = harness(Scripted::Missing);
    let stored = NormalizedResult::from_transcript(
        "20J41A0501",
        Transcript::from_blocks(vec![block("20J41A0501")]).unwrap(),
    );
    h.repository
        .rows
        .lock()
        .unwrap()
        .insert("20J41A0501".to_string(), stored.clone());

    let result = h.service.lookup("20j41a0501").await.unwrap();
    assert_eq!(result.source, LookupSource::Db);
    assert!(result.cached);
    assert_eq!(result.data, stored);
    assert_eq!(h.cache.sets.load(Ordering::SeqCst), 1);
    assert_eq!(h.source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_absent_transcript_is_not_found_and_not_persisted() {
    let h = harness(Scripted::Missing);

    let err = h.service.lookup("1234").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
    assert!(h.repository.rows.lock().unwrap().is_empty());
    assert_eq!(h.cache.sets.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_scraper_failure_surfaces_as_scrape_error() {
    let h = harness(Scripted::Crash);

    let err = h.service.lookup("1234").await.unwrap_err();
    assert!(matches!(err, ServiceError::Scrape(_)));
}

#[tokio::test]
async fn test_invalid_hall_ticket_is_rejected_before_lookup() {
    let h = harness(Scripted::Found);

    let err = h.service.lookup("   ").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidHallTicket(HallTicketError::Empty)));
    assert_eq!(h.source.calls.load(Ordering::SeqCst), 0);
}
