use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::domain::{AnalysisMode, AnalysisRequest, NormalizedReport, Symptoms};

/// Identifies an analysis. Two uploads only share a key when their bytes match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub filename: String,
    pub image_sha256: String,
    pub mode: AnalysisMode,
    pub symptoms: Symptoms,
}

impl CacheKey {
    pub fn for_request(request: &AnalysisRequest) -> Self {
        Self {
            filename: request.filename.clone(),
            image_sha256: format!("{:x}", Sha256::digest(&request.image)),
            mode: request.mode,
            symptoms: request.symptoms.clone(),
        }
    }
}

struct CachedReport {
    report: NormalizedReport,
    stored_at: Instant,
}

/// Short-lived in-memory store of finished reports, keyed by upload content.
pub struct ReportCache {
    entries: RwLock<HashMap<CacheKey, CachedReport>>,
    ttl: Duration,
    max_entries: usize,
}

impl ReportCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<NormalizedReport> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|cached| cached.stored_at.elapsed() < self.ttl)
            .map(|cached| cached.report.clone())
    }

    pub async fn insert(&self, key: CacheKey, report: NormalizedReport) {
        let mut entries = self.entries.write().await;

        entries.retain(|_, cached| cached.stored_at.elapsed() < self.ttl);

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CachedReport {
                report,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
