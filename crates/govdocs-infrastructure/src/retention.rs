//! Job history retention sweep.
//!
//! `ScrapeJob` rows accumulate indefinitely unless something purges them;
//! spec §3 names the retention window but leaves enforcement unspecified, so
//! a periodic background task owns it here, spawned once at startup and
//! cancelled the same way `ScrapeOrchestrator` cancels in-flight jobs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use govdocs_domain::ports::repositories::JobRepository;

/// How often the sweep checks for jobs past their retention window.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Default retention window, derived from `govdocs_domain::constants::JOB_RETENTION_DAYS`.
#[must_use]
pub fn default_retention() -> Duration {
    Duration::from_secs(govdocs_domain::constants::JOB_RETENTION_DAYS as u64 * 24 * 60 * 60)
}

/// Spawn the retention sweep loop. Runs until `cancel` fires, then returns.
pub fn spawn_retention_sweep(
    job_repo: Arc<dyn JobRepository>,
    retention: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        ticker.tick().await; // first tick fires immediately, skip it
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(err) = sweep_once(&job_repo, retention).await {
                        tracing::warn!(error = %err, "job retention sweep failed");
                    }
                }
            }
        }
    })
}

async fn sweep_once(job_repo: &Arc<dyn JobRepository>, retention: Duration) -> govdocs_domain::error::Result<()> {
    let cutoff = govdocs_domain::utils::unix_now() - retention.as_secs() as i64;
    let stale = job_repo.list_finished_before(cutoff).await?;
    let purged = stale.len();
    for job in stale {
        job_repo.delete(job.id).await?;
    }
    if purged > 0 {
        tracing::info!(purged, "purged finished scrape jobs past retention window");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;
    use govdocs_domain::entities::ScrapeJob;
    use govdocs_domain::error::Result;
    use govdocs_domain::value_objects::{JobId, ScrapeJobStatus, SourceId};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct FakeJobRepo {
        jobs: Mutex<Vec<ScrapeJob>>,
    }

    #[async_trait]
    impl JobRepository for FakeJobRepo {
        async fn create(&self, job: &ScrapeJob) -> Result<()> {
            self.jobs.lock().await.push(job.clone());
            Ok(())
        }
        async fn get_by_id(&self, id: JobId) -> Result<ScrapeJob> {
            self.jobs
                .lock()
                .await
                .iter()
                .find(|j| j.id == id)
                .cloned()
                .ok_or_else(|| govdocs_domain::error::Error::not_found(format!("job {id}")))
        }
        async fn list_active_for_source(&self, _source_id: SourceId) -> Result<Vec<ScrapeJob>> {
            Ok(vec![])
        }
        async fn list_active(&self) -> Result<Vec<ScrapeJob>> {
            Ok(vec![])
        }
        async fn list_finished_before(&self, cutoff_unix: i64) -> Result<Vec<ScrapeJob>> {
            let jobs = self.jobs.lock().await;
            Ok(jobs
                .iter()
                .filter(|j| j.finished_at.is_some_and(|f| f < cutoff_unix))
                .cloned()
                .collect())
        }
        async fn update(&self, job: &ScrapeJob) -> Result<()> {
            let mut jobs = self.jobs.lock().await;
            if let Some(slot) = jobs.iter_mut().find(|j| j.id == job.id) {
                *slot = job.clone();
            }
            Ok(())
        }
        async fn delete(&self, id: JobId) -> Result<()> {
            self.jobs.lock().await.retain(|j| j.id != id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn sweep_once_purges_only_finished_jobs_past_cutoff() {
        let repo: Arc<dyn JobRepository> = Arc::new(FakeJobRepo::default());
        let source_id = SourceId::new();

        let mut old_job = ScrapeJob::new(source_id);
        old_job.finish(ScrapeJobStatus::Succeeded, None);
        old_job.finished_at = Some(0);
        repo.create(&old_job).await.unwrap();

        let mut recent_job = ScrapeJob::new(source_id);
        recent_job.finish(ScrapeJobStatus::Succeeded, None);
        recent_job.finished_at = Some(govdocs_domain::utils::unix_now());
        repo.create(&recent_job).await.unwrap();

        let still_running = ScrapeJob::new(source_id);
        repo.create(&still_running).await.unwrap();

        sweep_once(&repo, StdDuration::from_secs(30 * 24 * 60 * 60)).await.unwrap();

        assert!(repo.get_by_id(old_job.id).await.is_err());
        assert!(repo.get_by_id(recent_job.id).await.is_ok());
        assert!(repo.get_by_id(still_running.id).await.is_ok());
    }
}
