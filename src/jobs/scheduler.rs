//! Minimal in-process job scheduler: one tokio task per registered job,
//! ticking on a fixed interval, with graceful shutdown over a watch channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy)]
pub enum JobFrequency {
    /// Run every N seconds (used in tests).
    Seconds(u64),
    /// Run once a day.
    Daily,
}

impl JobFrequency {
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Daily => Duration::from_secs(86_400),
        }
    }
}

/// A named batch operation invoked on a fixed calendar. Implementations must
/// be idempotent and safe to re-run out of schedule.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &'static str;

    fn frequency(&self) -> JobFrequency;

    async fn execute(&self) -> Result<(), String>;
}

pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one task per registered job. The first tick is skipped so a
    /// restart does not immediately re-run every daily job.
    pub fn start(&mut self) {
        info!("Starting job scheduler with {} jobs", self.jobs.len());

        for job in &self.jobs {
            let job = Arc::clone(job);
            let mut shutdown_rx = self.shutdown_rx.clone();

            let handle = tokio::spawn(async move {
                let name = job.name();
                let mut interval = tokio::time::interval(job.frequency().duration());
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            info!(job = name, "Job starting");
                            match job.execute().await {
                                Ok(()) => info!(job = name, "Job completed"),
                                Err(e) => error!(job = name, error = %e, "Job failed"),
                            }
                        }
                        _ = shutdown_rx.changed() => {
                            if *shutdown_rx.borrow() {
                                info!(job = name, "Job shutting down");
                                break;
                            }
                        }
                    }
                }
            });

            self.handles.push(handle);
        }
    }

    /// Signal every job task to stop; returns immediately.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for all job tasks to wind down, up to `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!("Job shutdown timed out after {:?}", timeout),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting_job"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Seconds(1)
        }

        async fn execute(&self) -> Result<(), String> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn frequency_durations() {
        assert_eq!(JobFrequency::Seconds(30).duration(), Duration::from_secs(30));
        assert_eq!(JobFrequency::Daily.duration(), Duration::from_secs(86_400));
    }

    #[tokio::test]
    async fn scheduler_starts_and_shuts_down() {
        let mut scheduler = JobScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(2)).await;
    }
}
