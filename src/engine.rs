use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::models::{CheckResult, Status, Target, Transport};

pub struct Monitor {
    http_client: reqwest::Client,
    tcp_timeout: Duration,
}

impl Monitor {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.http_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            tcp_timeout: settings.tcp_timeout(),
        })
    }

    /// Probes every target concurrently and returns one result per target,
    /// in the same order as `targets`.
    pub async fn aggregate(self: &Arc<Self>, targets: &[Target]) -> Vec<CheckResult> {
        let start = Instant::now();
        let total = targets.len();
        let (tx, rx) = mpsc::channel::<(usize, CheckResult)>(total.max(1));

        for (index, target) in targets.iter().enumerate() {
            let monitor_ref = Arc::clone(self);
            let t_clone = target.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let result = monitor_ref.probe(&t_clone).await;
                // the receiver only goes away if the round itself was dropped
                let _ = tx.send((index, result)).await;
            });
        }
        drop(tx);

        let results = collect_in_order(rx, targets).await;

        let degraded = results.iter().filter(|r| !r.is_operational()).count();
        info!(
            "Check round completed {} probes ({} degraded) in {:.2}s.",
            total,
            degraded,
            start.elapsed().as_secs_f64()
        );
        results
    }

    /// Checks a single target. Never fails: transport errors become `Degraded`.
    pub async fn probe(&self, target: &Target) -> CheckResult {
        let status = match target.transport {
            Transport::Http => self.check_http(target).await,
            Transport::Tcp => self.check_tcp(target).await,
        };
        let result = CheckResult::new(target, status);
        debug!("Probed {} ({}) -> {:?}", result.name, result.address, result.status);
        result
    }

    async fn check_http(&self, target: &Target) -> Status {
        match self.http_client.get(&target.address).send().await {
            Ok(response) => {
                let code = response.status();
                // read to the end so the connection goes back to the pool
                if let Err(e) = response.bytes().await {
                    debug!("Discarding body of {} failed: {}", target.name, e);
                }
                if code != StatusCode::OK {
                    warn!("Check failed: {} answered {}", target.name, code);
                }
                status_for_code(code)
            }
            Err(e) => {
                warn!("Check failed: {}: {}", target.name, e);
                Status::Degraded
            }
        }
    }

    async fn check_tcp(&self, target: &Target) -> Status {
        match tokio::time::timeout(self.tcp_timeout, TcpStream::connect(&target.address)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Status::Operational
            }
            Ok(Err(e)) => {
                warn!("Check failed: {}: connect error: {}", target.name, e);
                Status::Degraded
            }
            Err(_) => {
                warn!("Check failed: {}: connect timed out after {:?}", target.name, self.tcp_timeout);
                Status::Degraded
            }
        }
    }
}

/// Drains `rx` until every target has reported or every sender is gone.
/// Targets that never reported come back `Degraded`.
async fn collect_in_order(
    mut rx: mpsc::Receiver<(usize, CheckResult)>,
    targets: &[Target],
) -> Vec<CheckResult> {
    let total = targets.len();
    let mut slots: Vec<Option<CheckResult>> = vec![None; total];
    let mut received = 0;
    while received < total {
        match rx.recv().await {
            Some((index, result)) => {
                slots[index] = Some(result);
                received += 1;
            }
            None => break,
        }
    }

    slots
        .into_iter()
        .zip(targets)
        .map(|(slot, target)| {
            slot.unwrap_or_else(|| {
                error!("Probe for {} never reported, marking degraded", target.name);
                CheckResult::new(target, Status::Degraded)
            })
        })
        .collect()
}

/// Only an exact 200 counts as healthy.
pub fn status_for_code(code: StatusCode) -> Status {
    if code == StatusCode::OK {
        Status::Operational
    } else {
        Status::Degraded
    }
}
