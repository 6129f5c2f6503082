use std::time::Duration;

use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::MissedTickBehavior,
};

use super::SimulationHandle;

/// drives a simulation with one step per period of wall-clock time. the
/// ticker stops when [`Ticker::stop`] is called or when it is dropped, so no
/// step is sent after its owner goes away.
pub struct Ticker {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<usize>>,
}

impl Ticker {
    /// starts ticking on the current tokio runtime. the first step happens one
    /// period after starting.
    pub fn start(handle: SimulationHandle, period: Duration) -> Ticker {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut steps = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => match handle.step().await {
                        Ok(report) => {
                            steps += 1;
                            if let Some(event) = report.disruption {
                                log::info!("{} {event}", report.current_date_time);
                            }
                        }
                        Err(e) => {
                            log::warn!("ticker stopped after {steps} steps: {e}");
                            break;
                        }
                    },
                }
            }
            steps
        });
        Ticker {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// stops ticking and waits for a step in flight to finish. returns the
    /// number of steps taken.
    pub async fn stop(mut self) -> usize {
        self.signal_shutdown();
        match self.task.take() {
            Some(task) => match task.await {
                Ok(steps) => steps,
                Err(e) => {
                    log::error!("ticker task failed: {e}");
                    0
                }
            },
            None => 0,
        }
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}
