//! Async runtime and task management for the TUI
//!
//! This module implements the dual-channel event-driven architecture:
//! - Input channel (priority): User input events that are never dropped
//! - Data channel: Data updates that may be dropped under backpressure
//!
//! The main loop uses `tokio::select!` with bias toward the input channel
//! to prevent input starvation under heavy data update loads.
//!
//! Selection fetches are spawned per selection with a dedicated cancellation
//! token and tag every event with the selection generation; completions that
//! outlive their selection are dropped by the App.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::shim::{ShimClient, ShimError};
use crate::tui::app::{App, SelectionPlan};
use crate::tui::event::{DataEvent, DataSource, EventResult, InputEvent, SelectionData};

/// Channel capacities
const INPUT_CHANNEL_CAPACITY: usize = 16;
const DATA_CHANNEL_CAPACITY: usize = 32;

const ANIMATION_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Idle detection threshold
const IDLE_THRESHOLD: Duration = Duration::from_secs(30);
/// Multiplier applied to the poll interval when idle
const IDLE_MULTIPLIER: f32 = 2.0;

/// Shared state for adaptive throttling of the applications poller
pub struct FetcherThrottle {
    /// Multiplier applied to base interval (stored as multiplier * 100 for atomicity)
    multiplier: AtomicU32,
    /// Recent error count (rolling window)
    error_count: AtomicU32,
    /// Recent channel-full count (rolling window)
    backpressure_count: AtomicU32,
    /// Last user activity timestamp (seconds since start)
    last_activity: std::sync::atomic::AtomicU64,
    /// Whether idle slowdown is enabled at all
    idle_slowdown: bool,
    idle_threshold: Duration,
    start_time: Instant,
}

impl FetcherThrottle {
    pub fn new(idle_slowdown: bool, idle_threshold: Duration) -> Self {
        Self {
            multiplier: AtomicU32::new(100), // 1.0x
            error_count: AtomicU32::new(0),
            backpressure_count: AtomicU32::new(0),
            last_activity: std::sync::atomic::AtomicU64::new(0),
            idle_slowdown,
            idle_threshold,
            start_time: Instant::now(),
        }
    }

    /// Get the effective multiplier (includes idle detection)
    #[must_use]
    pub fn get_multiplier(&self) -> f32 {
        let base = self.multiplier.load(Ordering::Relaxed) as f32 / 100.0;
        if self.is_idle() {
            base * IDLE_MULTIPLIER
        } else {
            base
        }
    }

    /// Check if the user has been idle for longer than the threshold
    #[must_use]
    pub fn is_idle(&self) -> bool {
        if !self.idle_slowdown {
            return false;
        }
        let last = self.last_activity.load(Ordering::Relaxed);
        let now = self.start_time.elapsed().as_secs();
        now.saturating_sub(last) > self.idle_threshold.as_secs()
    }

    /// Record user activity (call this on any user input)
    pub fn record_activity(&self) {
        let now = self.start_time.elapsed().as_secs();
        self.last_activity.store(now, Ordering::Relaxed);
    }

    /// Called when try_send fails (channel full)
    pub fn record_backpressure(&self) {
        let count = self.backpressure_count.fetch_add(1, Ordering::Relaxed);
        if count >= 5 {
            self.increase_multiplier();
        }
    }

    /// Called on shim fetch error
    pub fn record_error(&self) {
        let count = self.error_count.fetch_add(1, Ordering::Relaxed);
        if count >= 3 {
            self.increase_multiplier();
        }
    }

    fn increase_multiplier(&self) {
        // Cap at 4x slowdown
        let current = self.multiplier.load(Ordering::Relaxed);
        if current < 400 {
            self.multiplier
                .store((current + 50).min(400), Ordering::Relaxed);
        }
    }

    /// Called periodically to gradually restore normal speed
    pub fn decay(&self) {
        let current = self.multiplier.load(Ordering::Relaxed);
        if current > 100 {
            self.multiplier
                .store((current - 10).max(100), Ordering::Relaxed);
        }
        self.error_count.store(0, Ordering::Relaxed);
        self.backpressure_count.store(0, Ordering::Relaxed);
    }
}

impl Default for FetcherThrottle {
    fn default() -> Self {
        Self::new(true, IDLE_THRESHOLD)
    }
}

/// TUI runtime managing all background tasks
pub struct TuiRuntime {
    cancel_token: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
}

impl TuiRuntime {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            task_handles: Vec::new(),
        }
    }

    /// Get a clone of the cancellation token for spawning tasks
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Add a task handle to track
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.task_handles.push(handle);
    }

    /// Signal shutdown and wait for tasks to complete
    pub async fn shutdown(self) {
        self.cancel_token.cancel();

        let shutdown = async {
            for handle in self.task_handles {
                let _ = handle.await;
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = tokio::time::sleep(Duration::from_secs(2)) => {
                // Tasks did not stop in time; they will be dropped
            }
        }
    }
}

impl Default for TuiRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the input event reader task
pub fn spawn_input_task(tx: mpsc::Sender<InputEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let input_event = match event {
                                Event::Key(key) => Some(InputEvent::Key(key)),
                                Event::Mouse(mouse) => Some(InputEvent::Mouse(mouse)),
                                Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
                                _ => None,
                            };

                            if let Some(evt) = input_event {
                                // Input channel should never be full, but handle it gracefully
                                if tx.send(evt).await.is_err() {
                                    break; // Receiver dropped
                                }
                            }
                        }
                        Some(Err(e)) => {
                            let is_fatal = matches!(
                                e.kind(),
                                std::io::ErrorKind::BrokenPipe
                                    | std::io::ErrorKind::ConnectionReset
                                    | std::io::ErrorKind::UnexpectedEof
                            );

                            if is_fatal {
                                tracing::info!("Terminal disconnected: {:?}", e);
                                break;
                            } else {
                                tracing::warn!("Terminal event read error: {:?}", e);
                            }
                        }
                        None => break, // Stream ended
                    }
                }
            }
        }
    })
}

/// Spawn the applications list poller
pub fn spawn_applications_fetcher(
    shim: Arc<ShimClient>,
    tx: mpsc::Sender<DataEvent>,
    cancel: CancellationToken,
    throttle: Arc<FetcherThrottle>,
    base_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Initial fetch immediately
        fetch_and_send_applications(&shim, &tx, &throttle).await;

        loop {
            let multiplier = throttle.get_multiplier();
            let current_interval =
                Duration::from_secs_f32(base_interval.as_secs_f32() * multiplier);

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(current_interval) => {
                    fetch_and_send_applications(&shim, &tx, &throttle).await;
                }
            }
        }
    })
}

async fn fetch_and_send_applications(
    shim: &ShimClient,
    tx: &mpsc::Sender<DataEvent>,
    throttle: &FetcherThrottle,
) {
    match shim.fetch_applications().await {
        Ok(apps) => {
            if tx.try_send(DataEvent::ApplicationsUpdated(apps)).is_err() {
                throttle.record_backpressure();
            }
        }
        Err(e) => {
            throttle.record_error();
            if tx
                .try_send(DataEvent::FetchError {
                    generation: None,
                    source: DataSource::Applications,
                    error: e.to_string(),
                })
                .is_err()
            {
                tracing::warn!("Could not send applications fetch error (channel full)");
            }
        }
    }
}

/// Send a selection-scoped result, tagging it with the selection generation.
fn send_selection_result<T>(
    result: Result<T, ShimError>,
    tx: &mpsc::Sender<DataEvent>,
    generation: u64,
    source: DataSource,
    into_data: impl FnOnce(T) -> SelectionData,
) {
    match result {
        Ok(value) => {
            let event = DataEvent::Selection {
                generation,
                data: into_data(value),
            };
            if tx.try_send(event).is_err() {
                tracing::warn!(%source, "Could not send selection result (channel full)");
            }
        }
        Err(e) => send_selection_error(&e, tx, generation, source),
    }
}

fn send_selection_error(
    error: &ShimError,
    tx: &mpsc::Sender<DataEvent>,
    generation: u64,
    source: DataSource,
) {
    let event = DataEvent::FetchError {
        generation: Some(generation),
        source,
        error: error.to_string(),
    };
    if tx.try_send(event).is_err() {
        tracing::warn!(%source, "Could not send selection error (channel full)");
    }
}

/// Spawn a task that aborts when the selection is superseded.
fn spawn_scoped<F>(cancel: CancellationToken, fut: F) -> JoinHandle<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = fut => {}
        }
    })
}

/// Fan out the fetches for a fresh selection.
///
/// Each region is fetched independently; a failure in one leaves the others
/// untouched. The driver log and job result are chained after the AM
/// container arrives, matching the order the shim expects.
pub fn spawn_selection_fetches(
    shim: Arc<ShimClient>,
    tx: mpsc::Sender<DataEvent>,
    plan: SelectionPlan,
    generation: u64,
    cancel: CancellationToken,
) {
    let app_id = plan.app_id.clone();

    // Basic information (start and end times)
    {
        let (shim, tx, app_id) = (Arc::clone(&shim), tx.clone(), app_id.clone());
        spawn_scoped(cancel.clone(), async move {
            let result = shim.fetch_application(&app_id).await;
            send_selection_result(result, &tx, generation, DataSource::BasicInfo, |app| {
                SelectionData::BasicInfo(app)
            });
        });
    }

    // AM container, chaining the driver log and job result on success
    if plan.fetch_am_container {
        let (shim, tx, app_id) = (Arc::clone(&shim), tx.clone(), app_id.clone());
        let chain_logs = plan.chain_logs_after_container;
        let inner_cancel = cancel.clone();
        spawn_scoped(cancel.clone(), async move {
            match shim.fetch_am_container(&app_id).await {
                Ok(resp) => {
                    let container = resp.am_container().cloned();
                    let has_container = container.is_some();
                    send_selection_result(
                        Ok(container),
                        &tx,
                        generation,
                        DataSource::AmContainer,
                        SelectionData::AmContainer,
                    );

                    if chain_logs && has_container {
                        {
                            let (shim, tx, app_id) =
                                (Arc::clone(&shim), tx.clone(), app_id.clone());
                            spawn_scoped(inner_cancel.clone(), async move {
                                let result = shim.fetch_driver_log(&app_id).await;
                                send_selection_result(
                                    result,
                                    &tx,
                                    generation,
                                    DataSource::DriverLog,
                                    SelectionData::DriverLog,
                                );
                            });
                        }
                        spawn_scoped(inner_cancel, async move {
                            let result = shim.fetch_job_result(&app_id).await;
                            send_selection_result(
                                result,
                                &tx,
                                generation,
                                DataSource::JobResult,
                                SelectionData::JobResult,
                            );
                        });
                    }
                }
                Err(e) => send_selection_error(&e, &tx, generation, DataSource::AmContainer),
            }
        });
    }

    // YARN diagnostics for the error panel
    if plan.fetch_diagnostics {
        let (shim, tx, app_id) = (Arc::clone(&shim), tx.clone(), app_id.clone());
        spawn_scoped(cancel.clone(), async move {
            let result = shim
                .fetch_diagnostics(&app_id)
                .await
                .map(|resp| resp.display_message());
            send_selection_result(
                result,
                &tx,
                generation,
                DataSource::Diagnostics,
                SelectionData::Diagnostics,
            );
        });
    }

    // Job list
    if plan.fetch_jobs {
        let (shim, tx, app_id) = (Arc::clone(&shim), tx.clone(), app_id.clone());
        spawn_scoped(cancel.clone(), async move {
            let result = shim.fetch_jobs(&app_id).await;
            send_selection_result(result, &tx, generation, DataSource::Jobs, SelectionData::Jobs);
        });
    }

    // Stage list, then each stage's detail for the task table and cascade
    if plan.fetch_stages {
        let (shim, tx, app_id) = (Arc::clone(&shim), tx.clone(), app_id.clone());
        let attempt_id = plan.attempt_id;
        spawn_scoped(cancel.clone(), async move {
            match shim.fetch_attempt_stages(&app_id, attempt_id).await {
                Ok(stages) => {
                    let stage_ids: Vec<u64> = stages.iter().map(|s| s.stage_id).collect();
                    send_selection_result(
                        Ok(stages),
                        &tx,
                        generation,
                        DataSource::Stages,
                        SelectionData::Stages,
                    );

                    for stage_id in stage_ids {
                        match shim.fetch_stage_detail(&app_id, attempt_id, stage_id).await {
                            Ok(Some(detail)) => {
                                send_selection_result(
                                    Ok(detail),
                                    &tx,
                                    generation,
                                    DataSource::StageTasks,
                                    SelectionData::StageTasks,
                                );
                            }
                            Ok(None) => {
                                tracing::debug!(stage_id, "stage detail not available");
                            }
                            Err(e) => {
                                tracing::debug!(stage_id, error = %e, "stage detail fetch failed");
                            }
                        }
                    }
                }
                Err(e) => send_selection_error(&e, &tx, generation, DataSource::Stages),
            }
        });
    }

    // Cached RDDs
    if plan.fetch_storage {
        let (shim, tx, app_id) = (Arc::clone(&shim), tx.clone(), app_id.clone());
        spawn_scoped(cancel.clone(), async move {
            let result = shim.fetch_storage(&app_id).await;
            send_selection_result(
                result,
                &tx,
                generation,
                DataSource::Storage,
                SelectionData::Storage,
            );
        });
    }

    // Executors. Malformed executor payloads are logged and dropped without
    // touching the UI.
    if plan.fetch_executors {
        let attempt_id = plan.attempt_id;
        spawn_scoped(cancel, async move {
            match shim.fetch_attempt_executors(&app_id, attempt_id).await {
                Ok(executors) => {
                    send_selection_result(
                        Ok(executors),
                        &tx,
                        generation,
                        DataSource::Executors,
                        SelectionData::Executors,
                    );
                }
                Err(ShimError::Decode { message, .. }) => {
                    tracing::debug!(%message, "ignoring malformed executor payload");
                }
                Err(e) => send_selection_error(&e, &tx, generation, DataSource::Executors),
            }
        });
    }
}

/// Spawn the animation tick task
pub fn spawn_animation_tick(
    tx: mpsc::Sender<DataEvent>,
    cancel: CancellationToken,
    animation_visible: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ANIMATION_TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if animation_visible.load(Ordering::Relaxed) {
                        let _ = tx.try_send(DataEvent::AnimationTick);
                    }
                }
            }
        }
    })
}

/// Spawn the throttle decay task
pub fn spawn_throttle_decay(
    cancel: CancellationToken,
    throttle: Arc<FetcherThrottle>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    throttle.decay();
                }
            }
        }
    })
}

/// Run the main TUI event loop
pub async fn run_event_loop(
    mut app: App,
    mut input_rx: mpsc::Receiver<InputEvent>,
    mut data_rx: mpsc::Receiver<DataEvent>,
    throttle: Arc<FetcherThrottle>,
    mut render_fn: impl FnMut(&App) -> Result<()>,
) -> Result<()> {
    let mut needs_render = true;

    throttle.record_activity();

    loop {
        if needs_render {
            render_fn(&app)?;
            needs_render = false;
        }

        if !app.running {
            break;
        }

        tokio::select! {
            // Bias toward input channel to prevent input starvation
            biased;

            Some(input) = input_rx.recv() => {
                throttle.record_activity();

                match app.handle_input(input) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            Some(data) = data_rx.recv() => {
                match app.handle_data(data) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            else => break,
        }
    }

    Ok(())
}

/// Create the dual channels for the TUI
pub fn create_channels() -> (
    mpsc::Sender<InputEvent>,
    mpsc::Receiver<InputEvent>,
    mpsc::Sender<DataEvent>,
    mpsc::Receiver<DataEvent>,
) {
    let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    let (data_tx, data_rx) = mpsc::channel(DATA_CHANNEL_CAPACITY);
    (input_tx, input_rx, data_tx, data_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_default() {
        let throttle = FetcherThrottle::default();
        assert_eq!(throttle.get_multiplier(), 1.0);
    }

    #[test]
    fn test_throttle_backpressure() {
        let throttle = FetcherThrottle::default();

        for _ in 0..6 {
            throttle.record_backpressure();
        }

        assert!(throttle.get_multiplier() > 1.0);
    }

    #[test]
    fn test_throttle_decay() {
        let throttle = FetcherThrottle::default();
        for _ in 0..4 {
            throttle.record_error();
        }
        let raised = throttle.get_multiplier();
        assert!(raised > 1.0);

        throttle.decay();
        assert!(throttle.get_multiplier() < raised);
    }

    #[test]
    fn test_throttle_cap() {
        let throttle = FetcherThrottle::default();

        // Should cap at 4x
        for _ in 0..100 {
            throttle.record_error();
        }

        assert_eq!(throttle.get_multiplier(), 4.0);
    }

    #[test]
    fn test_idle_slowdown_disabled() {
        let throttle = FetcherThrottle::new(false, Duration::from_secs(0));
        assert!(!throttle.is_idle());
    }
}
