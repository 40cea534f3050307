//! Foreground scan orchestration: discovery, serial analysis, cancellation.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use tracing::{debug, info, warn};

use crate::scanner::AssetScanner;
use crate::settings::GuardianSettings;
use crate::task::{ScanMode, ScanOutcome, ScanRequest, ScanTask};
use crate::types::ScanReport;

/// Cooperative cancellation flag polled once per asset during analysis.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Analysis stops before the next asset.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress sink for the foreground analysis loop.
///
/// `advance` is called once per asset before it is analyzed; this is also
/// the loop's yield point, so implementations may repaint or pump UI state
/// there.
pub trait ScanProgress {
    /// Called once with the total asset count before analysis starts.
    fn begin(&mut self, total: usize);
    /// Called before each asset is analyzed.
    fn advance(&mut self, asset_name: &str);
    /// Called once when the loop ends, complete or cancelled.
    fn finish(&mut self);
}

/// A progress sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn begin(&mut self, _total: usize) {}
    fn advance(&mut self, _asset_name: &str) {}
    fn finish(&mut self) {}
}

/// Drives a scan request through its two phases.
///
/// The background phase runs on a worker thread and hands its outcome back
/// over a channel; the foreground phase - privileged discovery plus the
/// serial per-asset analysis loop - runs on whichever thread consumes the
/// channel. Analysis is intentionally serial: it bounds loaded-asset memory
/// and makes "stop after the Nth asset" cancellation exact.
pub struct ScanCoordinator {
    scanner: Arc<AssetScanner>,
}

impl ScanCoordinator {
    /// Creates a coordinator over a fully registered scanner.
    pub fn new(scanner: Arc<AssetScanner>) -> Self {
        Self { scanner }
    }

    /// Returns the scanner this coordinator dispatches through.
    #[must_use]
    pub fn scanner(&self) -> &AssetScanner {
        &self.scanner
    }

    /// Starts the background phase for a request.
    ///
    /// Returns the receiving end of the completion handoff; the outcome
    /// arrives exactly once.
    pub fn start_scan(&self, request: ScanRequest) -> mpsc::Receiver<ScanOutcome> {
        let (tx, rx) = mpsc::channel();
        ScanTask::new(
            request,
            Arc::downgrade(&self.scanner),
            ScanTask::channel_completion(tx),
        )
        .spawn();
        rx
    }

    /// Runs a scan request end to end on the calling thread.
    ///
    /// Resolves the active profile first (the one place the lazy
    /// construction and quick-settings sync may run), then executes both
    /// phases. A disabled master switch short-circuits with a cleared
    /// report.
    pub fn run_scan(
        &self,
        request: ScanRequest,
        settings: &mut GuardianSettings,
        progress: &mut dyn ScanProgress,
        cancel: &CancelToken,
    ) -> ScanReport {
        if !settings.master_enable {
            info!("analysis is disabled by the master switch");
            return ScanReport::with_message("analysis is globally disabled; report cleared");
        }

        let _ = settings.active_profile();

        let rx = self.start_scan(request);
        match rx.recv() {
            Ok(outcome) => self.finish_scan(outcome, settings, progress, cancel),
            Err(_) => {
                warn!("scan task terminated without delivering an outcome");
                ScanReport::with_message("scan task terminated without reporting")
            }
        }
    }

    /// Runs the foreground phase for a completed background outcome.
    ///
    /// Performs any deferred discovery, then analyzes the discovered assets
    /// one at a time in discovery order, polling `cancel` once per asset.
    /// Cancellation is graceful: findings collected so far are returned
    /// together with a "processed k of N" message.
    pub fn finish_scan(
        &self,
        outcome: ScanOutcome,
        settings: &GuardianSettings,
        progress: &mut dyn ScanProgress,
        cancel: &CancelToken,
    ) -> ScanReport {
        debug!(
            "foreground scan phase starting, mode: {}, task message: {}",
            outcome.mode, outcome.message
        );

        let mut assets = outcome.assets;
        let mut message = outcome.message;

        match outcome.mode {
            ScanMode::Project => {
                assets = self.scanner.scan_assets_in_path(Path::new("."), true);
                message = format!("found {} asset(s) in the project", assets.len());
            }
            ScanMode::SelectedFolders => {
                assets.clear();
                for folder in &outcome.parameters {
                    assets.extend(self.scanner.scan_assets_in_path(Path::new(folder), true));
                }
                message = format!(
                    "found {} asset(s) in {} folder(s)",
                    assets.len(),
                    outcome.parameters.len()
                );
            }
            ScanMode::SelectedAssets | ScanMode::OpenLevel => {}
        }

        let total = assets.len();
        let mut report = ScanReport {
            total,
            ..ScanReport::default()
        };

        progress.begin(total);
        for asset in &assets {
            if cancel.is_cancelled() {
                message = format!(
                    "analysis cancelled: processed {} of {} asset(s)",
                    report.analyzed, total
                );
                break;
            }
            progress.advance(&asset.name);
            self.scanner
                .analyze_single_asset(asset, settings, &mut report.results);
            report.analyzed += 1;
        }
        progress.finish();

        if total == 0 {
            message = format!("{message}; no assets to analyze");
        } else if report.analyzed == total {
            message = format!(
                "{message}; analyzed {} asset(s), {} issue(s) found",
                report.analyzed,
                report.results.len()
            );
        }

        info!("scan finished: {message}");
        report.message = message;
        report
    }
}
