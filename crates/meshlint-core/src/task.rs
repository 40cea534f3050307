//! The asynchronous scan task: one background unit of work per scan request.

use std::sync::mpsc;
use std::sync::Weak;
use std::thread;
use std::time::Instant;

use tracing::{debug, warn};

use crate::asset::AssetRef;
use crate::scanner::AssetScanner;

/// Discovery scope of a scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Every asset in the project content root.
    Project,
    /// Assets under a set of selected folders.
    SelectedFolders,
    /// An explicit selection of assets.
    SelectedAssets,
    /// Assets referenced by the currently open level.
    OpenLevel,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::SelectedFolders => write!(f, "selected-folders"),
            Self::SelectedAssets => write!(f, "selected-assets"),
            Self::OpenLevel => write!(f, "open-level"),
        }
    }
}

/// One user-triggered scan request, consumed by exactly one [`ScanTask`].
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Discovery scope.
    pub mode: ScanMode,
    /// Mode parameters: folder paths for [`ScanMode::SelectedFolders`],
    /// unused otherwise.
    pub parameters: Vec<String>,
    /// Assets discovered on the foreground before the task was created.
    /// Populated for [`ScanMode::SelectedAssets`] and [`ScanMode::OpenLevel`].
    pub pre_discovered: Vec<AssetRef>,
}

impl ScanRequest {
    /// A whole-project scan.
    #[must_use]
    pub fn project() -> Self {
        Self {
            mode: ScanMode::Project,
            parameters: Vec::new(),
            pre_discovered: Vec::new(),
        }
    }

    /// A scan of the given folders.
    #[must_use]
    pub fn folders(paths: Vec<String>) -> Self {
        Self {
            mode: ScanMode::SelectedFolders,
            parameters: paths,
            pre_discovered: Vec::new(),
        }
    }

    /// A scan of explicitly selected assets.
    #[must_use]
    pub fn assets(assets: Vec<AssetRef>) -> Self {
        Self {
            mode: ScanMode::SelectedAssets,
            parameters: Vec::new(),
            pre_discovered: assets,
        }
    }

    /// A scan of the assets referenced by the open level.
    #[must_use]
    pub fn open_level(assets: Vec<AssetRef>) -> Self {
        Self {
            mode: ScanMode::OpenLevel,
            parameters: Vec::new(),
            pre_discovered: assets,
        }
    }
}

/// Payload delivered by a scan task's completion callback, exactly once.
///
/// For `Project`/`SelectedFolders` the asset list is empty and `parameters`
/// carries the original request forward, so the foreground handler knows
/// what to discover. For `SelectedAssets`/`OpenLevel` the list holds the
/// pre-discovered assets.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Scope of the completed request.
    pub mode: ScanMode,
    /// Original request parameters, carried forward.
    pub parameters: Vec<String>,
    /// Assets ready for analysis, if discovery already happened.
    pub assets: Vec<AssetRef>,
    /// Status message describing this phase.
    pub message: String,
}

/// Completion callback invoked exactly once per task.
pub type ScanCompletion = Box<dyn FnOnce(ScanOutcome) + Send>;

/// Lifecycle states of a scan task. Terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Constructed, not yet run.
    Created,
    /// Background phase in progress.
    Running,
    /// Finished normally.
    Completed,
    /// Finished, but a collaborator was gone; the callback still fired.
    CompletedWithError,
}

/// A cancellable-by-design unit of background work for one scan request.
///
/// The background phase deliberately performs no catalog discovery for
/// `Project`/`SelectedFolders` requests: full discovery must run in the
/// context that owns the asset index, so the task only prepares a pending
/// status and hands the request back through its completion callback.
///
/// Whatever happens, the completion callback fires exactly once; callers
/// never block on a callback that does not arrive.
pub struct ScanTask {
    request: ScanRequest,
    scanner: Weak<AssetScanner>,
    on_complete: Option<ScanCompletion>,
    state: TaskState,
}

impl ScanTask {
    /// Creates a task for one request.
    pub fn new(
        request: ScanRequest,
        scanner: Weak<AssetScanner>,
        on_complete: ScanCompletion,
    ) -> Self {
        debug!("scan task created, mode: {}", request.mode);
        Self {
            request,
            scanner,
            on_complete: Some(on_complete),
            state: TaskState::Created,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Builds a completion callback that sends the outcome into a channel.
    ///
    /// The receiving side is the foreground boundary: anything that must run
    /// in the privileged context consumes the outcome from the channel.
    #[must_use]
    pub fn channel_completion(tx: mpsc::Sender<ScanOutcome>) -> ScanCompletion {
        Box::new(move |outcome| {
            if tx.send(outcome).is_err() {
                warn!("scan outcome receiver dropped before completion was delivered");
            }
        })
    }

    /// Spawns the task on a worker thread.
    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    /// Runs the background phase to completion on the current thread.
    ///
    /// Split out from [`Self::spawn`] so tests can drive the state machine
    /// synchronously.
    pub fn run(mut self) {
        self.state = TaskState::Running;
        let started = Instant::now();
        debug!("scan task background phase starting");

        let (outcome, ok) = self.execute();
        self.state = if ok {
            TaskState::Completed
        } else {
            TaskState::CompletedWithError
        };

        debug!(
            "scan task background phase finished in {:.2?}: {}",
            started.elapsed(),
            outcome.message
        );

        if let Some(callback) = self.on_complete.take() {
            callback(outcome);
        }
    }

    fn execute(&mut self) -> (ScanOutcome, bool) {
        let mode = self.request.mode;
        let parameters = std::mem::take(&mut self.request.parameters);

        if self.scanner.upgrade().is_none() {
            warn!("asset scanner dropped before the background scan phase ran");
            return (
                ScanOutcome {
                    mode,
                    parameters,
                    assets: Vec::new(),
                    message: "asset scanner was gone during the background scan phase".to_string(),
                },
                false,
            );
        }

        let (assets, message) = match mode {
            ScanMode::Project => (
                Vec::new(),
                "project asset discovery pending on the foreground".to_string(),
            ),
            ScanMode::SelectedFolders => (
                Vec::new(),
                format!(
                    "asset discovery pending on the foreground for {} folder(s)",
                    parameters.len()
                ),
            ),
            ScanMode::SelectedAssets => {
                let assets = std::mem::take(&mut self.request.pre_discovered);
                let message = format!("{} selected asset(s) ready for analysis", assets.len());
                (assets, message)
            }
            ScanMode::OpenLevel => {
                let assets = std::mem::take(&mut self.request.pre_discovered);
                let message = format!("{} level asset(s) ready for analysis", assets.len());
                (assets, message)
            }
        };

        (
            ScanOutcome {
                mode,
                parameters,
                assets,
                message,
            },
            true,
        )
    }
}
