use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use studio_logging::{studio_debug, studio_info, studio_warn};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    EngineEvent, FailureKind, ProcessingService, ReqwestProcessingService, Section, ServiceError,
    ServiceSettings,
};

/// One request the engine runs on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    SelectVideo { video: String },
    StopVideo,
    DeleteFile { filename: String, section: Section },
    DeleteAllUploads,
    LoadPage,
    DownloadProcessed { filename: String },
}

/// Receives every event the engine produces, from its worker threads.
pub trait EventSink: Send + Sync {
    /// Returns false once nobody is listening; the engine then stops.
    fn emit(&self, event: EngineEvent) -> bool;
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

enum Control {
    Run(EngineCommand),
    StartStatusPoll,
}

/// Runs service requests on a background tokio runtime.
///
/// Each command yields exactly one event; commands never wait on each other.
/// Dropping the handle, or a sink that stops accepting events, cancels the
/// status poll and every in-flight request.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Control>,
    shutdown: CancellationToken,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub poll_interval: Duration,
    pub download_dir: PathBuf,
}

impl EngineHandle {
    /// Engine talking HTTP to the service described by `settings`.
    pub fn new(
        settings: ServiceSettings,
        download_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ServiceError> {
        let config = EngineConfig {
            poll_interval: settings.poll_interval,
            download_dir,
        };
        let service = Arc::new(ReqwestProcessingService::new(settings)?);
        Self::with_service(service, config, sink)
    }

    pub fn with_service(
        service: Arc<dyn ProcessingService>,
        config: EngineConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ServiceError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("studio-engine")
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<Control>();
        let shutdown = CancellationToken::new();
        let worker_shutdown = shutdown.clone();

        thread::spawn(move || {
            let mut polling = false;
            while let Ok(control) = cmd_rx.recv() {
                match control {
                    Control::Run(command) => {
                        let service = service.clone();
                        let sink = sink.clone();
                        let config = config.clone();
                        let cancel = worker_shutdown.clone();
                        runtime.spawn(async move {
                            let event = cancel
                                .run_until_cancelled(run_command(service.as_ref(), &config, command))
                                .await;
                            if let Some(event) = event {
                                deliver(sink.as_ref(), event, &cancel);
                            }
                        });
                    }
                    Control::StartStatusPoll if !polling => {
                        polling = true;
                        runtime.spawn(poll_status(
                            service.clone(),
                            config.poll_interval,
                            sink.clone(),
                            worker_shutdown.clone(),
                        ));
                    }
                    Control::StartStatusPoll => {
                        studio_debug!("Status poll already running");
                    }
                }
            }
            worker_shutdown.cancel();
            studio_info!("Engine stopped");
        });

        Ok(Self { cmd_tx, shutdown })
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(Control::Run(command));
    }

    /// Starts the fixed-cadence status poll; later calls are ignored.
    pub fn start_status_poll(&self) {
        let _ = self.cmd_tx.send(Control::StartStatusPoll);
    }

    /// Cancels the poll and every in-flight request.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_command(
    service: &dyn ProcessingService,
    config: &EngineConfig,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::SelectVideo { video } => {
            studio_info!("Starting processing of {}", video);
            EngineEvent::SelectVideo(logged("select_video", service.select_video(&video).await))
        }
        EngineCommand::StopVideo => {
            studio_info!("Stopping processing");
            EngineEvent::StopVideo(logged("stop_video", service.stop_video().await))
        }
        EngineCommand::DeleteFile { filename, section } => {
            studio_info!("Deleting {:?} file {}", section, filename);
            let result = logged("delete_file", service.delete_file(&filename, section).await);
            EngineEvent::DeleteFile {
                filename,
                section,
                result,
            }
        }
        EngineCommand::DeleteAllUploads => {
            studio_info!("Deleting all uploads");
            EngineEvent::DeleteAllUploads(logged(
                "delete_all_uploads",
                service.delete_all_uploads().await,
            ))
        }
        EngineCommand::LoadPage => {
            EngineEvent::PageLoaded(logged("load_page", service.load_page().await))
        }
        EngineCommand::DownloadProcessed { filename } => {
            let result = service
                .download_processed(&filename, &config.download_dir)
                .await;
            EngineEvent::Downloaded {
                filename,
                result: logged("download", result),
            }
        }
    }
}

/// Ticks every `period` until cancelled or the sink stops listening. Each tick spawns its own request, so
/// a request that never answers stalls only itself.
async fn poll_status(
    service: Arc<dyn ProcessingService>,
    period: Duration,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    studio_info!("Status poll started every {:?}", period);

    while cancel.run_until_cancelled(ticker.tick()).await.is_some() {
        let service = service.clone();
        let sink = sink.clone();
        let request_cancel = cancel.clone();
        tokio::spawn(async move {
            let result = request_cancel
                .run_until_cancelled(service.get_status())
                .await;
            if let Some(result) = result {
                let event = EngineEvent::Status(logged("get_status", result));
                deliver(sink.as_ref(), event, &request_cancel);
            }
        });
    }
    studio_info!("Status poll stopped");
}

fn deliver(sink: &dyn EventSink, event: EngineEvent, cancel: &CancellationToken) {
    if !sink.emit(event) && !cancel.is_cancelled() {
        studio_info!("Event receiver gone, stopping the engine");
        cancel.cancel();
    }
}

fn logged<T>(operation: &str, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    if let Err(err) = &result {
        studio_warn!("{} failed: {}", operation, err);
    }
    result
}
