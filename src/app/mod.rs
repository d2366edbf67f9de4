mod state;
mod ui;

use crate::etl::EtlBackend;
use eframe::{egui, App};
use state::{CatalogStatus, LaunchState, StatusKind, StatusMessage};
use std::sync::mpsc::{self as std_mpsc, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

pub struct EtlLauncher {
    state: LaunchState,
    backend: Arc<dyn EtlBackend>,
    runtime: Runtime,
}

impl EtlLauncher {
    /// Builds the launcher and immediately asks the backend for its catalog.
    pub fn new(backend: Arc<dyn EtlBackend>) -> std::io::Result<Self> {
        info!("Initializing Pentaho ETL Launcher");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let mut launcher = Self {
            state: LaunchState::default(),
            backend,
            runtime,
        };
        launcher.load_transformations();
        Ok(launcher)
    }

    pub fn load_transformations(&mut self) {
        info!("Requesting transformation list");
        self.state.catalog = CatalogStatus::Loading;

        let (sender, receiver) = std_mpsc::channel();
        self.state.catalog_receiver = Some(receiver);

        let backend = Arc::clone(&self.backend);
        self.runtime.spawn(async move {
            let result = backend.list_transformations().await;
            sender.send(result).unwrap_or_default();
        });
    }

    /// Validates the form and, if it passes, posts one execution request.
    pub fn run_selected(&mut self) {
        if self.state.is_executing {
            warn!("Execution already in progress, ignoring submit");
            return;
        }

        let request = match self.state.prepare_request() {
            Ok(request) => request,
            Err(e) => {
                warn!("Submit blocked: {}", e);
                self.state.status = e.into();
                return;
            }
        };

        info!("Starting ETL run for {}", request.ktr_path);
        self.state.is_executing = true;
        self.state.show_details = false;
        self.state.status = StatusMessage::loading("Running ETL...");

        let (sender, receiver) = std_mpsc::channel();
        self.state.execution_receiver = Some(receiver);

        let backend = Arc::clone(&self.backend);
        self.runtime.spawn(async move {
            let result = backend.execute(&request).await;
            sender.send(result).unwrap_or_default();
        });
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_executing || self.state.catalog == CatalogStatus::Loading
    }

    /// Drains finished background calls into the state. Returns whether
    /// anything changed.
    pub fn poll_updates(&mut self) -> bool {
        let mut had_updates = false;

        if let Some(receiver) = &self.state.catalog_receiver {
            match receiver.try_recv() {
                Ok(Ok(transformations)) => {
                    info!("Loaded {} transformations", transformations.len());
                    self.state.set_catalog(transformations);
                    self.state.catalog_receiver = None;
                    had_updates = true;
                }
                Ok(Err(e)) => {
                    error!("Failed to list transformations: {}", e);
                    self.state.catalog = CatalogStatus::Failed(e.to_string());
                    self.state.catalog_receiver = None;
                    had_updates = true;
                }
                Err(TryRecvError::Disconnected) => {
                    error!("Transformation listing task ended without a result");
                    self.state.catalog =
                        CatalogStatus::Failed("listing task ended unexpectedly".to_string());
                    self.state.catalog_receiver = None;
                    had_updates = true;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if let Some(receiver) = &self.state.execution_receiver {
            let outcome = match receiver.try_recv() {
                Ok(result) => Some(StatusMessage::from_execution(result)),
                Err(TryRecvError::Disconnected) => Some(StatusMessage::error(
                    "❌ Error: execution task ended unexpectedly",
                )),
                Err(TryRecvError::Empty) => None,
            };

            if let Some(status) = outcome {
                match status.kind {
                    StatusKind::Success => info!("ETL run finished: {}", status.text),
                    StatusKind::Warning => warn!("ETL run reported failure: {}", status.text),
                    _ => error!("ETL run failed: {}", status.text),
                }
                self.state.status = status;
                self.state.is_executing = false;
                self.state.execution_receiver = None;
                had_updates = true;
            }
        }

        had_updates
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let had_updates = self.poll_updates();
        if had_updates || self.is_busy() {
            ctx.request_repaint();
        }
    }
}

impl App for EtlLauncher {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::{EtlError, ExecuteRequest, ExecuteResponse, Transformation};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    enum Reply {
        Ok(ExecuteResponse),
        Backend(String),
    }

    struct FakeBackend {
        catalog: Vec<Transformation>,
        reply: Reply,
        executed: Mutex<Vec<ExecuteRequest>>,
    }

    impl FakeBackend {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                catalog: vec![Transformation {
                    name: "ventas.ktr".to_string(),
                    path: "/etl/ventas.ktr".to_string(),
                    modified: None,
                    size: 1024,
                }],
                reply,
                executed: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<ExecuteRequest> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EtlBackend for FakeBackend {
        async fn list_transformations(&self) -> Result<Vec<Transformation>, EtlError> {
            Ok(self.catalog.clone())
        }

        async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, EtlError> {
            self.executed.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Ok(response) => Ok(response.clone()),
                Reply::Backend(message) => Err(EtlError::Backend {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }
    }

    fn wait_until(launcher: &mut EtlLauncher, done: impl Fn(&EtlLauncher) -> bool) {
        for _ in 0..300 {
            launcher.poll_updates();
            if done(launcher) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("condition not reached; state: {:?}", launcher.state);
    }

    fn loaded(backend: Arc<FakeBackend>) -> EtlLauncher {
        let mut launcher = EtlLauncher::new(backend).unwrap();
        wait_until(&mut launcher, |l| l.state.catalog == CatalogStatus::Ready);
        launcher
    }

    fn ok_reply() -> Reply {
        Reply::Ok(ExecuteResponse {
            success: true,
            message: Some("done".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn catalog_is_loaded_on_start() {
        let launcher = loaded(FakeBackend::new(ok_reply()));
        assert_eq!(launcher.state.transformations.len(), 1);
        assert_eq!(launcher.state.catalog_notice(), None);
    }

    #[test]
    fn submit_without_selection_sends_nothing() {
        let backend = FakeBackend::new(ok_reply());
        let mut launcher = loaded(Arc::clone(&backend));

        launcher.run_selected();
        std::thread::sleep(Duration::from_millis(50));
        launcher.poll_updates();

        assert!(backend.calls().is_empty());
        assert!(!launcher.state.is_executing);
        assert_eq!(launcher.state.status.kind, StatusKind::Warning);
    }

    #[test]
    fn submit_with_invalid_date_sends_nothing() {
        let backend = FakeBackend::new(ok_reply());
        let mut launcher = loaded(Arc::clone(&backend));
        launcher.state.select("/etl/ventas.ktr");
        launcher.state.fecha_inicio = "05/01/2025".to_string();

        launcher.run_selected();
        std::thread::sleep(Duration::from_millis(50));
        launcher.poll_updates();

        assert!(backend.calls().is_empty());
        assert_eq!(launcher.state.status.kind, StatusKind::Error);
        assert!(launcher.state.status.text.contains("05/01/2025"));
    }

    #[test]
    fn successful_run_sets_then_clears_loading() {
        let backend = FakeBackend::new(ok_reply());
        let mut launcher = loaded(Arc::clone(&backend));
        launcher.state.select("/etl/ventas.ktr");
        launcher.state.fecha_fin = "2025-05-31".to_string();

        launcher.run_selected();
        assert!(launcher.state.is_executing);
        assert_eq!(launcher.state.status.kind, StatusKind::Loading);

        wait_until(&mut launcher, |l| !l.state.is_executing);
        assert_eq!(launcher.state.status.kind, StatusKind::Success);
        assert_eq!(launcher.state.status.text, "done");
        assert_eq!(
            backend.calls(),
            vec![ExecuteRequest {
                ktr_path: "/etl/ventas.ktr".to_string(),
                fecha_inicio: None,
                fecha_fin: Some("2025-05-31".to_string()),
            }]
        );
    }

    #[test]
    fn backend_failure_clears_loading_and_shows_error() {
        let backend = FakeBackend::new(Reply::Backend("ktr not found".to_string()));
        let mut launcher = loaded(Arc::clone(&backend));
        launcher.state.select("/etl/ventas.ktr");

        launcher.run_selected();
        wait_until(&mut launcher, |l| !l.state.is_executing);

        assert_eq!(launcher.state.status.kind, StatusKind::Error);
        assert!(launcher.state.status.text.contains("ktr not found"));
        assert!(!launcher.is_busy());
    }

    #[test]
    fn second_submit_while_running_is_ignored() {
        let backend = FakeBackend::new(ok_reply());
        let mut launcher = loaded(Arc::clone(&backend));
        launcher.state.select("/etl/ventas.ktr");

        launcher.run_selected();
        launcher.run_selected();
        wait_until(&mut launcher, |l| !l.state.is_executing);

        assert_eq!(backend.calls().len(), 1);
    }
}
