use crate::etl::{EtlError, ExecuteRequest, ExecuteResponse, SubmitError, Transformation};
use crate::utils::date_filter::{date_filter, validate_date};
use crate::utils::sort::SortOrder;
use derivative::Derivative;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Loading,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    /// Backend `output`/`error` text, shown under "Show Details".
    pub details: Option<String>,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            details: None,
        }
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Loading, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, text)
    }

    fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Maps the outcome of `POST /ejecutar-etl` to what the operator sees.
    pub fn from_execution(result: Result<ExecuteResponse, EtlError>) -> Self {
        match result {
            Ok(response) => {
                let details = response_details(&response);
                if response.success {
                    Self::success(
                        response
                            .message
                            .unwrap_or_else(|| "✅ ETL executed successfully".to_string()),
                    )
                    .with_details(details)
                } else {
                    let reason = response
                        .message
                        .or(response.error)
                        .unwrap_or_else(|| "ETL finished without success".to_string());
                    Self::warning(format!("⚠ {}", reason)).with_details(details)
                }
            }
            Err(EtlError::Backend { status, message }) => {
                Self::error(format!("❌ Backend error ({}): {}", status, message))
            }
            Err(e) => Self::error(format!("❌ Error: {}", e)),
        }
    }
}

impl From<SubmitError> for StatusMessage {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::NoSelection => Self::warning(err.to_string()),
            SubmitError::InvalidDate { .. } => Self::error(err.to_string()),
        }
    }
}

fn response_details(response: &ExecuteResponse) -> Option<String> {
    let parts: Vec<&str> = [response.output.as_deref(), response.error.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct LaunchState {
    pub catalog: CatalogStatus,
    pub transformations: Vec<Transformation>,
    pub selected_path: Option<String>,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub status: StatusMessage,
    pub is_executing: bool,
    pub view_mode: ViewMode,
    pub sort_order: SortOrder,
    pub show_details: bool,
    #[derivative(Debug = "ignore")]
    pub catalog_receiver: Option<Receiver<Result<Vec<Transformation>, EtlError>>>,
    #[derivative(Debug = "ignore")]
    pub execution_receiver: Option<Receiver<Result<ExecuteResponse, EtlError>>>,
}

impl LaunchState {
    pub fn selected(&self) -> Option<&Transformation> {
        let path = self.selected_path.as_ref()?;
        self.transformations.iter().find(|t| &t.path == path)
    }

    pub fn select(&mut self, path: &str) {
        self.selected_path = Some(path.to_string());
    }

    pub fn set_catalog(&mut self, transformations: Vec<Transformation>) {
        if let Some(path) = &self.selected_path {
            if !transformations.iter().any(|t| &t.path == path) {
                self.selected_path = None;
            }
        }
        self.transformations = transformations;
        self.catalog = CatalogStatus::Ready;
    }

    /// Text to show instead of the picker, if there is nothing to pick from.
    pub fn catalog_notice(&self) -> Option<String> {
        match &self.catalog {
            CatalogStatus::Loading => Some("Loading transformations...".to_string()),
            CatalogStatus::Failed(err) => Some(format!("❌ Could not load transformations: {}", err)),
            CatalogStatus::Ready if self.transformations.is_empty() => {
                Some("No transformations available".to_string())
            }
            CatalogStatus::Ready => None,
        }
    }

    /// Checks the form and builds the request body. Nothing is sent on `Err`.
    pub fn prepare_request(&self) -> Result<ExecuteRequest, SubmitError> {
        let selected = self.selected().ok_or(SubmitError::NoSelection)?;

        for (field, value) in [("Start date", &self.fecha_inicio), ("End date", &self.fecha_fin)] {
            if !validate_date(value) {
                return Err(SubmitError::InvalidDate {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(ExecuteRequest {
            ktr_path: selected.path.clone(),
            fecha_inicio: date_filter(&self.fecha_inicio),
            fecha_fin: date_filter(&self.fecha_fin),
        })
    }
}
