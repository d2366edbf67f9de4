mod client;
mod error;
mod types;

pub use client::{EtlBackend, HttpEtlClient};
pub use error::{EtlError, SubmitError};
pub use types::{ExecuteRequest, ExecuteResponse, Transformation};
