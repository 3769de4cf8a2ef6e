mod api_failure;
mod app_error;

pub use api_failure::{ApiFailure, error_detail};
pub use app_error::{AppError, AppResult, ValidationFieldError};
