//! Error handling types

mod app_error;

pub use app_error::{
    AppError, AppResult, ErrorResponse, ACCESS_DENIED_MESSAGE, GENERIC_ERROR_MESSAGE,
    INVALID_TOKEN_MESSAGE,
};
