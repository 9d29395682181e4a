use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::result::{DatabaseErrorKind, Error as QueryError};
use failure::Fail;
use serde::Serialize;

#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[fail(display = "Bad Request")]
    BadRequest,
    #[fail(display = "Resource Not Found")]
    NotFound,
    #[fail(display = "Unprocessable")]
    Unprocessable,
    #[fail(display = "Internal Server Error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    /// Failed mutations are reported as unprocessable whatever went wrong inside.
    pub fn unprocessable(self) -> Self {
        match self {
            ApiError::Internal => ApiError::Internal,
            _ => ApiError::Unprocessable,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        })
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound => ApiError::NotFound,
            QueryError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation => {
                    log::warn!("rejected write: {}", info.message());
                    ApiError::Unprocessable
                }
                _ => {
                    log::error!("database error: {}", info.message());
                    ApiError::Internal
                }
            },
            QueryError::DeserializationError(e) | QueryError::SerializationError(e) => {
                log::warn!("invalid value for store: {}", e);
                ApiError::Unprocessable
            }
            other => {
                log::error!("query failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("unable to get database connection: {}", err);
        ApiError::Internal
    }
}

impl From<BlockingError<ApiError>> for ApiError {
    fn from(err: BlockingError<ApiError>) -> Self {
        match err {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => {
                log::error!("blocking store task was canceled");
                ApiError::Internal
            }
        }
    }
}
