use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use canopy::render::HeadlessError;
use serde::Serialize;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Page(#[from] HeadlessError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    /// Missing dataset → 404, malformed graph → 422, anything else → 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Page(err) => match err.as_data() {
                Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
                Some(e) if e.is_graph_error() => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Bind { .. } | ServerError::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<canopy::Error> for ServerError {
    fn from(err: canopy::Error) -> Self {
        ServerError::Page(HeadlessError::Data(err))
    }
}
