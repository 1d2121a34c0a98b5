use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown location: {location_id}")]
    UnknownLocation { location_id: String },

    #[error("invalid zoom ladder: {0}")]
    InvalidZoomLadder(String),

    #[error("zoom preference error: {0}")]
    Preference(String),
}
