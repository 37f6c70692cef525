use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum KwargsError {
    #[error("Mismatched Pairs Error: {message} {location}")]
    MismatchedPairs {
        message: String,
        location: ErrorLocation,
    },
}
