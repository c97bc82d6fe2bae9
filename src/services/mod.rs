use crate::{repositories::StoreError, Error};

pub mod auth;
pub mod courses;
pub mod posts;

/// Maps a failed update or delete: absence and malformed ids are both 422.
fn mutation_error(err: StoreError, resource: &str) -> Error {
    match err {
        StoreError::NotFound => Error::Unprocessable(format!("{resource} does not exist")),
        StoreError::MalformedId(_) => Error::Unprocessable(format!("Invalid {resource} ID")),
        err => err.into(),
    }
}

/// Maps a failed lookup by id. Backend failures surface as a raw error body.
fn lookup_error(err: StoreError, resource: &str) -> Error {
    match err {
        StoreError::NotFound => Error::NotFound(format!("{resource} does not exist")),
        StoreError::MalformedId(_) => Error::Unprocessable(format!("Invalid {resource} ID")),
        StoreError::Backend(message) => Error::Raw(message),
    }
}
