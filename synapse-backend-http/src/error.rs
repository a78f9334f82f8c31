//! Internal helpers mapping HTTP/reqwest failures to link0 errors.

use link0::{CatalogError, SimulationError};

pub(crate) fn map_catalog_status(status: reqwest::StatusCode, body: &str) -> CatalogError {
    match status.as_u16() {
        401 | 403 => CatalogError::Unauthorized(body.to_string()),
        400 | 404 | 409 | 422 => CatalogError::InvalidRequest(body.to_string()),
        500..=599 => CatalogError::Unavailable(body.to_string()),
        _ => CatalogError::InvalidRequest(format!("HTTP {status}: {body}")),
    }
}

pub(crate) fn map_catalog_transport(err: reqwest::Error) -> CatalogError {
    CatalogError::Network(Box::new(err))
}

pub(crate) fn map_sim_status(status: reqwest::StatusCode, body: &str) -> SimulationError {
    match status.as_u16() {
        401 | 403 => SimulationError::Unauthorized(body.to_string()),
        400 | 404 | 422 => SimulationError::InvalidRequest(body.to_string()),
        500..=599 => SimulationError::Unavailable(body.to_string()),
        _ => SimulationError::InvalidRequest(format!("HTTP {status}: {body}")),
    }
}

pub(crate) fn map_sim_transport(err: reqwest::Error) -> SimulationError {
    SimulationError::Network(Box::new(err))
}
