use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BookingRecord, BookingStatus};
use crate::services::session::Session;
use crate::state::AppState;

/// Outcome of a gated admin operation.
#[derive(Debug, PartialEq)]
pub enum Access<T> {
    Granted(T),
    /// The session is not logged in; the caller should send it to the login page.
    Denied,
}

pub fn view_dashboard(
    state: &AppState,
    session: &Session,
) -> Result<Access<Vec<BookingRecord>>, AppError> {
    if !session.is_authenticated(&state.auth) {
        return Ok(Access::Denied);
    }

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::list_bookings(&db)?
    };
    Ok(Access::Granted(bookings))
}

/// Moves a booking to a new status. The previous status is not kept.
///
/// The session is checked before the submitted status is looked at, so an
/// anonymous request is denied even when the field is absent. Text outside
/// the status enumeration is rejected here so the store only ever receives
/// one of the four stored names. Naming an id that does not exist is a
/// no-op and still counts as success.
pub fn change_status(
    state: &AppState,
    session: &Session,
    id: i64,
    status_text: Option<&str>,
) -> Result<Access<()>, AppError> {
    if !session.is_authenticated(&state.auth) {
        tracing::warn!(booking_id = id, "status change refused: not logged in");
        return Ok(Access::Denied);
    }

    let status_text = status_text.ok_or(AppError::MissingField("status"))?;
    let status = BookingStatus::parse(status_text)
        .ok_or_else(|| AppError::InvalidStatus(status_text.to_string()))?;

    let touched = {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(&db, id, status.as_str())?
    };

    if touched == 0 {
        tracing::info!(booking_id = id, "status change matched no booking");
    } else {
        tracing::info!(booking_id = id, status = status.as_str(), "booking status changed");
    }

    Ok(Access::Granted(()))
}
