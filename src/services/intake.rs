use chrono::{SubsecRound, Utc};
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BookingStatus, NewBooking};
use crate::services::catalog;

/// Booking request as posted by the public form.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingForm {
    pub nama: String,
    pub email: String,
    pub telepon: String,
    pub tanggal_acara: String,
    pub layanan: String,
    #[serde(default)]
    pub pesan: String,
}

impl BookingForm {
    fn ensure_complete(&self) -> Result<(), AppError> {
        let required = [
            ("nama", &self.nama),
            ("email", &self.email),
            ("telepon", &self.telepon),
            ("tanggal_acara", &self.tanggal_acara),
            ("layanan", &self.layanan),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// Records a booking request and returns its id. Unknown package ids are
/// stored under the catalog's not-found name rather than rejected.
pub fn submit(conn: &mut Connection, form: BookingForm) -> Result<i64, AppError> {
    form.ensure_complete()?;

    let service_name = catalog::resolve_name(&form.layanan);
    if service_name == catalog::NOT_FOUND_NAME {
        tracing::warn!(service_id = %form.layanan, "booking references unknown package");
    }

    let booking = NewBooking {
        customer_name: form.nama,
        email: form.email,
        phone: form.telepon,
        event_date: form.tanggal_acara,
        service_name: service_name.to_string(),
        message: form.pesan,
        status: BookingStatus::New,
        created_at: Utc::now().naive_utc().trunc_subsecs(6),
    };

    let id = queries::create_booking(conn, &booking)?;
    tracing::info!(booking_id = id, service = %booking.service_name, "booking recorded");

    Ok(id)
}
