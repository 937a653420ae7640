use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::{Form, Json};

use crate::errors::AppError;
use crate::models::ServicePackage;
use crate::services::catalog;
use crate::services::intake::{self, BookingForm};
use crate::state::AppState;

static SUCCESS_HTML: &str = include_str!("../web/success.html");

// GET /
pub async fn list_packages() -> Json<&'static [ServicePackage]> {
    Json(catalog::list_packages())
}

// POST /submit
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BookingForm>,
) -> Result<Redirect, AppError> {
    {
        let mut db = state.db.lock().unwrap();
        intake::submit(&mut db, form)?;
    }
    Ok(Redirect::to("/success"))
}

// GET /success
pub async fn success_page() -> Html<&'static str> {
    Html(SUCCESS_HTML)
}
