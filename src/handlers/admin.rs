use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::BookingRecord;
use crate::services::admin::{self, Access};
use crate::services::session::Session;
use crate::state::AppState;

static LOGIN_HTML: &str = include_str!("../web/login.html");

const LOGIN_PATH: &str = "/admin/login";
const DASHBOARD_PATH: &str = "/admin";

fn login_page(error: Option<&str>) -> Html<String> {
    let notice = error
        .map(|e| format!(r#"<p role="alert">{e}</p>"#))
        .unwrap_or_default();
    Html(LOGIN_HTML.replace("<!--error-->", &notice))
}

// GET /admin
#[derive(Serialize)]
pub struct BookingResponse {
    id: i64,
    customer_name: String,
    email: String,
    phone: String,
    event_date: String,
    service_name: String,
    message: String,
    status: &'static str,
    status_label: &'static str,
    created_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(b: BookingRecord) -> Self {
        Self {
            id: b.id,
            customer_name: b.customer_name,
            email: b.email,
            phone: b.phone,
            event_date: b.event_date,
            service_name: b.service_name,
            message: b.message,
            status: b.status.as_str(),
            status_label: b.status.label(),
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, AppError> {
    match admin::view_dashboard(&state, &session)? {
        Access::Granted(bookings) => {
            let response: Vec<BookingResponse> =
                bookings.into_iter().map(BookingResponse::from).collect();
            Ok(Json(response).into_response())
        }
        Access::Denied => Ok(Redirect::to(LOGIN_PATH).into_response()),
    }
}

// GET /admin/login
pub async fn login_form() -> Html<String> {
    login_page(None)
}

// POST /admin/login
#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match session.login(&state.auth, &form.password) {
        Ok(()) => Ok((session.into_jar(), Redirect::to(DASHBOARD_PATH)).into_response()),
        Err(AppError::WrongPassword) => Ok((
            StatusCode::UNAUTHORIZED,
            login_page(Some(&AppError::WrongPassword.to_string())),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

// GET /admin/logout
pub async fn logout(State(state): State<Arc<AppState>>, mut session: Session) -> Response {
    session.logout(&state.auth);
    (session.into_jar(), Redirect::to(LOGIN_PATH)).into_response()
}

// POST /admin/update_status/:id
#[derive(Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    match admin::change_status(&state, &session, id, form.status.as_deref())? {
        Access::Granted(()) => Ok(Redirect::to(DASHBOARD_PATH)),
        Access::Denied => Ok(Redirect::to(LOGIN_PATH)),
    }
}
