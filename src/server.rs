use std::future::Future;
use std::net::SocketAddr;

use axum::{
    extract::State,
    response::{Html, Json, Redirect},
    routing::{get, post},
    Form, Router,
};
use log::info;
use serde::Deserialize;

use crate::dashboard::{DashboardHandle, DashboardSnapshot};
use crate::errors::{Error, Result};

#[derive(Debug, Deserialize)]
struct EmployeeForm {
    employee: String,
}

/// Routes of the dashboard server
pub fn router(handle: DashboardHandle) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api/summary", get(summary_handler))
        .route("/employee", post(select_employee_handler))
        .with_state(handle)
}

/// Start the dashboard server and run it until `shutdown` resolves
pub async fn start_server<F>(handle: DashboardHandle, host: &str, port: u16, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr_str = format!("{}:{}", host, port);
    let addr: SocketAddr = addr_str
        .parse()
        .map_err(|e| Error::Server(format!("Invalid address {}: {}", addr_str, e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Dashboard server running on http://{}", addr);

    axum::serve(listener, router(handle))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn dashboard_handler(State(handle): State<DashboardHandle>) -> Html<String> {
    Html(handle.render_html().await)
}

async fn summary_handler(State(handle): State<DashboardHandle>) -> Json<DashboardSnapshot> {
    Json(handle.snapshot().await)
}

async fn select_employee_handler(
    State(handle): State<DashboardHandle>,
    Form(form): Form<EmployeeForm>,
) -> Redirect {
    handle.select_employee(&form.employee).await;
    Redirect::to("/")
}
