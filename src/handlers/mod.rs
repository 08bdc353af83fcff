use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mongodb::Database;
use serde::Serialize;

use crate::models::{CreateEventRequest, Event, UpdateEventRequest};
use crate::repository::EventRepository;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

/// Shared per-request state: one repository handle, cloned cheaply.
#[derive(Clone)]
pub struct AppState {
    pub events: EventRepository,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            events: EventRepository::new(db),
        }
    }
}

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
struct EventListPayload {
    count: usize,
    events: Vec<Event>,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "event-planner-api",
    };

    success(payload, "Health check successful").into_response()
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let new_event = payload.validate()?;
    let event = state.events.create(new_event).await?;

    Ok(created(event, "Event created successfully").into_response())
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.list_all().await?;
    let payload = EventListPayload {
        count: events.len(),
        events,
    };

    Ok(success(payload, "Events fetched successfully").into_response())
}

pub async fn get_event_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = state.events.get_by_id(&id).await?;

    Ok(success(event, "Event fetched successfully").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Response, AppError> {
    let patch = payload.validate()?;
    let event = state.events.update(&id, patch).await?;

    Ok(success(event, "Event updated successfully").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = state.events.delete(&id).await?;

    Ok(success(event, "Event deleted successfully").into_response())
}
