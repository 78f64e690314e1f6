use axum::{extract::State, Json};

use calview_core::calendar::Calendar;

use crate::{handlers::AppError, state::AppState};

/// List all calendars in definition order (GET /api/calendars).
pub async fn list_calendars(
    State(state): State<AppState>,
) -> Result<Json<Vec<Calendar>>, AppError> {
    let calendars = state.calendar_repo.list_calendars().await?;
    Ok(Json(calendars))
}
