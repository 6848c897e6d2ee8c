use super::tools::*;
use crate::{controller::calendar::CalendarDraft, entity::calendar};

async fn create_calendar(
    State(server): State<ArcServer>,
    Path(professor_id): Path<i32>,
    Json(draft): Json<CalendarDraft>,
) -> Result<Json<calendar::Model>> {
    Ok(Json(
        server.calendar.create_calendar(professor_id, draft).await?,
    ))
}

async fn list_calendars(
    State(server): State<ArcServer>,
    Path(professor_id): Path<i32>,
) -> Result<Json<Vec<calendar::Model>>> {
    Ok(Json(
        server
            .calendar
            .list_calendars_of_professor(professor_id)
            .await?,
    ))
}

async fn get_calendar(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<calendar::Model>> {
    Ok(Json(server.calendar.get_calendar(id).await?))
}

async fn delete_calendar(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.calendar.delete_calendar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route(
            "/professors/{id}/calendars",
            get(list_calendars).post(create_calendar),
        )
        .route("/calendars/{id}", get(get_calendar).delete(delete_calendar))
}
