use super::tools::*;
use crate::{
    controller::advisory::{AdvisoryDraft, AdvisoryUpdate},
    entity::advisory,
};

type Model = Json<advisory::Model>;

async fn get_advisory(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Model> {
    Ok(Json(server.advisory.get_advisory(id).await?))
}

async fn create_in_calendar(
    State(server): State<ArcServer>,
    Path(calendar_id): Path<i32>,
    Json(draft): Json<AdvisoryDraft>,
) -> Result<Model> {
    Ok(Json(
        server
            .advisory
            .create_advisory_in_calendar(calendar_id, draft)
            .await?,
    ))
}

async fn list_of_calendar(
    State(server): State<ArcServer>,
    Path(calendar_id): Path<i32>,
) -> Result<Json<Vec<advisory::Model>>> {
    Ok(Json(
        server
            .advisory
            .list_advisories_of_calendar(calendar_id)
            .await?,
    ))
}

async fn get_of_calendar(
    State(server): State<ArcServer>,
    Path((calendar_id, id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server
            .advisory
            .get_advisory_of_calendar(calendar_id, id)
            .await?,
    ))
}

async fn update_in_calendar(
    State(server): State<ArcServer>,
    Path((calendar_id, id)): Path<(i32, i32)>,
    Json(update): Json<AdvisoryUpdate>,
) -> Result<Model> {
    Ok(Json(
        server
            .advisory
            .update_advisory_in_calendar(calendar_id, id, update)
            .await?,
    ))
}

async fn delete_from_calendar(
    State(server): State<ArcServer>,
    Path((calendar_id, id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    server
        .advisory
        .delete_advisory_from_calendar(calendar_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_for_professor(
    State(server): State<ArcServer>,
    Path(professor_id): Path<i32>,
    Json(draft): Json<AdvisoryDraft>,
) -> Result<Model> {
    Ok(Json(
        server
            .advisory
            .create_advisory_for_professor(professor_id, draft)
            .await?,
    ))
}

async fn list_of_professor(
    State(server): State<ArcServer>,
    Path(professor_id): Path<i32>,
) -> Result<Json<Vec<advisory::Model>>> {
    Ok(Json(
        server
            .advisory
            .list_advisories_of_professor(professor_id)
            .await?,
    ))
}

async fn get_of_professor(
    State(server): State<ArcServer>,
    Path((professor_id, id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server
            .advisory
            .get_advisory_of_professor(professor_id, id)
            .await?,
    ))
}

async fn update_of_professor(
    State(server): State<ArcServer>,
    Path((professor_id, id)): Path<(i32, i32)>,
    Json(update): Json<AdvisoryUpdate>,
) -> Result<Model> {
    Ok(Json(
        server
            .advisory
            .update_advisory_of_professor(professor_id, id, update)
            .await?,
    ))
}

async fn delete_of_professor(
    State(server): State<ArcServer>,
    Path((professor_id, id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    server
        .advisory
        .delete_advisory_of_professor(professor_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route("/advisories/{id}", get(get_advisory))
        .route(
            "/calendars/{id}/advisories",
            get(list_of_calendar).post(create_in_calendar),
        )
        .route(
            "/calendars/{id}/advisories/{advisory_id}",
            get(get_of_calendar)
                .put(update_in_calendar)
                .delete(delete_from_calendar),
        )
        .route(
            "/professors/{id}/advisories",
            get(list_of_professor).post(create_for_professor),
        )
        .route(
            "/professors/{id}/advisories/{advisory_id}",
            get(get_of_professor)
                .put(update_of_professor)
                .delete(delete_of_professor),
        )
}
