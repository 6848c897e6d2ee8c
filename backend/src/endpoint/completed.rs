use super::tools::*;
use crate::entity::advisory;

async fn list_completed(
    State(server): State<ArcServer>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<advisory::Model>>> {
    Ok(Json(
        server.completed.list_completed_advisories(user_id).await?,
    ))
}

async fn add_completed(
    State(server): State<ArcServer>,
    Path((user_id, advisory_id)): Path<(i32, i32)>,
) -> Result<Json<advisory::Model>> {
    Ok(Json(
        server
            .completed
            .add_completed_advisory(user_id, advisory_id)
            .await?,
    ))
}

async fn remove_completed(
    State(server): State<ArcServer>,
    Path((user_id, advisory_id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    server
        .completed
        .remove_completed_advisory(user_id, advisory_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route("/users/{id}/completed", get(list_completed))
        .route(
            "/users/{id}/completed/{advisory_id}",
            post(add_completed).delete(remove_completed),
        )
}
