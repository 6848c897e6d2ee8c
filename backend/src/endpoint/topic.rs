use super::tools::*;
use crate::{
    controller::topic::TopicDraft,
    entity::{professor, topic},
};

async fn create_topic(
    State(server): State<ArcServer>,
    Json(draft): Json<TopicDraft>,
) -> Result<Json<topic::Model>> {
    Ok(Json(server.topic.create_topic(draft).await?))
}

async fn get_topic(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Json<topic::Model>> {
    Ok(Json(server.topic.get_topic(id).await?))
}

async fn delete_topic(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.topic.delete_topic(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_professors(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<professor::Model>>> {
    Ok(Json(server.topic.list_professors_of_topic(id).await?))
}

async fn has_any_professors(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Json<bool>> {
    Ok(Json(server.topic.topic_has_any_professors(id).await?))
}

async fn has_professor(
    State(server): State<ArcServer>,
    Path((id, professor_id)): Path<(i32, i32)>,
) -> Result<Json<bool>> {
    Ok(Json(server.topic.topic_has_professor(id, professor_id).await?))
}

async fn list_topics(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<topic::Model>>> {
    Ok(Json(server.topic.list_topics_of_professor(id).await?))
}

async fn replace_topics(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
    Json(topic_ids): Json<Vec<i32>>,
) -> Result<Json<Vec<topic::Model>>> {
    Ok(Json(
        server.topic.replace_topics_of_professor(id, topic_ids).await?,
    ))
}

async fn has_any_topics(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Json<bool>> {
    Ok(Json(server.topic.professor_has_any_topics(id).await?))
}

async fn get_topic_of_professor(
    State(server): State<ArcServer>,
    Path((id, topic_id)): Path<(i32, i32)>,
) -> Result<Json<topic::Model>> {
    Ok(Json(server.topic.get_topic_of_professor(id, topic_id).await?))
}

async fn add_topic(
    State(server): State<ArcServer>,
    Path((id, topic_id)): Path<(i32, i32)>,
) -> Result<Json<topic::Model>> {
    Ok(Json(server.topic.add_topic_to_professor(id, topic_id).await?))
}

async fn remove_topic(
    State(server): State<ArcServer>,
    Path((id, topic_id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    server.topic.remove_topic_from_professor(id, topic_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn has_topic(
    State(server): State<ArcServer>,
    Path((id, topic_id)): Path<(i32, i32)>,
) -> Result<Json<bool>> {
    Ok(Json(server.topic.professor_has_topic(id, topic_id).await?))
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route("/topics", post(create_topic))
        .route("/topics/{id}", get(get_topic).delete(delete_topic))
        .route("/topics/{id}/professors", get(list_professors))
        .route("/topics/{id}/has-professors", get(has_any_professors))
        .route("/topics/{id}/professors/{professor_id}/linked", get(has_professor))
        .route(
            "/professors/{id}/topics",
            get(list_topics).put(replace_topics),
        )
        .route("/professors/{id}/has-topics", get(has_any_topics))
        .route(
            "/professors/{id}/topics/{topic_id}",
            get(get_topic_of_professor)
                .post(add_topic)
                .delete(remove_topic),
        )
        .route("/professors/{id}/topics/{topic_id}/linked", get(has_topic))
}
