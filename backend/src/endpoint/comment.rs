use super::tools::*;
use crate::{
    controller::comment::{CommentDraft, CommentUpdate},
    entity::comment,
};

type Model = Json<comment::Model>;

async fn create_comment(
    State(server): State<ArcServer>,
    Json(draft): Json<CommentDraft>,
) -> Result<Model> {
    Ok(Json(server.comment.create_comment(draft).await?))
}

async fn get_comment(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Model> {
    Ok(Json(server.comment.get_comment(id).await?))
}

async fn update_comment(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
    Json(update): Json<CommentUpdate>,
) -> Result<Model> {
    Ok(Json(server.comment.update_comment(id, update).await?))
}

async fn delete_comment(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.comment.delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_of_student(
    State(server): State<ArcServer>,
    Path(student_id): Path<i32>,
) -> Result<Json<Vec<comment::Model>>> {
    Ok(Json(
        server.comment.list_comments_of_student(student_id).await?,
    ))
}

async fn replace_of_student(
    State(server): State<ArcServer>,
    Path(student_id): Path<i32>,
    Json(comment_ids): Json<Vec<i32>>,
) -> Result<Json<Vec<comment::Model>>> {
    Ok(Json(
        server
            .comment
            .replace_comments_of_student(student_id, comment_ids)
            .await?,
    ))
}

async fn get_of_student(
    State(server): State<ArcServer>,
    Path((student_id, id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server.comment.get_comment_of_student(student_id, id).await?,
    ))
}

async fn attach_to_student(
    State(server): State<ArcServer>,
    Path((student_id, id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server
            .comment
            .attach_comment_to_student(id, student_id)
            .await?,
    ))
}

async fn detach_from_student(
    State(server): State<ArcServer>,
    Path((student_id, id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server
            .comment
            .detach_comment_from_student(student_id, id)
            .await?,
    ))
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route("/comments", post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route(
            "/students/{id}/comments",
            get(list_of_student).put(replace_of_student),
        )
        .route(
            "/students/{id}/comments/{comment_id}",
            get(get_of_student)
                .put(attach_to_student)
                .delete(detach_from_student),
        )
}
