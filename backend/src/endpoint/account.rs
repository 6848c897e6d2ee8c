use super::tools::*;
use crate::{
    controller::account::{ProfessorInfo, ProfileDraft, UserDraft},
    entity::user,
};

#[derive(Deserialize)]
struct CreateProfessorRequest {
    user: UserDraft,
    #[serde(default)]
    profile: ProfileDraft,
}

async fn create_user(
    State(server): State<ArcServer>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<user::Model>> {
    Ok(Json(server.account.create_user(draft).await?))
}

async fn get_user(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Json<user::Model>> {
    Ok(Json(server.account.get_user(id).await?))
}

#[derive(Deserialize)]
struct ChangePasswordRequest {
    current: String,
    new: String,
}

async fn change_password(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode> {
    server
        .account
        .change_password(id, &req.current, &req.new)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_student(
    State(server): State<ArcServer>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<user::Model>> {
    Ok(Json(server.account.create_student(draft).await?))
}

async fn get_student(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<user::Model>> {
    Ok(Json(server.account.get_student(id).await?))
}

async fn delete_student(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.account.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_professor(
    State(server): State<ArcServer>,
    Json(req): Json<CreateProfessorRequest>,
) -> Result<Json<ProfessorInfo>> {
    Ok(Json(
        server.account.create_professor(req.user, req.profile).await?,
    ))
}

async fn get_professor(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<ProfessorInfo>> {
    Ok(Json(server.account.get_professor(id).await?))
}

async fn update_professor(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
    Json(profile): Json<ProfileDraft>,
) -> Result<Json<ProfessorInfo>> {
    Ok(Json(server.account.update_professor(id, profile).await?))
}

async fn delete_professor(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    server.account.delete_professor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/password", put(change_password))
        .route("/students", post(create_student))
        .route("/students/{id}", get(get_student).delete(delete_student))
        .route("/professors", post(create_professor))
        .route(
            "/professors/{id}",
            get(get_professor)
                .put(update_professor)
                .delete(delete_professor),
        )
}
