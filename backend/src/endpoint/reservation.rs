use super::tools::*;
use crate::{
    controller::{
        comment::{CommentDraft, CommentUpdate},
        reservation::{ReservationDraft, ReservationUpdate},
    },
    entity::{advisory, comment, reservation},
};

type Model = Json<reservation::Model>;

async fn create_in_calendar(
    State(server): State<ArcServer>,
    Path(calendar_id): Path<i32>,
    Json(draft): Json<ReservationDraft>,
) -> Result<Model> {
    Ok(Json(
        server
            .reservation
            .create_reservation_in_calendar(calendar_id, draft)
            .await?,
    ))
}

async fn list_of_calendar(
    State(server): State<ArcServer>,
    Path(calendar_id): Path<i32>,
) -> Result<Json<Vec<reservation::Model>>> {
    Ok(Json(
        server
            .reservation
            .list_reservations_of_calendar(calendar_id)
            .await?,
    ))
}

async fn update_in_calendar(
    State(server): State<ArcServer>,
    Path((calendar_id, id)): Path<(i32, i32)>,
    Json(update): Json<ReservationUpdate>,
) -> Result<Model> {
    Ok(Json(
        server
            .reservation
            .update_reservation_in_calendar(calendar_id, id, update)
            .await?,
    ))
}

async fn delete_from_calendar(
    State(server): State<ArcServer>,
    Path((calendar_id, id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    server
        .reservation
        .delete_reservation_from_calendar(calendar_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_of_student(
    State(server): State<ArcServer>,
    Path(student_id): Path<i32>,
) -> Result<Json<Vec<reservation::Model>>> {
    Ok(Json(
        server
            .reservation
            .list_reservations_of_student(student_id)
            .await?,
    ))
}

async fn get_reservation(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Model> {
    Ok(Json(server.reservation.get_reservation(id).await?))
}

async fn delete_reservation(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.reservation.delete_reservation_and_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_advisory(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<advisory::Model>> {
    Ok(Json(server.reservation.get_advisory_of_reservation(id).await?))
}

async fn remove_advisory(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.reservation.remove_advisory_from_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn associate_advisory(
    State(server): State<ArcServer>,
    Path((id, advisory_id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server
            .reservation
            .associate_advisory_to_reservation(id, advisory_id)
            .await?,
    ))
}

async fn detach_advisory(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<Model> {
    Ok(Json(
        server.reservation.detach_advisory_from_reservation(id).await?,
    ))
}

async fn get_comment(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
) -> Result<Json<comment::Model>> {
    Ok(Json(server.reservation.get_comment_of_reservation(id).await?))
}

async fn create_comment(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
    Json(draft): Json<CommentDraft>,
) -> Result<Json<comment::Model>> {
    Ok(Json(
        server
            .reservation
            .create_comment_in_reservation(id, draft)
            .await?,
    ))
}

async fn update_comment(
    State(server): State<ArcServer>,
    Path(id): Path<i32>,
    Json(update): Json<CommentUpdate>,
) -> Result<Json<comment::Model>> {
    Ok(Json(
        server
            .reservation
            .update_comment_of_reservation(id, update)
            .await?,
    ))
}

async fn delete_comment(State(server): State<ArcServer>, Path(id): Path<i32>) -> Result<StatusCode> {
    server.reservation.delete_comment_of_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn associate_comment(
    State(server): State<ArcServer>,
    Path((id, comment_id)): Path<(i32, i32)>,
) -> Result<Model> {
    Ok(Json(
        server
            .reservation
            .associate_comment_to_reservation(id, comment_id)
            .await?,
    ))
}

pub(super) fn routes() -> Router<ArcServer> {
    Router::new()
        .route(
            "/calendars/{id}/reservations",
            get(list_of_calendar).post(create_in_calendar),
        )
        .route(
            "/calendars/{id}/reservations/{reservation_id}",
            put(update_in_calendar).delete(delete_from_calendar),
        )
        .route("/students/{id}/reservations", get(list_of_student))
        .route(
            "/reservations/{id}",
            get(get_reservation).delete(delete_reservation),
        )
        .route(
            "/reservations/{id}/advisory",
            get(get_advisory).delete(remove_advisory),
        )
        .route("/reservations/{id}/advisory-link", delete(detach_advisory))
        .route(
            "/reservations/{id}/advisory/{advisory_id}",
            put(associate_advisory),
        )
        .route(
            "/reservations/{id}/comment",
            get(get_comment)
                .post(create_comment)
                .put(update_comment)
                .delete(delete_comment),
        )
        .route(
            "/reservations/{id}/comment/{comment_id}",
            put(associate_comment),
        )
}
