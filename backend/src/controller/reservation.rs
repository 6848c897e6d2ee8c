//! Reservation and the one-to-one links it holds
//!
//! Both links live on the reservation row (`advisory_id`, `comment_id`,
//! each unique), the advisory and comment side is a reverse lookup.
use super::account::fetch_student;
use super::advisory::remove_advisories;
use super::comment::{apply_update, insert_comment, remove_comment, CommentDraft, CommentUpdate};
use super::tools::*;
use crate::entity::{advisory, calendar, comment, reservation};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationDraft {
    pub student_id: i32,
    /// now if absent
    pub reserve_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationUpdate {
    pub reserve_at: Option<chrono::NaiveDateTime>,
    pub cancelled: Option<bool>,
    pub status: Option<String>,
}

impl BoundCheck for ReservationUpdate {
    fn check(&self) -> Option<&'static str> {
        match self.status.as_deref().is_some_and(blank) {
            true => Some("status should not be blank"),
            false => None,
        }
    }
}

fn in_calendar(model: &reservation::Model, calendar_id: i32) -> Result<()> {
    match model.calendar_id == Some(calendar_id) {
        true => Ok(()),
        false => Err(Error::illegal(format!(
            "reservation {} does not belong to calendar {}",
            model.id, calendar_id
        ))),
    }
}

fn no_advisory(id: i32) -> Error {
    Error::NotAssociated(format!("reservation {} has no advisory associated", id))
}

fn no_comment(id: i32) -> Error {
    Error::NotAssociated(format!("reservation {} has no comment associated", id))
}

/// delete reservation together with its comment
async fn remove_reservation<C: ConnectionTrait>(db: &C, model: reservation::Model) -> Result<()> {
    if let Some(comment_id) = model.comment_id {
        remove_comment(db, comment_id).await?;
    }
    reservation::Entity::delete_by_id(model.id).exec(db).await?;

    tracing::debug!(id = model.id, "reservation_deleted");
    Ok(())
}

async fn set_comment<C: ConnectionTrait>(
    db: &C,
    model: reservation::Model,
    comment_id: Option<i32>,
) -> Result<reservation::Model> {
    let mut model = model.into_active_model();
    model.comment_id = ActiveValue::Set(comment_id);
    Ok(model.update(db).await?)
}

pub struct ReservationController {
    db: Arc<DatabaseConnection>,
}

impl ReservationController {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn create_reservation_in_calendar(
        &self,
        calendar_id: i32,
        draft: ReservationDraft,
    ) -> Result<reservation::Model> {
        let txn = self.db.begin().await?;
        ensure::<calendar::Entity, _>(&txn, calendar_id).await?;
        fetch_student(&txn, draft.student_id).await?;

        let model = reservation::ActiveModel {
            student_id: ActiveValue::Set(Some(draft.student_id)),
            calendar_id: ActiveValue::Set(Some(calendar_id)),
            reserve_at: ActiveValue::Set(
                draft
                    .reserve_at
                    .unwrap_or_else(|| chrono::Local::now().naive_local()),
            ),
            cancelled: ActiveValue::Set(false),
            status: ActiveValue::Set(reservation::DEFAULT_STATUS.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        tracing::debug!(id = model.id, calendar_id, "reservation_created");
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_reservation(&self, id: i32) -> Result<reservation::Model> {
        fetch::<reservation::Entity, _>(self.db.deref(), id).await
    }
    /// unknown calendar yields an empty list
    #[instrument(skip(self), level = "debug")]
    pub async fn list_reservations_of_calendar(
        &self,
        calendar_id: i32,
    ) -> Result<Vec<reservation::Model>> {
        Ok(reservation::Entity::find()
            .filter(reservation::Column::CalendarId.eq(calendar_id))
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_reservations_of_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<reservation::Model>> {
        let student = fetch_student(self.db.deref(), student_id).await?;
        Ok(student
            .find_related(reservation::Entity)
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn update_reservation_in_calendar(
        &self,
        calendar_id: i32,
        id: i32,
        update: ReservationUpdate,
    ) -> Result<reservation::Model> {
        update.bound_check()?;

        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        in_calendar(&model, calendar_id)?;

        let mut model = model.into_active_model();
        fill_exist_active_model!(model, update, reserve_at, cancelled, status);
        let model = model.update(&txn).await?;

        txn.commit().await?;
        Ok(model)
    }
    /// the comment of reservation is deleted as well
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_reservation_from_calendar(&self, calendar_id: i32, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        in_calendar(&model, calendar_id)?;

        remove_reservation(&txn, model).await?;
        txn.commit().await?;
        Ok(())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn associate_advisory_to_reservation(
        &self,
        id: i32,
        advisory_id: i32,
    ) -> Result<reservation::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        let advisory = fetch::<advisory::Entity, _>(&txn, advisory_id).await?;

        if let Some(current) = model.advisory_id {
            return Err(Error::illegal(format!(
                "reservation {} is already associated with advisory {}",
                id, current
            )));
        }
        if let Some(holder) = advisory.find_related(reservation::Entity).one(&txn).await? {
            return Err(Error::illegal(format!(
                "advisory {} is already associated with reservation {}",
                advisory_id, holder.id
            )));
        }

        let mut model = model.into_active_model();
        model.advisory_id = ActiveValue::Set(Some(advisory_id));
        let model = model.update(&txn).await?;

        txn.commit().await?;
        tracing::debug!(id, advisory_id, "advisory_associated");
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_advisory_of_reservation(&self, id: i32) -> Result<advisory::Model> {
        let model = fetch::<reservation::Entity, _>(self.db.deref(), id).await?;
        model
            .find_related(advisory::Entity)
            .one(self.db.deref())
            .await?
            .ok_or_else(|| no_advisory(id))
    }
    /// detach the advisory and delete it
    #[instrument(skip(self), level = "debug")]
    pub async fn remove_advisory_from_reservation(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        let advisory_id = model.advisory_id.ok_or_else(|| no_advisory(id))?;

        remove_advisories(&txn, vec![advisory_id]).await?;

        txn.commit().await?;
        tracing::debug!(id, advisory_id, "advisory_removed");
        Ok(())
    }
    /// detach the advisory, keeping it
    #[instrument(skip(self), level = "debug")]
    pub async fn detach_advisory_from_reservation(&self, id: i32) -> Result<reservation::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        let advisory_id = model.advisory_id.ok_or_else(|| no_advisory(id))?;

        let mut model = model.into_active_model();
        model.advisory_id = ActiveValue::Set(None);
        let model = model.update(&txn).await?;

        txn.commit().await?;
        tracing::debug!(id, advisory_id, "advisory_detached");
        Ok(model)
    }
    /// a comment owned by a student can only join that student's reservation
    #[instrument(skip(self), level = "debug")]
    pub async fn associate_comment_to_reservation(
        &self,
        id: i32,
        comment_id: i32,
    ) -> Result<reservation::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        let comment = fetch::<comment::Entity, _>(&txn, comment_id).await?;

        if let Some(current) = model.comment_id {
            return Err(Error::illegal(format!(
                "reservation {} is already associated with comment {}",
                id, current
            )));
        }
        if let Some(holder) = comment.find_related(reservation::Entity).one(&txn).await? {
            return Err(Error::illegal(format!(
                "comment {} is already associated with reservation {}",
                comment_id, holder.id
            )));
        }
        if comment.student_id.is_some() && comment.student_id != model.student_id {
            return Err(Error::illegal(format!(
                "comment {} and reservation {} belong to different students",
                comment_id, id
            )));
        }

        let model = set_comment(&txn, model, Some(comment_id)).await?;
        txn.commit().await?;
        tracing::debug!(id, comment_id, "comment_associated");
        Ok(model)
    }
    /// the comment is written by the student of reservation
    #[instrument(skip(self), level = "debug")]
    pub async fn create_comment_in_reservation(
        &self,
        id: i32,
        mut draft: CommentDraft,
    ) -> Result<comment::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;

        if let Some(current) = model.comment_id {
            return Err(Error::illegal(format!(
                "reservation {} is already associated with comment {}",
                id, current
            )));
        }
        if draft.student_id.is_some() && draft.student_id != model.student_id {
            return Err(Error::illegal(format!(
                "comment author is not the student of reservation {}",
                id
            )));
        }
        draft.student_id = model.student_id;

        let comment = insert_comment(&txn, draft).await?;
        set_comment(&txn, model, Some(comment.id)).await?;

        txn.commit().await?;
        Ok(comment)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_comment_of_reservation(&self, id: i32) -> Result<comment::Model> {
        let model = fetch::<reservation::Entity, _>(self.db.deref(), id).await?;
        model
            .find_related(comment::Entity)
            .one(self.db.deref())
            .await?
            .ok_or_else(|| no_comment(id))
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn update_comment_of_reservation(
        &self,
        id: i32,
        update: CommentUpdate,
    ) -> Result<comment::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        let comment = model
            .find_related(comment::Entity)
            .one(&txn)
            .await?
            .ok_or_else(|| no_comment(id))?;

        let comment = apply_update(&txn, comment, update).await?;
        txn.commit().await?;
        Ok(comment)
    }
    /// delete the comment, the reservation is kept
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_comment_of_reservation(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;
        let comment_id = model.comment_id.ok_or_else(|| no_comment(id))?;

        remove_comment(&txn, comment_id).await?;
        txn.commit().await?;
        Ok(())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_reservation_and_comment(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let model = fetch::<reservation::Entity, _>(&txn, id).await?;

        remove_reservation(&txn, model).await?;
        txn.commit().await?;
        Ok(())
    }
}
