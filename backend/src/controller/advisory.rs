//! Advisory ownership, an advisory always belongs to one professor and
//! optionally to one of that professor's calendars
use super::tools::*;
use crate::entity::{advisory, calendar, professor, reservation, user_completed_advisory};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisoryDraft {
    pub duration: i32,
    #[serde(default)]
    pub topic: String,
    #[serde(default, alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub area: String,
    pub professor_id: Option<i32>,
    pub calendar_id: Option<i32>,
}

impl BoundCheck for AdvisoryDraft {
    fn check(&self) -> Option<&'static str> {
        match self.duration <= 0 {
            true => Some("duration should be positive"),
            false => None,
        }
    }
}

/// mutable part of an advisory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisoryUpdate {
    pub duration: i32,
    #[serde(default)]
    pub topic: String,
    #[serde(default, alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub area: String,
}

impl BoundCheck for AdvisoryUpdate {
    fn check(&self) -> Option<&'static str> {
        match self.duration <= 0 {
            true => Some("duration should be positive"),
            false => None,
        }
    }
}

fn in_calendar(model: &advisory::Model, calendar_id: i32) -> Result<()> {
    match model.calendar_id == Some(calendar_id) {
        true => Ok(()),
        false => Err(Error::illegal(format!(
            "advisory {} does not belong to calendar {}",
            model.id, calendar_id
        ))),
    }
}

fn of_professor(model: &advisory::Model, professor_id: i32) -> Result<()> {
    match model.professor_id == professor_id {
        true => Ok(()),
        false => Err(Error::illegal(format!(
            "advisory {} does not belong to professor {}",
            model.id, professor_id
        ))),
    }
}

/// delete advisories, detaching reservation and completion record first
pub(super) async fn remove_advisories<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    reservation::Entity::update_many()
        .col_expr(
            reservation::Column::AdvisoryId,
            Expr::value(Option::<i32>::None),
        )
        .filter(reservation::Column::AdvisoryId.is_in(ids.clone()))
        .exec(db)
        .await?;
    user_completed_advisory::Entity::delete_many()
        .filter(user_completed_advisory::Column::AdvisoryId.is_in(ids.clone()))
        .exec(db)
        .await?;
    advisory::Entity::delete_many()
        .filter(advisory::Column::Id.is_in(ids))
        .exec(db)
        .await?;
    Ok(())
}

pub struct AdvisoryController {
    db: Arc<DatabaseConnection>,
}

impl AdvisoryController {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
    async fn insert<C: ConnectionTrait>(
        &self,
        db: &C,
        draft: AdvisoryDraft,
        professor_id: i32,
        calendar_id: Option<i32>,
    ) -> Result<advisory::Model> {
        let model = advisory::ActiveModel {
            professor_id: ActiveValue::Set(professor_id),
            calendar_id: ActiveValue::Set(calendar_id),
            duration: ActiveValue::Set(draft.duration),
            topic: ActiveValue::Set(draft.topic),
            kind: ActiveValue::Set(draft.kind),
            area: ActiveValue::Set(draft.area),
            completed: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::debug!(id = model.id, professor_id, ?calendar_id, "advisory_created");
        Ok(model)
    }
    async fn apply<C: ConnectionTrait>(
        &self,
        db: &C,
        model: advisory::Model,
        update: AdvisoryUpdate,
    ) -> Result<advisory::Model> {
        let mut model = model.into_active_model();
        fill_active_model!(model, update, duration, topic, kind, area);
        Ok(model.update(db).await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_advisory(&self, id: i32) -> Result<advisory::Model> {
        fetch::<advisory::Entity, _>(self.db.deref(), id).await
    }
    /// the advisory inherits professor of the calendar
    #[instrument(skip(self), level = "debug")]
    pub async fn create_advisory_in_calendar(
        &self,
        calendar_id: i32,
        draft: AdvisoryDraft,
    ) -> Result<advisory::Model> {
        draft.bound_check()?;

        let txn = self.db.begin().await?;
        let calendar = fetch::<calendar::Entity, _>(&txn, calendar_id).await?;

        if draft.calendar_id.is_some_and(|x| x != calendar.id) {
            return Err(Error::illegal("advisory is assigned to another calendar"));
        }
        if draft
            .professor_id
            .is_some_and(|x| x != calendar.professor_id)
        {
            return Err(Error::illegal(format!(
                "calendar {} does not belong to the professor of the advisory",
                calendar.id
            )));
        }

        let model = self
            .insert(&txn, draft, calendar.professor_id, Some(calendar.id))
            .await?;
        txn.commit().await?;
        Ok(model)
    }
    /// unknown calendar yields an empty list
    #[instrument(skip(self), level = "debug")]
    pub async fn list_advisories_of_calendar(
        &self,
        calendar_id: i32,
    ) -> Result<Vec<advisory::Model>> {
        Ok(advisory::Entity::find()
            .filter(advisory::Column::CalendarId.eq(calendar_id))
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_advisory_of_calendar(
        &self,
        calendar_id: i32,
        advisory_id: i32,
    ) -> Result<advisory::Model> {
        let model = fetch::<advisory::Entity, _>(self.db.deref(), advisory_id).await?;
        in_calendar(&model, calendar_id)?;
        Ok(model)
    }
    #[instrument(skip(self, update), level = "debug")]
    pub async fn update_advisory_in_calendar(
        &self,
        calendar_id: i32,
        advisory_id: i32,
        update: AdvisoryUpdate,
    ) -> Result<advisory::Model> {
        update.bound_check()?;

        let txn = self.db.begin().await?;
        let model = fetch::<advisory::Entity, _>(&txn, advisory_id).await?;
        in_calendar(&model, calendar_id)?;

        let model = self.apply(&txn, model, update).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_advisory_from_calendar(
        &self,
        calendar_id: i32,
        advisory_id: i32,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let model = fetch::<advisory::Entity, _>(&txn, advisory_id).await?;
        in_calendar(&model, calendar_id)?;

        remove_advisories(&txn, vec![model.id]).await?;
        txn.commit().await?;
        tracing::debug!(id = advisory_id, calendar_id, "advisory_deleted");
        Ok(())
    }
    /// A draft already carrying a professor is rejected, professor is assigned once
    #[instrument(skip(self), level = "debug")]
    pub async fn create_advisory_for_professor(
        &self,
        professor_id: i32,
        draft: AdvisoryDraft,
    ) -> Result<advisory::Model> {
        draft.bound_check()?;

        let txn = self.db.begin().await?;
        ensure::<professor::Entity, _>(&txn, professor_id).await?;

        if draft.professor_id.is_some() {
            return Err(Error::illegal("advisory is already assigned to a professor"));
        }
        let calendar_id = match draft.calendar_id {
            Some(id) => {
                let calendar = fetch::<calendar::Entity, _>(&txn, id).await?;
                if calendar.professor_id != professor_id {
                    return Err(Error::illegal(format!(
                        "calendar {} does not belong to professor {}",
                        id, professor_id
                    )));
                }
                Some(id)
            }
            None => None,
        };

        let model = self.insert(&txn, draft, professor_id, calendar_id).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_advisories_of_professor(
        &self,
        professor_id: i32,
    ) -> Result<Vec<advisory::Model>> {
        ensure::<professor::Entity, _>(self.db.deref(), professor_id).await?;
        Ok(advisory::Entity::find()
            .filter(advisory::Column::ProfessorId.eq(professor_id))
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_advisory_of_professor(
        &self,
        professor_id: i32,
        advisory_id: i32,
    ) -> Result<advisory::Model> {
        let model = fetch::<advisory::Entity, _>(self.db.deref(), advisory_id).await?;
        of_professor(&model, professor_id)?;
        Ok(model)
    }
    #[instrument(skip(self, update), level = "debug")]
    pub async fn update_advisory_of_professor(
        &self,
        professor_id: i32,
        advisory_id: i32,
        update: AdvisoryUpdate,
    ) -> Result<advisory::Model> {
        update.bound_check()?;

        let txn = self.db.begin().await?;
        let model = fetch::<advisory::Entity, _>(&txn, advisory_id).await?;
        of_professor(&model, professor_id)?;

        let model = self.apply(&txn, model, update).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_advisory_of_professor(
        &self,
        professor_id: i32,
        advisory_id: i32,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let model = fetch::<advisory::Entity, _>(&txn, advisory_id).await?;
        of_professor(&model, professor_id)?;

        remove_advisories(&txn, vec![model.id]).await?;
        txn.commit().await?;
        tracing::debug!(id = advisory_id, professor_id, "advisory_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{self, data};
    use crate::util::error::Kind;

    fn update(duration: i32) -> AdvisoryUpdate {
        AdvisoryUpdate {
            duration,
            topic: "recursion".to_owned(),
            kind: "virtual".to_owned(),
            area: "cs".to_owned(),
        }
    }

    #[tokio::test]
    async fn inherit_professor() {
        let server = test::server().await;
        let professor = data::professor(&server, "dennis").await.user.id;
        let calendar = data::calendar(&server, professor).await.id;

        let advisory = data::advisory(&server, calendar).await;
        assert_eq!(advisory.professor_id, professor);
        assert_eq!(advisory.calendar_id, Some(calendar));
        assert!(!advisory.completed);

        let listed = server
            .advisory
            .list_advisories_of_professor(professor)
            .await
            .unwrap();
        assert_eq!(listed, vec![advisory]);
    }
    #[tokio::test]
    async fn create_in_missing_calendar() {
        let server = test::server().await;
        let err = server
            .advisory
            .create_advisory_in_calendar(999, data::advisory_draft())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotInDB("calendar", 999)));
    }
    #[tokio::test]
    async fn list_of_unknown_calendar() {
        let server = test::server().await;
        assert!(server
            .advisory
            .list_advisories_of_calendar(999)
            .await
            .unwrap()
            .is_empty());
    }
    #[tokio::test]
    async fn list_of_unknown_professor() {
        let server = test::server().await;
        assert!(matches!(
            server.advisory.list_advisories_of_professor(999).await,
            Err(Error::NotInDB("professor", 999))
        ));
    }
    #[tokio::test]
    async fn cross_calendar() {
        let server = test::server().await;
        let professor = data::professor(&server, "bjarne").await.user.id;
        let c1 = data::calendar(&server, professor).await.id;
        let c2 = data::calendar(&server, professor).await.id;
        let advisory = data::advisory(&server, c1).await;

        let err = server
            .advisory
            .update_advisory_in_calendar(c2, advisory.id, update(90))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let err = server
            .advisory
            .delete_advisory_from_calendar(c2, advisory.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let unchanged = server.advisory.get_advisory(advisory.id).await.unwrap();
        assert_eq!(unchanged, advisory);
    }
    #[tokio::test]
    async fn update_then_list() {
        let server = test::server().await;
        let professor = data::professor(&server, "guido").await.user.id;
        let calendar = data::calendar(&server, professor).await.id;
        let advisory = data::advisory(&server, calendar).await;

        let updated = server
            .advisory
            .update_advisory_in_calendar(calendar, advisory.id, update(90))
            .await
            .unwrap();
        assert_eq!(updated.duration, 90);
        assert_eq!(updated.topic, "recursion");

        let listed = server
            .advisory
            .list_advisories_of_calendar(calendar)
            .await
            .unwrap();
        assert_eq!(listed, vec![updated]);
    }
    #[tokio::test]
    async fn delete_twice() {
        let server = test::server().await;
        let professor = data::professor(&server, "james").await.user.id;
        let calendar = data::calendar(&server, professor).await.id;
        let advisory = data::advisory(&server, calendar).await.id;

        server
            .advisory
            .delete_advisory_from_calendar(calendar, advisory)
            .await
            .unwrap();
        let err = server
            .advisory
            .delete_advisory_from_calendar(calendar, advisory)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::NotFound);
    }
    #[tokio::test]
    async fn assign_professor_once() {
        let server = test::server().await;
        let professor = data::professor(&server, "yukihiro").await.user.id;
        let other = data::professor(&server, "rasmus").await.user.id;

        let mut draft = data::advisory_draft();
        draft.professor_id = Some(other);
        let err = server
            .advisory
            .create_advisory_for_professor(professor, draft)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let advisory = server
            .advisory
            .create_advisory_for_professor(professor, data::advisory_draft())
            .await
            .unwrap();
        assert_eq!(advisory.professor_id, professor);
        assert_eq!(advisory.calendar_id, None);
    }
    #[tokio::test]
    async fn foreign_calendar() {
        let server = test::server().await;
        let professor = data::professor(&server, "anders").await.user.id;
        let other = data::professor(&server, "brendan").await.user.id;
        let calendar = data::calendar(&server, other).await.id;

        let mut draft = data::advisory_draft();
        draft.calendar_id = Some(calendar);
        let err = server
            .advisory
            .create_advisory_for_professor(professor, draft)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let mut draft = data::advisory_draft();
        draft.professor_id = Some(professor);
        let err = server
            .advisory
            .create_advisory_in_calendar(calendar, draft)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
    #[tokio::test]
    async fn professor_ownership() {
        let server = test::server().await;
        let professor = data::professor(&server, "robin").await.user.id;
        let other = data::professor(&server, "john").await.user.id;
        let advisory = server
            .advisory
            .create_advisory_for_professor(professor, data::advisory_draft())
            .await
            .unwrap();

        let err = server
            .advisory
            .update_advisory_of_professor(other, advisory.id, update(30))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
        let err = server
            .advisory
            .get_advisory_of_professor(other, advisory.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let updated = server
            .advisory
            .update_advisory_of_professor(professor, advisory.id, update(30))
            .await
            .unwrap();
        assert_eq!(updated.duration, 30);

        server
            .advisory
            .delete_advisory_of_professor(professor, advisory.id)
            .await
            .unwrap();
        assert!(server
            .advisory
            .list_advisories_of_professor(professor)
            .await
            .unwrap()
            .is_empty());
    }
    #[tokio::test]
    async fn negative_duration() {
        let server = test::server().await;
        let professor = data::professor(&server, "margaret").await.user.id;
        let mut draft = data::advisory_draft();
        draft.duration = 0;
        let err = server
            .advisory
            .create_advisory_for_professor(professor, draft)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
}
