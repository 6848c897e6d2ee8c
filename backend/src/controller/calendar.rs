use super::tools::*;
use crate::entity::{advisory, calendar, professor, reservation};

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDraft {
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
}

impl BoundCheck for CalendarDraft {
    fn check(&self) -> Option<&'static str> {
        match self.start_date > self.end_date {
            true => Some("calendar should not end before it starts"),
            false => None,
        }
    }
}

pub struct CalendarController {
    db: Arc<DatabaseConnection>,
}

impl CalendarController {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn create_calendar(
        &self,
        professor_id: i32,
        draft: CalendarDraft,
    ) -> Result<calendar::Model> {
        draft.bound_check()?;

        let txn = self.db.begin().await?;
        ensure::<professor::Entity, _>(&txn, professor_id).await?;

        let model = calendar::ActiveModel {
            professor_id: ActiveValue::Set(professor_id),
            start_date: ActiveValue::Set(draft.start_date),
            end_date: ActiveValue::Set(draft.end_date),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        tracing::debug!(id = model.id, professor_id, "calendar_created");
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_calendar(&self, id: i32) -> Result<calendar::Model> {
        fetch::<calendar::Entity, _>(self.db.deref(), id).await
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_calendars_of_professor(
        &self,
        professor_id: i32,
    ) -> Result<Vec<calendar::Model>> {
        let professor = fetch::<professor::Entity, _>(self.db.deref(), professor_id).await?;
        Ok(professor
            .find_related(calendar::Entity)
            .all(self.db.deref())
            .await?)
    }
    /// advisories and reservations of the calendar are kept, with their calendar cleared
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_calendar(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        ensure::<calendar::Entity, _>(&txn, id).await?;

        advisory::Entity::update_many()
            .col_expr(advisory::Column::CalendarId, Expr::value(Option::<i32>::None))
            .filter(advisory::Column::CalendarId.eq(id))
            .exec(&txn)
            .await?;
        reservation::Entity::update_many()
            .col_expr(
                reservation::Column::CalendarId,
                Expr::value(Option::<i32>::None),
            )
            .filter(reservation::Column::CalendarId.eq(id))
            .exec(&txn)
            .await?;
        calendar::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        tracing::debug!(id, "calendar_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{self, data};
    use crate::util::error::Kind;

    #[tokio::test]
    async fn reversed_range() {
        let server = test::server().await;
        let professor = data::professor(&server, "tim").await.user.id;
        let draft = data::calendar_draft();
        let err = server
            .calendar
            .create_calendar(
                professor,
                CalendarDraft {
                    start_date: draft.end_date,
                    end_date: draft.start_date,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
    #[tokio::test]
    async fn missing_professor() {
        let server = test::server().await;
        let err = server
            .calendar
            .create_calendar(999, data::calendar_draft())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotInDB("professor", 999)));
    }
    #[tokio::test]
    async fn list_of_professor() {
        let server = test::server().await;
        let professor = data::professor(&server, "vint").await.user.id;
        let other = data::professor(&server, "bob").await.user.id;
        let c1 = data::calendar(&server, professor).await;
        let c2 = data::calendar(&server, professor).await;
        data::calendar(&server, other).await;

        let listed = server
            .calendar
            .list_calendars_of_professor(professor)
            .await
            .unwrap();
        assert_eq!(listed, vec![c1, c2]);
    }
    #[tokio::test]
    async fn delete_detach() {
        let server = test::server().await;
        let professor = data::professor(&server, "radia").await.user.id;
        let student = data::student(&server, "sally").await.id;
        let calendar = data::calendar(&server, professor).await.id;
        let advisory = data::advisory(&server, calendar).await.id;
        let reservation = data::reservation(&server, calendar, student).await.id;

        server.calendar.delete_calendar(calendar).await.unwrap();

        let advisory = server.advisory.get_advisory(advisory).await.unwrap();
        assert_eq!(advisory.calendar_id, None);
        assert_eq!(advisory.professor_id, professor);
        let reservation = server
            .reservation
            .get_reservation(reservation)
            .await
            .unwrap();
        assert_eq!(reservation.calendar_id, None);

        let err = server.calendar.delete_calendar(calendar).await.unwrap_err();
        assert_eq!(err.kind(), Kind::NotFound);
    }
}
