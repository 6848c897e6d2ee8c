//! Set of advisories a user has completed, stored as `user_completed_advisory` rows
use super::tools::*;
use crate::entity::{advisory, user, user_completed_advisory};

async fn record<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    advisory_id: i32,
) -> Result<Option<user_completed_advisory::Model>> {
    Ok(user_completed_advisory::Entity::find()
        .filter(user_completed_advisory::Column::UserId.eq(user_id))
        .filter(user_completed_advisory::Column::AdvisoryId.eq(advisory_id))
        .one(db)
        .await?)
}

pub struct CompletedController {
    db: Arc<DatabaseConnection>,
}

impl CompletedController {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn add_completed_advisory(
        &self,
        user_id: i32,
        advisory_id: i32,
    ) -> Result<advisory::Model> {
        let txn = self.db.begin().await?;
        ensure::<user::Entity, _>(&txn, user_id).await?;
        let advisory = fetch::<advisory::Entity, _>(&txn, advisory_id).await?;

        if record(&txn, user_id, advisory_id).await?.is_some() {
            return Err(Error::illegal(format!(
                "advisory {} is already completed by user {}",
                advisory_id, user_id
            )));
        }
        user_completed_advisory::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            advisory_id: ActiveValue::Set(advisory_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        tracing::debug!(user_id, advisory_id, "advisory_completed");
        Ok(advisory)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn remove_completed_advisory(&self, user_id: i32, advisory_id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        ensure::<user::Entity, _>(&txn, user_id).await?;
        ensure::<advisory::Entity, _>(&txn, advisory_id).await?;

        let model = record(&txn, user_id, advisory_id).await?.ok_or_else(|| {
            Error::illegal(format!(
                "advisory {} is not completed by user {}",
                advisory_id, user_id
            ))
        })?;
        user_completed_advisory::Entity::delete_by_id(model.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_completed_advisories(&self, user_id: i32) -> Result<Vec<advisory::Model>> {
        let user = fetch::<user::Entity, _>(self.db.deref(), user_id).await?;
        Ok(user
            .find_related(advisory::Entity)
            .all(self.db.deref())
            .await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{self, data};
    use crate::util::error::Kind;

    #[tokio::test]
    async fn add_remove() {
        let server = test::server().await;
        let professor = data::professor(&server, "claude").await.user.id;
        let student = data::student(&server, "norbert").await.id;
        let calendar = data::calendar(&server, professor).await.id;
        let advisory = data::advisory(&server, calendar).await;
        let ctrl = &server.completed;

        assert_eq!(
            ctrl.add_completed_advisory(student, advisory.id)
                .await
                .unwrap(),
            advisory
        );
        let err = ctrl
            .add_completed_advisory(student, advisory.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
        assert_eq!(
            ctrl.list_completed_advisories(student).await.unwrap(),
            vec![advisory.clone()]
        );

        ctrl.remove_completed_advisory(student, advisory.id)
            .await
            .unwrap();
        assert!(ctrl
            .list_completed_advisories(student)
            .await
            .unwrap()
            .is_empty());
        let err = ctrl
            .remove_completed_advisory(student, advisory.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
    #[tokio::test]
    async fn missing() {
        let server = test::server().await;
        let user = data::student(&server, "john").await.id;
        let ctrl = &server.completed;

        assert!(matches!(
            ctrl.add_completed_advisory(user, 999).await,
            Err(Error::NotInDB("advisory", 999))
        ));
        assert!(matches!(
            ctrl.remove_completed_advisory(999, 1).await,
            Err(Error::NotInDB("user", 999))
        ));
        assert!(matches!(
            ctrl.list_completed_advisories(999).await,
            Err(Error::NotInDB("user", 999))
        ));
    }
    #[tokio::test]
    async fn deleted_advisory_leave_set() {
        let server = test::server().await;
        let professor = data::professor(&server, "barbara").await.user.id;
        let student = data::student(&server, "ivan").await.id;
        let calendar = data::calendar(&server, professor).await.id;
        let advisory = data::advisory(&server, calendar).await.id;

        server
            .completed
            .add_completed_advisory(student, advisory)
            .await
            .unwrap();
        server
            .advisory
            .delete_advisory_from_calendar(calendar, advisory)
            .await
            .unwrap();
        assert!(server
            .completed
            .list_completed_advisories(student)
            .await
            .unwrap()
            .is_empty());
    }
}
