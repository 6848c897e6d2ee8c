//! Many-to-many association between professor and topic
//!
//! The association is a `professor_topic` pivot row, so adding or removing
//! it updates both sides at once.
use super::tools::*;
use crate::entity::{professor, professor_topic, topic};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicDraft {
    #[serde(default)]
    pub area: String,
    pub name: String,
}

impl BoundCheck for TopicDraft {
    fn check(&self) -> Option<&'static str> {
        match blank(&self.name) {
            true => Some("topic name should not be blank"),
            false => None,
        }
    }
}

/// find pivot row linking `professor_id` and `topic_id`
async fn link<C: ConnectionTrait>(
    db: &C,
    professor_id: i32,
    topic_id: i32,
) -> Result<Option<professor_topic::Model>> {
    Ok(professor_topic::Entity::find()
        .filter(professor_topic::Column::ProfessorId.eq(professor_id))
        .filter(professor_topic::Column::TopicId.eq(topic_id))
        .one(db)
        .await?)
}

pub struct TopicController {
    db: Arc<DatabaseConnection>,
}

impl TopicController {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn create_topic(&self, draft: TopicDraft) -> Result<topic::Model> {
        draft.bound_check()?;

        let model = topic::ActiveModel {
            area: ActiveValue::Set(draft.area),
            name: ActiveValue::Set(draft.name),
            ..Default::default()
        }
        .insert(self.db.deref())
        .await?;

        tracing::debug!(id = model.id, "topic_created");
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_topic(&self, id: i32) -> Result<topic::Model> {
        fetch::<topic::Entity, _>(self.db.deref(), id).await
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_topic(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        ensure::<topic::Entity, _>(&txn, id).await?;

        professor_topic::Entity::delete_many()
            .filter(professor_topic::Column::TopicId.eq(id))
            .exec(&txn)
            .await?;
        topic::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
    /// link topic to professor, linking twice is a no-op
    #[instrument(skip(self), level = "debug")]
    pub async fn add_topic_to_professor(
        &self,
        professor_id: i32,
        topic_id: i32,
    ) -> Result<topic::Model> {
        let txn = self.db.begin().await?;
        ensure::<professor::Entity, _>(&txn, professor_id).await?;
        let topic = fetch::<topic::Entity, _>(&txn, topic_id).await?;

        // an existing link, even one committed by a concurrent call, is kept as is
        professor_topic::Entity::insert(professor_topic::ActiveModel {
            professor_id: ActiveValue::Set(professor_id),
            topic_id: ActiveValue::Set(topic_id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                professor_topic::Column::ProfessorId,
                professor_topic::Column::TopicId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        tracing::debug!(professor_id, topic_id, "topic_linked");
        Ok(topic)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_topics_of_professor(&self, professor_id: i32) -> Result<Vec<topic::Model>> {
        let professor = fetch::<professor::Entity, _>(self.db.deref(), professor_id).await?;
        Ok(professor
            .find_related(topic::Entity)
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_professors_of_topic(&self, topic_id: i32) -> Result<Vec<professor::Model>> {
        let topic = fetch::<topic::Entity, _>(self.db.deref(), topic_id).await?;
        Ok(topic
            .find_related(professor::Entity)
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_topic_of_professor(
        &self,
        professor_id: i32,
        topic_id: i32,
    ) -> Result<topic::Model> {
        let professor = fetch::<professor::Entity, _>(self.db.deref(), professor_id).await?;
        professor
            .find_related(topic::Entity)
            .filter(topic::Column::Id.eq(topic_id))
            .one(self.db.deref())
            .await?
            .ok_or_else(|| {
                Error::NotAssociated(format!(
                    "topic {} is not associated with professor {}",
                    topic_id, professor_id
                ))
            })
    }
    /// overwrite the whole topic set of professor
    ///
    /// Every topic must exist, duplicated id are merged
    #[instrument(skip(self), level = "debug")]
    pub async fn replace_topics_of_professor(
        &self,
        professor_id: i32,
        topic_ids: Vec<i32>,
    ) -> Result<Vec<topic::Model>> {
        let txn = self.db.begin().await?;
        ensure::<professor::Entity, _>(&txn, professor_id).await?;

        let topic_ids: BTreeSet<i32> = topic_ids.into_iter().collect();
        let mut topics = Vec::with_capacity(topic_ids.len());
        for id in topic_ids {
            topics.push(fetch::<topic::Entity, _>(&txn, id).await?);
        }

        professor_topic::Entity::delete_many()
            .filter(professor_topic::Column::ProfessorId.eq(professor_id))
            .exec(&txn)
            .await?;
        for topic in topics.iter() {
            professor_topic::ActiveModel {
                professor_id: ActiveValue::Set(professor_id),
                topic_id: ActiveValue::Set(topic.id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        tracing::debug!(professor_id, count = topics.len(), "topic_replaced");
        Ok(topics)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn remove_topic_from_professor(&self, professor_id: i32, topic_id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        ensure::<professor::Entity, _>(&txn, professor_id).await?;
        ensure::<topic::Entity, _>(&txn, topic_id).await?;

        let result = professor_topic::Entity::delete_many()
            .filter(professor_topic::Column::ProfessorId.eq(professor_id))
            .filter(professor_topic::Column::TopicId.eq(topic_id))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(Error::illegal(format!(
                "topic {} is not associated with professor {}",
                topic_id, professor_id
            )));
        }

        txn.commit().await?;
        tracing::debug!(professor_id, topic_id, "topic_unlinked");
        Ok(())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn professor_has_topic(&self, professor_id: i32, topic_id: i32) -> Result<bool> {
        let db = self.db.deref();
        ensure::<professor::Entity, _>(db, professor_id).await?;
        ensure::<topic::Entity, _>(db, topic_id).await?;
        Ok(link(db, professor_id, topic_id).await?.is_some())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn topic_has_professor(&self, topic_id: i32, professor_id: i32) -> Result<bool> {
        let db = self.db.deref();
        ensure::<topic::Entity, _>(db, topic_id).await?;
        ensure::<professor::Entity, _>(db, professor_id).await?;
        Ok(link(db, professor_id, topic_id).await?.is_some())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn professor_has_any_topics(&self, professor_id: i32) -> Result<bool> {
        let db = self.db.deref();
        ensure::<professor::Entity, _>(db, professor_id).await?;
        Ok(professor_topic::Entity::find()
            .filter(professor_topic::Column::ProfessorId.eq(professor_id))
            .one(db)
            .await?
            .is_some())
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn topic_has_any_professors(&self, topic_id: i32) -> Result<bool> {
        let db = self.db.deref();
        ensure::<topic::Entity, _>(db, topic_id).await?;
        Ok(professor_topic::Entity::find()
            .filter(professor_topic::Column::TopicId.eq(topic_id))
            .one(db)
            .await?
            .is_some())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{self, data};
    use crate::util::error::Kind;

    #[tokio::test]
    async fn add_then_remove() {
        let server = test::server().await;
        let professor = data::professor(&server, "alan").await.user.id;
        let topic = data::topic(&server, "automata").await.id;
        let ctrl = &server.topic;

        assert!(!ctrl.professor_has_topic(professor, topic).await.unwrap());
        assert!(!ctrl.professor_has_any_topics(professor).await.unwrap());

        ctrl.add_topic_to_professor(professor, topic).await.unwrap();
        assert!(ctrl.professor_has_topic(professor, topic).await.unwrap());
        assert!(ctrl.topic_has_professor(topic, professor).await.unwrap());
        assert!(ctrl.topic_has_any_professors(topic).await.unwrap());

        ctrl.remove_topic_from_professor(professor, topic)
            .await
            .unwrap();
        assert!(!ctrl.professor_has_topic(professor, topic).await.unwrap());
        assert!(!ctrl.topic_has_professor(topic, professor).await.unwrap());
        assert!(!ctrl.topic_has_any_professors(topic).await.unwrap());
    }
    #[tokio::test]
    async fn add_twice() {
        let server = test::server().await;
        let professor = data::professor(&server, "alonzo").await.user.id;
        let topic = data::topic(&server, "lambda").await.id;

        server
            .topic
            .add_topic_to_professor(professor, topic)
            .await
            .unwrap();
        server
            .topic
            .add_topic_to_professor(professor, topic)
            .await
            .unwrap();

        let topics = server
            .topic
            .list_topics_of_professor(professor)
            .await
            .unwrap();
        assert_eq!(topics.len(), 1);
    }
    #[tokio::test]
    async fn add_over_existing_link() {
        let server = test::server().await;
        let professor = data::professor(&server, "leslie").await.user.id;
        let topic = data::topic(&server, "paxos").await.id;

        professor_topic::ActiveModel {
            professor_id: ActiveValue::Set(professor),
            topic_id: ActiveValue::Set(topic),
            ..Default::default()
        }
        .insert(server.db.deref())
        .await
        .unwrap();

        let linked = server
            .topic
            .add_topic_to_professor(professor, topic)
            .await
            .unwrap();
        assert_eq!(linked.id, topic);
        assert_eq!(
            server
                .topic
                .list_topics_of_professor(professor)
                .await
                .unwrap()
                .len(),
            1
        );
    }
    #[tokio::test]
    async fn add_concurrently() {
        let server = test::server().await;
        let professor = data::professor(&server, "nancy").await.user.id;
        let topic = data::topic(&server, "consensus").await.id;

        let (a, b) = tokio::join!(
            server.topic.add_topic_to_professor(professor, topic),
            server.topic.add_topic_to_professor(professor, topic)
        );
        assert_eq!(a.unwrap().id, topic);
        assert_eq!(b.unwrap().id, topic);
        assert_eq!(
            server
                .topic
                .list_topics_of_professor(professor)
                .await
                .unwrap()
                .len(),
            1
        );
    }
    #[tokio::test]
    async fn missing_side() {
        let server = test::server().await;
        let professor = data::professor(&server, "kurt").await.user.id;
        let topic = data::topic(&server, "logic").await.id;
        let ctrl = &server.topic;

        assert!(matches!(
            ctrl.add_topic_to_professor(professor, 999).await,
            Err(Error::NotInDB("topic", 999))
        ));
        assert!(matches!(
            ctrl.add_topic_to_professor(999, topic).await,
            Err(Error::NotInDB("professor", 999))
        ));
        assert!(matches!(
            ctrl.professor_has_topic(professor, 999).await,
            Err(Error::NotInDB("topic", 999))
        ));
        assert!(matches!(
            ctrl.topic_has_any_professors(999).await,
            Err(Error::NotInDB("topic", 999))
        ));
        assert!(matches!(
            ctrl.list_topics_of_professor(999).await,
            Err(Error::NotInDB("professor", 999))
        ));
    }
    #[tokio::test]
    async fn topic_not_associated() {
        let server = test::server().await;
        let professor = data::professor(&server, "john").await.user.id;
        let topic = data::topic(&server, "compilers").await.id;

        let err = server
            .topic
            .get_topic_of_professor(professor, topic)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotAssociated(_)));
        assert_eq!(err.kind(), Kind::NotFound);

        server
            .topic
            .add_topic_to_professor(professor, topic)
            .await
            .unwrap();
        let found = server
            .topic
            .get_topic_of_professor(professor, topic)
            .await
            .unwrap();
        assert_eq!(found.id, topic);

        let err = server
            .topic
            .remove_topic_from_professor(professor, 999)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::NotFound);
    }
    #[tokio::test]
    async fn remove_unlinked() {
        let server = test::server().await;
        let professor = data::professor(&server, "niklaus").await.user.id;
        let topic = data::topic(&server, "pascal").await.id;

        let err = server
            .topic
            .remove_topic_from_professor(professor, topic)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
    #[tokio::test]
    async fn replace_sync_both_side() {
        let server = test::server().await;
        let professor = data::professor(&server, "barbara").await.user.id;
        let t1 = data::topic(&server, "abstraction").await.id;
        let t2 = data::topic(&server, "distributed").await.id;
        let ctrl = &server.topic;

        ctrl.add_topic_to_professor(professor, t1).await.unwrap();
        ctrl.add_topic_to_professor(professor, t2).await.unwrap();

        ctrl.replace_topics_of_professor(professor, vec![t2])
            .await
            .unwrap();

        let topics = ctrl.list_topics_of_professor(professor).await.unwrap();
        assert_eq!(topics.iter().map(|x| x.id).collect::<Vec<_>>(), vec![t2]);
        assert!(!ctrl.topic_has_professor(t1, professor).await.unwrap());
        assert!(ctrl
            .list_professors_of_topic(t1)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            ctrl.list_professors_of_topic(t2).await.unwrap()[0].id,
            professor
        );
    }
    #[tokio::test]
    async fn replace_unknown_topic() {
        let server = test::server().await;
        let professor = data::professor(&server, "frances").await.user.id;
        let t1 = data::topic(&server, "optimization").await.id;

        server
            .topic
            .add_topic_to_professor(professor, t1)
            .await
            .unwrap();
        let err = server
            .topic
            .replace_topics_of_professor(professor, vec![999])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotInDB("topic", 999)));

        // rolled back
        assert!(server
            .topic
            .professor_has_topic(professor, t1)
            .await
            .unwrap());
    }
    #[tokio::test]
    async fn delete_topic_unlink() {
        let server = test::server().await;
        let professor = data::professor(&server, "ken").await.user.id;
        let topic = data::topic(&server, "unix").await.id;

        server
            .topic
            .add_topic_to_professor(professor, topic)
            .await
            .unwrap();
        server.topic.delete_topic(topic).await.unwrap();

        assert!(!server
            .topic
            .professor_has_any_topics(professor)
            .await
            .unwrap());
        assert!(server.topic.get_topic(topic).await.is_err());
    }
    #[tokio::test]
    async fn blank_topic() {
        let server = test::server().await;
        let err = server
            .topic
            .create_topic(TopicDraft {
                area: "math".to_owned(),
                name: " ".to_owned(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
}
