//! Comments and their owning student
use super::account::fetch_student;
use super::tools::*;
use crate::entity::{
    comment::{self, MAX_RATING, MIN_RATING},
    reservation,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    pub text: String,
    pub rating: i32,
    pub student_id: Option<i32>,
}

fn check_comment(text: &str, rating: i32) -> Option<&'static str> {
    if blank(text) {
        Some("comment text should not be blank")
    } else if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        Some("rating should be between 0 and 5")
    } else {
        None
    }
}

impl BoundCheck for CommentDraft {
    fn check(&self) -> Option<&'static str> {
        check_comment(&self.text, self.rating)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentUpdate {
    pub text: String,
    pub rating: i32,
}

impl BoundCheck for CommentUpdate {
    fn check(&self) -> Option<&'static str> {
        check_comment(&self.text, self.rating)
    }
}

pub(super) async fn insert_comment<C: ConnectionTrait>(
    db: &C,
    draft: CommentDraft,
) -> Result<comment::Model> {
    draft.bound_check()?;
    if let Some(student_id) = draft.student_id {
        fetch_student(db, student_id).await?;
    }

    let model = comment::ActiveModel {
        student_id: ActiveValue::Set(draft.student_id),
        text: ActiveValue::Set(draft.text),
        rating: ActiveValue::Set(draft.rating),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(id = model.id, student_id = ?model.student_id, "comment_created");
    Ok(model)
}

pub(super) async fn apply_update<C: ConnectionTrait>(
    db: &C,
    model: comment::Model,
    update: CommentUpdate,
) -> Result<comment::Model> {
    update.bound_check()?;

    let mut model = model.into_active_model();
    fill_active_model!(model, update, text, rating);
    Ok(model.update(db).await?)
}

/// delete a comment, clearing the reservation holding it
pub(super) async fn remove_comment<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    reservation::Entity::update_many()
        .col_expr(
            reservation::Column::CommentId,
            Expr::value(Option::<i32>::None),
        )
        .filter(reservation::Column::CommentId.eq(id))
        .exec(db)
        .await?;
    comment::Entity::delete_by_id(id).exec(db).await?;

    tracing::debug!(id, "comment_deleted");
    Ok(())
}

fn owned_by(model: &comment::Model, student_id: i32) -> Result<()> {
    match model.student_id == Some(student_id) {
        true => Ok(()),
        false => Err(Error::illegal(format!(
            "comment {} does not belong to student {}",
            model.id, student_id
        ))),
    }
}

/// a comment held by a reservation can only go to the student of that reservation
async fn held_by_other<C: ConnectionTrait>(
    db: &C,
    model: &comment::Model,
    student_id: i32,
) -> Result<()> {
    let holder = model.find_related(reservation::Entity).one(db).await?;
    match holder {
        Some(holder) if holder.student_id.is_some_and(|x| x != student_id) => {
            Err(Error::illegal(format!(
                "comment {} is held by reservation {} of another student",
                model.id, holder.id
            )))
        }
        _ => Ok(()),
    }
}

pub struct CommentController {
    db: Arc<DatabaseConnection>,
}

impl CommentController {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn create_comment(&self, draft: CommentDraft) -> Result<comment::Model> {
        let txn = self.db.begin().await?;
        let model = insert_comment(&txn, draft).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_comment(&self, id: i32) -> Result<comment::Model> {
        fetch::<comment::Entity, _>(self.db.deref(), id).await
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn update_comment(&self, id: i32, update: CommentUpdate) -> Result<comment::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<comment::Entity, _>(&txn, id).await?;
        let model = apply_update(&txn, model, update).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_comment(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        ensure::<comment::Entity, _>(&txn, id).await?;
        remove_comment(&txn, id).await?;
        txn.commit().await?;
        Ok(())
    }
    /// give an ownerless comment to student, attaching to the current owner is a no-op
    #[instrument(skip(self), level = "debug")]
    pub async fn attach_comment_to_student(
        &self,
        comment_id: i32,
        student_id: i32,
    ) -> Result<comment::Model> {
        let txn = self.db.begin().await?;
        let model = fetch::<comment::Entity, _>(&txn, comment_id).await?;
        fetch_student(&txn, student_id).await?;

        let model = match model.student_id {
            Some(owner) if owner == student_id => model,
            Some(owner) => {
                return Err(Error::illegal(format!(
                    "comment {} already belongs to student {}",
                    comment_id, owner
                )))
            }
            None => {
                held_by_other(&txn, &model, student_id).await?;
                let mut model = model.into_active_model();
                model.student_id = ActiveValue::Set(Some(student_id));
                model.update(&txn).await?
            }
        };

        txn.commit().await?;
        tracing::debug!(comment_id, student_id, "comment_attached");
        Ok(model)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn list_comments_of_student(&self, student_id: i32) -> Result<Vec<comment::Model>> {
        let student = fetch_student(self.db.deref(), student_id).await?;
        Ok(student
            .find_related(comment::Entity)
            .all(self.db.deref())
            .await?)
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_comment_of_student(
        &self,
        student_id: i32,
        comment_id: i32,
    ) -> Result<comment::Model> {
        fetch_student(self.db.deref(), student_id).await?;
        let model = fetch::<comment::Entity, _>(self.db.deref(), comment_id).await?;
        owned_by(&model, student_id)?;
        Ok(model)
    }
    /// overwrite the comment list of student
    ///
    /// comments dropped from the list lose their owner, comments owned by
    /// another student are rejected
    #[instrument(skip(self), level = "debug")]
    pub async fn replace_comments_of_student(
        &self,
        student_id: i32,
        comment_ids: Vec<i32>,
    ) -> Result<Vec<comment::Model>> {
        let txn = self.db.begin().await?;
        fetch_student(&txn, student_id).await?;

        let comment_ids: BTreeSet<i32> = comment_ids.into_iter().collect();
        for id in comment_ids.iter() {
            let model = fetch::<comment::Entity, _>(&txn, *id).await?;
            if model.student_id.is_some_and(|x| x != student_id) {
                return Err(Error::illegal(format!(
                    "comment {} belongs to another student",
                    id
                )));
            }
            held_by_other(&txn, &model, student_id).await?;
        }

        comment::Entity::update_many()
            .col_expr(comment::Column::StudentId, Expr::value(Option::<i32>::None))
            .filter(comment::Column::StudentId.eq(student_id))
            .filter(comment::Column::Id.is_not_in(comment_ids.clone()))
            .exec(&txn)
            .await?;
        comment::Entity::update_many()
            .col_expr(comment::Column::StudentId, Expr::value(student_id))
            .filter(comment::Column::Id.is_in(comment_ids.clone()))
            .exec(&txn)
            .await?;
        let models = comment::Entity::find()
            .filter(comment::Column::StudentId.eq(student_id))
            .all(&txn)
            .await?;

        txn.commit().await?;
        tracing::debug!(student_id, count = models.len(), "comment_replaced");
        Ok(models)
    }
    /// comment is kept without owner
    #[instrument(skip(self), level = "debug")]
    pub async fn detach_comment_from_student(
        &self,
        student_id: i32,
        comment_id: i32,
    ) -> Result<comment::Model> {
        let txn = self.db.begin().await?;
        fetch_student(&txn, student_id).await?;
        let model = fetch::<comment::Entity, _>(&txn, comment_id).await?;
        owned_by(&model, student_id)?;

        let mut model = model.into_active_model();
        model.student_id = ActiveValue::Set(None);
        let model = model.update(&txn).await?;

        txn.commit().await?;
        tracing::debug!(comment_id, student_id, "comment_detached");
        Ok(model)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{self, data};
    use crate::util::error::Kind;

    #[tokio::test]
    async fn rating_boundary() {
        let server = test::server().await;
        for rating in [-1, 6] {
            let err = server
                .comment
                .create_comment(data::comment_draft("meh", rating, None))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), Kind::IllegalOperation);
        }
        for rating in [0, 5] {
            let model = server
                .comment
                .create_comment(data::comment_draft("fine", rating, None))
                .await
                .unwrap();
            assert_eq!(model.rating, rating);
        }
    }
    #[tokio::test]
    async fn blank_text() {
        let server = test::server().await;
        let err = server
            .comment
            .create_comment(data::comment_draft("   ", 3, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
    #[tokio::test]
    async fn update_rating_out_of_range() {
        let server = test::server().await;
        let model = server
            .comment
            .create_comment(data::comment_draft("good", 4, None))
            .await
            .unwrap();
        let err = server
            .comment
            .update_comment(
                model.id,
                CommentUpdate {
                    text: "good".to_owned(),
                    rating: 6,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
        assert_eq!(server.comment.get_comment(model.id).await.unwrap(), model);
    }
    #[tokio::test]
    async fn attach_and_detach() {
        let server = test::server().await;
        let student = data::student(&server, "ada").await.id;
        let other = data::student(&server, "charles").await.id;
        let model = server
            .comment
            .create_comment(data::comment_draft("insightful", 5, None))
            .await
            .unwrap();

        let model = server
            .comment
            .attach_comment_to_student(model.id, student)
            .await
            .unwrap();
        assert_eq!(model.student_id, Some(student));
        assert_eq!(
            server
                .comment
                .list_comments_of_student(student)
                .await
                .unwrap(),
            vec![model.clone()]
        );

        let err = server
            .comment
            .attach_comment_to_student(model.id, other)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
        let err = server
            .comment
            .get_comment_of_student(other, model.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let model = server
            .comment
            .detach_comment_from_student(student, model.id)
            .await
            .unwrap();
        assert_eq!(model.student_id, None);
        assert!(server
            .comment
            .list_comments_of_student(student)
            .await
            .unwrap()
            .is_empty());

        let err = server
            .comment
            .detach_comment_from_student(student, model.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
    }
    #[tokio::test]
    async fn missing_student() {
        let server = test::server().await;
        let professor = data::professor(&server, "hopper").await.user.id;
        let model = server
            .comment
            .create_comment(data::comment_draft("ok", 3, None))
            .await
            .unwrap();

        assert!(matches!(
            server.comment.attach_comment_to_student(model.id, 999).await,
            Err(Error::NotInDB("student", 999))
        ));
        assert!(matches!(
            server
                .comment
                .attach_comment_to_student(model.id, professor)
                .await,
            Err(Error::NotInDB("student", _))
        ));
        assert!(matches!(
            server.comment.list_comments_of_student(999).await,
            Err(Error::NotInDB("student", 999))
        ));
        assert!(matches!(
            server
                .comment
                .create_comment(data::comment_draft("ok", 3, Some(999)))
                .await,
            Err(Error::NotInDB("student", 999))
        ));
    }
    #[tokio::test]
    async fn replace_list() {
        let server = test::server().await;
        let student = data::student(&server, "alan").await.id;
        let other = data::student(&server, "joan").await.id;
        let c1 = server
            .comment
            .create_comment(data::comment_draft("one", 1, Some(student)))
            .await
            .unwrap();
        let c2 = server
            .comment
            .create_comment(data::comment_draft("two", 2, None))
            .await
            .unwrap();
        let c3 = server
            .comment
            .create_comment(data::comment_draft("three", 3, Some(other)))
            .await
            .unwrap();

        let err = server
            .comment
            .replace_comments_of_student(student, vec![c2.id, 999])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotInDB("comment", 999)));
        let err = server
            .comment
            .replace_comments_of_student(student, vec![c3.id])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);

        let replaced = server
            .comment
            .replace_comments_of_student(student, vec![c2.id, c2.id])
            .await
            .unwrap();
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].id, c2.id);
        assert_eq!(
            server.comment.get_comment(c1.id).await.unwrap().student_id,
            None
        );
    }
    #[tokio::test]
    async fn reserved_comment_stays_with_student() {
        let server = test::server().await;
        let professor = data::professor(&server, "tony").await.user.id;
        let owner = data::student(&server, "alice").await.id;
        let other = data::student(&server, "bob").await.id;
        let calendar = data::calendar(&server, professor).await.id;
        let reservation = data::reservation(&server, calendar, owner).await.id;
        let model = server
            .comment
            .create_comment(data::comment_draft("ownerless", 4, None))
            .await
            .unwrap();
        server
            .reservation
            .associate_comment_to_reservation(reservation, model.id)
            .await
            .unwrap();

        let err = server
            .comment
            .replace_comments_of_student(other, vec![model.id])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
        let err = server
            .comment
            .attach_comment_to_student(model.id, other)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::IllegalOperation);
        assert_eq!(
            server.comment.get_comment(model.id).await.unwrap().student_id,
            None
        );

        let attached = server
            .comment
            .attach_comment_to_student(model.id, owner)
            .await
            .unwrap();
        assert_eq!(attached.student_id, Some(owner));
    }
    #[tokio::test]
    async fn delete_twice() {
        let server = test::server().await;
        let model = server
            .comment
            .create_comment(data::comment_draft("bye", 2, None))
            .await
            .unwrap();
        server.comment.delete_comment(model.id).await.unwrap();
        let err = server.comment.delete_comment(model.id).await.unwrap_err();
        assert!(matches!(err, Error::NotInDB("comment", _)));
    }
}
