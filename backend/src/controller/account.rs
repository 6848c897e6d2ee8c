//! Users, professors and students
//!
//! The user hierarchy is one `user` table with a [`Kind`] discriminator,
//! professors carry an extra `professor` row sharing the same id.
use super::tools::*;
use super::{advisory::remove_advisories, crypto::CryptoController};
use crate::entity::{
    advisory, calendar, comment, professor,
    professor::Modality,
    professor_topic, reservation,
    user::{self, Kind},
    user_completed_advisory,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
}

impl BoundCheck for UserDraft {
    fn check(&self) -> Option<&'static str> {
        if blank(&self.name) {
            Some("name should not be blank")
        } else if blank(&self.email) || !self.email.contains('@') {
            Some("email is malformed")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDraft {
    #[serde(default)]
    pub formation: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub price: f64,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub modality: Modality,
}

impl BoundCheck for ProfileDraft {
    fn check(&self) -> Option<&'static str> {
        if !self.price.is_finite() || self.price < 0.0 {
            Some("price should be a non-negative number")
        } else {
            None
        }
    }
}

/// A professor with both rows joined and its subtype resolved
#[derive(Debug, Clone, Serialize)]
pub struct ProfessorInfo {
    pub user: user::Model,
    pub profile: professor::Model,
    pub modality: Modality,
}

impl ProfessorInfo {
    fn new(user: user::Model, profile: professor::Model) -> Self {
        let modality = profile.modality(user.kind);
        Self {
            user,
            profile,
            modality,
        }
    }
}

/// load a user whose kind is [`Kind::Student`]
///
/// A user of other kind is reported as missing student
pub(super) async fn fetch_student<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model> {
    match user::Entity::find_by_id(id).one(db).await? {
        Some(model) if model.kind.is_student() => Ok(model),
        _ => Err(Error::NotInDB("student", id)),
    }
}

pub struct AccountController {
    db: Arc<DatabaseConnection>,
    crypto: CryptoController,
}

impl AccountController {
    pub fn new(db: Arc<DatabaseConnection>, crypto: CryptoController) -> Self {
        Self { db, crypto }
    }
    async fn insert_user<C: ConnectionTrait>(
        &self,
        db: &C,
        draft: UserDraft,
        kind: Kind,
    ) -> Result<user::Model> {
        draft.bound_check()?;

        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(draft.email.trim()))
            .one(db)
            .await?;
        if taken.is_some() {
            return Err(Error::illegal(format!(
                "email {} is already registered",
                draft.email.trim()
            )));
        }

        let model = user::ActiveModel {
            name: ActiveValue::Set(draft.name),
            email: ActiveValue::Set(draft.email.trim().to_owned()),
            phone: ActiveValue::Set(draft.phone),
            password: ActiveValue::Set(self.crypto.hash(&draft.password)),
            kind: ActiveValue::Set(kind),
            create_at: ActiveValue::Set(chrono::Local::now().naive_local()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::debug!(id = model.id, kind = ?model.kind, "user_created");
        Ok(model)
    }
    #[instrument(skip_all, level = "debug")]
    pub async fn create_user(&self, draft: UserDraft) -> Result<user::Model> {
        let txn = self.db.begin().await?;
        let model = self.insert_user(&txn, draft, Kind::User).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip_all, level = "debug")]
    pub async fn create_student(&self, draft: UserDraft) -> Result<user::Model> {
        let txn = self.db.begin().await?;
        let model = self.insert_user(&txn, draft, Kind::Student).await?;
        txn.commit().await?;
        Ok(model)
    }
    #[instrument(skip_all, level = "debug")]
    pub async fn create_professor(
        &self,
        draft: UserDraft,
        profile: ProfileDraft,
    ) -> Result<ProfessorInfo> {
        profile.bound_check()?;

        let txn = self.db.begin().await?;
        let user = self
            .insert_user(&txn, draft, profile.modality.kind())
            .await?;

        let (meeting_url, location) = profile.modality.into_columns();
        let profile = professor::ActiveModel {
            id: ActiveValue::Set(user.id),
            formation: ActiveValue::Set(profile.formation),
            experience: ActiveValue::Set(profile.experience),
            price: ActiveValue::Set(profile.price),
            photo_url: ActiveValue::Set(profile.photo_url),
            video_url: ActiveValue::Set(profile.video_url),
            meeting_url: ActiveValue::Set(meeting_url),
            location: ActiveValue::Set(location),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(ProfessorInfo::new(user, profile))
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_user(&self, id: i32) -> Result<user::Model> {
        fetch::<user::Entity, _>(self.db.deref(), id).await
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_student(&self, id: i32) -> Result<user::Model> {
        fetch_student(self.db.deref(), id).await
    }
    #[instrument(skip(self), level = "debug")]
    pub async fn get_professor(&self, id: i32) -> Result<ProfessorInfo> {
        let (profile, user) = professor::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(self.db.deref())
            .await?
            .ok_or(Error::NotInDB("professor", id))?;
        let user = user.ok_or(Error::NotInDB("user", id))?;
        Ok(ProfessorInfo::new(user, profile))
    }
    /// replace password of any user, `current` must match the stored hash
    #[instrument(skip(self, current, new), level = "debug")]
    pub async fn change_password(&self, id: i32, current: &str, new: &str) -> Result<()> {
        if blank(new) {
            return Err(Error::illegal("password should not be blank"));
        }

        let txn = self.db.begin().await?;
        let model = fetch::<user::Entity, _>(&txn, id).await?;
        if !self.crypto.hash_eq(current, &model.password) {
            return Err(Error::illegal("password mismatch"));
        }

        let mut model = model.into_active_model();
        model.password = ActiveValue::Set(self.crypto.hash(new));
        model.update(&txn).await?;

        txn.commit().await?;
        tracing::debug!(id, "password_changed");
        Ok(())
    }
    /// overwrite the profile, the subtype follows `profile.modality`
    #[instrument(skip(self, profile), level = "debug")]
    pub async fn update_professor(&self, id: i32, profile: ProfileDraft) -> Result<ProfessorInfo> {
        profile.bound_check()?;

        let txn = self.db.begin().await?;
        let current = fetch::<professor::Entity, _>(&txn, id).await?;
        let user = fetch::<user::Entity, _>(&txn, id).await?;

        let kind = profile.modality.kind();
        let (meeting_url, location) = profile.modality.into_columns();

        let mut model = current.into_active_model();
        fill_active_model!(model, profile, formation, experience, price, photo_url, video_url);
        model.meeting_url = ActiveValue::Set(meeting_url);
        model.location = ActiveValue::Set(location);
        let profile = model.update(&txn).await?;

        let user = match user.kind == kind {
            true => user,
            false => {
                let mut user = user.into_active_model();
                user.kind = ActiveValue::Set(kind);
                user.update(&txn).await?
            }
        };

        txn.commit().await?;
        Ok(ProfessorInfo::new(user, profile))
    }
    /// delete professor with everything it owns
    ///
    /// advisories are deleted, calendars are deleted, reservations
    /// pointing to either of them are detached but kept
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_professor(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        ensure::<professor::Entity, _>(&txn, id).await?;

        let advisories: Vec<i32> = advisory::Entity::find()
            .filter(advisory::Column::ProfessorId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|x| x.id)
            .collect();
        remove_advisories(&txn, advisories).await?;

        let calendars: Vec<i32> = calendar::Entity::find()
            .filter(calendar::Column::ProfessorId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|x| x.id)
            .collect();
        reservation::Entity::update_many()
            .col_expr(
                reservation::Column::CalendarId,
                Expr::value(Option::<i32>::None),
            )
            .filter(reservation::Column::CalendarId.is_in(calendars))
            .exec(&txn)
            .await?;
        calendar::Entity::delete_many()
            .filter(calendar::Column::ProfessorId.eq(id))
            .exec(&txn)
            .await?;

        professor_topic::Entity::delete_many()
            .filter(professor_topic::Column::ProfessorId.eq(id))
            .exec(&txn)
            .await?;
        user_completed_advisory::Entity::delete_many()
            .filter(user_completed_advisory::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        professor::Entity::delete_by_id(id).exec(&txn).await?;
        user::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        tracing::debug!(id, "professor_deleted");
        Ok(())
    }
    /// delete student, its comments and reservations are detached but kept
    #[instrument(skip(self), level = "debug")]
    pub async fn delete_student(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        fetch_student(&txn, id).await?;

        comment::Entity::update_many()
            .col_expr(comment::Column::StudentId, Expr::value(Option::<i32>::None))
            .filter(comment::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        reservation::Entity::update_many()
            .col_expr(
                reservation::Column::StudentId,
                Expr::value(Option::<i32>::None),
            )
            .filter(reservation::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        user_completed_advisory::Entity::delete_many()
            .filter(user_completed_advisory::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        tracing::debug!(id, "student_deleted");
        Ok(())
    }
}
