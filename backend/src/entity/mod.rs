//! collection of entity
use sea_orm::{entity::prelude::*, ConnectionTrait, PrimaryKeyTrait};
use serde::{Deserialize, Serialize};

pub mod advisory;
pub mod calendar;
pub mod comment;
pub mod professor;
pub mod professor_topic;
pub mod reservation;
pub mod topic;
pub mod user;
pub mod user_completed_advisory;

use crate::util::error::{Error, Result as DbResult};

/// human readable name of entity, used in error message
pub trait DebugName {
    const DEBUG_NAME: &'static str;
}

/// load a row by primary key, fail with [`Error::NotInDB`] if it doesn't exist
pub async fn fetch<E, C>(db: &C, id: i32) -> DbResult<E::Model>
where
    E: EntityTrait + DebugName,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotInDB(E::DEBUG_NAME, id))
}

/// check existence of a row by primary key
pub async fn exists<E, C>(db: &C, id: i32) -> DbResult<bool>
where
    E: EntityTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    Ok(E::find_by_id(id).one(db).await?.is_some())
}

/// fail with [`Error::NotInDB`] if the row doesn't exist
pub async fn ensure<E, C>(db: &C, id: i32) -> DbResult<()>
where
    E: EntityTrait + DebugName,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    C: ConnectionTrait,
{
    match exists::<E, C>(db, id).await? {
        true => Ok(()),
        false => Err(Error::NotInDB(E::DEBUG_NAME, id)),
    }
}
