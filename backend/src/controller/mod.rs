//! Controllers own one relationship each, every mutation runs inside one transaction
//!
//! Controllers only speak in entity model and draft, transport is left to [`crate::endpoint`]
pub mod account;
pub mod advisory;
pub mod calendar;
pub mod comment;
pub mod completed;
pub mod crypto;
pub mod reservation;
pub mod topic;

mod tools {
    pub use sea_orm::sea_query::{Expr, OnConflict};
    pub use sea_orm::*;
    pub use serde::{Deserialize, Serialize};
    pub use std::{collections::BTreeSet, ops::Deref, sync::Arc};
    pub use tracing::instrument;

    pub use crate::entity::{ensure, fetch};
    pub use crate::util::{
        bound::{blank, BoundCheck},
        error::{Error, Result},
    };
    pub use crate::{fill_active_model, fill_exist_active_model};
}
