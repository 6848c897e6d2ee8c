use super::*;

/// A bookable tutoring session
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "advisory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub professor_id: i32,
    pub calendar_id: Option<i32>,
    /// in minutes
    pub duration: i32,
    pub topic: String,
    pub kind: String,
    pub area: String,
    pub completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Professor,
    #[sea_orm(
        belongs_to = "super::calendar::Entity",
        from = "Column::CalendarId",
        to = "super::calendar::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Calendar,
    #[sea_orm(has_one = "super::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "super::user_completed_advisory::Entity")]
    UserCompletedAdvisory,
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::calendar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Calendar.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::user_completed_advisory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCompletedAdvisory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DebugName for Entity {
    const DEBUG_NAME: &'static str = "advisory";
}
