use super::*;

/// discriminator of the user hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "PROFESSOR")]
    Professor,
    #[sea_orm(string_value = "PROFESSOR_VIRTUAL")]
    ProfessorVirtual,
    #[sea_orm(string_value = "PROFESSOR_PRESENCIAL")]
    ProfessorPresencial,
    #[sea_orm(string_value = "STUDENT")]
    Student,
}

impl Kind {
    pub fn is_student(self) -> bool {
        self == Kind::Student
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip)]
    pub password: Vec<u8>,
    pub kind: Kind,
    pub create_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::professor::Entity")]
    Professor,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "super::user_completed_advisory::Entity")]
    UserCompletedAdvisory,
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
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

impl Related<super::advisory::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_completed_advisory::Relation::Advisory.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_completed_advisory::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DebugName for Entity {
    const DEBUG_NAME: &'static str = "user";
}
