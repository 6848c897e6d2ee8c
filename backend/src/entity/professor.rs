use super::*;

/// profile of a user whose kind is one of the professor kinds
///
/// `meeting_url` only make sense for [`user::Kind::ProfessorVirtual`],
/// `location` only for [`user::Kind::ProfessorPresencial`], see [`Modality`]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "professor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub formation: String,
    pub experience: String,
    pub price: f64,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub meeting_url: Option<String>,
    pub location: Option<String>,
}

/// subtype specific part of a professor
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Modality {
    Virtual {
        meeting_url: Option<String>,
    },
    Presencial {
        location: Option<String>,
    },
    #[default]
    Unspecified,
}

impl Modality {
    pub fn kind(&self) -> super::user::Kind {
        match self {
            Modality::Virtual { .. } => super::user::Kind::ProfessorVirtual,
            Modality::Presencial { .. } => super::user::Kind::ProfessorPresencial,
            Modality::Unspecified => super::user::Kind::Professor,
        }
    }
    /// split into `(meeting_url, location)` columns
    pub fn into_columns(self) -> (Option<String>, Option<String>) {
        match self {
            Modality::Virtual { meeting_url } => (meeting_url, None),
            Modality::Presencial { location } => (None, location),
            Modality::Unspecified => (None, None),
        }
    }
}

impl Model {
    pub fn modality(&self, kind: super::user::Kind) -> Modality {
        match kind {
            super::user::Kind::ProfessorVirtual => Modality::Virtual {
                meeting_url: self.meeting_url.clone(),
            },
            super::user::Kind::ProfessorPresencial => Modality::Presencial {
                location: self.location.clone(),
            },
            _ => Modality::Unspecified,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::Id",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::calendar::Entity")]
    Calendar,
    #[sea_orm(has_many = "super::advisory::Entity")]
    Advisory,
    #[sea_orm(has_many = "super::professor_topic::Entity")]
    ProfessorTopic,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::calendar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Calendar.def()
    }
}

impl Related<super::advisory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advisory.def()
    }
}

impl Related<super::professor_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfessorTopic.def()
    }
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        super::professor_topic::Relation::Topic.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::professor_topic::Relation::Professor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DebugName for Entity {
    const DEBUG_NAME: &'static str = "professor";
}
