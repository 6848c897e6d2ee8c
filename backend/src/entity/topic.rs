use super::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "topic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub area: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::professor_topic::Entity")]
    ProfessorTopic,
}

impl Related<super::professor_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfessorTopic.def()
    }
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        super::professor_topic::Relation::Professor.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::professor_topic::Relation::Topic.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DebugName for Entity {
    const DEBUG_NAME: &'static str = "topic";
}
