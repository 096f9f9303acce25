//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::TeamMember;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMembers,
    #[sea_orm(has_many = "super::pull_request_reviewer::Entity")]
    ReviewAssignments,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMembers.def()
    }
}

impl Related<super::pull_request_reviewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewAssignments.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_member::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_member::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to the member projection
impl From<Model> for TeamMember {
    fn from(model: Model) -> Self {
        TeamMember {
            user_id: model.id,
            username: model.username,
            is_active: model.is_active,
        }
    }
}
