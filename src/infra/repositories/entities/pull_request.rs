//! Pull request database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pull_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub author_id: String,
    /// "OPENED" or "MERGED"
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pull_request_reviewer::Entity")]
    ReviewAssignments,
}

impl Related<super::pull_request_reviewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewAssignments.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::pull_request_reviewer::Relation::Reviewer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::pull_request_reviewer::Relation::PullRequest.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
