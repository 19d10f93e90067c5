//! `SeaORM` Entity for users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelf_shared::{AuthContext, UserId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::monthly_budgets::Entity")]
    MonthlyBudgets,
}

impl Related<super::monthly_budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyBudgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The context operations run under when acting as this user.
    #[must_use]
    pub const fn auth_context(&self) -> AuthContext {
        AuthContext::new(UserId::from_uuid(self.id))
    }
}
