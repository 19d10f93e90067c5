//! `SeaORM` Entity for monthly_budgets table.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelf_core::budget::{BudgetPeriod, MonthlyBudget};
use shelf_shared::{Amount, BudgetId, UserId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub income: i64,
    pub period: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The stored period, normalized to the first of its month.
    #[must_use]
    pub fn budget_period(&self) -> BudgetPeriod {
        BudgetPeriod::containing(self.period)
    }
}

impl From<Model> for MonthlyBudget {
    fn from(model: Model) -> Self {
        Self {
            id: BudgetId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            income: Amount::from_minor(model.income),
            period: model.budget_period(),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
