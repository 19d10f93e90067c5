//! `SeaORM` Entity for categories table.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelf_core::budget::Category;
use shelf_shared::{Amount, BudgetId, CategoryId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub budget_id: Uuid,
    pub label: String,
    pub monthly_amount: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::monthly_budgets::Entity",
        from = "Column::BudgetId",
        to = "super::monthly_budgets::Column::Id",
        on_delete = "Cascade"
    )]
    MonthlyBudgets,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::monthly_budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyBudgets.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: CategoryId::from_uuid(model.id),
            budget_id: BudgetId::from_uuid(model.budget_id),
            label: model.label,
            monthly_amount: Amount::from_minor(model.monthly_amount),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
