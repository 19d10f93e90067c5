//! `SeaORM` entity definitions.
//!
//! Money columns hold minor units (`BIGINT`); periods are stored as the
//! first day of the month.

pub mod categories;
pub mod monthly_budgets;
pub mod transactions;
pub mod users;

pub mod prelude {
    //! Entity aliases.

    pub use super::categories::Entity as Categories;
    pub use super::monthly_budgets::Entity as MonthlyBudgets;
    pub use super::transactions::Entity as Transactions;
    pub use super::users::Entity as Users;
}
