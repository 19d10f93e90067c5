//! Tests for aggregation and rollover planning.

use chrono::{Datelike, NaiveDate, Utc};
use proptest::prelude::*;
use rstest::rstest;
use shelf_shared::{Amount, BudgetId, CategoryId, TransactionId, UserId};

use super::aggregation::{BudgetTotals, budget_net, category_spent};
use super::period::BudgetPeriod;
use super::rollover::RolloverPlan;
use super::types::{
    BudgetDetail, BudgetInput, Category, CategoryDetail, CategoryInput, MonthlyBudget,
    Transaction, TransactionInput,
};
use super::BudgetError;
use super::validation::AMOUNT_MAX;

// ========================================================================
// Helper Functions
// ========================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn transaction(category_id: CategoryId, cents: i64, day: NaiveDate, recurring: bool) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        category_id,
        amount: Amount::from_minor(cents),
        source: "Landlord".to_string(),
        date: day,
        recurring,
        description: format!("payment of {cents}"),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn category(
    budget_id: BudgetId,
    period: BudgetPeriod,
    label: &str,
    planned: i64,
    amounts: &[(i64, u32, bool)],
) -> CategoryDetail {
    let id = CategoryId::new();
    CategoryDetail {
        category: Category {
            id,
            budget_id,
            label: label.to_string(),
            monthly_amount: Amount::from_minor(planned),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        period,
        transactions: amounts
            .iter()
            .map(|&(cents, day, recurring)| {
                transaction(id, cents, period.clamped_date(day), recurring)
            })
            .collect(),
    }
}

fn budget(year: i32, month: u32, income: i64) -> MonthlyBudget {
    MonthlyBudget {
        id: BudgetId::new(),
        user_id: UserId::new(),
        income: Amount::from_minor(income),
        period: BudgetPeriod::new(year, month).unwrap(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn january_budget() -> BudgetDetail {
    let budget = budget(2024, 1, 500_000);
    let period = budget.period;
    BudgetDetail {
        categories: vec![
            category(
                budget.id,
                period,
                "Rent",
                150_000,
                &[(150_000, 1, true), (2_500, 31, true)],
            ),
            category(
                budget.id,
                period,
                "Groceries",
                60_000,
                &[(4_210, 3, false), (-1_000, 5, false), (999, 31, true)],
            ),
            category(budget.id, period, "Savings", 50_000, &[]),
        ],
        budget,
    }
}

// ========================================================================
// Aggregation
// ========================================================================

#[test]
fn test_category_spent_sums_amounts() {
    let detail = january_budget();
    assert_eq!(detail.categories[0].spent(), Amount::from_minor(152_500));
    assert_eq!(detail.categories[1].spent(), Amount::from_minor(4_209));
}

#[test]
fn test_empty_category_spent_is_zero() {
    let detail = january_budget();
    assert_eq!(detail.categories[2].spent(), Amount::ZERO);
    assert_eq!(category_spent(&[]), Amount::ZERO);
}

#[test]
fn test_budget_net() {
    let detail = january_budget();
    assert_eq!(detail.net(), Amount::from_minor(500_000 - 152_500 - 4_209));
}

#[test]
fn test_budget_without_categories_nets_income() {
    let detail = BudgetDetail {
        budget: budget(2024, 1, 12_345),
        categories: Vec::new(),
    };
    assert_eq!(detail.net(), Amount::from_minor(12_345));
}

#[test]
fn test_budget_totals() {
    let detail = january_budget();
    let totals = detail.totals();
    assert_eq!(
        totals,
        BudgetTotals {
            income: Amount::from_minor(500_000),
            planned: Amount::from_minor(260_000),
            spent: Amount::from_minor(156_709),
            net: Amount::from_minor(343_291),
        }
    );
}

#[test]
fn test_remaining() {
    let detail = january_budget();
    assert_eq!(detail.categories[1].remaining(), Amount::from_minor(55_791));
}

#[test]
fn test_spent_is_exact_past_intermediate_overflow() {
    let half = i64::MAX / 2 + 1;
    let b = budget(2024, 1, 0);
    let detail = category(
        b.id,
        b.period,
        "Huge",
        0,
        &[(half, 1, false), (half, 2, false), (-half, 3, false)],
    );
    assert_eq!(detail.spent(), Amount::from_minor(half));
    assert_eq!(detail.remaining(), Amount::from_minor(-half));
}

#[test]
fn test_net_near_i64_bounds_does_not_overflow() {
    let b = budget(2024, 1, i64::MAX);
    let refund = category(b.id, b.period, "Refunds", 0, &[(-1, 1, false)]);
    let charge = category(b.id, b.period, "Charges", 0, &[(1, 1, false)]);

    assert_eq!(
        budget_net(b.income, std::slice::from_ref(&charge)),
        Amount::from_minor(i64::MAX - 1)
    );
    assert_eq!(
        budget_net(b.income, &[refund.clone(), charge]),
        Amount::from_minor(i64::MAX)
    );

    let totals = BudgetTotals::compute(b.income, &[refund]);
    assert_eq!(totals.spent, Amount::from_minor(-1));
    assert_eq!(totals.net, Amount::from_minor(i64::MAX));
}

// ========================================================================
// Rollover
// ========================================================================

#[test]
fn test_rollover_targets_next_month_with_same_income() {
    let source = january_budget();
    let plan = RolloverPlan::from_source(&source).unwrap();

    assert_eq!(plan.period, BudgetPeriod::new(2024, 2).unwrap());
    assert_eq!(plan.income, source.budget.income);
}

#[test]
fn test_rollover_copies_every_category() {
    let source = january_budget();
    let plan = RolloverPlan::from_source(&source).unwrap();

    let labels: Vec<_> = plan.categories.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Rent", "Groceries", "Savings"]);
    for (planned, original) in plan.categories.iter().zip(&source.categories) {
        assert_eq!(planned.copied_from, original.category.id);
        assert_eq!(planned.monthly_amount, original.category.monthly_amount);
    }
}

#[test]
fn test_rollover_copies_only_recurring_transactions() {
    let source = january_budget();
    let plan = RolloverPlan::from_source(&source).unwrap();

    assert_eq!(plan.transaction_count(), 3);
    assert_eq!(plan.categories[0].transactions.len(), 2);
    assert_eq!(plan.categories[1].transactions.len(), 1);
    assert_eq!(
        plan.categories[1].transactions[0].amount,
        Amount::from_minor(999)
    );
    assert!(plan.categories[2].transactions.is_empty());
}

#[test]
fn test_rollover_redates_into_new_month() {
    let source = january_budget();
    let plan = RolloverPlan::from_source(&source).unwrap();

    let rent = &plan.categories[0].transactions;
    assert_eq!(rent[0].date, date(2024, 2, 1));
    // 2024 is a leap year: Jan 31 lands on Feb 29.
    assert_eq!(rent[1].date, date(2024, 2, 29));
    assert_eq!(rent[1].source, "Landlord");
    assert_eq!(rent[1].description, "payment of 2500");
}

#[test]
fn test_rollover_clamps_in_non_leap_year() {
    let jan = budget(2023, 1, 0);
    let period = jan.period;
    let source = BudgetDetail {
        categories: vec![category(jan.id, period, "Gym", 3_000, &[(3_000, 31, true)])],
        budget: jan,
    };

    let plan = RolloverPlan::from_source(&source).unwrap();

    assert_eq!(plan.categories[0].transactions[0].date, date(2023, 2, 28));
}

#[test]
fn test_rollover_december_rolls_into_january() {
    let dec = budget(2024, 12, 100);
    let plan = RolloverPlan::from_source(&BudgetDetail {
        budget: dec,
        categories: Vec::new(),
    })
    .unwrap();
    assert_eq!(plan.period, BudgetPeriod::new(2025, 1).unwrap());
}

#[test]
fn test_rollover_of_last_month_fails() {
    let last = budget(9999, 12, 100);
    let result = RolloverPlan::from_source(&BudgetDetail {
        budget: last,
        categories: Vec::new(),
    });
    assert!(matches!(result, Err(BudgetError::PeriodOverflow(_))));
}

// ========================================================================
// Inputs
// ========================================================================

#[test]
fn test_budget_input_rejects_negative_income() {
    let input = BudgetInput {
        period: BudgetPeriod::new(2024, 1).unwrap(),
        income: Amount::from_minor(-1),
    };
    assert_eq!(input.validate(), Err(BudgetError::NegativeAmount("income")));
}

#[test]
fn test_budget_input_income_bound() {
    let at_bound = BudgetInput {
        period: BudgetPeriod::new(2024, 1).unwrap(),
        income: AMOUNT_MAX,
    };
    assert!(at_bound.validate().is_ok());

    let over = BudgetInput {
        income: Amount::from_minor(i64::MAX),
        ..at_bound
    };
    assert_eq!(
        over.validate(),
        Err(BudgetError::AmountTooLarge {
            field: "income",
            max: AMOUNT_MAX
        })
    );
}

#[test]
fn test_category_input_rejects_oversized_amount() {
    let input = CategoryInput {
        label: "Yacht".to_string(),
        monthly_amount: AMOUNT_MAX + Amount::from_minor(1),
    };
    assert!(matches!(
        input.validated(),
        Err(BudgetError::AmountTooLarge {
            field: "monthly amount",
            ..
        })
    ));
}

#[test]
fn test_category_input_validated() {
    let input = CategoryInput {
        label: "  Fun ".to_string(),
        monthly_amount: Amount::from_major(20).unwrap(),
    }
    .validated()
    .unwrap();
    assert_eq!(input.label, "Fun");

    let empty = CategoryInput {
        label: String::new(),
        monthly_amount: Amount::ZERO,
    };
    assert_eq!(empty.validated(), Err(BudgetError::EmptyLabel));
}

#[test]
fn test_transaction_input_resolves_date() {
    let input = TransactionInput {
        amount: Amount::from_minor(-250),
        source: "Shop".to_string(),
        day: 30,
        description: "refund".to_string(),
        recurring: false,
    };

    let april = BudgetPeriod::new(2024, 4).unwrap();
    assert_eq!(input.resolve_date(april).unwrap(), date(2024, 4, 30));

    let feb = BudgetPeriod::new(2024, 2).unwrap();
    assert!(matches!(
        input.resolve_date(feb),
        Err(BudgetError::InvalidDay { day: 30, .. })
    ));
}

#[rstest]
#[case(AMOUNT_MAX.minor_units(), true)]
#[case(-AMOUNT_MAX.minor_units(), true)]
#[case(AMOUNT_MAX.minor_units() + 1, false)]
#[case(i64::MAX / 2 + 1, false)]
#[case(i64::MIN, false)]
fn test_transaction_input_amount_bound(#[case] cents: i64, #[case] accepted: bool) {
    let input = TransactionInput {
        amount: Amount::from_minor(cents),
        source: "Shop".to_string(),
        day: 1,
        description: String::new(),
        recurring: false,
    };
    let result = input.resolve_date(BudgetPeriod::new(2024, 1).unwrap());
    if accepted {
        assert_eq!(result, Ok(date(2024, 1, 1)));
    } else {
        assert_eq!(
            result,
            Err(BudgetError::AmountTooLarge {
                field: "amount",
                max: AMOUNT_MAX
            })
        );
    }
}

#[test]
fn test_transaction_input_rejects_long_description() {
    let input = TransactionInput {
        amount: Amount::ZERO,
        source: "Shop".to_string(),
        day: 1,
        description: "x".repeat(201),
        recurring: false,
    };
    assert!(matches!(
        input.resolve_date(BudgetPeriod::new(2024, 1).unwrap()),
        Err(BudgetError::FieldTooLong {
            field: "description",
            ..
        })
    ));
}

// ========================================================================
// Properties
// ========================================================================

fn amounts_strategy() -> impl Strategy<Value = Vec<(i64, u32, bool)>> {
    prop::collection::vec((-1_000_000i64..1_000_000, 1u32..=31, any::<bool>()), 0..20)
}

proptest! {
    /// Spent is the exact sum of transaction amounts.
    #[test]
    fn prop_spent_is_sum(amounts in amounts_strategy()) {
        let b = budget(2024, 1, 0);
        let detail = category(b.id, b.period, "Any", 0, &amounts);
        let expected: i64 = amounts.iter().map(|(cents, _, _)| cents).sum();
        prop_assert_eq!(detail.spent(), Amount::from_minor(expected));
    }

    /// Net equals income minus the spend of every category.
    #[test]
    fn prop_net_is_income_minus_spent(
        income in 0i64..100_000_000,
        groups in prop::collection::vec(amounts_strategy(), 0..6),
    ) {
        let b = budget(2024, 3, income);
        let categories: Vec<_> = groups
            .iter()
            .map(|amounts| category(b.id, b.period, "Any", 0, amounts))
            .collect();
        let spent: i64 = groups.iter().flatten().map(|(cents, _, _)| cents).sum();

        prop_assert_eq!(
            budget_net(Amount::from_minor(income), &categories),
            Amount::from_minor(income - spent)
        );
    }

    /// Rolled transactions land in the new month on the same day, or its last day.
    #[test]
    fn prop_rollover_dates_stay_in_new_month(
        year in 1900i32..2200,
        month in 1u32..=12,
        amounts in amounts_strategy(),
    ) {
        let b = budget(year, month, 0);
        let period = b.period;
        let source = BudgetDetail {
            categories: vec![category(b.id, period, "Any", 0, &amounts)],
            budget: b,
        };

        let plan = RolloverPlan::from_source(&source).unwrap();
        let recurring: Vec<_> = source.categories[0]
            .transactions
            .iter()
            .filter(|t| t.recurring)
            .collect();

        prop_assert_eq!(plan.categories[0].transactions.len(), recurring.len());
        for (planned, original) in plan.categories[0].transactions.iter().zip(recurring) {
            prop_assert!(plan.period.contains(planned.date));
            let expected_day = original.date.day().min(plan.period.days_in_month());
            prop_assert_eq!(planned.date.day(), expected_day);
            prop_assert_eq!(planned.amount, original.amount);
        }
    }
}
