//! Transaction rollups and the savings-rate health check shared by the
//! dashboard and the chart.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single dated money movement as returned by the balance API. The list is
/// replaced wholesale on every refresh, never mutated in place.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<String>,
    pub date: String,
    pub name: String,
    pub amount: Decimal,
    pub category: TransactionKind,
}

/// Per-date rollup of income, expenses and what was left over.
#[derive(Clone, PartialEq, Debug)]
pub struct DailyAggregate {
    pub date: String,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub net: Decimal,
}

/// Rolls the transaction list up into one aggregate per distinct date.
///
/// Output order follows the first occurrence of each date in the input; a
/// date showing up again later updates its existing entry in place. Amounts
/// accumulate exactly, no rounding.
pub fn aggregate_by_date(transactions: &[Transaction]) -> Vec<DailyAggregate> {
    let mut aggregates: Vec<DailyAggregate> = Vec::new();

    for tx in transactions {
        match aggregates.iter_mut().find(|a| a.date == tx.date) {
            Some(entry) => {
                match tx.category {
                    TransactionKind::Income => entry.income_total += tx.amount,
                    TransactionKind::Expense => entry.expense_total += tx.amount,
                }
                entry.net = entry.income_total - entry.expense_total;
            }
            None => {
                let (income_total, expense_total) = match tx.category {
                    TransactionKind::Income => (tx.amount, Decimal::ZERO),
                    TransactionKind::Expense => (Decimal::ZERO, tx.amount),
                };
                aggregates.push(DailyAggregate {
                    date: tx.date.clone(),
                    income_total,
                    expense_total,
                    net: income_total - expense_total,
                });
            }
        }
    }

    aggregates
}

/// Sums income and expense amounts over the whole list.
pub fn totals(transactions: &[Transaction]) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for tx in transactions {
        match tx.category {
            TransactionKind::Income => income += tx.amount,
            TransactionKind::Expense => expenses += tx.amount,
        }
    }
    (income, expenses)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HealthStatus {
    Excellent,
    Good,
    Regular,
    Poor,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Regular => "Regular",
            HealthStatus::Poor => "Poor",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => {
                "Excellent! You are saving more than 30% of your income."
            }
            HealthStatus::Good => {
                "Good financial health. You are saving 20-30% of your income."
            }
            HealthStatus::Regular => {
                "Fair financial health. Consider growing your savings."
            }
            HealthStatus::Poor => {
                "Your finances need attention. You are spending more than you bring in."
            }
        }
    }
}

/// Fraction of income kept after expenses. Zero income is defined as a rate
/// of zero rather than a division error.
pub fn savings_rate(total_income: Decimal, total_expenses: Decimal) -> Decimal {
    if total_income.is_zero() {
        Decimal::ZERO
    } else {
        (total_income - total_expenses) / total_income
    }
}

/// Thresholds are checked highest first; boundaries are inclusive.
pub fn classify(rate: Decimal) -> HealthStatus {
    if rate >= Decimal::new(30, 2) {
        HealthStatus::Excellent
    } else if rate >= Decimal::new(20, 2) {
        HealthStatus::Good
    } else if rate >= Decimal::new(10, 2) {
        HealthStatus::Regular
    } else {
        HealthStatus::Poor
    }
}

#[derive(Clone, PartialEq)]
pub struct FinancialHealth {
    pub savings_rate: Decimal,
    pub status: HealthStatus,
    pub message: &'static str,
}

impl FinancialHealth {
    pub fn assess(transactions: &[Transaction]) -> FinancialHealth {
        let (income, expenses) = totals(transactions);
        let rate = savings_rate(income, expenses);
        let status = classify(rate);
        FinancialHealth {
            savings_rate: rate,
            status,
            message: status.advice(),
        }
    }

    /// Savings rate as a 0-100 score for the dashboard bar.
    pub fn score(&self) -> f64 {
        (self.savings_rate * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }
}

/// Largest sources by total amount for one transaction kind. Totals keep the
/// order sources first appear in, then a stable sort ranks them, so ties stay
/// in input order.
pub fn top_sources(
    transactions: &[Transaction],
    kind: TransactionKind,
    limit: usize,
) -> Vec<(String, Decimal)> {
    let mut sources: Vec<(String, Decimal)> = Vec::new();
    for tx in transactions.iter().filter(|t| t.category == kind) {
        match sources.iter_mut().find(|(name, _)| *name == tx.name) {
            Some((_, total)) => *total += tx.amount,
            None => sources.push((tx.name.clone(), tx.amount)),
        }
    }
    sources.sort_by(|a, b| b.1.cmp(&a.1));
    sources.truncate(limit);
    sources
}

fn group_thousands(digits: &str) -> String {
    let reversed: Vec<char> = digits.chars().rev().collect();
    let mut out = Vec::new();
    for (i, ch) in reversed.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let rounded = format!("{:.2}", amount.abs().round_dp(2));
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    format!("{}{} {}.{}", sign, symbol, group_thousands(whole), cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, name: &str, amount: i64, category: TransactionKind) -> Transaction {
        Transaction {
            id: None,
            date: date.to_string(),
            name: name.to_string(),
            amount: Decimal::from(amount),
            category,
        }
    }

    fn sample_month() -> Vec<Transaction> {
        vec![
            tx("2024-01-01", "Salary", 3000, TransactionKind::Income),
            tx("2024-01-02", "Groceries", 150, TransactionKind::Expense),
            tx("2024-01-03", "Fuel", 50, TransactionKind::Expense),
            tx("2024-01-10", "Freelance", 500, TransactionKind::Income),
            tx("2024-01-15", "Rent", 800, TransactionKind::Expense),
            tx("2024-01-02", "Streaming", 15, TransactionKind::Expense),
        ]
    }

    #[test]
    fn empty_input_yields_no_aggregates() {
        assert!(aggregate_by_date(&[]).is_empty());
    }

    #[test]
    fn one_aggregate_per_distinct_date() {
        let txs = sample_month();
        let aggregates = aggregate_by_date(&txs);
        let mut dates: Vec<&str> = txs.iter().map(|t| t.date.as_str()).collect();
        dates.sort();
        dates.dedup();
        assert_eq!(aggregates.len(), dates.len());
    }

    #[test]
    fn order_follows_first_occurrence_not_chronology() {
        let txs = vec![
            tx("2024-02-05", "Freelance", 400, TransactionKind::Income),
            tx("2024-02-01", "Salary", 3000, TransactionKind::Income),
            tx("2024-02-05", "Dinner", 60, TransactionKind::Expense),
        ];
        let aggregates = aggregate_by_date(&txs);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].date, "2024-02-05");
        assert_eq!(aggregates[1].date, "2024-02-01");
    }

    #[test]
    fn recurring_date_updates_in_place() {
        let txs = vec![
            tx("2024-03-01", "Salary", 1000, TransactionKind::Income),
            tx("2024-03-02", "Rent", 500, TransactionKind::Expense),
            tx("2024-03-01", "Refund", 200, TransactionKind::Income),
        ];
        let aggregates = aggregate_by_date(&txs);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].income_total, Decimal::from(1200));
        assert_eq!(aggregates[0].net, Decimal::from(1200));
    }

    #[test]
    fn net_is_income_minus_expenses_exactly() {
        for aggregate in aggregate_by_date(&sample_month()) {
            assert_eq!(
                aggregate.net,
                aggregate.income_total - aggregate.expense_total
            );
        }
    }

    #[test]
    fn aggregate_totals_match_input_totals() {
        let txs = sample_month();
        let aggregates = aggregate_by_date(&txs);
        let (income, expenses) = totals(&txs);
        let agg_income: Decimal = aggregates.iter().map(|a| a.income_total).sum();
        let agg_expenses: Decimal = aggregates.iter().map(|a| a.expense_total).sum();
        assert_eq!(agg_income, income);
        assert_eq!(agg_expenses, expenses);
    }

    #[test]
    fn mixed_days_roll_up_as_expected() {
        let txs = vec![
            tx("2024-01-01", "Salary", 3000, TransactionKind::Income),
            tx("2024-01-01", "Groceries", 150, TransactionKind::Expense),
            tx("2024-01-02", "Fuel", 50, TransactionKind::Expense),
        ];
        let aggregates = aggregate_by_date(&txs);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].income_total, Decimal::from(3000));
        assert_eq!(aggregates[0].expense_total, Decimal::from(150));
        assert_eq!(aggregates[0].net, Decimal::from(2850));
        assert_eq!(aggregates[1].income_total, Decimal::ZERO);
        assert_eq!(aggregates[1].expense_total, Decimal::from(50));
        assert_eq!(aggregates[1].net, Decimal::from(-50));

        let (income, expenses) = totals(&txs);
        assert_eq!(income, Decimal::from(3000));
        assert_eq!(expenses, Decimal::from(200));
        let rate = savings_rate(income, expenses);
        assert_eq!(classify(rate), HealthStatus::Excellent);
    }

    #[test]
    fn zero_income_rate_is_zero_and_poor() {
        let rate = savings_rate(Decimal::ZERO, Decimal::ZERO);
        assert_eq!(rate, Decimal::ZERO);
        assert_eq!(classify(rate), HealthStatus::Poor);

        let spending_only = savings_rate(Decimal::ZERO, Decimal::from(500));
        assert_eq!(spending_only, Decimal::ZERO);
        assert_eq!(classify(spending_only), HealthStatus::Poor);
    }

    #[test]
    fn classification_boundaries_are_inclusive() {
        let excellent = savings_rate(Decimal::from(1000), Decimal::from(700));
        assert_eq!(excellent, Decimal::new(30, 2));
        assert_eq!(classify(excellent), HealthStatus::Excellent);

        let good = savings_rate(Decimal::from(1000), Decimal::from(800));
        assert_eq!(good, Decimal::new(20, 2));
        assert_eq!(classify(good), HealthStatus::Good);

        let regular = savings_rate(Decimal::from(1000), Decimal::from(900));
        assert_eq!(classify(regular), HealthStatus::Regular);

        let poor = savings_rate(Decimal::from(1000), Decimal::from(950));
        assert_eq!(poor, Decimal::new(5, 2));
        assert_eq!(classify(poor), HealthStatus::Poor);
    }

    #[test]
    fn overspending_classifies_as_poor() {
        let rate = savings_rate(Decimal::from(1000), Decimal::from(1400));
        assert!(rate < Decimal::ZERO);
        assert_eq!(classify(rate), HealthStatus::Poor);
    }

    #[test]
    fn each_status_keeps_its_own_message() {
        let statuses = [
            HealthStatus::Excellent,
            HealthStatus::Good,
            HealthStatus::Regular,
            HealthStatus::Poor,
        ];
        for (i, a) in statuses.iter().enumerate() {
            for b in statuses.iter().skip(i + 1) {
                assert_ne!(a.advice(), b.advice());
            }
        }
    }

    #[test]
    fn assess_ties_rate_status_and_message_together() {
        let health = FinancialHealth::assess(&sample_month());
        assert_eq!(health.status, classify(health.savings_rate));
        assert_eq!(health.message, health.status.advice());
    }

    #[test]
    fn unknown_category_is_rejected_at_the_boundary() {
        let raw = r#"{"id":null,"date":"2024-01-01","name":"Salary","amount":3000,"category":"transfer"}"#;
        assert!(serde_json::from_str::<Transaction>(raw).is_err());
    }

    #[test]
    fn non_numeric_amount_is_rejected_at_the_boundary() {
        let raw = r#"{"id":null,"date":"2024-01-01","name":"Salary","amount":"lots","category":"income"}"#;
        assert!(serde_json::from_str::<Transaction>(raw).is_err());
    }

    #[test]
    fn top_sources_ranks_by_total_and_keeps_ties_stable() {
        let txs = vec![
            tx("2024-01-01", "Salary", 3000, TransactionKind::Income),
            tx("2024-01-05", "Freelance", 500, TransactionKind::Income),
            tx("2024-01-08", "Dividends", 500, TransactionKind::Income),
            tx("2024-01-12", "Freelance", 250, TransactionKind::Income),
            tx("2024-01-12", "Rent", 800, TransactionKind::Expense),
        ];
        let top = top_sources(&txs, TransactionKind::Income, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0], ("Salary".to_string(), Decimal::from(3000)));
        assert_eq!(top[1], ("Freelance".to_string(), Decimal::from(750)));
        assert_eq!(top[2], ("Dividends".to_string(), Decimal::from(500)));

        // equal totals keep first-appearance order
        let tied = vec![
            tx("2024-01-01", "Water", 40, TransactionKind::Expense),
            tx("2024-01-02", "Power", 40, TransactionKind::Expense),
        ];
        let top = top_sources(&tied, TransactionKind::Expense, 2);
        assert_eq!(top[0].0, "Water");
        assert_eq!(top[1].0, "Power");
    }

    #[test]
    fn currency_formatting_groups_and_signs() {
        assert_eq!(format_currency(Decimal::from(1234567), "$"), "$ 1,234,567.00");
        assert_eq!(format_currency(Decimal::from(-800), "€"), "-€ 800.00");
        assert_eq!(
            format_currency(Decimal::new(1550, 2), "$"),
            "$ 15.50"
        );
    }
}
