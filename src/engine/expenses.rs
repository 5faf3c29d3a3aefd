//! Personal expense totals.

use std::collections::HashMap;

use crate::domain::{Decimal, Expense};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub count: u64,
    /// Largest category first, ties by name.
    pub by_category: Vec<CategoryTotal>,
}

pub fn summarize_expenses<'a, I>(expenses: I) -> ExpenseSummary
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut total = Decimal::zero();
    let mut count = 0u64;
    let mut by_category: HashMap<&str, (Decimal, u64)> = HashMap::new();

    for e in expenses {
        total = total.saturating_add(e.amount);
        count += 1;
        let entry = by_category
            .entry(e.category.as_str())
            .or_insert((Decimal::zero(), 0));
        entry.0 = entry.0.saturating_add(e.amount);
        entry.1 += 1;
    }

    let mut by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category: category.to_string(),
            amount,
            count,
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    ExpenseSummary {
        total,
        count,
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordId, TimeMs};

    fn expense(category: &str, amount: i64) -> Expense {
        Expense {
            id: RecordId::generate(),
            amount: Decimal::from(amount),
            category: category.to_string(),
            description: None,
            spent_at: TimeMs::new(0),
            created_date: TimeMs::new(0),
        }
    }

    #[test]
    fn totals_by_category() {
        let expenses = vec![
            expense("餐饮", 30),
            expense("交通", 50),
            expense("餐饮", 25),
            expense("房租", 55),
        ];
        let s = summarize_expenses(&expenses);
        assert_eq!(s.total, Decimal::from(160));
        assert_eq!(s.count, 4);
        let order: Vec<&str> = s.by_category.iter().map(|c| c.category.as_str()).collect();
        // 餐饮 and 房租 tie at 55; name order breaks the tie.
        assert_eq!(s.by_category[0].amount, Decimal::from(55));
        assert_eq!(order.len(), 3);
        assert_eq!(order[2], "交通");
        let food = s.by_category.iter().find(|c| c.category == "餐饮").unwrap();
        assert_eq!(food.count, 2);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(summarize_expenses(&Vec::<Expense>::new()), ExpenseSummary::default());
    }
}
