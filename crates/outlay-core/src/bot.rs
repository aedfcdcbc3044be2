//! Rule-based chat assistant
//!
//! Intents are fixed regex and keyword patterns tried in order, most
//! specific first: add expense, forecast, biggest category, then period
//! summary. Anything that matches nothing gets the help line back.

use chrono::{Days, Utc};
use regex::Regex;

use crate::db::Database;
use crate::error::Result;
use crate::forecast::{Forecaster, DEFAULT_MONTHS_BACK};
use crate::models::Period;
use crate::rules::CategoryRules;

const HELP: &str = "I can add expenses (e.g., 'spent 120 on food yesterday'), \
    show summaries (today/week/month), or predict next month.";

/// Regex-driven assistant over the expense ledger
pub struct ChatBot<'a> {
    db: &'a Database,
    rules: &'a CategoryRules,
    amount_re: Regex,
    desc_re: Regex,
    biggest_re: Regex,
}

impl<'a> ChatBot<'a> {
    pub fn new(db: &'a Database, rules: &'a CategoryRules) -> Result<Self> {
        Ok(Self {
            db,
            rules,
            amount_re: Regex::new(r"(?i)(add|spent)\s+(\d+(?:\.\d{1,2})?)")?,
            desc_re: Regex::new(r"(?i)(?:on|for)\s+([a-zA-Z0-9 ,.-]+)")?,
            biggest_re: Regex::new(r"(?i)(biggest|largest|most)\s+(spend|expense|category)")?,
        })
    }

    /// Route a message to the first matching intent
    pub fn respond(&self, text: &str) -> Result<String> {
        if let Some(reply) = self.try_add(text)? {
            return Ok(reply);
        }
        if let Some(reply) = self.try_predict(text)? {
            return Ok(reply);
        }
        if let Some(reply) = self.try_biggest_category(text)? {
            return Ok(reply);
        }
        if let Some(reply) = self.try_summary(text)? {
            return Ok(reply);
        }
        Ok(HELP.to_string())
    }

    /// "spent 120 on pizza yesterday" / "add 45.50 for taxi"
    fn try_add(&self, text: &str) -> Result<Option<String>> {
        let amount: f64 = match self.amount_re.captures(text).and_then(|c| c.get(2)) {
            Some(m) => m.as_str().parse().unwrap_or(0.0),
            None => return Ok(None),
        };

        let description = self
            .desc_re
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| "misc".to_string());

        let today = Utc::now().date_naive();
        let date = if text.to_lowercase().contains("yesterday") {
            today.checked_sub_days(Days::new(1)).unwrap_or(today)
        } else {
            today
        };

        let category = self.rules.categorize(&description);
        let id = self.db.record_expense(date, amount, &description, category)?;

        Ok(Some(format!(
            "Added expense #{}: {:.2} {} - {} on {}",
            id, amount, category, description, date
        )))
    }

    /// "predict next month"
    fn try_predict(&self, text: &str) -> Result<Option<String>> {
        if !text.to_lowercase().contains("predict") {
            return Ok(None);
        }

        let forecast = Forecaster::new(self.db).predict_next_month(DEFAULT_MONTHS_BACK)?;

        let mut parts = vec![format!("Next month total: {:.2}", forecast.total_next_month)];
        if !forecast.per_category_next_month.is_empty() {
            let breakdown = forecast
                .per_category_next_month
                .iter()
                .map(|(category, amount)| format!("{} {:.2}", category, amount))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("Per category: {}", breakdown));
        }

        Ok(Some(parts.join("; ")))
    }

    /// "biggest expense" / "largest category"
    fn try_biggest_category(&self, text: &str) -> Result<Option<String>> {
        if !self.biggest_re.is_match(text) {
            return Ok(None);
        }

        let summary = self
            .db
            .period_summary(Period::Month, Utc::now().date_naive())?;

        // First category wins ties, same as categorization
        let mut best: Option<(&str, f64)> = None;
        for (category, amount) in &summary.by_category {
            if best.map_or(true, |(_, top)| *amount > top) {
                best = Some((category.as_str(), *amount));
            }
        }

        match best {
            Some((category, amount)) => Ok(Some(format!(
                "Biggest category this month: {} ({:.2})",
                category, amount
            ))),
            None => Ok(Some("No data yet.".to_string())),
        }
    }

    /// "how much today" / "summary this week" / "total"
    fn try_summary(&self, text: &str) -> Result<Option<String>> {
        let lowered = text.to_lowercase();
        let period = if lowered.contains("today") {
            Period::Day
        } else if lowered.contains("week") {
            Period::Week
        } else if lowered.contains("month") {
            Period::Month
        } else if lowered.contains("all") || lowered.contains("total") {
            Period::All
        } else {
            return Ok(None);
        };

        let summary = self.db.period_summary(period, Utc::now().date_naive())?;

        let mut parts = vec![format!("Total {}: {:.2}", period, summary.total)];
        if !summary.by_category.is_empty() {
            let breakdown = summary
                .by_category
                .iter()
                .map(|(category, amount)| format!("{} {:.2}", category, amount))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(breakdown);
        }

        Ok(Some(parts.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseFilter;
    use std::path::Path;

    fn test_rules() -> CategoryRules {
        CategoryRules::load_or_default(Path::new("/nonexistent/categories.json"))
    }

    #[test]
    fn test_unrecognized_message_gets_help() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        let reply = bot.respond("hello there").unwrap();
        assert!(reply.starts_with("I can add expenses"));
    }

    #[test]
    fn test_add_intent_records_and_categorizes() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        let reply = bot.respond("spent 120 on pizza").unwrap();
        assert!(reply.starts_with("Added expense #"));
        assert!(reply.contains("120.00"));
        assert!(reply.contains("Food"));

        let expenses = db.list_expenses(&ExpenseFilter::default()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].description, "pizza");
    }

    #[test]
    fn test_add_intent_yesterday_shifts_date() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        bot.respond("add 50 for uber yesterday").unwrap();

        let expenses = db.list_expenses(&ExpenseFilter::default()).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(
            expenses[0].date,
            today.checked_sub_days(Days::new(1)).unwrap()
        );
        assert_eq!(expenses[0].category, "Travel");
    }

    #[test]
    fn test_add_intent_without_description_uses_misc() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        bot.respond("add 15").unwrap();

        let expenses = db.list_expenses(&ExpenseFilter::default()).unwrap();
        assert_eq!(expenses[0].description, "misc");
        assert_eq!(expenses[0].category, "Other");
    }

    #[test]
    fn test_add_intent_zero_amount_is_rejected() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        assert!(bot.respond("add 0 for nothing").is_err());
    }

    #[test]
    fn test_summary_intent_today() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        let today = Utc::now().date_naive();
        db.record_expense(today, 80.0, "groceries", "Food").unwrap();
        db.record_expense(today, 20.0, "bus pass", "Travel").unwrap();

        let reply = bot.respond("how much did I spend today").unwrap();
        assert!(reply.starts_with("Total day: 100.00"));
        assert!(reply.contains("Food 80.00"));
        assert!(reply.contains("Travel 20.00"));
    }

    #[test]
    fn test_summary_intent_total_keyword_means_all() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        let reply = bot.respond("what is my total").unwrap();
        assert!(reply.starts_with("Total all: 0.00"));
    }

    #[test]
    fn test_predict_intent_wins_over_summary_keyword() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        // "next month" also contains the summary keyword "month"
        let reply = bot.respond("predict next month").unwrap();
        assert!(reply.starts_with("Next month total:"));
    }

    #[test]
    fn test_biggest_category_intent() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        let today = Utc::now().date_naive();
        db.record_expense(today, 80.0, "groceries", "Food").unwrap();
        db.record_expense(today, 200.0, "flight", "Travel").unwrap();

        let reply = bot.respond("what is my biggest expense").unwrap();
        assert_eq!(reply, "Biggest category this month: Travel (200.00)");
    }

    #[test]
    fn test_biggest_category_with_no_data() {
        let db = Database::in_memory().unwrap();
        let rules = test_rules();
        let bot = ChatBot::new(&db, &rules).unwrap();

        let reply = bot.respond("biggest spend").unwrap();
        assert_eq!(reply, "No data yet.");
    }
}
