// 🏷️ Scoring Rules - Receipt points engine
// Eight fixed, additive rules; the receipt total is the only mandatory field

use crate::error::ScoreError;
use crate::fields::{parse_currency, parse_day_of_month, parse_time, Amount};
use crate::receipt::Receipt;
use chrono::Timelike;
use serde::Serialize;
use tracing::debug;

// ============================================================================
// RULE CONSTANTS
// ============================================================================

const ROUND_DOLLAR_BONUS: i64 = 50;
const QUARTER_MULTIPLE_BONUS: i64 = 25;
const QUARTER: Amount = Amount::from_cents(25);
const POINTS_PER_ITEM_PAIR: i64 = 5;
const HIGH_TOTAL_BONUS: i64 = 5;
const HIGH_TOTAL_THRESHOLD: Amount = Amount::from_cents(1000);
const ODD_DAY_BONUS: i64 = 6;
const AFTERNOON_BONUS: i64 = 10;

/// Exclusive afternoon window, minutes since midnight (14:00, 16:00)
const AFTERNOON_START_MINUTES: u32 = 14 * 60;
const AFTERNOON_END_MINUTES: u32 = 16 * 60;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerAlphanumeric,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    HighTotal,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub const ALL: [ScoringRule; 8] = [
        ScoringRule::RetailerAlphanumeric,
        ScoringRule::RoundDollarTotal,
        ScoringRule::QuarterMultipleTotal,
        ScoringRule::ItemPairs,
        ScoringRule::DescriptionLength,
        ScoringRule::HighTotal,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonPurchase,
    ];

    /// Short code for logs and CLI output
    pub fn code(&self) -> &str {
        match self {
            ScoringRule::RetailerAlphanumeric => "retailer_alphanumeric",
            ScoringRule::RoundDollarTotal => "round_dollar_total",
            ScoringRule::QuarterMultipleTotal => "quarter_multiple_total",
            ScoringRule::ItemPairs => "item_pairs",
            ScoringRule::DescriptionLength => "description_length",
            ScoringRule::HighTotal => "high_total",
            ScoringRule::OddPurchaseDay => "odd_purchase_day",
            ScoringRule::AfternoonPurchase => "afternoon_purchase",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        match self {
            ScoringRule::RetailerAlphanumeric => "1 point per alphanumeric character in the retailer name",
            ScoringRule::RoundDollarTotal => "50 points if the total has no cents",
            ScoringRule::QuarterMultipleTotal => "25 points if the total is a multiple of 0.25",
            ScoringRule::ItemPairs => "5 points for every two items",
            ScoringRule::DescriptionLength => "ceil(price * 0.2) per item whose trimmed description length is a multiple of 3",
            ScoringRule::HighTotal => "5 points if the total is greater than 10.00",
            ScoringRule::OddPurchaseDay => "6 points if the purchase day is odd",
            ScoringRule::AfternoonPurchase => "10 points if purchased after 14:00 and before 16:00",
        }
    }

    /// Points this rule contributes. `total` is already parsed; every other
    /// field is parsed here and contributes nothing when malformed.
    pub fn evaluate(&self, receipt: &Receipt, total: Amount) -> i64 {
        match self {
            ScoringRule::RetailerAlphanumeric => retailer_alphanumeric(&receipt.retailer),
            ScoringRule::RoundDollarTotal => bonus_if(total.is_whole(), ROUND_DOLLAR_BONUS),
            ScoringRule::QuarterMultipleTotal => {
                bonus_if(total.is_multiple_of(QUARTER), QUARTER_MULTIPLE_BONUS)
            }
            ScoringRule::ItemPairs => (receipt.items.len() / 2) as i64 * POINTS_PER_ITEM_PAIR,
            ScoringRule::DescriptionLength => description_length(receipt),
            ScoringRule::HighTotal => bonus_if(total > HIGH_TOTAL_THRESHOLD, HIGH_TOTAL_BONUS),
            ScoringRule::OddPurchaseDay => odd_purchase_day(&receipt.purchase_date),
            ScoringRule::AfternoonPurchase => afternoon_purchase(&receipt.purchase_time),
        }
    }
}

fn bonus_if(condition: bool, points: i64) -> i64 {
    if condition {
        points
    } else {
        0
    }
}

fn retailer_alphanumeric(retailer: &str) -> i64 {
    retailer.chars().filter(|c| c.is_ascii_alphanumeric()).count() as i64
}

fn description_length(receipt: &Receipt) -> i64 {
    let mut points = 0;

    for item in &receipt.items {
        // Length in UTF-8 bytes
        let len = item.short_description.trim().len();
        if len == 0 || len % 3 != 0 {
            continue;
        }

        match parse_currency(&item.price) {
            Ok(price) => points += price.scaled_ceil(1, 5),
            Err(e) => debug!(error = %e, "skipping item with unparsable price"),
        }
    }

    points
}

fn odd_purchase_day(purchase_date: &str) -> i64 {
    match parse_day_of_month(purchase_date) {
        Ok(day) => bonus_if(day % 2 == 1, ODD_DAY_BONUS),
        Err(e) => {
            debug!(error = %e, "skipping odd-day rule");
            0
        }
    }
}

fn afternoon_purchase(purchase_time: &str) -> i64 {
    match parse_time(purchase_time) {
        Ok(time) => {
            let minutes = time.hour() * 60 + time.minute();
            bonus_if(
                minutes > AFTERNOON_START_MINUTES && minutes < AFTERNOON_END_MINUTES,
                AFTERNOON_BONUS,
            )
        }
        Err(e) => {
            debug!(error = %e, "skipping afternoon rule");
            0
        }
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: ScoringRule,
    pub points: i64,
}

/// Per-rule points for one receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub contributions: Vec<RuleContribution>,
}

impl Breakdown {
    pub fn total(&self) -> i64 {
        self.contributions.iter().map(|c| c.points).sum()
    }

    /// Points from one rule (0 if the rule was not applied)
    pub fn points_for(&self, rule: ScoringRule) -> i64 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

// ============================================================================
// RULE ENGINE
// ============================================================================

pub struct RuleEngine {
    rules: Vec<ScoringRule>,
}

impl RuleEngine {
    /// Engine with the full, fixed rule set
    pub fn new() -> Self {
        RuleEngine {
            rules: ScoringRule::ALL.to_vec(),
        }
    }

    /// Evaluate every rule, failing only when the total cannot be parsed
    pub fn breakdown(&self, receipt: &Receipt) -> Result<Breakdown, ScoreError> {
        let total = parse_currency(&receipt.total).map_err(ScoreError::InvalidTotal)?;

        let contributions = self
            .rules
            .iter()
            .map(|rule| RuleContribution {
                rule: *rule,
                points: rule.evaluate(receipt, total),
            })
            .collect();

        Ok(Breakdown { contributions })
    }

    pub fn score(&self, receipt: &Receipt) -> Result<i64, ScoreError> {
        self.breakdown(receipt).map(|b| b.total())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Points for a receipt using the fixed rule set
pub fn compute_score(receipt: &Receipt) -> Result<i64, ScoreError> {
    RuleEngine::new().score(receipt)
}

// ============================================================================
// TESTS
// ============================================================================
