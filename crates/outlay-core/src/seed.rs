//! Deterministic sample-data seeding
//!
//! Fills the ledger with plausible demo expenses spread over the trailing
//! months. There is no RNG dependency; a splitmix64-style index mixer picks
//! the category, description, date and amount for each entry, so two runs
//! on the same day produce identical ledgers. Every sample description
//! contains a keyword of its own category, which keeps the demo data
//! consistent with what the categorizer would have assigned.

use chrono::{Days, Utc};
use tracing::info;

use crate::db::Database;
use crate::error::Result;

pub const DEFAULT_SEED_ENTRIES: usize = 200;
pub const DEFAULT_SEED_MONTHS: u32 = 6;

struct CategorySamples {
    category: &'static str,
    min_amount: f64,
    max_amount: f64,
    descriptions: &'static [&'static str],
}

const SAMPLES: [CategorySamples; 7] = [
    CategorySamples {
        category: "Food",
        min_amount: 50.0,
        max_amount: 1500.0,
        descriptions: &[
            "Pizza from Domino's",
            "Burger at McDonald's",
            "Groceries from supermarket",
            "Dinner at restaurant",
            "Coffee at cafe",
            "Lunch at food court",
            "Fast food meal",
            "Restaurant dinner",
            "Food delivery",
            "Grocery shopping",
        ],
    },
    CategorySamples {
        category: "Travel",
        min_amount: 30.0,
        max_amount: 800.0,
        descriptions: &[
            "Uber ride to office",
            "Taxi fare",
            "Bus ticket",
            "Train ticket",
            "Fuel for car",
            "Petrol station",
            "Ola ride home",
            "Airport taxi",
        ],
    },
    CategorySamples {
        category: "Shopping",
        min_amount: 100.0,
        max_amount: 5000.0,
        descriptions: &[
            "Amazon purchase",
            "Flipkart order",
            "Clothes from mall",
            "Electronics shopping",
            "Online shopping",
            "Mall shopping",
            "Shopping spree",
        ],
    },
    CategorySamples {
        category: "Bills",
        min_amount: 200.0,
        max_amount: 5000.0,
        descriptions: &[
            "Electricity bill",
            "Water bill",
            "Internet bill",
            "WiFi recharge",
            "Mobile recharge",
            "Rent payment",
            "Internet plan",
        ],
    },
    CategorySamples {
        category: "Entertainment",
        min_amount: 100.0,
        max_amount: 2000.0,
        descriptions: &[
            "Movie tickets",
            "Netflix subscription",
            "Spotify premium",
            "Video game",
            "Movie night",
        ],
    },
    CategorySamples {
        category: "Health",
        min_amount: 150.0,
        max_amount: 3000.0,
        descriptions: &[
            "Doctor visit",
            "Pharmacy medicine",
            "Hospital bill",
            "Gym membership",
            "Medicine purchase",
        ],
    },
    CategorySamples {
        category: "Other",
        min_amount: 50.0,
        max_amount: 1000.0,
        descriptions: &[
            "Misc expense",
            "Unknown purchase",
            "General expense",
            "Various items",
            "Other purchase",
            "Miscellaneous",
            "Random expense",
            "Other items",
        ],
    },
];

// splitmix64 finalizer
fn mix(i: u64) -> u64 {
    let mut z = i.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn unit(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Insert `entries` demo expenses spread over the trailing `months` months
pub fn seed_expenses(db: &Database, entries: usize, months: u32) -> Result<usize> {
    let today = Utc::now().date_naive();
    let span_days = u64::from(months) * 30;

    let mut added = 0;
    for i in 0..entries as u64 {
        let days_back = mix(i << 2) % (span_days + 1);
        let date = today
            .checked_sub_days(Days::new(days_back))
            .unwrap_or(today);

        let sample = &SAMPLES[(mix((i << 2) | 1) % SAMPLES.len() as u64) as usize];
        let description =
            sample.descriptions[mix((i << 2) | 2) as usize % sample.descriptions.len()];

        let amount = round2(
            sample.min_amount + unit(mix((i << 2) | 3)) * (sample.max_amount - sample.min_amount),
        );

        db.record_expense(date, amount, description, sample.category)?;
        added += 1;
    }

    info!(added, months, "Seeded sample expenses");
    Ok(added)
}
