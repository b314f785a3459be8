use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::schema::{
    Holding, PortfolioSummary, Transaction, TransactionHistory, TransactionKind,
    TransactionStatus,
};
use super::{ApiError, PortfolioSource};
use crate::format::format_datetime;
use crate::validation::AccountNumber;

const MOCK_HOLDINGS: &[(&str, &str, f64, f64, f64, f64, f64)] = &[
    ("AAPL", "Apple Inc.", 150.0, 185.25, 27787.50, 2287.50, 8.97),
    ("MSFT", "Microsoft Corporation", 100.0, 378.85, 37885.00, 3885.00, 11.42),
    ("GOOGL", "Alphabet Inc.", 75.0, 142.56, 10692.00, 692.00, 6.92),
    ("TSLA", "Tesla Inc.", 200.0, 245.67, 49134.00, 1386.00, 2.90),
];

/// Fixed four-holding portfolio, stamped with the current time.
pub fn generate_mock_portfolio(account: &AccountNumber) -> PortfolioSummary {
    let holdings = MOCK_HOLDINGS
        .iter()
        .map(
            |&(symbol, name, shares, current_price, market_value, gain_loss, gain_loss_percent)| {
                Holding {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    shares,
                    current_price,
                    market_value,
                    gain_loss,
                    gain_loss_percent,
                }
            },
        )
        .collect();

    PortfolioSummary {
        account_number: account.to_string(),
        total_value: 125750.50,
        total_gain_loss: 8250.50,
        total_gain_loss_percent: 7.02,
        holdings,
        last_updated: format_datetime(Local::now().naive_local()),
    }
}

fn seed_for(account: &AccountNumber) -> u64 {
    account.as_str().parse().unwrap_or(0)
}

/// Pseudo-random ledger seeded from the account number, newest first.
/// The same account always yields the same rows.
pub fn generate_mock_transactions(account: &AccountNumber) -> TransactionHistory {
    let mut rng = SmallRng::seed_from_u64(seed_for(account));
    let count = rng.gen_range(6..=12);
    let mut date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap_or(NaiveDate::MIN);

    let mut transactions = Vec::with_capacity(count);
    for _ in 0..count {
        let &(symbol, _, _, base_price, ..) = &MOCK_HOLDINGS[rng.gen_range(0..MOCK_HOLDINGS.len())];
        let kind = match rng.gen_range(0..10) {
            0..=4 => TransactionKind::Buy,
            5..=7 => TransactionKind::Sell,
            8 => TransactionKind::Transfer,
            _ => TransactionKind::Fee,
        };
        let (quantity, price, amount) = match kind {
            TransactionKind::Fee => (0.0, 0.0, -(rng.gen_range(495..=2495) as f64) / 100.0),
            _ => {
                let quantity = rng.gen_range(1..=50) as f64;
                let price = (base_price * rng.gen_range(0.85..1.15) * 100.0).round() / 100.0;
                let gross = (quantity * price * 100.0).round() / 100.0;
                let amount = if kind == TransactionKind::Buy { -gross } else { gross };
                (quantity, price, amount)
            }
        };
        let status = if rng.gen_bool(0.9) {
            TransactionStatus::Done
        } else {
            TransactionStatus::Pending
        };

        transactions.push(Transaction {
            date: date.format("%Y%m%d").to_string(),
            time: format!(
                "{:02}{:02}{:02}",
                rng.gen_range(9..16),
                rng.gen_range(0..60),
                rng.gen_range(0..60)
            ),
            investment_id: symbol.to_string(),
            kind,
            quantity,
            price,
            amount,
            currency: "USD".to_string(),
            status,
        });

        date = date
            .checked_sub_signed(chrono::Duration::days(rng.gen_range(1..=21)))
            .unwrap_or(date);
    }

    TransactionHistory {
        account_number: account.to_string(),
        transactions,
        message: format!("{count} transactions (sample data)"),
    }
}

/// Offline data source with an artificial delay so loading states are visible.
pub struct MockSource {
    latency: Duration,
}

impl MockSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl PortfolioSource for MockSource {
    fn portfolio(&self, account: &AccountNumber) -> Result<PortfolioSummary, ApiError> {
        thread::sleep(self.latency);
        Ok(generate_mock_portfolio(account))
    }

    fn transactions(&self, account: &AccountNumber) -> Result<TransactionHistory, ApiError> {
        thread::sleep(self.latency);
        Ok(generate_mock_transactions(account))
    }
}
