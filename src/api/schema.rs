use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub account_number: String,
    pub total_value: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "BU")]
    Buy,
    #[serde(rename = "SL")]
    Sell,
    #[serde(rename = "TR")]
    Transfer,
    #[serde(rename = "FE")]
    Fee,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Buy => "Buy",
            TransactionKind::Sell => "Sell",
            TransactionKind::Transfer => "Transfer",
            TransactionKind::Fee => "Fee",
            TransactionKind::Unknown => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[serde(rename = "P")]
    Pending,
    #[serde(rename = "D")]
    Done,
    #[serde(rename = "F")]
    Failed,
    #[serde(rename = "R")]
    Reversed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Done => "Done",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Reversed => "Reversed",
            TransactionStatus::Unknown => "-",
        }
    }
}

/// One ledger row. Dates are `YYYYMMDD` and times `HHMMSS`, as stored by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub date: String,
    pub time: String,
    pub investment_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub quantity: f64,
    pub price: f64,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
}

impl Transaction {
    /// `20240628` -> `2024-06-28`; anything else is shown as-is.
    pub fn display_date(&self) -> String {
        let d = &self.date;
        if d.len() == 8 && d.chars().all(|c| c.is_ascii_digit()) {
            format!("{}-{}-{}", &d[0..4], &d[4..6], &d[6..8])
        } else {
            d.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistory {
    pub account_number: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub message: String,
}

/// Body of a FastAPI-style 400 response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_portfolio_payload() {
        let json = r#"{
            "accountNumber": "1234567899",
            "totalValue": 125750.5,
            "totalGainLoss": 8250.5,
            "totalGainLossPercent": 7.02,
            "holdings": [{
                "symbol": "AAPL", "name": "Apple Inc.", "shares": 150,
                "currentPrice": 185.25, "marketValue": 27787.5,
                "gainLoss": 2287.5, "gainLossPercent": 8.97
            }],
            "lastUpdated": "October 19, 2026, 02:30 PM"
        }"#;
        let summary: PortfolioSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.account_number, "1234567899");
        assert_eq!(summary.holdings.len(), 1);
        assert_eq!(summary.holdings[0].shares, 150.0);
    }

    #[test]
    fn decodes_placeholder_transactions() {
        let json = r#"{
            "accountNumber": "1234567899",
            "transactions": [],
            "message": "Transaction history endpoint - placeholder implementation"
        }"#;
        let history: TransactionHistory = serde_json::from_str(json).unwrap();
        assert!(history.transactions.is_empty());
        assert!(history.message.contains("placeholder"));
    }

    #[test]
    fn partial_and_unknown_transaction_fields_decode() {
        let json = r#"{"date": "20240628", "type": "XX", "amount": -4.95, "status": "D"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Unknown);
        assert_eq!(tx.status, TransactionStatus::Done);
        assert_eq!(tx.display_date(), "2024-06-28");
        assert_eq!(tx.quantity, 0.0);
    }

    #[test]
    fn error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.detail.is_none());
    }
}
