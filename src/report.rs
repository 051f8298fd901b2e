// src/report.rs
use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapDetails {
    pub input_symbol: String,
    pub output_symbol: String,
    pub amount_in: String,
    pub amount_received: String,
    pub approve_tx: B256,
    pub swap_tx: B256,
    pub gas_used: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceShiftReport {
    pub run_id: Uuid,
    pub exchange: String,
    pub pool_address: Address,
    pub price_before: String,
    pub price_after: Option<String>,
    pub change_bps: Option<i64>,
    pub swap: Option<SwapDetails>,
    pub recipient: Address,
    pub recipient_balance: String,
    pub balance_symbol: String,
    pub timestamp: DateTime<Utc>,
}

impl PriceShiftReport {
    pub fn new(
        exchange: impl Into<String>,
        pool_address: Address,
        price_before: String,
        recipient: Address,
        recipient_balance: String,
        balance_symbol: impl Into<String>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            exchange: exchange.into(),
            pool_address,
            price_before,
            price_after: None,
            change_bps: None,
            swap: None,
            recipient,
            recipient_balance,
            balance_symbol: balance_symbol.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_price_after(mut self, price_after: String, change_bps: i64) -> Self {
        self.price_after = Some(price_after);
        self.change_bps = Some(change_bps);
        self
    }

    pub fn with_swap(mut self, swap: SwapDetails) -> Self {
        self.swap = Some(swap);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Two-column table in the shape of a JS console.table
    pub fn render_table(&self) -> String {
        let mut rows = vec![("Price Before", self.price_before.clone())];
        if let Some(after) = &self.price_after {
            rows.push(("Price After", after.clone()));
        }

        let key_width = rows
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
            .max("(index)".len());
        let value_width = rows
            .iter()
            .map(|(_, v)| v.chars().count())
            .max()
            .unwrap_or(0)
            .max("Values".len());

        let line = |left: &str, mid: &str, right: &str| {
            format!(
                "{}{}{}{}{}",
                left,
                "─".repeat(key_width + 2),
                mid,
                "─".repeat(value_width + 2),
                right
            )
        };
        let row = |key: &str, value: &str| {
            format!(
                "│ {:<kw$} │ {:<vw$} │",
                key,
                value,
                kw = key_width,
                vw = value_width
            )
        };

        let mut out = vec![
            line("┌", "┬", "┐"),
            row("(index)", "Values"),
            line("├", "┼", "┤"),
        ];
        for (key, value) in &rows {
            out.push(row(key, value));
        }
        out.push(line("└", "┴", "┘"));
        out.join("\n")
    }

    pub fn render(&self) -> String {
        let mut out = self.render_table();
        if let Some(bps) = self.change_bps {
            out.push_str(&format!("\nPrice change: {:+} bps", bps));
        }
        if let Some(swap) = &self.swap {
            out.push_str(&format!("\nSwap transaction: {}", swap.swap_tx));
        }
        out.push_str(&format!(
            "\n\nBalance in receiver account: {} {}\n",
            self.recipient_balance, self.balance_symbol
        ));
        out
    }
}
