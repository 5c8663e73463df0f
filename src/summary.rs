//! Cart summary rendering.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::cart::Cart;

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    Io,
}

/// Plain-text rendering of a cart for CLI and demo hosts.
#[derive(Debug, Clone)]
pub struct CartSummary {
    cart: Cart,
}

impl CartSummary {
    /// Capture a summary of `cart`.
    pub fn new(cart: &Cart) -> Self {
        Self { cart: cart.clone() }
    }

    /// Write the item table and totals row to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Io`] when `out` rejects the write.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

        for line in &self.cart.items {
            builder.push_record([
                line.product.name.clone(),
                line.quantity.to_string(),
                format_minor(line.product.price),
                format_minor(line.line_total()),
            ]);
        }

        builder.push_record([
            "Total".to_owned(),
            self.cart.total_items.to_string(),
            String::new(),
            format_minor(self.cart.total_amount),
        ]);

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| SummaryError::Io)
    }

    /// Render the summary to a string.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        if self.write_to(&mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Format minor units as a `major.minor` decimal string.
fn format_minor(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
