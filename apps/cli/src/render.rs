//! # Cart Rendering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  #2   Tênis VR Caminhada          x2   R$ 279,80             │
//! │  #5   Tênis Adidas Duramo         x1   R$ 219,90             │
//! │  ──────────────────────────────────────────────              │
//! │  2 products, 3 units              Subtotal R$ 499,70         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use rocketshoes_core::{CartEntry, CartState, CartTotals};
use serde::Serialize;

/// Cart plus totals, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse<'a> {
    pub items: &'a [CartEntry],
    pub totals: CartTotals,
}

impl<'a> From<&'a CartState> for CartResponse<'a> {
    fn from(cart: &'a CartState) -> Self {
        CartResponse {
            items: cart.entries(),
            totals: cart.totals(),
        }
    }
}

/// Human-readable cart listing.
pub fn render_cart(cart: &CartState) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for entry in cart.entries() {
        let title = entry.display.title().unwrap_or("(untitled)");
        let line_total = entry
            .line_total()
            .map(|total| total.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "#{:<4} {:<32} x{:<4} {}\n",
            entry.product_id.get(),
            title,
            entry.amount,
            line_total
        ));
    }

    let totals = cart.totals();
    out.push_str(&format!("{}\n", "─".repeat(50)));
    out.push_str(&format!(
        "{} products, {} units    Subtotal {}\n",
        totals.item_count, totals.total_quantity, totals.subtotal
    ));
    if totals.unpriced_entries > 0 {
        out.push_str(&format!(
            "({} without a price)\n",
            totals.unpriced_entries
        ));
    }
    out
}
