//! Markdown assembly for the inventory report.
//!
//! Table row order comes straight from the classifier; nothing here
//! re-sorts. Numeric tables are always produced locally, the optional
//! narrative only contributes prose framing.

use crate::analysis::{
    overstock_band, stockout_band, Classification, PromotionAction, ReplenishmentAction,
};

pub const NO_LOW_STOCK_PLACEHOLDER: &str = "**No low-stock products**";
pub const NO_HIGH_STOCK_PLACEHOLDER: &str = "**No overstocked products**";
pub const NO_REPLENISHMENT_PLACEHOLDER: &str = "**No replenishment needed**";
pub const NO_PROMOTION_PLACEHOLDER: &str = "**No promotions needed**";

/// Assemble the full Markdown document.
pub fn render_report(
    classification: &Classification,
    replenishments: &[ReplenishmentAction],
    promotions: &[PromotionAction],
    narrative: Option<&str>,
) -> String {
    let low_count = classification.low_stock.len();
    let high_count = classification.high_stock.len();
    let critical_low = classification.critical_low_count();
    let critical_high = classification.critical_high_count();

    let findings = match narrative {
        Some(text) => text.trim().to_string(),
        None => default_findings(),
    };

    format!(
        "# Inventory Management Report\n\
         \n\
         ## Executive Summary\n\
         \n\
         ### Overall Stock Health\n\
         During this reporting period, {low_count} products fell below their safety stock \
         level, {critical_low} of which carry a stock-out risk above 70%. At the same time, \
         {high_count} products are overstocked, {critical_high} of them with an overstock \
         risk above 200%.\n\
         \n\
         ### Key Findings and Recommendations\n\
         {findings}\n\
         \n\
         ## Detailed Stock Analysis\n\
         \n\
         ### Low-Stock Products ({low_count} products)\n\
         \n\
         {low_table}\n\
         \n\
         ### Overstocked Products ({high_count} products)\n\
         \n\
         {high_table}\n\
         \n\
         ## Replenishment and Promotion Strategy\n\
         \n\
         ### Replenishment Recommendations\n\
         \n\
         {replenishment_table}\n\
         \n\
         ### Promotion Recommendations\n\
         \n\
         {promotion_table}\n\
         \n\
         ## Summary\n\
         \n\
         This report is generated from the current data snapshot and lists the stock \
         positions that need attention together with the recommended replenishment and \
         promotion actions.\n\
         \n\
         **Key figures:**\n\
         - Total products: {total}\n\
         - Low-stock products: {low_count}\n\
         - Overstocked products: {high_count}\n\
         - Critical low-stock: {critical_low}\n\
         - Critical overstock: {critical_high}\n",
        total = classification.total_products,
        low_table = low_stock_table(classification),
        high_table = high_stock_table(classification),
        replenishment_table = replenishment_table(replenishments),
        promotion_table = promotion_table(promotions),
    )
}

fn default_findings() -> String {
    [
        "- **Low-stock products**: replenish items with a stock-out risk above 70% \
         immediately to avoid lost sales.",
        "- **Overstocked products**: consider promotions to reduce excess stock and \
         adjust purchasing plans against the sales trend.",
        "- **Stock structure**: rebalance stock levels against per-product sales volume \
         and seasonality.",
    ]
    .join("\n")
}

fn low_stock_table(classification: &Classification) -> String {
    if classification.low_stock.is_empty() {
        return NO_LOW_STOCK_PLACEHOLDER.to_string();
    }

    let mut lines = vec![
        "| Product ID | Name | Current Stock | Safety Stock | Stock-Out Risk | Category | Severity |"
            .to_string(),
        "|---|---|---|---|---|---|---|".to_string(),
    ];
    for item in &classification.low_stock {
        lines.push(format!(
            "| {} | {} | {} | {:.1} | {:.1}% | {} | {} |",
            item.row.product_id,
            item.row.name.as_deref().unwrap_or("-"),
            item.row.current_stock,
            item.row.safety_stock,
            item.out_of_stock_risk,
            item.row.category.as_deref().unwrap_or("-"),
            stockout_band(item.out_of_stock_risk).glyph(),
        ));
    }
    lines.push(String::new());
    lines.push("**Legend**: 🔴 critical (>70%), 🟡 elevated (40–70%), 🟢 low (<40%)".to_string());
    lines.join("\n")
}

fn high_stock_table(classification: &Classification) -> String {
    if classification.high_stock.is_empty() {
        return NO_HIGH_STOCK_PLACEHOLDER.to_string();
    }

    let mut lines = vec![
        "| Product ID | Name | Current Stock | Safety Stock | Overstock Risk | Category | Severity |"
            .to_string(),
        "|---|---|---|---|---|---|---|".to_string(),
    ];
    for item in &classification.high_stock {
        lines.push(format!(
            "| {} | {} | {} | {:.1} | {:.1}% | {} | {} |",
            item.row.product_id,
            item.row.name.as_deref().unwrap_or("-"),
            item.row.current_stock,
            item.row.safety_stock,
            item.overstock_risk,
            item.row.category.as_deref().unwrap_or("-"),
            overstock_band(item.overstock_risk).glyph(),
        ));
    }
    lines.push(String::new());
    lines.push("**Legend**: 🔴 critical (>200%), 🟡 elevated (100–200%), 🟢 low (<100%)".to_string());
    lines.join("\n")
}

fn replenishment_table(actions: &[ReplenishmentAction]) -> String {
    if actions.is_empty() {
        return NO_REPLENISHMENT_PLACEHOLDER.to_string();
    }

    let mut lines = vec![
        "| Product ID | Name | Suggested Quantity | Priority | Timeline | Reason |".to_string(),
        "|---|---|---|---|---|---|".to_string(),
    ];
    for action in actions {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | stock-out risk {:.1}% |",
            action.product_id,
            action.name.as_deref().unwrap_or("-"),
            action.quantity,
            action.priority.display(),
            action.timeline,
            action.out_of_stock_risk,
        ));
    }
    lines.join("\n")
}

fn promotion_table(actions: &[PromotionAction]) -> String {
    if actions.is_empty() {
        return NO_PROMOTION_PLACEHOLDER.to_string();
    }

    let mut lines = vec![
        "| Product ID | Name | Method | Discount | Timing | Reason |".to_string(),
        "|---|---|---|---|---|---|".to_string(),
    ];
    for action in actions {
        lines.push(format!(
            "| {} | {} | {} | {}% | {} | overstock risk {:.1}% |",
            action.product_id,
            action.name.as_deref().unwrap_or("-"),
            action.method,
            action.discount_percent,
            action.timing,
            action.overstock_risk,
        ));
    }
    lines.join("\n")
}
