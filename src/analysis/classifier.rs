//! Threshold-based risk classification over the joined inventory view.
//!
//! The predicates and formulas here are the contract of the whole system
//! and must not drift:
//!   low-stock:  current_stock < safety_stock
//!   high-stock: current_stock > safety_stock * 2
//!   out_of_stock_risk = (safety_stock - current_stock) / safety_stock * 100
//!   overstock_risk    = (current_stock - safety_stock) / safety_stock * 100
//! Both inequalities are strict; a product exactly at its safety stock or
//! exactly at twice its safety stock belongs to neither set. Rows with a
//! zero safety stock are excluded from both sets before the division.

use crate::data::JoinedRow;

/// Stock-out risk above this is critical.
pub const STOCKOUT_CRITICAL_THRESHOLD: f64 = 70.0;
/// Stock-out risk from here up to the critical threshold is elevated.
pub const STOCKOUT_ELEVATED_THRESHOLD: f64 = 40.0;
/// Overstock risk above this is critical.
pub const OVERSTOCK_CRITICAL_THRESHOLD: f64 = 200.0;
/// Overstock risk from here up to the critical threshold is elevated.
pub const OVERSTOCK_ELEVATED_THRESHOLD: f64 = 100.0;

/// Low-stock rows above this risk become replenishment candidates.
pub const REPLENISHMENT_RISK_THRESHOLD: f64 = 40.0;
/// High-stock rows above this risk become promotion candidates.
pub const PROMOTION_RISK_THRESHOLD: f64 = 100.0;

/// Buffer applied on top of the shortfall when suggesting a restock.
const REPLENISHMENT_BUFFER: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Critical,
    Elevated,
    Low,
}

impl RiskBand {
    pub fn glyph(&self) -> &'static str {
        match self {
            RiskBand::Critical => "🔴",
            RiskBand::Elevated => "🟡",
            RiskBand::Low => "🟢",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Critical => "critical",
            RiskBand::Elevated => "elevated",
            RiskBand::Low => "low",
        }
    }
}

pub fn stockout_band(risk: f64) -> RiskBand {
    if risk > STOCKOUT_CRITICAL_THRESHOLD {
        RiskBand::Critical
    } else if risk >= STOCKOUT_ELEVATED_THRESHOLD {
        RiskBand::Elevated
    } else {
        RiskBand::Low
    }
}

pub fn overstock_band(risk: f64) -> RiskBand {
    if risk > OVERSTOCK_CRITICAL_THRESHOLD {
        RiskBand::Critical
    } else if risk >= OVERSTOCK_ELEVATED_THRESHOLD {
        RiskBand::Elevated
    } else {
        RiskBand::Low
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LowStockItem {
    pub row: JoinedRow,
    pub out_of_stock_risk: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighStockItem {
    pub row: JoinedRow,
    pub overstock_risk: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub total_products: usize,
    pub low_stock: Vec<LowStockItem>,
    pub high_stock: Vec<HighStockItem>,
}

impl Classification {
    pub fn critical_low_count(&self) -> usize {
        self.low_stock
            .iter()
            .filter(|item| item.out_of_stock_risk > STOCKOUT_CRITICAL_THRESHOLD)
            .count()
    }

    pub fn critical_high_count(&self) -> usize {
        self.high_stock
            .iter()
            .filter(|item| item.overstock_risk > OVERSTOCK_CRITICAL_THRESHOLD)
            .count()
    }
}

/// Partition the joined view into the low-stock and high-stock sets, each
/// sorted by its risk descending. The sort is stable, so equal risks keep
/// their input order. Pure function of its input.
pub fn classify(rows: &[JoinedRow]) -> Classification {
    let mut low_stock = Vec::new();
    let mut high_stock = Vec::new();

    for row in rows {
        // Zero safety stock would divide by zero; such rows are not
        // classifiable and land in neither set.
        if row.safety_stock == 0.0 {
            continue;
        }

        let stock = row.current_stock as f64;
        if stock < row.safety_stock {
            let out_of_stock_risk = (row.safety_stock - stock) / row.safety_stock * 100.0;
            low_stock.push(LowStockItem {
                row: row.clone(),
                out_of_stock_risk,
            });
        } else if stock > row.safety_stock * 2.0 {
            let overstock_risk = (stock - row.safety_stock) / row.safety_stock * 100.0;
            high_stock.push(HighStockItem {
                row: row.clone(),
                overstock_risk,
            });
        }
    }

    low_stock.sort_by(|a, b| b.out_of_stock_risk.total_cmp(&a.out_of_stock_risk));
    high_stock.sort_by(|a, b| b.overstock_risk.total_cmp(&a.overstock_risk));

    Classification {
        total_products: rows.len(),
        low_stock,
        high_stock,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPriority {
    Urgent,
    High,
    Medium,
}

impl ActionPriority {
    pub fn display(&self) -> &'static str {
        match self {
            ActionPriority::Urgent => "🔴 urgent",
            ActionPriority::High => "🟡 high",
            ActionPriority::Medium => "🟢 medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplenishmentAction {
    pub product_id: String,
    pub name: Option<String>,
    pub quantity: i64,
    pub priority: ActionPriority,
    pub timeline: &'static str,
    pub out_of_stock_risk: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionAction {
    pub product_id: String,
    pub name: Option<String>,
    pub method: &'static str,
    pub discount_percent: u32,
    pub timing: &'static str,
    pub priority: ActionPriority,
    pub overstock_risk: f64,
}

/// Restock recommendations for low-stock rows whose risk exceeds the
/// action threshold. Inherits the classifier's sort order.
pub fn replenishment_actions(low_stock: &[LowStockItem]) -> Vec<ReplenishmentAction> {
    low_stock
        .iter()
        .filter(|item| item.out_of_stock_risk > REPLENISHMENT_RISK_THRESHOLD)
        .map(|item| {
            let risk = item.out_of_stock_risk;
            let shortfall = item.row.safety_stock - item.row.current_stock as f64;
            let (priority, timeline) = if risk > 70.0 {
                (ActionPriority::Urgent, "within 48 hours")
            } else if risk > 50.0 {
                (ActionPriority::High, "within 7 days")
            } else {
                (ActionPriority::Medium, "within 14 days")
            };
            ReplenishmentAction {
                product_id: item.row.product_id.clone(),
                name: item.row.name.clone(),
                quantity: (shortfall * REPLENISHMENT_BUFFER).round() as i64,
                priority,
                timeline,
                out_of_stock_risk: risk,
            }
        })
        .collect()
}

/// Markdown/clearance recommendations for high-stock rows whose risk
/// exceeds the action threshold. Inherits the classifier's sort order.
pub fn promotion_actions(high_stock: &[HighStockItem]) -> Vec<PromotionAction> {
    high_stock
        .iter()
        .filter(|item| item.overstock_risk > PROMOTION_RISK_THRESHOLD)
        .map(|item| {
            let risk = item.overstock_risk;
            let (priority, discount_percent, timing) = if risk > 200.0 {
                (ActionPriority::Urgent, 30, "immediate")
            } else if risk > 150.0 {
                (ActionPriority::High, 20, "within 1 week")
            } else {
                (ActionPriority::Medium, 15, "within 2 weeks")
            };
            PromotionAction {
                product_id: item.row.product_id.clone(),
                name: item.row.name.clone(),
                method: "limited-time discount",
                discount_percent,
                timing,
                priority,
                overstock_risk: risk,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: &str, current_stock: i64, safety_stock: f64) -> JoinedRow {
        JoinedRow {
            product_id: product_id.to_string(),
            current_stock,
            safety_stock,
            name: Some(format!("{} name", product_id)),
            category: Some("Home".to_string()),
            cost_price: Some(10.0),
            selling_price: Some(20.0),
            supplier_lead_time: Some(7),
            sales: None,
        }
    }

    #[test]
    fn three_product_scenario() {
        let rows = vec![row("P001", 10, 100.0), row("P002", 50, 50.0), row("P003", 300, 100.0)];
        let classification = classify(&rows);

        assert_eq!(classification.total_products, 3);

        // P001: shortfall of 90 out of 100.
        assert_eq!(classification.low_stock.len(), 1);
        let p001 = &classification.low_stock[0];
        assert_eq!(p001.row.product_id, "P001");
        assert_eq!(p001.out_of_stock_risk, 90.0);
        assert_eq!(stockout_band(p001.out_of_stock_risk), RiskBand::Critical);

        // P002 sits exactly at safety stock and is excluded by the strict `<`.
        assert!(classification
            .low_stock
            .iter()
            .all(|item| item.row.product_id != "P002"));
        assert!(classification
            .high_stock
            .iter()
            .all(|item| item.row.product_id != "P002"));

        // P003: 200% over, which is the boundary: elevated, not critical.
        assert_eq!(classification.high_stock.len(), 1);
        let p003 = &classification.high_stock[0];
        assert_eq!(p003.row.product_id, "P003");
        assert_eq!(p003.overstock_risk, 200.0);
        assert_eq!(overstock_band(p003.overstock_risk), RiskBand::Elevated);

        let replenishments = replenishment_actions(&classification.low_stock);
        assert_eq!(replenishments.len(), 1);
        assert_eq!(replenishments[0].quantity, 108);
        assert_eq!(replenishments[0].timeline, "within 48 hours");
        assert_eq!(replenishments[0].priority, ActionPriority::Urgent);

        let promotions = promotion_actions(&classification.high_stock);
        assert_eq!(promotions.len(), 1);
        assert_eq!(promotions[0].discount_percent, 20);
        assert_eq!(promotions[0].timing, "within 1 week");
    }

    #[test]
    fn boundaries_are_strict() {
        let rows = vec![row("AT-SAFETY", 50, 50.0), row("AT-DOUBLE", 100, 50.0)];
        let classification = classify(&rows);

        assert!(classification.low_stock.is_empty());
        assert!(classification.high_stock.is_empty());
    }

    #[test]
    fn zero_safety_stock_is_excluded_from_both_sets() {
        let rows = vec![row("Z1", 0, 0.0), row("Z2", 500, 0.0)];
        let classification = classify(&rows);

        assert!(classification.low_stock.is_empty());
        assert!(classification.high_stock.is_empty());
        assert_eq!(classification.total_products, 2);
    }

    #[test]
    fn sets_are_mutually_exclusive() {
        let rows: Vec<JoinedRow> = (0..50i64)
            .map(|i| row(&format!("P{:03}", i), (i * 17) % 90, 30.0))
            .collect();
        let classification = classify(&rows);

        for low in &classification.low_stock {
            assert!(!classification
                .high_stock
                .iter()
                .any(|high| high.row.product_id == low.row.product_id));
        }
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let rows = vec![
            row("MILD", 60, 100.0),   // risk 40
            row("FIRST", 20, 100.0),  // risk 80
            row("SECOND", 10, 50.0),  // risk 80, after FIRST in input order
            row("WORST", 5, 100.0),   // risk 95
        ];
        let classification = classify(&rows);

        let order: Vec<&str> = classification
            .low_stock
            .iter()
            .map(|item| item.row.product_id.as_str())
            .collect();
        assert_eq!(order, vec!["WORST", "FIRST", "SECOND", "MILD"]);

        let risks: Vec<f64> = classification
            .low_stock
            .iter()
            .map(|item| item.out_of_stock_risk)
            .collect();
        assert!(risks.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn classification_is_idempotent() {
        let rows = vec![row("A", 10, 100.0), row("B", 400, 100.0), row("C", 55, 60.0)];
        assert_eq!(classify(&rows), classify(&rows));
    }

    #[test]
    fn action_filters_are_strict() {
        // Risk exactly 40: elevated band, but not a replenishment candidate.
        let rows = vec![row("EXACT40", 60, 100.0)];
        let classification = classify(&rows);
        assert_eq!(classification.low_stock.len(), 1);
        assert_eq!(
            stockout_band(classification.low_stock[0].out_of_stock_risk),
            RiskBand::Elevated
        );
        assert!(replenishment_actions(&classification.low_stock).is_empty());

        // Risk exactly 100: elevated band, but not a promotion candidate.
        let rows = vec![row("EXACT100", 200, 100.0)];
        let classification = classify(&rows);
        assert_eq!(classification.high_stock.len(), 1);
        assert_eq!(
            overstock_band(classification.high_stock[0].overstock_risk),
            RiskBand::Elevated
        );
        assert!(promotion_actions(&classification.high_stock).is_empty());
    }

    #[test]
    fn band_edges() {
        assert_eq!(stockout_band(70.0), RiskBand::Elevated);
        assert_eq!(stockout_band(70.1), RiskBand::Critical);
        assert_eq!(stockout_band(39.9), RiskBand::Low);
        assert_eq!(overstock_band(100.0), RiskBand::Elevated);
        assert_eq!(overstock_band(200.0), RiskBand::Elevated);
        assert_eq!(overstock_band(200.1), RiskBand::Critical);
    }

    #[test]
    fn replenishment_tiers() {
        let rows = vec![
            row("URGENT", 10, 100.0), // risk 90
            row("SOON", 40, 100.0),   // risk 60
            row("LATER", 55, 100.0),  // risk 45
        ];
        let classification = classify(&rows);
        let actions = replenishment_actions(&classification.low_stock);

        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].timeline, "within 48 hours");
        assert_eq!(actions[1].timeline, "within 7 days");
        assert_eq!(actions[1].priority, ActionPriority::High);
        assert_eq!(actions[2].timeline, "within 14 days");
        assert_eq!(actions[2].priority, ActionPriority::Medium);
        // Suggested quantity is the shortfall with a 20% buffer.
        assert_eq!(actions[2].quantity, 54);
    }

    #[test]
    fn promotion_tiers() {
        let rows = vec![
            row("CLEAR", 450, 100.0), // risk 350
            row("PUSH", 280, 100.0),  // risk 180
            row("NUDGE", 220, 100.0), // risk 120
        ];
        let classification = classify(&rows);
        let actions = promotion_actions(&classification.high_stock);

        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].discount_percent, 30);
        assert_eq!(actions[0].timing, "immediate");
        assert_eq!(actions[1].discount_percent, 20);
        assert_eq!(actions[2].discount_percent, 15);
        assert_eq!(actions[2].timing, "within 2 weeks");
    }
}
