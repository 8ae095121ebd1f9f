//! The three-stage narrative workflow: analyst, strategist, report writer.
//!
//! Three sequential, stateless completions chained by string
//! interpolation. Not a scheduler and not a state machine; stage N+1 sees
//! exactly the text stage N returned, nothing else. The numbers fed into
//! stage 1 are computed locally, so the collaborator frames them without
//! being trusted to reproduce them.

use crate::analysis::{overstock_band, stockout_band, Classification};
use crate::core::llm::{CollaboratorError, LLMClient};
use crate::data::Dataset;

use super::prompts::{
    classify_prompt, report_prompt, strategy_prompt, ANALYST_SYSTEM_MESSAGE,
    REPORTER_SYSTEM_MESSAGE, STRATEGIST_SYSTEM_MESSAGE,
};

/// Output of the workflow: each stage's text, in order.
#[derive(Debug, Clone)]
pub struct Narrative {
    pub analysis: String,
    pub strategy: String,
    pub findings: String,
}

pub struct NarrativeWorkflow<'a> {
    llm: &'a LLMClient,
}

impl<'a> NarrativeWorkflow<'a> {
    pub fn new(llm: &'a LLMClient) -> Self {
        Self { llm }
    }

    pub async fn run(
        &self,
        dataset: &Dataset,
        classification: &Classification,
    ) -> Result<Narrative, CollaboratorError> {
        let temperature = self.llm.default_temperature();

        tracing::info!("[workflow] Stage 1/3: analyst");
        let analysis = self
            .llm
            .complete(
                ANALYST_SYSTEM_MESSAGE,
                &classify_prompt(
                    &sales_summary(dataset),
                    &products_summary(dataset),
                    &inventory_summary(classification),
                ),
                temperature,
            )
            .await?;

        tracing::info!("[workflow] Stage 2/3: strategist");
        let strategy = self
            .llm
            .complete(STRATEGIST_SYSTEM_MESSAGE, &strategy_prompt(&analysis), temperature)
            .await?;

        tracing::info!("[workflow] Stage 3/3: report writer");
        let findings = self
            .llm
            .complete(
                REPORTER_SYSTEM_MESSAGE,
                &report_prompt(&analysis, &strategy),
                temperature,
            )
            .await?;

        Ok(Narrative {
            analysis,
            strategy,
            findings,
        })
    }
}

fn sales_summary(dataset: &Dataset) -> String {
    if dataset.sales.is_empty() {
        return "Sales: no sales recorded in the observed window.".to_string();
    }

    let total: u64 = dataset.sales.iter().map(|s| u64::from(s.quantity_sold)).sum();
    let max = dataset.sales.iter().map(|s| s.quantity_sold).max().unwrap_or(0);
    let first = dataset.sales.iter().map(|s| s.date).min();
    let last = dataset.sales.iter().map(|s| s.date).max();

    format!(
        "Sales: {} rows from {} to {}; total quantity sold {}, average per row {:.1}, \
         single-day maximum {}.",
        dataset.sales.len(),
        first.map(|d| d.to_string()).unwrap_or_default(),
        last.map(|d| d.to_string()).unwrap_or_default(),
        total,
        total as f64 / dataset.sales.len() as f64,
        max,
    )
}

fn products_summary(dataset: &Dataset) -> String {
    let mut categories: Vec<&str> = dataset
        .products
        .iter()
        .map(|p| p.category.as_str())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    format!(
        "Products: {} items across categories: {}.",
        dataset.products.len(),
        categories.join(", "),
    )
}

/// JSON digest of the locally computed classification, handed to stage 1
/// so the collaborator narrates figures instead of recomputing them. Only
/// the riskiest few items per set are listed in full.
fn inventory_summary(classification: &Classification) -> String {
    let digest = serde_json::json!({
        "total_products": classification.total_products,
        "low_stock_count": classification.low_stock.len(),
        "critical_low_stock_count": classification.critical_low_count(),
        "high_stock_count": classification.high_stock.len(),
        "critical_high_stock_count": classification.critical_high_count(),
        "worst_low_stock": classification.low_stock.iter().take(5).map(|item| {
            serde_json::json!({
                "product_id": item.row.product_id,
                "current_stock": item.row.current_stock,
                "safety_stock": item.row.safety_stock,
                "out_of_stock_risk": item.out_of_stock_risk,
                "band": stockout_band(item.out_of_stock_risk).label(),
                "avg_daily_sales": item.row.sales.as_ref().map(|s| s.avg_daily_sales),
            })
        }).collect::<Vec<_>>(),
        "worst_overstock": classification.high_stock.iter().take(5).map(|item| {
            serde_json::json!({
                "product_id": item.row.product_id,
                "current_stock": item.row.current_stock,
                "safety_stock": item.row.safety_stock,
                "overstock_risk": item.overstock_risk,
                "band": overstock_band(item.overstock_risk).label(),
                "avg_daily_sales": item.row.sales.as_ref().map(|s| s.avg_daily_sales),
            })
        }).collect::<Vec<_>>(),
    });

    format!(
        "Inventory classification (computed locally):\n{}",
        serde_json::to_string_pretty(&digest).unwrap_or_default()
    )
}
