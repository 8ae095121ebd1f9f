//! End-to-end report pipeline facade.
//!
//! One call runs one batch job: load the three sources, classify, render,
//! write. Strictly sequential; the first stage failure aborts the run and
//! nothing is written.

use crate::agents::NarrativeWorkflow;
use crate::analysis::{classify, promotion_actions, replenishment_actions};
use crate::config::Settings;
use crate::core::llm::LLMClient;
use crate::core::PipelineError;
use crate::data::Dataset;
use crate::report;

#[derive(Debug)]
pub struct ReportRun {
    pub content: String,
    pub total_products: usize,
    pub low_stock_count: usize,
    pub high_stock_count: usize,
}

/// Run the batch pipeline once. With an LLM client the three-stage
/// narrative frames the findings; without one the fixed findings text is
/// used. The numeric tables are local either way.
pub async fn run_report(
    settings: &Settings,
    llm: Option<&LLMClient>,
) -> Result<ReportRun, PipelineError> {
    let dataset = Dataset::load(&settings.data)?;
    let joined = dataset.joined();
    let classification = classify(&joined);
    let replenishments = replenishment_actions(&classification.low_stock);
    let promotions = promotion_actions(&classification.high_stock);

    tracing::info!(
        "[pipeline] Classified {} products: {} low-stock, {} overstocked",
        classification.total_products,
        classification.low_stock.len(),
        classification.high_stock.len()
    );

    let narrative = match llm {
        Some(llm) => Some(
            NarrativeWorkflow::new(llm)
                .run(&dataset, &classification)
                .await?,
        ),
        None => None,
    };

    let content = report::render_report(
        &classification,
        &replenishments,
        &promotions,
        narrative.as_ref().map(|n| n.findings.as_str()),
    );
    report::write_report(&settings.report.output, &content).await?;

    Ok(ReportRun {
        content,
        total_products: classification.total_products,
        low_stock_count: classification.low_stock.len(),
        high_stock_count: classification.high_stock.len(),
    })
}
