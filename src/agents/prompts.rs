//! Prompt templates for the three report personas and the Q&A assistant.
//!
//! Each stage is a pure function over plain strings; the stages share no
//! context beyond what is interpolated into the next prompt.

pub const ANALYST_SYSTEM_MESSAGE: &str = "You are a professional data analyst who specializes \
in inventory data. You extract the relevant facts from tabular summaries and identify stock \
anomalies precisely.";

pub const STRATEGIST_SYSTEM_MESSAGE: &str = "You are a professional inventory strategy advisor. \
You turn analysis results into concrete, targeted replenishment and promotion recommendations.";

pub const REPORTER_SYSTEM_MESSAGE: &str = "You are a professional report writer. You distill \
complex analysis into clear, well-structured prose for management.";

pub const QA_SYSTEM_MESSAGE: &str = "You are a professional inventory data analyst. You answer \
questions about inventory, sales, and product data accurately, explain any referenced charts, \
and keep your answers clear and readable.";

/// Stage 1: ask the analyst persona to review the classified stock data.
pub fn classify_prompt(
    sales_summary: &str,
    products_summary: &str,
    inventory_summary: &str,
) -> String {
    format!(
        "You are reviewing an inventory position. Definitions in force:\n\
         - low-stock product: current stock below safety stock\n\
         - overstocked product: current stock above twice safety stock\n\
         - stock-out risk = (safety stock - current stock) / safety stock * 100\n\
         - overstock risk = (current stock - safety stock) / safety stock * 100\n\
         \n\
         Data summaries:\n\
         \n\
         {sales_summary}\n\
         \n\
         {products_summary}\n\
         \n\
         {inventory_summary}\n\
         \n\
         Summarize the stock health, the main risk concentrations, and any sales trends \
         that stand out. The figures above are computed and authoritative; do not recompute \
         or invent numbers."
    )
}

/// Stage 2: ask the strategy persona for recommendations, given stage 1's
/// output verbatim.
pub fn strategy_prompt(analysis_result: &str) -> String {
    format!(
        "An analyst produced the following assessment of the current inventory position:\n\
         \n\
         {analysis_result}\n\
         \n\
         Recommend, in order of priority:\n\
         1. Replenishment guidance for the low-stock products (urgency, rough quantities, \
         what to watch while restocking).\n\
         2. Promotion or clearance guidance for the overstocked products (intensity, timing).\n\
         3. Structural improvements to how safety stock is set and monitored.\n\
         Ground every recommendation in the assessment above; do not introduce new figures."
    )
}

/// Stage 3: ask the report persona for the final prose framing, given both
/// prior stages' output verbatim.
pub fn report_prompt(analysis_result: &str, strategy_result: &str) -> String {
    format!(
        "Write the narrative section of an inventory management report in Markdown.\n\
         \n\
         Analysis:\n\
         {analysis_result}\n\
         \n\
         Strategy recommendations:\n\
         {strategy_result}\n\
         \n\
         Produce a concise \"key findings and recommendations\" section: bullet points, \
         bold for the critical items, plain professional language. Do not emit any tables \
         and do not restate raw figures beyond what the inputs contain; the detailed tables \
         are appended separately from the source data."
    )
}

/// One-shot Q&A prompt combining the question with the data summary and
/// any planned charts.
pub fn qa_prompt(question: &str, data_summary: &str, charts_info: &str) -> String {
    format!(
        "User question: {question}\n\
         \n\
         Data summary:\n\
         {data_summary}\n\
         \n\
         Charts prepared for this question:\n\
         {charts_info}\n\
         \n\
         Answer the question from the data above. Be precise with the numbers, explain \
         what the charts show, and close with any practical recommendation that follows."
    )
}
