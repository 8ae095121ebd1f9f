//! Ad-hoc Q&A over the loaded dataset.
//!
//! Each question is answered by one completion: the engine builds a data
//! summary and a chart plan, interpolates both into the Q&A prompt, and
//! returns the collaborator's text verbatim together with whatever charts
//! were rendered.

use anyhow::Result;

use crate::agents::prompts::{qa_prompt, QA_SYSTEM_MESSAGE};
use crate::charts::{select_charts, ChartArtifact, ChartPlan, ChartRenderer};
use crate::core::llm::LLMClient;
use crate::data::Dataset;

pub struct Answer {
    pub text: String,
    pub planned: Vec<ChartPlan>,
    pub charts: Vec<ChartArtifact>,
}

pub struct QaEngine<'a> {
    dataset: &'a Dataset,
    llm: &'a LLMClient,
    renderer: Option<Box<dyn ChartRenderer>>,
}

impl<'a> QaEngine<'a> {
    pub fn new(dataset: &'a Dataset, llm: &'a LLMClient) -> Self {
        Self {
            dataset,
            llm,
            renderer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn ChartRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Compact overview of the dataset, interpolated into every Q&A prompt.
    pub fn data_summary(&self) -> String {
        let inventory = &self.dataset.inventory;
        let low_stock = inventory
            .iter()
            .filter(|r| (r.current_stock as f64) < r.safety_stock)
            .count();
        let out_of_stock = inventory.iter().filter(|r| r.current_stock == 0).count();
        let avg_stock = if inventory.is_empty() {
            0.0
        } else {
            inventory.iter().map(|r| r.current_stock as f64).sum::<f64>() / inventory.len() as f64
        };

        let mut categories: Vec<&str> = self
            .dataset
            .products
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();

        let sales = &self.dataset.sales;
        let total_sold: u64 = sales.iter().map(|s| u64::from(s.quantity_sold)).sum();
        let max_sold = sales.iter().map(|s| s.quantity_sold).max().unwrap_or(0);
        let avg_sold = if sales.is_empty() {
            0.0
        } else {
            total_sold as f64 / sales.len() as f64
        };
        let first_day = sales.iter().map(|s| s.date).min();
        let last_day = sales.iter().map(|s| s.date).max();

        format!(
            "Overview:\n\
             - Products: {}\n\
             - Categories: {}\n\
             - Sales rows: {} ({} to {})\n\
             \n\
             Stock position:\n\
             - Below safety stock: {}\n\
             - Out of stock entirely: {}\n\
             - Average stock level: {:.0}\n\
             \n\
             Sales:\n\
             - Average daily quantity: {:.1}\n\
             - Maximum daily quantity: {}\n\
             - Total quantity sold: {}",
            self.dataset.products.len(),
            categories.join(", "),
            sales.len(),
            first_day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            last_day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            low_stock,
            out_of_stock,
            avg_stock,
            avg_sold,
            max_sold,
            total_sold,
        )
    }

    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let planned = select_charts(question);

        let mut charts = Vec::new();
        if let Some(renderer) = &self.renderer {
            for plan in &planned {
                charts.push(renderer.render(self.dataset, plan).await?);
            }
        }

        let charts_info = if charts.is_empty() {
            planned
                .iter()
                .map(|plan| format!("- {}: {}", plan.kind.title(), plan.kind.caption()))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            charts
                .iter()
                .map(|chart| format!("- {}: {}", chart.path.display(), chart.caption))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let prompt = qa_prompt(question, &self.data_summary(), &charts_info);
        let text = self
            .llm
            .complete(QA_SYSTEM_MESSAGE, &prompt, self.llm.default_temperature())
            .await?;

        Ok(Answer {
            text,
            planned,
            charts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::config::LLMConfig;
    use crate::data::records::{InventoryRecord, Product, SalesRecord};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dataset() -> Dataset {
        let last_updated =
            NaiveDateTime::parse_from_str("2026-08-01 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Dataset {
            inventory: vec![
                InventoryRecord {
                    product_id: "P001".to_string(),
                    current_stock: 0,
                    safety_stock: 100.0,
                    last_updated,
                },
                InventoryRecord {
                    product_id: "P002".to_string(),
                    current_stock: 80,
                    safety_stock: 40.0,
                    last_updated,
                },
            ],
            products: vec![Product {
                product_id: "P001".to_string(),
                name: "Desk Lamp".to_string(),
                category: "Home".to_string(),
                cost_price: 12.5,
                selling_price: 29.99,
                supplier_lead_time: 7,
            }],
            sales: vec![SalesRecord {
                product_id: "P001".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
                quantity_sold: 12,
            }],
        }
    }

    fn llm(uri: String) -> LLMClient {
        LLMClient::new(
            "test-key".to_string(),
            LLMConfig {
                model: "moonshot-v1-8k".to_string(),
                api_base: uri,
                temperature: 0.7,
                max_tokens: 1024,
                timeout_secs: 5,
            },
        )
    }

    #[test]
    fn data_summary_counts_stock_states() {
        let dataset = dataset();
        let llm = llm("http://127.0.0.1:1".to_string());
        let summary = QaEngine::new(&dataset, &llm).data_summary();

        assert!(summary.contains("Below safety stock: 1"));
        assert!(summary.contains("Out of stock entirely: 1"));
        assert!(summary.contains("Total quantity sold: 12"));
        assert!(summary.contains("Categories: Home"));
    }

    struct FakeRenderer {
        dir: PathBuf,
    }

    #[async_trait]
    impl ChartRenderer for FakeRenderer {
        async fn render(&self, _dataset: &Dataset, plan: &ChartPlan) -> Result<ChartArtifact> {
            let path = self.dir.join(format!("{}.png", plan.kind.title().replace(' ', "_")));
            std::fs::write(&path, b"png")?;
            Ok(ChartArtifact {
                path,
                caption: plan.kind.caption().to_string(),
            })
        }
    }

    #[tokio::test]
    async fn answer_renders_planned_charts_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Lamp stock is gone."}}]
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dataset = dataset();
        let llm = llm(server.uri());
        let engine = QaEngine::new(&dataset, &llm).with_renderer(Box::new(FakeRenderer {
            dir: dir.path().to_path_buf(),
        }));

        let answer = engine.answer("Which items are out of stock?").await.unwrap();

        assert_eq!(answer.text, "Lamp stock is gone.");
        assert!(answer
            .planned
            .iter()
            .any(|p| p.kind == ChartKind::LowStockRisk));
        assert_eq!(answer.planned.len(), answer.charts.len());
        assert!(answer.charts.iter().all(|c| c.path.exists()));
    }

    #[tokio::test]
    async fn answer_without_renderer_reports_plans_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })))
            .mount(&server)
            .await;

        let dataset = dataset();
        let llm = llm(server.uri());
        let answer = QaEngine::new(&dataset, &llm)
            .answer("how are sales trending?")
            .await
            .unwrap();

        assert!(answer.charts.is_empty());
        assert!(!answer.planned.is_empty());
    }
}
