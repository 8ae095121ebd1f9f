use anyhow::Result;
use clap::Parser;
use stocksage::cli::{Cli, Commands};
use stocksage::data::{sample, Dataset};
use stocksage::qa::QaEngine;
use stocksage::{pipeline, utils, LLMClient, Settings};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report => handle_report(&settings).await,
        Commands::Quick => handle_quick(&settings).await,
        Commands::Ask { question } => handle_ask(&settings, question).await,
        Commands::Qa => handle_qa(&settings).await,
        Commands::Generate { products, days } => handle_generate(&settings, products, days),
    }
}

async fn handle_report(settings: &Settings) -> Result<()> {
    let api_key = Settings::api_key()?;
    let llm = LLMClient::new(api_key, settings.llm.clone());

    utils::print_info("Generating report with LLM narrative...");
    let run = pipeline::run_report(settings, Some(&llm)).await?;

    print_run_summary(settings, &run);
    Ok(())
}

async fn handle_quick(settings: &Settings) -> Result<()> {
    utils::print_info("Generating local report...");
    let run = pipeline::run_report(settings, None).await?;

    print_run_summary(settings, &run);
    Ok(())
}

fn print_run_summary(settings: &Settings, run: &pipeline::ReportRun) {
    utils::print_success(&format!(
        "Report saved to {} ({} products: {} low-stock, {} overstocked)",
        settings.report.output.display(),
        run.total_products,
        run.low_stock_count,
        run.high_stock_count,
    ));
    utils::print_report_preview(&run.content, settings.report.preview_chars);
}

async fn handle_ask(settings: &Settings, question: String) -> Result<()> {
    let api_key = Settings::api_key()?;
    let llm = LLMClient::new(api_key, settings.llm.clone());
    let dataset = Dataset::load(&settings.data)?;
    let engine = QaEngine::new(&dataset, &llm);

    let answer = engine.answer(&question).await?;
    print_answer(&answer);
    Ok(())
}

async fn handle_qa(settings: &Settings) -> Result<()> {
    let api_key = Settings::api_key()?;
    let llm = LLMClient::new(api_key, settings.llm.clone());
    let dataset = Dataset::load(&settings.data)?;
    let engine = QaEngine::new(&dataset, &llm);

    utils::print_header("Inventory Q&A");
    utils::print_info("Ask anything about the inventory, sales, or product data.");
    utils::print_info("Type \"quit\" or \"exit\" to leave.\n");

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        utils::print_prompt("Question: ");
        let mut input = String::new();
        if reader.read_line(&mut input).await? == 0 {
            break;
        }

        let question = input.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            utils::print_info("Goodbye!");
            break;
        }

        match engine.answer(question).await {
            Ok(answer) => print_answer(&answer),
            Err(e) => utils::print_error(&format!("Failed to answer: {}", e)),
        }
    }

    Ok(())
}

fn print_answer(answer: &stocksage::qa::Answer) {
    println!("\n{}\n", answer.text);

    if !answer.charts.is_empty() {
        utils::print_info("Charts:");
        for chart in &answer.charts {
            println!("  - {}: {}", chart.path.display(), chart.caption);
        }
    } else if !answer.planned.is_empty() {
        utils::print_info("Suggested charts:");
        for plan in &answer.planned {
            println!("  - {}: {}", plan.kind.title(), plan.kind.caption());
        }
    }
    println!();
}

fn handle_generate(settings: &Settings, products: usize, days: usize) -> Result<()> {
    let spec = sample::SampleSpec {
        num_products: products,
        days,
    };
    sample::write_sample_data(&settings.data, &spec)?;

    utils::print_success(&format!(
        "Sample data written: {}, {}, {}",
        settings.data.inventory.display(),
        settings.data.products.display(),
        settings.data.sales.display(),
    ));
    Ok(())
}
