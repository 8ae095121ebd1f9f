use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stocksage")]
#[command(author, version, about = "Inventory analytics assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the full report, framed by the three-stage LLM narrative
    Report,

    /// Generate the local-only report without calling the LLM
    Quick,

    /// Ask a single question about the data
    Ask { question: String },

    /// Interactive Q&A session (type "quit" or "exit" to leave)
    Qa,

    /// Generate synthetic demo data at the configured input paths
    Generate {
        /// Number of products to generate
        #[arg(long, default_value = "100")]
        products: usize,

        /// Days of sales history to generate
        #[arg(long, default_value = "30")]
        days: usize,
    },
}
