use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "adscope", about = "Ad intelligence: scrape, benchmark against cohort peers, rank")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search ads for a keyword and rank them by efficiency score
    Search {
        /// Keyword to search for (at least 2 characters)
        query: String,
        /// Platform: meta or tiktok
        #[arg(long, default_value = "meta")]
        platform: String,
        /// Two-letter uppercase country code
        #[arg(long, default_value = "US")]
        country: String,
        /// Maximum ads to return (1-100)
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Sort preference: score or newest
        #[arg(long, default_value = "score")]
        sort: String,
        /// Identity charged for the search
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Show a user's credit balance
    Credits {
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Grant credits to a user
    Grant {
        amount: i64,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// List past searches (the append-only result cache), newest first
    History {
        /// Optional platform filter
        #[arg(long)]
        platform: Option<String>,
        /// Optional exact cache-key filter
        #[arg(long)]
        query: Option<String>,
    },
}
