#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use battleship_advisor::{
    init_logging, ui, AdvisorConfig, Advisor, Board, SearchBudget, Server, DEFAULT_NODE_BUDGET,
    DEFAULT_SUGGESTIONS,
};
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct SearchArgs {
    #[arg(long, default_value_t = DEFAULT_NODE_BUDGET, help = "Ship placements a single search may make")]
    node_budget: u64,
    #[arg(long, default_value_t = 0, help = "Wall-clock limit per search in milliseconds (0 disables it; a limit makes results depend on machine speed)")]
    time_limit_ms: u64,
    #[arg(long, default_value_t = DEFAULT_SUGGESTIONS, help = "Number of ranked targets to return")]
    suggestions: usize,
}

#[cfg(feature = "std")]
impl SearchArgs {
    fn config(&self) -> AdvisorConfig {
        let mut budget = SearchBudget::nodes(self.node_budget);
        if self.time_limit_ms > 0 {
            budget = budget.with_time_limit(Duration::from_millis(self.time_limit_ms));
        }
        AdvisorConfig {
            budget,
            suggestions: self.suggestions,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Serve the probability API over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: String,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Analyze one board and print the probability grid.
    Analyze {
        #[arg(long, default_value = "", help = "Hit cells as \"row,col;row,col\"")]
        hits: String,
        #[arg(long, default_value = "", help = "Miss cells as \"row,col;row,col\"")]
        misses: String,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, search } => {
            let advisor = Arc::new(Advisor::new(search.config()));
            let server = Server::bind(&bind, advisor).await?;
            println!("Advisor listening on {}", server.local_addr()?);
            server.run().await?;
        }
        Commands::Analyze {
            hits,
            misses,
            search,
        } => {
            let hits = ui::parse_cells(&hits)?;
            let misses = ui::parse_cells(&misses)?;
            let board = Board::from_marks(&hits, &misses).map_err(|e| anyhow::anyhow!(e))?;
            let config = search.config();
            let analysis = tokio::task::spawn_blocking(move || {
                battleship_advisor::analyze(&board, &config)
            })
            .await?;
            ui::print_analysis(&analysis, &board);
        }
    }
    Ok(())
}
