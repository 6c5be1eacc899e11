mod shell;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use kensaku_api::jikan::JikanClient;
use kensaku_api::traits::CatalogService;
use kensaku_core::adapter::QueryAdapter;
use kensaku_core::config::AppConfig;
use kensaku_core::error::KensakuError;
use kensaku_core::frontend::Frontend;
use kensaku_core::render::{render_recommendations, render_results, Panel};
use kensaku_core::suggest::{filter_suggestions, normalize_query, should_suggest};

#[derive(Parser)]
#[command(name = "kensaku")]
#[command(about = "Search the anime catalog, roll a random title, and browse recommendations")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter directive (overridden by RUST_LOG)
    #[arg(long, global = true, value_name = "FILTER")]
    log_filter: Option<String>,

    /// Write logs to a daily rolling file in this directory instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Query(QueryCommand),

    /// Interactive session with live suggestions and clickable cards
    Shell,
}

/// Commands that run one catalog query, print its panel, and exit.
#[derive(Subcommand)]
enum QueryCommand {
    /// Search anime by title
    #[command(alias = "s")]
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the panel as HTML
        #[arg(long)]
        html: bool,
    },

    /// Show one random anime
    Random {
        #[arg(long)]
        html: bool,
    },

    /// Show recommendations for an anime id
    #[command(alias = "rec")]
    Recommend {
        id: u64,
        #[arg(long)]
        html: bool,
    },

    /// List title suggestions for partial input
    Suggest { text: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = cli
        .log_filter
        .clone()
        .unwrap_or_else(|| config.logging.filter.clone());
    let _guard = init_logging(&filter, cli.log_dir.as_deref());

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, KensakuError> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `filter`.
fn init_logging(filter: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("kensaku=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "kensaku.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Some(guard)
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            None
        }
    }
}

async fn run(command: Command, config: AppConfig) -> Result<(), KensakuError> {
    let client = JikanClient::new(&config.catalog.base_url)
        .map_err(|e| KensakuError::Config(format!("catalog.base_url: {e}")))?;

    match command {
        Command::Shell => {
            let frontend = Frontend::new(client, &config);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run_shell(&frontend, stdin, &mut std::io::stdout()).await
        }
        Command::Query(query) => {
            let adapter = QueryAdapter::with_search_limit(client, config.catalog.search_limit);
            let mut stdout = std::io::stdout().lock();
            run_query(query, &adapter, config.suggestions.min_chars, &mut stdout).await?;
            Ok(())
        }
    }
}

async fn run_query<S: CatalogService>(
    command: QueryCommand,
    adapter: &QueryAdapter<S>,
    min_chars: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    match command {
        QueryCommand::Search { query, html } => {
            let query = query.join(" ");
            let query = query.trim();
            if query.is_empty() {
                return Ok(());
            }
            let records = adapter.search_by_text(query).await;
            write_panel(out, &render_results(&records), html)
        }
        QueryCommand::Random { html } => {
            let records = adapter.fetch_random().await;
            write_panel(out, &render_results(&records), html)
        }
        QueryCommand::Recommend { id, html } => {
            let entries = adapter.fetch_recommendations(id).await;
            write_panel(out, &render_recommendations(&entries), html)
        }
        QueryCommand::Suggest { text } => {
            let query = normalize_query(&text);
            if !should_suggest(&query, min_chars) {
                return Ok(());
            }
            let records = adapter.search_by_text(&query).await;
            for item in filter_suggestions(&records, &query) {
                writeln!(out, "{}", item.title)?;
            }
            Ok(())
        }
    }
}

fn write_panel(out: &mut impl Write, panel: &Panel, html: bool) -> std::io::Result<()> {
    if html {
        write!(out, "{}", panel.to_html())
    } else {
        write!(out, "{panel}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use kensaku_api::traits::{AnimeRecord, RecommendationEntry};
    use kensaku_core::suggest::MIN_SUGGEST_CHARS;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    #[derive(Default)]
    struct StubCatalog {
        records: Vec<AnimeRecord>,
        offline: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubCatalog {
        fn online() -> Self {
            Self {
                records: vec![record(20, "Naruto"), record(21, "One Piece")],
                ..Default::default()
            }
        }

        fn log(&self, call: String) -> Result<(), Offline> {
            self.calls.lock().unwrap().push(call);
            if self.offline {
                Err(Offline)
            } else {
                Ok(())
            }
        }
    }

    fn record(id: u64, title: &str) -> AnimeRecord {
        AnimeRecord {
            id,
            title: title.into(),
            kind: Some("TV".into()),
            episodes: Some(26),
            score: Some(8.5),
            image_url: format!("https://img.example/{id}.jpg"),
            url: format!("https://mal.example/anime/{id}"),
        }
    }

    impl CatalogService for StubCatalog {
        type Error = Offline;

        async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<AnimeRecord>, Offline> {
            self.log(format!("search:{query}:{limit}"))?;
            Ok(self.records.clone())
        }

        async fn random_anime(&self) -> Result<AnimeRecord, Offline> {
            self.log("random".into())?;
            Ok(record(1, "Cowboy Bebop"))
        }

        async fn anime_recommendations(
            &self,
            anime_id: u64,
        ) -> Result<Vec<RecommendationEntry>, Offline> {
            self.log(format!("recommendations:{anime_id}"))?;
            Ok(vec![RecommendationEntry {
                entry: record(30, "Pluto"),
                url: None,
                votes: Some(5),
            }])
        }
    }

    fn parse(args: &[&str]) -> QueryCommand {
        let cli = Cli::try_parse_from(std::iter::once("kensaku").chain(args.iter().copied()))
            .unwrap();
        match cli.command {
            Command::Query(query) => query,
            Command::Shell => panic!("expected a query command"),
        }
    }

    /// Run `args` against `catalog`; returns the printed text and the catalog calls.
    async fn query(catalog: StubCatalog, args: &[&str]) -> (String, Vec<String>) {
        let adapter = QueryAdapter::with_search_limit(catalog, 8);
        let mut out = Vec::new();
        run_query(parse(args), &adapter, MIN_SUGGEST_CHARS, &mut out)
            .await
            .unwrap();
        let calls = adapter.service().calls.lock().unwrap().clone();
        (String::from_utf8(out).unwrap(), calls)
    }

    #[test]
    fn test_parse_shell_and_aliases() {
        let cli = Cli::try_parse_from(["kensaku", "shell"]).unwrap();
        assert!(matches!(cli.command, Command::Shell));
        assert!(matches!(parse(&["s", "bleach"]), QueryCommand::Search { .. }));
        assert!(matches!(
            parse(&["rec", "269", "--html"]),
            QueryCommand::Recommend { id: 269, html: true }
        ));
        assert!(Cli::try_parse_from(["kensaku", "search"]).is_err());
    }

    #[tokio::test]
    async fn test_search_joins_words() {
        let (out, calls) = query(StubCatalog::online(), &["search", "one", "piece"]).await;
        assert_eq!(calls, vec!["search:one piece:8"]);
        assert!(out.starts_with(" 1. Naruto [#20]\n  TV • 26 eps\n  Score: 8.5\n"));
        assert!(out.contains(" 2. One Piece [#21]\n"));
    }

    #[tokio::test]
    async fn test_search_html() {
        let (out, _) = query(StubCatalog::online(), &["search", "naruto", "--html"]).await;
        assert!(out.starts_with(r#"<div class="anime-card" data-id="20">"#));
        assert_eq!(out.matches("More Info</a>").count(), 2);
    }

    #[tokio::test]
    async fn test_blank_search_prints_nothing() {
        let (out, calls) = query(StubCatalog::online(), &["search", "  ", " "]).await;
        assert!(out.is_empty());
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn test_failed_search_prints_no_results() {
        let catalog = StubCatalog {
            offline: true,
            ..StubCatalog::online()
        };
        let (out, _) = query(catalog, &["search", "bleach"]).await;
        assert_eq!(out, "No results found.\n");
    }

    #[tokio::test]
    async fn test_random() {
        let (out, calls) = query(StubCatalog::online(), &["random"]).await;
        assert_eq!(calls, vec!["random"]);
        assert!(out.starts_with(" 1. Cowboy Bebop [#1]\n"));

        let catalog = StubCatalog {
            offline: true,
            ..Default::default()
        };
        let (out, _) = query(catalog, &["random", "--html"]).await;
        assert_eq!(out, "<p>No results found.</p>\n");
    }

    #[tokio::test]
    async fn test_recommend() {
        let (out, calls) = query(StubCatalog::online(), &["recommend", "269"]).await;
        assert_eq!(calls, vec!["recommendations:269"]);
        assert!(out.starts_with(" 1. Pluto [#30]\n  Score: 8.5\n"));
        // Recommendation cards carry no type/episodes line.
        assert!(!out.contains(" eps"));

        let catalog = StubCatalog {
            offline: true,
            ..Default::default()
        };
        let (out, _) = query(catalog, &["recommend", "269"]).await;
        assert_eq!(out, "No recommendations available.\n");
    }

    #[tokio::test]
    async fn test_suggest_filters_titles() {
        let (out, calls) = query(StubCatalog::online(), &["suggest", " NARU "]).await;
        assert_eq!(calls, vec!["search:naru:8"]);
        assert_eq!(out, "Naruto\n");
    }

    #[tokio::test]
    async fn test_suggest_short_text_prints_nothing() {
        let (out, calls) = query(StubCatalog::online(), &["suggest", " n "]).await;
        assert!(out.is_empty());
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_config_error() {
        let mut config = AppConfig::default();
        config.catalog.base_url = "not a url".into();
        let result = run(Command::Query(parse(&["random"])), config).await;
        assert!(matches!(
            result,
            Err(KensakuError::Config(msg)) if msg.starts_with("catalog.base_url")
        ));
    }
}
