//! Stock AI Analyzer CLI
//!
//! Command-line front-end for the analyzer backend:
//! - Watch live prices per category
//! - Run an AI analysis with its chart, news digest and follow-up questions
//! - Inspect, save and test the backend's AI settings

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_ai_analyzer::controllers::normalize_symbol;
use stock_ai_analyzer::i18n::keys;
use stock_ai_analyzer::watch::watch_prices;
use stock_ai_analyzer::{
    renderer, AnalysisType, Category, ChartPeriod, ClientError, ClientResult, Config,
    Dashboard, DashboardApi, HttpClient, Language, LoggingConfig, OutputFormat, PrefsStore,
    Render,
};

#[derive(Parser)]
#[command(name = "stock-ai")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stock prices, AI analysis and follow-up questions")]
#[command(long_about = "Terminal client for the Stock AI Analyzer backend.\nWatch live prices, analyze a symbol with AI, ask follow-up questions and manage the AI settings.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: the user config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analyzer backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Interface language for this run (tr, en)
    #[arg(short, long, global = true)]
    pub lang: Option<Language>,

    /// Output format (text, html, json)
    #[arg(short, long, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the price grid of a category
    Prices {
        /// popular, crypto or borsa (default: from config)
        #[arg(long)]
        category: Option<Category>,
        /// Keep refreshing; type a category name to switch, q to quit
        #[arg(short, long)]
        watch: bool,
    },

    /// Look up a single quote
    Quote {
        /// Symbol, e.g. AAPL, BTC, THYAO.IS
        symbol: String,
    },

    /// Run an AI analysis of a symbol
    Analyze {
        /// Symbol, e.g. AAPL, BTC, THYAO.IS
        symbol: String,
        /// daily, weekly, short_term or long_term (default: from config)
        #[arg(short = 't', long = "type")]
        analysis_type: Option<AnalysisType>,
        /// Chart period (1d, 5d, 1mo, 3mo, 6mo, 1y)
        #[arg(short, long)]
        period: Option<ChartPeriod>,
        /// Also analyze related news
        #[arg(short, long)]
        news: bool,
        /// Follow-up question (repeatable)
        #[arg(short, long)]
        ask: Vec<String>,
        /// Keep asking questions interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show the price chart of a symbol
    Chart {
        symbol: String,
        /// Chart period (1d, 5d, 1mo, 3mo, 6mo, 1y)
        #[arg(short, long, default_value = "1mo")]
        period: ChartPeriod,
    },

    /// Show or change the backend's AI settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Show or set the interface language
    Lang {
        /// tr or en; omit to show the current one
        code: Option<Language>,
    },

    /// Show the investment disclaimer
    Disclaimer {
        /// Mark it as read
        #[arg(long)]
        accept: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current settings
    Show,
    /// Save an API key and/or model
    Save {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Test an API key (default: the configured one)
    TestKey {
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Test a model with an API key
    TestModel {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let lookup = Config::resolve(cli.config.as_deref())?;
    init_tracing(&lookup.config.logging);
    lookup.log();

    let mut config = lookup.config;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    if let Commands::Config { output } = &cli.command {
        let content = stock_ai_analyzer::config::generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    tracing::debug!(base_url = %config.api.base_url, "Connecting to analyzer backend");
    let api: Arc<dyn DashboardApi> = Arc::new(HttpClient::new(config.api.client_config())?);
    let dashboard = Dashboard::with_prefs(
        api,
        PrefsStore::new(config.prefs_path()),
        config.dashboard.language,
    )?;
    if let Some(language) = cli.lang {
        dashboard.state().write().await.language = language;
    }

    let render = renderer(cli.format);

    match cli.command {
        Commands::Prices { category, watch } => {
            first_run_disclaimer(&dashboard, render.as_ref()).await;
            let category = category.unwrap_or(config.dashboard.default_category);

            if watch {
                let stdin = BufReader::new(tokio::io::stdin());
                let ctrl_c = async {
                    let _ = tokio::signal::ctrl_c().await;
                };
                watch_prices(
                    &dashboard,
                    render.as_ref(),
                    category,
                    config.dashboard.refresh_interval(),
                    stdin,
                    &mut std::io::stdout(),
                    ctrl_c,
                )
                .await?;
            } else {
                let result = dashboard.prices().select_category(category).await;
                print!("{}", render.price_grid(&*dashboard.state().read().await, category));
                exit_on_error(result);
            }
        }

        Commands::Quote { symbol } => {
            first_run_disclaimer(&dashboard, render.as_ref()).await;
            match dashboard.prices().lookup(&symbol).await {
                Ok(card) => print!("{}", render.quote(&*dashboard.state().read().await, &card)),
                Err(e) => {
                    let l10n = dashboard.localizer().await;
                    eprintln!("{}", e.user_message(&l10n, keys::ERROR_NO_DATA));
                    std::process::exit(1);
                }
            }
        }

        Commands::Analyze {
            symbol,
            analysis_type,
            period,
            news,
            ask,
            interactive,
        } => {
            first_run_disclaimer(&dashboard, render.as_ref()).await;
            let analysis_type = analysis_type.unwrap_or(config.dashboard.default_analysis_type);

            let result = dashboard
                .analysis()
                .analyze_with_period(&symbol, analysis_type, period.unwrap_or_default())
                .await;
            print!("{}", render.analysis(&*dashboard.state().read().await));
            exit_on_error(result);
            print!("{}", render.chart(&*dashboard.state().read().await));

            if news {
                let result = dashboard.analysis().analyze_news().await;
                let output = render.news(&*dashboard.state().read().await);
                show_outcome(&dashboard, output, result).await;
            }

            for question in &ask {
                let result = dashboard.questions().ask(question).await;
                report_failure(&dashboard, result).await;
            }
            if !ask.is_empty() {
                print!("{}", render.thread(&*dashboard.state().read().await));
            }

            if interactive {
                interactive_session(&dashboard, render.as_ref(), config.dashboard.default_analysis_type)
                    .await?;
            }
        }

        Commands::Chart { symbol, period } => {
            first_run_disclaimer(&dashboard, render.as_ref()).await;
            let Some(symbol) = normalize_symbol(&symbol) else {
                eprintln!("{}", dashboard.localizer().await.t(keys::ERROR_NO_SYMBOL));
                std::process::exit(1);
            };

            let result = dashboard.chart().load_chart(&symbol, period).await;
            print!("{}", render.chart(&*dashboard.state().read().await));
            if let Err(e) = result {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }

        Commands::Settings { action } => {
            let settings = dashboard.settings();
            let result = settings.load_settings().await;

            let result = match action.unwrap_or(SettingsAction::Show) {
                SettingsAction::Show => result.map(|_| ()),
                SettingsAction::Save { api_key, model } => settings
                    .save_settings(api_key.as_deref(), model.as_deref())
                    .await
                    .map(|_| ()),
                SettingsAction::TestKey { api_key } => {
                    settings.test_api_key(api_key.as_deref()).await.map(|_| ())
                }
                SettingsAction::TestModel { model, api_key } => settings
                    .test_model(model.as_deref(), api_key.as_deref())
                    .await
                    .map(|_| ()),
            };
            print!("{}", render.settings(&*dashboard.state().read().await));
            exit_on_error(result);
        }

        Commands::Lang { code } => match code {
            Some(language) => {
                dashboard.set_language(language).await?;
                let l10n = dashboard.localizer().await;
                println!("{} ({})", l10n.page_title(keys::NAV_HOME), language);
            }
            None => {
                let current = dashboard.language().await;
                for language in Language::ALL {
                    let marker = if language == current { "*" } else { " " };
                    println!("{} {}", marker, language);
                }
            }
        },

        Commands::Disclaimer { accept } => {
            print!("{}", render.disclaimer(&*dashboard.state().read().await));
            if accept {
                dashboard.acknowledge_disclaimer().await?;
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("stock_ai_analyzer={}", logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the rendered output
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Show the disclaimer once, on the first run that touches market data
async fn first_run_disclaimer(dashboard: &Dashboard, render: &dyn Render) {
    if !dashboard.needs_disclaimer().await {
        return;
    }

    eprint!("{}", render.disclaimer(&*dashboard.state().read().await));
    eprintln!();
    if let Err(e) = dashboard.acknowledge_disclaimer().await {
        tracing::warn!(error = %e, "Could not store disclaimer acknowledgement");
    }
}

/// Exit with status 1 when an operation failed; the failure is already on screen
fn exit_on_error<T>(result: ClientResult<T>) {
    match result {
        Err(ClientError::Superseded) | Ok(_) => {}
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            std::process::exit(1);
        }
    }
}

/// Print the error banner of a failed follow-up action
async fn report_failure<T>(dashboard: &Dashboard, result: ClientResult<T>) {
    if result.is_err() {
        if let Some(message) = dashboard.state().write().await.error.take() {
            eprintln!("{}", message);
        }
    }
}

async fn show_outcome<T>(dashboard: &Dashboard, output: String, result: ClientResult<T>) {
    print!("{}", output);
    report_failure(dashboard, result).await;
}

/// Question prompt on top of the current analysis
///
/// Plain lines are asked as questions. `/news` analyzes related news,
/// `/period <p>` reloads the chart, `/analyze <symbol> [type]` starts over.
async fn interactive_session(
    dashboard: &Dashboard,
    render: &dyn Render,
    default_type: AnalysisType,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let input = line.trim();

        match input.split_once(' ').unwrap_or((input, "")) {
            ("/quit" | "/exit", _) => break,
            ("/news", _) => {
                let result = dashboard.analysis().analyze_news().await;
                let output = render.news(&*dashboard.state().read().await);
                show_outcome(dashboard, output, result).await;
            }
            ("/period", arg) => match arg.parse::<ChartPeriod>() {
                Ok(period) => {
                    if let Err(e) = dashboard.chart().select_period(period).await {
                        if !e.is_superseded() {
                            tracing::warn!(period = %period, error = %e, "Chart not reloaded");
                        }
                    }
                    print!("{}", render.chart(&*dashboard.state().read().await));
                }
                Err(e) => eprintln!("{}", e),
            },
            ("/analyze", arg) => {
                let (symbol, analysis_type) = match parse_analyze_args(arg, default_type) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };
                let _ = dashboard.analysis().analyze(symbol, analysis_type).await;
                let state = dashboard.state().read().await;
                print!("{}{}", render.analysis(&state), render.chart(&state));
            }
            _ => {
                let result = dashboard.questions().ask(input).await;
                let asked = matches!(result, Ok(Some(_)));
                report_failure(dashboard, result).await;
                if asked {
                    print!("{}", render.thread(&*dashboard.state().read().await));
                }
            }
        }
    }

    Ok(())
}

/// `<symbol> [type]` of the `/analyze` command
fn parse_analyze_args(arg: &str, default_type: AnalysisType) -> Result<(&str, AnalysisType), String> {
    let mut parts = arg.split_whitespace();
    let symbol = parts.next().unwrap_or_default();
    let analysis_type = match parts.next() {
        Some(t) => t.parse()?,
        None => default_type,
    };
    Ok((symbol, analysis_type))
}
