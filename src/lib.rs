pub mod bindings;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::bindings::terminal::{self, TerminalChartBackend};
use crate::error::{AppError, AppResult};
use crate::models::chart::ChartPeriod;
use crate::models::fragment::Fragment;
use crate::models::notification::Notification;
use crate::models::settings::DataSourceKind;
use crate::services::chart_adapter::ChartUpdate;
use crate::services::dashboard_session::{DashboardSession, PageView};
use crate::services::filter_engine::{FilterField, PredicateSet};
use crate::services::settings_service::{SettingsOverrides, SettingsService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_source(value: &str) -> Result<DataSourceKind, String> {
    DataSourceKind::parse(value).ok_or_else(|| format!("origem desconhecida '{value}' (use static ou api)"))
}

fn parse_period(value: &str) -> Result<ChartPeriod, String> {
    ChartPeriod::parse(value).ok_or_else(|| format!("período desconhecido '{value}' (use 6months, quarter ou year)"))
}

#[derive(Debug, Parser)]
#[command(name = "hr-agent")]
#[command(about = "Painel de RH: funcionários, recomendações e analytics", long_about = None)]
pub struct Cli {
    /// Data source: static JSON files or the REST API
    #[arg(long, value_parser = parse_source)]
    pub source: Option<DataSourceKind>,
    /// Base URL (api) or directory (static)
    #[arg(long)]
    pub base: Option<String>,
    /// Page id or URL fragment, e.g. `#employees`
    #[arg(long, default_value = "dashboard")]
    pub page: String,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    /// Performance chart period: 6months, quarter or year
    #[arg(long, value_parser = parse_period)]
    pub period: Option<ChartPeriod>,
    /// Open the detail of a recommendation
    #[arg(long)]
    pub open: Option<u64>,
    #[arg(long, requires = "open", conflicts_with = "dismiss")]
    pub accept: bool,
    #[arg(long, requires = "open")]
    pub dismiss: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// YAML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub timezone: Option<String>,
    #[arg(long)]
    pub log_dir: Option<String>,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            source: self.source,
            base: self.base.clone(),
            timezone: self.timezone.clone(),
            log_dir: self.log_dir.clone(),
        }
    }

    /// Employee and recommendation predicate sets built from the filter flags.
    pub fn filters(&self) -> (PredicateSet, PredicateSet) {
        let mut employees = PredicateSet::new();
        employees.set(FilterField::Department, self.department.clone());
        employees.set(FilterField::Status, self.status.clone());
        employees.set_search(self.search.clone());

        let mut recommendations = PredicateSet::new();
        recommendations.set(FilterField::Department, self.department.clone());
        recommendations.set(FilterField::Priority, self.priority.clone());
        recommendations.set(FilterField::Kind, self.kind.clone());
        recommendations.set_search(self.search.clone());

        (employees, recommendations)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput {
    view: PageView,
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<ChartUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modal: Option<Fragment>,
    notifications: Vec<Notification>,
    #[serde(skip)]
    page_text: String,
}

impl RunOutput {
    fn to_text(&self) -> String {
        let mut out = self.page_text.clone();
        if let Some(content) = self.modal.as_ref() {
            out.push_str(&terminal::render_modal(content));
        }
        if !self.notifications.is_empty() {
            out.push('\n');
            out.push_str(&terminal::render_notifications(&self.notifications));
        }
        out
    }
}

pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("falha ao executar o painel: {error}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(execute(&cli))?;

    let rendered = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&output)? + "\n",
        OutputFormat::Text => output.to_text(),
    };
    std::io::stdout().write_all(rendered.as_bytes())?;
    Ok(())
}

async fn execute(cli: &Cli) -> AppResult<RunOutput> {
    let settings = SettingsService::load(cli.config.as_deref(), cli.overrides())?;
    crate::utils::logger::init_logging(settings.settings.log_dir.as_deref().map(Path::new))?;
    info!(
        target: "app::session",
        source = settings.settings.source.as_str(),
        page = %cli.page,
        "starting session"
    );

    let mut session =
        DashboardSession::from_settings(settings, Box::new(TerminalChartBackend::new()))?;
    let (employees, recommendations) = cli.filters();
    session.set_filters(employees, recommendations);

    let view = session
        .go_to(&cli.page)
        .await
        .ok_or_else(|| AppError::other("navegação substituída antes de concluir"))?;

    let period = match cli.period {
        Some(period) => Some(session.change_performance_period(period)?),
        None => None,
    };

    let mut modal = None;
    if let Some(id) = cli.open {
        session.open_recommendation(id).await;
        modal = session.modal().content().cloned();
        if cli.accept {
            session.accept_recommendation();
        } else if cli.dismiss {
            session.dismiss_recommendation();
        }
    }

    let page_text = terminal::render_page(&view, session.charts());

    Ok(RunOutput {
        view,
        period,
        modal,
        notifications: session.notifications().history(),
        page_text,
    })
}
