use std::{fmt::Debug, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use maintenance_hub::{
    client::{ApiClient, Resource, ResourceKind},
    config::{self, AppConfig},
    models::{
        Article, Budget, Customer, DeliveryNote, Downtime, Family, Invoice, Machine, Operator,
        Order, Preventive, Provider, SparePart, User, WorkOrder,
    },
    services::{
        assembly,
        maintenance::{due_preventives, restock_plan},
        pricing::DocumentTotals,
    },
    table::{ColumnFilter, DataTable, SortSpec, Tabular},
    views::{EditForm, ListScreen, PricedDocument},
};

/// Runs a generic command for the record type behind a [`ResourceKind`].
macro_rules! dispatch {
    ($kind:expr, $command:ident, $($arg:expr),*) => {
        match $kind {
            ResourceKind::Article => $command::<Article>($($arg),*).await?,
            ResourceKind::Family => $command::<Family>($($arg),*).await?,
            ResourceKind::Provider => $command::<Provider>($($arg),*).await?,
            ResourceKind::Customer => $command::<Customer>($($arg),*).await?,
            ResourceKind::User => $command::<User>($($arg),*).await?,
            ResourceKind::Machine => $command::<Machine>($($arg),*).await?,
            ResourceKind::SparePart => $command::<SparePart>($($arg),*).await?,
            ResourceKind::WorkOrder => $command::<WorkOrder>($($arg),*).await?,
            ResourceKind::Operator => $command::<Operator>($($arg),*).await?,
            ResourceKind::Preventive => $command::<Preventive>($($arg),*).await?,
            ResourceKind::Downtime => $command::<Downtime>($($arg),*).await?,
            ResourceKind::Order => $command::<Order>($($arg),*).await?,
            ResourceKind::Budget => $command::<Budget>($($arg),*).await?,
            ResourceKind::Invoice => $command::<Invoice>($($arg),*).await?,
            ResourceKind::DeliveryNote => $command::<DeliveryNote>($($arg),*).await?,
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize(cli.api_url.clone())?;

    match cli.command {
        Commands::List(args) => {
            dispatch!(args.resource, list_command, &context, &args, cli.json)
        }
        Commands::Get(args) => dispatch!(args.resource, get_command, &context, args.id, cli.json),
        Commands::Delete(args) => {
            dispatch!(args.resource, delete_command, &context, args.id, cli.json)
        }
        Commands::Totals(args) => totals_command(&context, args, cli.json).await?,
        Commands::Assembly(args) => assembly_command(&context, args, cli.json).await?,
        Commands::Restock => restock_command(&context, cli.json).await?,
        Commands::DuePreventives => due_preventives_command(&context, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "maintenance-hub",
    about = "Browse and manage maintenance records over the REST API",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[arg(long, global = true, help = "Override the configured API base URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a collection through the data table
    List(ListArgs),
    /// Show one record
    Get(RecordArgs),
    /// Delete one record
    Delete(RecordArgs),
    /// Totals and tax brackets of a priced document
    Totals(TotalsArgs),
    /// Folder/article counts and tree of an assembly budget
    Assembly(AssemblyArgs),
    /// Spare parts below their minimum stock
    Restock,
    /// Preventive schedules due now
    DuePreventives,
}

#[derive(Args)]
struct ListArgs {
    #[arg(value_parser = parse_resource, help = "Collection name, e.g. machine or spare-part")]
    resource: ResourceKind,
    #[arg(long, help = "Case-insensitive text matched against every filterable column")]
    search: Option<String>,
    #[arg(
        long = "filter",
        value_parser = parse_filter,
        action = ArgAction::Append,
        help = "Column filter as key=text (substring match), repeatable"
    )]
    filters: Vec<ColumnFilter>,
    #[arg(long, help = "Column key to sort by")]
    sort: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, requires = "sort", help = "Sort descending")]
    desc: bool,
    #[arg(long, default_value_t = 1, help = "1-based page number")]
    page: usize,
    #[arg(long, help = "Rows per page (defaults to the configured page size)")]
    page_size: Option<usize>,
    #[arg(long, help = "Write every matching row to this CSV file instead of printing")]
    export: Option<PathBuf>,
}

#[derive(Args)]
struct RecordArgs {
    #[arg(value_parser = parse_resource)]
    resource: ResourceKind,
    #[arg(value_parser = clap::value_parser!(Uuid))]
    id: Uuid,
}

#[derive(Clone, Copy, ValueEnum)]
enum DocumentKind {
    Order,
    Budget,
    Invoice,
    DeliveryNote,
}

#[derive(Args)]
struct TotalsArgs {
    #[arg(value_enum)]
    document: DocumentKind,
    #[arg(value_parser = clap::value_parser!(Uuid))]
    id: Uuid,
}

#[derive(Args)]
struct AssemblyArgs {
    #[arg(value_parser = clap::value_parser!(Uuid), help = "Budget identifier")]
    budget_id: Uuid,
}

struct CliContext {
    config: AppConfig,
    client: ApiClient,
}

impl CliContext {
    fn initialize(api_url: Option<String>) -> Result<Self> {
        let mut config = config::load_config().context("failed to load application config")?;
        config::init_tracing(config.log_level(), config.log_json);
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        debug!(api = %config.api_base_url, "CLI context ready");

        let client = ApiClient::from_config(&config).context("failed to build API client")?;
        Ok(Self { config, client })
    }
}

async fn list_command<R>(context: &CliContext, args: &ListArgs, json: bool) -> Result<()>
where
    R: Resource + Tabular + Debug,
{
    let service = context.client.service::<R>();
    let mut screen =
        ListScreen::<R>::new(args.page_size.unwrap_or(context.config.page_size));
    if !screen.load(&service).await {
        return Err(anyhow!(
            "failed to load {}: {}",
            R::PATH,
            screen.error().unwrap_or("unknown error")
        ));
    }

    let table = screen.table_mut();
    if let Some(search) = &args.search {
        table.set_search(search.as_str());
    }
    for filter in &args.filters {
        table.add_filter(filter.clone())?;
    }
    if let Some(key) = &args.sort {
        let sort = if args.desc {
            SortSpec::descending(key.as_str())
        } else {
            SortSpec::ascending(key.as_str())
        };
        table.set_sort(sort)?;
    }
    table.set_page(args.page);

    if let Some(path) = &args.export {
        let written = table
            .export_to_path(path, context.config.export_delimiter_byte())
            .with_context(|| format!("failed to export {}", R::PATH))?;
        println!("Exported {} rows to {}", written, path.display());
        return Ok(());
    }

    if json {
        return print_json(&table.page());
    }

    print!("{}", table.render_page());
    let page = table.page();
    println!(
        "Page {}/{} • {} rows",
        page.page,
        page.total_pages.max(1),
        page.total_rows
    );
    for (key, total) in table.totals() {
        println!("Total {}: {}", key, total.round_dp(2));
    }
    Ok(())
}

async fn get_command<R>(context: &CliContext, id: Uuid, json: bool) -> Result<()>
where
    R: Resource + Tabular + Debug,
{
    let service = context.client.service::<R>();
    let form = EditForm::<R>::open(&service, id)
        .await
        .with_context(|| format!("failed to fetch {} {}", R::PATH, id))?;

    if json {
        return print_json(form.draft());
    }
    render_record(form.draft());
    Ok(())
}

async fn delete_command<R>(context: &CliContext, id: Uuid, json: bool) -> Result<()>
where
    R: Resource + Tabular + Debug,
{
    let service = context.client.service::<R>();
    service
        .delete(id)
        .await
        .with_context(|| format!("failed to delete {} {}", R::PATH, id))?;

    if json {
        print_json(&serde_json::json!({ "deleted": id, "resource": R::PATH }))?;
    } else {
        println!("{} {} deleted", R::LABEL, id);
    }
    Ok(())
}

async fn document_totals<R>(context: &CliContext, id: Uuid) -> Result<(String, DocumentTotals)>
where
    R: Resource + PricedDocument,
{
    let service = context.client.service::<R>();
    let form = EditForm::<R>::open(&service, id)
        .await
        .with_context(|| format!("failed to fetch {} {}", R::PATH, id))?;
    Ok((format!("{} {}", R::LABEL, id), form.totals()))
}

async fn totals_command(context: &CliContext, args: TotalsArgs, json: bool) -> Result<()> {
    let (title, totals) = match args.document {
        DocumentKind::Order => document_totals::<Order>(context, args.id).await?,
        DocumentKind::Budget => document_totals::<Budget>(context, args.id).await?,
        DocumentKind::Invoice => document_totals::<Invoice>(context, args.id).await?,
        DocumentKind::DeliveryNote => document_totals::<DeliveryNote>(context, args.id).await?,
    };
    let totals = totals.rounded(2);

    if json {
        return print_json(&totals);
    }

    println!("{}", title);
    println!("  Gross     {:>12}", totals.gross);
    println!("  Discount  {:>12}", totals.discount_total);
    println!("  Subtotal  {:>12}", totals.subtotal);
    for bracket in &totals.brackets {
        println!(
            "  Tax {:>5}% on {:>12} = {:>10}",
            bracket.tax_percentage, bracket.taxable_base, bracket.tax_amount
        );
    }
    println!("  Tax       {:>12}", totals.tax_total);
    println!("  Total     {:>12}", totals.total);
    Ok(())
}

#[derive(Serialize)]
struct AssemblyReport {
    budget_id: Uuid,
    counts: assembly::NodeCounts,
    total: rust_decimal::Decimal,
    tree: Vec<String>,
}

async fn assembly_command(context: &CliContext, args: AssemblyArgs, json: bool) -> Result<()> {
    let budget = context
        .client
        .service::<Budget>()
        .get_by_id(args.budget_id)
        .await
        .with_context(|| format!("failed to fetch budget {}", args.budget_id))?;

    let report = AssemblyReport {
        budget_id: budget.id,
        counts: assembly::count_nodes(&budget.assembly),
        total: assembly::tree_total(&budget.assembly).round_dp(2),
        tree: assembly::render_tree(&budget.assembly),
    };

    if json {
        return print_json(&report);
    }

    println!(
        "Budget {} • {} folders • {} articles • total {}",
        budget.code, report.counts.folders, report.counts.articles, report.total
    );
    for line in &report.tree {
        println!("{}", line);
    }
    Ok(())
}

async fn restock_command(context: &CliContext, json: bool) -> Result<()> {
    let parts = context
        .client
        .service::<SparePart>()
        .get_all()
        .await
        .context("failed to fetch spare parts")?;
    let plan = restock_plan(&parts);

    if json {
        return print_json(&plan);
    }
    if plan.is_empty() {
        println!("Every spare part is at or above its minimum stock");
        return Ok(());
    }

    let mut table = DataTable::from_rows(plan);
    table.set_page_size(context.config.page_size.max(table.rows().len()));
    print!("{}", table.render_page());
    for (_, total) in table.totals() {
        println!("Estimated cost: {}", total.round_dp(2));
    }
    Ok(())
}

async fn due_preventives_command(context: &CliContext, json: bool) -> Result<()> {
    let preventives = context
        .client
        .service::<Preventive>()
        .get_all()
        .await
        .context("failed to fetch preventive schedules")?;
    let due = due_preventives(&preventives, Utc::now());

    if json {
        return print_json(&due);
    }
    if due.is_empty() {
        println!("No preventive schedule is due");
        return Ok(());
    }

    let mut table = DataTable::from_rows(due);
    table.set_page_size(table.rows().len());
    print!("{}", table.render_page());
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_record<R: Tabular>(record: &R) {
    let columns = R::columns();
    let width = columns.iter().map(|c| c.label.len()).max().unwrap_or(0);
    for column in &columns {
        println!("{:<width$}  {}", column.label, column.value(record), width = width);
    }
}

fn parse_resource(raw: &str) -> Result<ResourceKind, String> {
    raw.parse().map_err(|_| {
        let known: Vec<&str> = ResourceKind::all().map(|k| k.path()).collect();
        format!("unknown resource '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn parse_filter(raw: &str) -> Result<ColumnFilter, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{raw}', expected key=text"))?;
    if key.trim().is_empty() {
        return Err(format!("invalid filter '{raw}', missing column key"));
    }
    Ok(ColumnFilter::contains(key.trim(), value))
}
