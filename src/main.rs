mod api;
mod config;
mod listings;
mod models;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use api::{ApiClient, ListingAdmin, ListingSource, SessionStore};
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::Config;
use listings::{DashboardFilter, FilterCriteria, PeriodFilter};
use models::labels::format_brl;
use models::validation::{validate_image, MAX_IMAGES};
use models::{Category, Property, PropertyType, Status};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-desk")]
#[command(about = "Browse real-estate listings and manage the portfolio back office")]
struct Cli {
    /// Backend base URL (overrides LISTING_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published properties
    List {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Include sold and rented properties
        #[arg(long)]
        show_sold: bool,
    },

    /// Show property details
    Show {
        /// Property UID
        uid: String,
    },

    /// Portfolio summary for the back office
    Dashboard {
        #[arg(long, value_enum, default_value = "all")]
        period: PeriodMode,

        /// Year for yearly/monthly periods (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month for the monthly period (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        neighborhood: Option<String>,

        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Log in as an operator
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (falls back to LISTING_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Manage listings (requires login)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create a listing from a JSON file
    Create { file: PathBuf },

    /// Replace a listing with the contents of a JSON file
    Edit { uid: String, file: PathBuf },

    /// Delete a listing
    Delete { uid: String },

    /// Change a listing's status
    Status {
        uid: String,
        #[arg(value_enum)]
        status: Status,
    },

    /// Show the selection options derived from the portfolio
    Options,

    /// Upload a photo for a listing
    Upload { uid: String, path: PathBuf },

    /// Delete a photo by URL
    RemoveImage { url: String },

    /// Set a listing's photos in display order; the first becomes the cover
    Photos {
        uid: String,
        #[arg(required = true, num_args = 1..=MAX_IMAGES)]
        urls: Vec<String>,
    },
}

#[derive(Args)]
struct CriteriaArgs {
    #[arg(long = "type", value_enum)]
    property_type: Option<PropertyType>,

    #[arg(long, value_enum)]
    category: Option<Category>,

    #[arg(long, value_enum)]
    status: Option<Status>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    neighborhood: Option<String>,

    #[arg(long, value_parser = parse_amount)]
    min_price: Option<f64>,

    #[arg(long, value_parser = parse_amount)]
    max_price: Option<f64>,

    #[arg(long)]
    min_bedrooms: Option<u32>,

    #[arg(long)]
    min_bathrooms: Option<u32>,

    #[arg(long)]
    min_parking: Option<u32>,

    /// Minimum area in m²
    #[arg(long, value_parser = parse_amount)]
    min_area: Option<f64>,

    #[arg(long)]
    financing: Option<bool>,

    #[arg(long)]
    trade_in: Option<bool>,
}

/// Prices and areas must be finite and not negative
fn parse_amount(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|_| format!("{:?} is not a number", raw))?;
    if !value.is_finite() {
        return Err(format!("{:?} is not a finite number", raw));
    }
    if value < 0.0 {
        return Err(format!("{} must not be negative", raw));
    }
    Ok(value)
}

impl From<CriteriaArgs> for FilterCriteria {
    fn from(args: CriteriaArgs) -> Self {
        FilterCriteria {
            property_type: args.property_type,
            category: args.category,
            status: args.status,
            city: args.city,
            state: args.state,
            neighborhood: args.neighborhood,
            min_price: args.min_price,
            max_price: args.max_price,
            min_bedrooms: args.min_bedrooms,
            min_bathrooms: args.min_bathrooms,
            min_parking_spaces: args.min_parking,
            min_area: args.min_area,
            accepts_financing: args.financing,
            accepts_trade_in: args.trade_in,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodMode {
    All,
    Yearly,
    Monthly,
}

impl PeriodMode {
    fn into_filter(self, year: Option<i32>, month: Option<u32>) -> PeriodFilter {
        let today = Local::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        match self {
            PeriodMode::All => PeriodFilter::All,
            PeriodMode::Yearly => PeriodFilter::Yearly { year },
            PeriodMode::Monthly => PeriodFilter::Monthly {
                year,
                month: month.unwrap_or_else(|| today.month()),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_api_url(cli.api_url);
    let store = SessionStore::new(&config.session_file);
    let client = ApiClient::new(&config)?;

    match cli.command {
        Commands::List {
            criteria,
            show_sold,
        } => {
            let criteria = FilterCriteria::from(criteria).for_public_listing(show_sold);
            let properties = listings::browse(&client, &criteria).await?;

            if cli.json {
                print_json(&properties)?;
            } else {
                print_listing(&properties);
            }
        }
        Commands::Show { uid } => {
            let property = client.get(&uid).await?;

            if cli.json {
                print_json(&property)?;
            } else {
                print_details(&property);
            }
        }
        Commands::Dashboard {
            period,
            year,
            month,
            city,
            neighborhood,
            status,
        } => {
            let filter = DashboardFilter {
                period: period.into_filter(year, month),
                city,
                neighborhood,
                status,
            };
            info!("Loading dashboard with {:?}", filter);
            let dashboard = listings::load_dashboard(&client, &filter).await?;

            if cli.json {
                print_json(&dashboard)?;
            } else {
                print_dashboard(&dashboard);
            }
        }
        Commands::Login { email, password } => {
            let password = match password.or_else(|| std::env::var("LISTING_PASSWORD").ok()) {
                Some(password) => password,
                None => bail!("No password given; pass --password or set LISTING_PASSWORD"),
            };

            let session = client.login(&email, &password).await?;
            store.save(&session).await?;
            println!("Logged in as {} <{}>", session.name, session.email);
        }
        Commands::Logout => {
            if store.clear().await? {
                println!("Logged out (removed {})", store.path().display());
            } else {
                println!("No active session");
            }
        }
        Commands::Whoami => match store.load().await? {
            Some(session) => println!("{} <{}>", session.name, session.email),
            None => println!("Not logged in"),
        },
        Commands::Admin { command } => {
            let session = store.load().await?;
            let admin = client.with_session(session);
            run_admin(&admin, command, cli.json).await?;
        }
    }

    Ok(())
}

async fn run_admin<C>(admin: &C, command: AdminCommands, json: bool) -> Result<()>
where
    C: ListingSource + ListingAdmin,
{
    match command {
        AdminCommands::Create { file } => {
            let property = read_property(&file).await?;
            property.validate()?;
            let created = admin.create(&property).await?;
            print_saved(&created, json)?;
        }
        AdminCommands::Edit { uid, file } => {
            let property = read_property(&file).await?;
            property.validate()?;
            let updated = admin.update(&uid, &property).await?;
            print_saved(&updated, json)?;
        }
        AdminCommands::Delete { uid } => {
            admin.delete(&uid).await?;
            println!("Deleted {}", uid);
        }
        AdminCommands::Status { uid, status } => {
            let updated = admin.change_status(&uid, status).await?;
            print_saved(&updated, json)?;
        }
        AdminCommands::Options => {
            let options = admin.available_options().await?;
            if json {
                print_json(&options)?;
            } else {
                println!("Cities:        {}", options.cities.join(", "));
                println!("Neighborhoods: {}", options.neighborhoods.join(", "));
                println!("States:        {}", options.states.join(", "));
                let types: Vec<&str> = options.types.iter().map(|t| t.label()).collect();
                println!("Types:         {}", types.join(", "));
                let categories: Vec<&str> = options.categories.iter().map(|c| c.label()).collect();
                println!("Categories:    {}", categories.join(", "));
                let statuses: Vec<&str> = options.statuses.iter().map(|s| s.label()).collect();
                println!("Statuses:      {}", statuses.join(", "));
                let bedrooms: Vec<String> =
                    options.bedroom_counts.iter().map(|n| n.to_string()).collect();
                println!("Bedrooms:      {}", bedrooms.join(", "));
                println!(
                    "Financing:     {}   Trade-in: {}",
                    yes_no(options.any_financing),
                    yes_no(options.any_trade_in)
                );
            }
        }
        AdminCommands::Upload { uid, path } => {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image")
                .to_string();
            let metadata = tokio::fs::metadata(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
            validate_image(&file_name, size)?;

            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let url = admin.upload_image(&uid, &file_name, bytes).await?;
            println!("{}", url);
        }
        AdminCommands::RemoveImage { url } => {
            admin.delete_image(&url).await?;
            println!("Deleted {}", url);
        }
        AdminCommands::Photos { uid, urls } => {
            let property = admin.get(&uid).await?.with_media_urls(urls);
            let updated = admin.update(&uid, &property).await?;
            print_saved(&updated, json)?;
        }
    }

    Ok(())
}

async fn read_property(path: &Path) -> Result<Property> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid listing JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_saved(property: &Property, json: bool) -> Result<()> {
    if json {
        print_json(property)
    } else {
        print_details(property);
        Ok(())
    }
}

fn price_line(property: &Property) -> String {
    format!(
        "{}{}",
        format_brl(property.price),
        property.category.price_suffix()
    )
}

fn print_listing(properties: &[Property]) {
    if properties.is_empty() {
        println!("No properties match the selected filters.");
        return;
    }

    for (i, property) in properties.iter().enumerate() {
        let badge = if property.is_closed() {
            format!(" [{}]", property.status().label().to_uppercase())
        } else {
            String::new()
        };
        println!("{}. {} ({}){}", i + 1, property.title, price_line(property), badge);
        println!(
            "   {} · {} · {} quartos, {} banheiros, {} vagas, {} m²",
            property.property_type.label(),
            property.category.label(),
            property.bedrooms,
            property.bathrooms,
            property.parking_spaces,
            property.area
        );
        println!(
            "   {}, {} - {}",
            property.address.neighborhood, property.address.city, property.address.state
        );
        if let Some(uid) = &property.uid {
            println!("   UID: {}", uid);
        }
        println!();
    }
}

fn print_details(property: &Property) {
    println!("{}", property.title);
    println!("{}", "=".repeat(property.title.chars().count()));
    println!("UID:        {}", property.uid.as_deref().unwrap_or("-"));
    println!("Price:      {}", price_line(property));
    println!("Status:     {}", property.status().label());
    println!(
        "Type:       {} ({})",
        property.property_type.label(),
        property.category.label()
    );
    println!(
        "Location:   {}, {} - {}",
        property.address.neighborhood, property.address.city, property.address.state
    );
    println!(
        "Size:       {} m², {} quartos, {} banheiros, {} vagas",
        property.area, property.bedrooms, property.bathrooms, property.parking_spaces
    );
    if !property.features.is_empty() {
        let features: Vec<&str> = property.features.iter().map(|f| f.label()).collect();
        println!("Features:   {}", features.join(", "));
    }
    println!(
        "Financing:  {}   Trade-in: {}",
        yes_no(property.accepts_financing),
        yes_no(property.accepts_trade_in)
    );
    if let Some(cover) = property.cover() {
        println!("Cover:      {}", cover.url);
    }
    if property.media.len() > 1 {
        println!("Photos:     {}", property.media.len());
    }
    if let Some(created) = property.created_at {
        println!("Created:    {}", created.format("%Y-%m-%d %H:%M"));
    }
    if let Some(updated) = property.updated_at {
        println!("Updated:    {}", updated.format("%Y-%m-%d %H:%M"));
    }
    if !property.description.is_empty() {
        println!();
        println!("{}", property.description);
    }
}

fn print_dashboard(dashboard: &listings::Dashboard) {
    let snapshot = &dashboard.snapshot;

    println!("Portfolio ({} listings)", snapshot.total);
    println!("  Available:   {}", snapshot.available);
    println!("  Sold:        {}", snapshot.sold);
    println!("  Rented:      {}", snapshot.rented);
    println!("  Reserved:    {}", snapshot.reserved);
    println!("  Sales value: {}", format_brl(snapshot.total_sold_sale_value));
    println!();
    println!("Cities:        {}", dashboard.cities.join(", "));
    println!("Neighborhoods: {}", dashboard.neighborhoods.join(", "));
    println!();

    for property in &dashboard.properties {
        println!(
            "  {:<12} {:<40} {}",
            property.status().label(),
            property.title,
            format_brl(property.price)
        );
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "sim"
    } else {
        "não"
    }
}
