use std::{fs, process::exit};

use clap::{Parser, ValueEnum};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_dashboard::{
    CurrencyFormat, DEFAULT_CURRENCY_SYMBOL, Error,
    dashboard::{Dashboard, DashboardView, build_dashboard, metric_cards},
    parse_csv, today_in,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Print the expense dashboard summary for a CSV file of expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a CSV file with the columns Date, Amount, Category,
    /// Description and optionally Spender.
    #[arg(long)]
    csv_path: String,

    /// Summarise the expenses as shared group expenses.
    #[arg(long)]
    group: bool,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// Use this date (YYYY-MM-DD) as today instead of the current date.
    #[arg(long, value_parser = parse_date)]
    today: Option<Date>,

    /// The symbol to prefix amounts with.
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency: String,

    /// How to print the summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Metric cards and breakdowns as plain text.
    Text,
    /// The full dashboard as JSON.
    Json,
}

fn main() {
    setup_logging();

    let args = Args::parse();

    if let Err(error) = run(&args) {
        tracing::error!("{error}");
        exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let currency = CurrencyFormat::new(&args.currency)?;

    let text = fs::read_to_string(&args.csv_path)
        .map_err(|error| Error::ReadFile(args.csv_path.clone(), error.to_string()))?;
    let expenses = parse_csv(&text)?;
    tracing::info!("Loaded {} expenses from {}", expenses.len(), args.csv_path);

    let today = match args.today {
        Some(today) => today,
        None => today_in(&args.timezone)?,
    };

    let view = if args.group {
        DashboardView::Group
    } else {
        DashboardView::Personal
    };

    let dashboard = match build_dashboard(&expenses, today, view) {
        Ok(dashboard) => dashboard,
        Err(Error::EmptyDataset) => {
            println!("No expenses to show yet.");
            return Ok(());
        }
        Err(error) => return Err(error),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        OutputFormat::Text => print_text(&dashboard, &currency),
    }

    Ok(())
}

fn print_text(dashboard: &Dashboard, currency: &CurrencyFormat) {
    for card in metric_cards(dashboard, currency) {
        println!("{:<14} {:>16}  {}", card.title, card.value, card.subtitle);
    }

    println!();
    println!("Expense distribution");
    for slice in &dashboard.all_time.by_category {
        println!("  {:<24} {:>16}", slice.label, currency.format(slice.amount));
    }

    if let Some(by_spender) = &dashboard.all_time.by_spender {
        println!();
        println!("Expenses by spender");
        for slice in by_spender {
            println!("  {:<24} {:>16}", slice.label, currency.format(slice.amount));
        }
    }
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, DATE_FORMAT).map_err(|error| format!("invalid date \"{text}\": {error}"))
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use clap::Parser;
    use expense_dashboard::Error;

    use super::{Args, run};

    #[test]
    fn invalid_currency_is_rejected_for_empty_csv() {
        let csv_path = env::temp_dir().join(format!(
            "expense_summary_empty_{}.csv",
            std::process::id()
        ));
        fs::write(&csv_path, "Date,Amount,Category,Description\n").unwrap();
        let args = Args::try_parse_from([
            "expense_summary",
            "--csv-path",
            csv_path.to_str().unwrap(),
            "--today",
            "2024-01-15",
            "--currency",
            "ABCDEFGHIJKLMNOP",
        ])
        .unwrap();

        let result = run(&args);
        fs::remove_file(&csv_path).unwrap();

        assert_eq!(
            result,
            Err(Error::InvalidCurrencySymbol("ABCDEFGHIJKLMNOP".to_owned()))
        );
    }
}
