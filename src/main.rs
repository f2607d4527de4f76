use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::process::ExitCode;
use table_lens::config::config::Config;
use table_lens::controller::TableController;
use table_lens::data::csv_loader::load_csv_to_table;
use table_lens::data::filter_engine::FilterOutcome;
use table_lens::input::surfaces::Surface;
use table_lens::table_display::display_results;
use table_lens::ui::app::App;

fn print_help() {
    println!("{}", "table-lens - sort and filter CSV tables".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  table-lens [OPTIONS] FILE.csv");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {} - Write config file with defaults",
        "--generate-config".green()
    );
    println!("  {}           - Print the table once instead of the TUI", "--print".green());
    println!(
        "  {}      - Activate a column header (index or label, repeatable)",
        "--sort <col>".green()
    );
    println!("  {} - Filter rows by a query", "--filter <query>".green());
    println!("  {}            - Show this help", "--help".green());
    println!();
    println!("{}", "Keys:".yellow());
    println!("  {}   - Select column", "Left/Right".green());
    println!("  {}  - Cycle sort: ascending, descending, original", "Enter, 1-9".green());
    println!("  {}           - Search", "/".green());
    println!("  {}      - Clear search", "Ctrl+L".green());
    println!("  {}         - Toggle log pane", "F12".green());
    println!("  {}           - Quit", "q".green());
    println!();
}

#[derive(Debug, Default)]
struct Args {
    file: Option<String>,
    print: bool,
    sorts: Vec<String>,
    filter: Option<String>,
    help: bool,
    generate_config: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => parsed.help = true,
            "--generate-config" => parsed.generate_config = true,
            "--print" => parsed.print = true,
            "--sort" => parsed.sorts.push(
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("--sort needs a column"))?,
            ),
            "--filter" => {
                parsed.filter = Some(
                    iter.next()
                        .cloned()
                        .ok_or_else(|| anyhow::anyhow!("--filter needs a query"))?,
                )
            }
            other if other.starts_with("--") => anyhow::bail!("Unknown option: {}", other),
            file => parsed.file = Some(file.to_string()),
        }
    }
    Ok(parsed)
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {:?}", parent))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("Error writing config file {:?}", path))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn run_print(args: &Args, config: &Config, file: &str) -> Result<()> {
    let table = load_csv_to_table(file)?;
    let mut controller = TableController::new(table, config);

    for column in &args.sorts {
        let idx = controller
            .table()
            .column_index(column)
            .ok_or_else(|| anyhow::anyhow!("Unknown column: {}", column))?;
        controller.activate_column(idx);
    }

    if let Some(query) = &args.filter {
        let now = std::time::Instant::now();
        controller.edited(Surface::Desktop, query, now);
        if let FilterOutcome::TooLong { max, .. } = controller.confirm(now) {
            eprintln!(
                "{}",
                format!("Search term is too long (max. {} characters)", max).yellow()
            );
        }
    }

    display_results(controller.table());
    Ok(())
}

fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;

    if args.help {
        print_help();
        return Ok(());
    }
    if args.generate_config {
        return generate_config();
    }

    let Some(file) = args.file.as_deref() else {
        print_help();
        anyhow::bail!("No CSV file given");
    };

    if args.print {
        table_lens::logging::init_stderr_tracing();
        let config = Config::load()?;
        return run_print(&args, &config, file);
    }

    let log_buffer = table_lens::logging::init_tracing();
    let config = Config::load()?;
    let table = load_csv_to_table(file)?;
    let mut app = App::new(table, &config, Some(log_buffer));
    for column in &args.sorts {
        app.activate_named_column(column)?;
    }
    app.run()
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}
