use std::{
    env,
    fs,
    process::ExitCode,
};

use tracing::{
    error,
    info,
};
use wkstats::{
    logging::init_logging,
    parse_response,
    persistence::get_data_file_path,
    settings::SETTINGS_FILE,
    Item,
    SettingsData,
    SortDirection,
    SortField,
    SrsDistribution,
    WkError,
};

const USAGE: &str = "usage: wkstats <records.json> [field] [asc|desc]\n       wkstats --reset-settings";

fn main() -> ExitCode {
    let settings = SettingsData::load();
    init_logging(&settings.log_level);

    let args: Vec<String> = env::args().skip(1).collect();
    let result = if args.first().map(String::as_str) == Some("--reset-settings") {
        SettingsData::reset()
    } else {
        write_default_settings(&settings).and_then(|()| run(&settings, args))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if !e.is_parse_error() {
                eprintln!("{}", USAGE);
            }
            ExitCode::FAILURE
        }
    }
}

/// First run leaves an editable settings file behind.
fn write_default_settings(settings: &SettingsData) -> Result<(), WkError> {
    if SettingsData::is_saved() {
        return Ok(());
    }
    settings.save()?;
    info!("Default settings written to {}", get_data_file_path(SETTINGS_FILE).display());
    Ok(())
}

fn run(settings: &SettingsData, args: Vec<String>) -> Result<(), WkError> {
    let path = args.first().ok_or_else(|| WkError::Custom("no input file".to_string()))?;
    let field = args.get(1).map(|s| s.parse::<SortField>()).transpose()?;
    let direction = args.get(2).map(|s| s.parse::<SortDirection>()).transpose()?;

    let json = fs::read_to_string(path)?;
    let items = parse_response(&json)?;
    let order = settings.order(field, direction);
    info!("Sorting {} items by {}", items.len(), order);

    for item in order.sorted(&items) {
        println!("{}", describe(item, settings.use_tls));
    }

    let distribution = SrsDistribution::from_items(&items, settings.distribution_options());
    println!();
    for totals in distribution.iter() {
        let average = totals
            .average_percentage()
            .map(|avg| format!("  avg {:.0}%", avg))
            .unwrap_or_default();
        println!(
            "{:<12}{:>5}  (radicals {}, kanji {}, vocabulary {}){}",
            totals.stage, totals.total, totals.radicals, totals.kanji, totals.vocabulary, average
        );
    }

    Ok(())
}

fn describe(item: &Item, tls: bool) -> String {
    let stage = item.srs().map(|srs| srs.to_string()).unwrap_or_else(|| "-".to_string());
    let percentage = item
        .known_percentage()
        .map(|p| format!("{}%", p))
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{:<11}{:<8}{:<24}L{:<3}{:<12}{:>5}  {}",
        item.kind,
        item.character,
        item.meaning,
        item.level,
        stage,
        percentage,
        item.url(tls)
    )
}
