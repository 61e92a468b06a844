use clap::Parser;
use rechnungsfilter::config::CliConfig;
use rechnungsfilter::core::FilterError;
use rechnungsfilter::logging;
use rechnungsfilter::session::Session;
use rechnungsfilter::summary::render_table;

fn main() {
    let config = CliConfig::parse();
    logging::init_cli_logger(config.verbose);
    tracing::debug!(?config, "CLI config");

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), FilterError> {
    let mut session = Session::new().with_path_mode(config.path_mode);
    session.select_source(config.source.clone());
    session.select_output_dir(config.output_dir.clone());
    session.process()?;

    if let Some(processed) = session.processed_mut() {
        for &row in &config.exclude_row {
            processed.selection.set(row, true)?;
        }
        let unmatched = processed.exclude_ids(config.exclude.iter().map(String::as_str));
        if !unmatched.is_empty() {
            eprintln!("warning: unknown customer numbers: {}", unmatched.join(", "));
        }
    }

    let rows = session.rows();
    if config.json {
        println!("{}", rechnungsfilter::rows_to_json(&rows)?);
    } else {
        print!("{}", render_table(&rows));
    }
    eprintln!("{}", session.status());

    if config.dry_run {
        return Ok(());
    }
    session.save()?;
    eprintln!("{}", session.status());
    Ok(())
}
