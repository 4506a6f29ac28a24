use clap::Parser;
use serde::Serialize;
use vidiq_api::utils::error::ErrorSeverity;
use vidiq_api::utils::logger;
use vidiq_api::{
    CliArgs, ClientConfig, Command, CsvExporter, ExportOptions, KeywordAnalyzer, LocalStorage,
    VidiqError,
};

fn print_json<T: Serialize>(value: &T) -> vidiq_api::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: &Command, config: &ClientConfig) -> vidiq_api::Result<()> {
    let analyzer = KeywordAnalyzer::from_config(config)?;
    let delay = config.delay();

    match command {
        Command::Analyze { keyword } => {
            print_json(&analyzer.analyze_keyword(keyword, delay).await?)?;
        }
        Command::Batch { keywords } => {
            let results = analyzer.analyze_keywords(keywords, delay).await;
            print_json(&results)?;
        }
        Command::Related { keyword, .. } => {
            print_json(&analyzer.related_keywords(keyword, delay).await?)?;
        }
        Command::Matching { keyword, .. } => {
            print_json(&analyzer.matching_keywords(keyword, config.limit, delay).await?)?;
        }
        Command::Questions { keyword, .. } => {
            print_json(&analyzer.question_keywords(keyword, config.limit, delay).await?)?;
        }
        Command::Export {
            keyword, output, ..
        } => {
            let exporter = CsvExporter::new(analyzer, LocalStorage::default());
            let path = exporter
                .export_to_csv(keyword, &ExportOptions::from_config(config), output.as_deref())
                .await?;
            println!("📄 Exported combined CSV: {}", path);
        }
        Command::ExportSeparate {
            keyword,
            output_dir,
            ..
        } => {
            let exporter = CsvExporter::new(analyzer, LocalStorage::default());
            let paths = exporter
                .export_separate_csvs(
                    keyword,
                    &ExportOptions::from_config(config),
                    output_dir.as_deref(),
                )
                .await?;
            println!("📁 Exported separate CSV files:");
            for (kind, path) in &paths {
                println!("  {}: {}", kind, path);
            }
        }
    }

    Ok(())
}

fn exit_code(error: &VidiqError) -> i32 {
    match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(error: &VidiqError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose, args.log_json);
    tracing::debug!("CLI args: {:?}", args.command);

    let config = match args.client_config() {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Client config: {:?}", config);

    if let Err(e) = run(&args.command, &config).await {
        report(&e);
        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
