use anyhow::Context;
use business_mediator::domain::model::{ScenarioReport, StepOutcome};
use business_mediator::utils::error::ErrorSeverity;
use business_mediator::utils::{logger, validation::Validate};
use business_mediator::{CliConfig, OutputFormat, ScenarioConfig, ScenarioRunner, Town};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.format {
        OutputFormat::Text => logger::init_cli_logger(cli.verbose),
        OutputFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting business-mediator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let scenario = cli
        .load_scenario()
        .with_context(|| format!("failed to load scenario '{}'", cli.config.as_deref().unwrap_or("demo")))?;

    // 驗證配置
    if let Err(e) = scenario.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if cli.dry_run {
        print_plan(&scenario);
        return Ok(());
    }

    let town = Town::with_settings(&scenario.town_settings());
    let runner = ScenarioRunner::new(scenario.name()).with_policy(scenario.error_policy());

    match runner.run(&town, &scenario.steps) {
        Ok(report) => {
            match cli.format {
                OutputFormat::Text => print_report(&report),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
            tracing::info!("✅ Scenario completed with {} failed step(s)", report.failures());
        }
        Err(e) => {
            tracing::error!(
                "❌ Scenario failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn print_plan(scenario: &ScenarioConfig) {
    println!("Scenario: {}", scenario.name());
    if let Some(description) = &scenario.scenario.description {
        println!("  {}", description);
    }
    println!("Initial state: {:?}", scenario.town_settings());
    println!("On failure: {:?}", scenario.error_policy());
    for (index, step) in scenario.steps.iter().enumerate() {
        println!("  {:>2}. {:?}", index + 1, step);
    }
}

fn print_report(report: &ScenarioReport) {
    for step in &report.steps {
        match step.outcome {
            StepOutcome::Paused => println!(),
            ref outcome => println!("{}", outcome),
        }
    }
}
