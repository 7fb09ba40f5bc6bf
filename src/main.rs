use clap::Parser;
use crm_maintenance::app::tasks::{
    self, CrmReport, CustomerCleanup, Heartbeat, LowStockUpdate, OrderReminders,
};
use crm_maintenance::core::ConfigProvider;
use crm_maintenance::domain::model::TaskReport;
use crm_maintenance::utils::{logger, validation::Validate};
use crm_maintenance::{CliConfig, Command, CrmError, LocalLogStore, TaskName, TaskRunner, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match &cli.command {
        Command::Schedule => logger::init_scheduler_logger(),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting crm-maintenance");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = if let Some(path) = cli.config.clone() {
        match TomlConfig::from_file(&path) {
            Ok(config) => {
                if let Err(e) = config.validate() {
                    fail_validation(e);
                }
                let monitor = cli.monitor || config.monitoring_enabled();
                dispatch(&cli.command, &config, monitor).await
            }
            Err(e) => Err(e),
        }
    } else {
        if let Err(e) = cli.validate() {
            fail_validation(e);
        }
        dispatch(&cli.command, &cli, cli.monitor).await
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Maintenance run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            crm_maintenance::utils::error::ErrorSeverity::Low => 0,
            crm_maintenance::utils::error::ErrorSeverity::Medium => 2,
            crm_maintenance::utils::error::ErrorSeverity::High => 1,
            crm_maintenance::utils::error::ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn fail_validation(e: CrmError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

async fn dispatch<C: ConfigProvider>(
    command: &Command,
    config: &C,
    monitor: bool,
) -> crm_maintenance::Result<()> {
    let log = LocalLogStore::new(config.log_directory().to_string());

    match command {
        Command::Run { task } => {
            let report = run_single(*task, config, log, monitor).await?;
            tracing::info!("✅ Maintenance task completed successfully");
            println!(
                "✅ {}: {} ({} affected)",
                report.task, report.message, report.affected
            );
            Ok(())
        }
        Command::Schedule => {
            let scheduler = tasks::build_scheduler(config, log)?;
            tracing::info!("Scheduler started with {} tasks", scheduler.len());
            scheduler.run().await
        }
    }
}

async fn run_single<C: ConfigProvider>(
    task: TaskName,
    config: &C,
    log: LocalLogStore,
    monitor: bool,
) -> crm_maintenance::Result<TaskReport> {
    let client = tasks::graphql_client(config)?;

    match task {
        TaskName::Cleanup => {
            let task = CustomerCleanup::new(client, log, config.retention_days());
            TaskRunner::new_with_monitoring(task, monitor).run().await
        }
        TaskName::Heartbeat => {
            let task = Heartbeat::new(client, log);
            TaskRunner::new_with_monitoring(task, monitor).run().await
        }
        TaskName::LowStock => {
            let task = LowStockUpdate::new(client, log);
            TaskRunner::new_with_monitoring(task, monitor).run().await
        }
        TaskName::OrderReminders => {
            let task = OrderReminders::new(client, log, config.reminder_window_days());
            TaskRunner::new_with_monitoring(task, monitor).run().await
        }
        TaskName::Report => {
            let task = CrmReport::new(client, log);
            TaskRunner::new_with_monitoring(task, monitor).run().await
        }
    }
}
