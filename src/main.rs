use clap::Parser;
use house_price_client::utils::logger;
use house_price_client::{
    prompt, render, CliConfig, HttpPredictionService, OutputFormat, PredictionForm,
    RequestLifecycle, SubmitOutcome,
};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 先載入配置，日誌設定可能來自設定檔
    let loaded = config.service_config();
    let (verbose, json_log) = match &loaded {
        Ok(file) => (config.verbose || file.verbose(), config.json_log || file.json_log()),
        Err(_) => (config.verbose, config.json_log),
    };

    // 初始化日誌
    if json_log {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting house-price client");
    tracing::debug!("CLI config: {:?}", config);

    let service_config = match loaded {
        Ok(service_config) => service_config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if let Some(path) = &config.config {
        tracing::info!("📁 Configuration loaded from: {}", path);
    }

    let service = HttpPredictionService::new(&service_config);
    tracing::info!("🔗 Prediction endpoint: {}", service.url());

    let mut form = PredictionForm::new(Arc::new(service));
    for (name, value) in config.field_values() {
        form.set_field(name, value);
    }

    if config.interactive {
        let stdin = std::io::stdin();
        prompt::prompt_missing_fields(&mut form, stdin.lock(), std::io::stderr())?;
    }

    if form.snapshot().is_blank() {
        tracing::warn!("No field values given; submitting an empty form");
    }

    match form.submit() {
        SubmitOutcome::Dispatched { ticket, .. } => {
            tracing::debug!("Request {} dispatched", ticket);
            if config.output == OutputFormat::Text {
                print!("{}", render::render(&form.view()));
            }
        }
        SubmitOutcome::Rejected | SubmitOutcome::NotDispatched => {}
    }

    form.settle().await;

    match config.output {
        OutputFormat::Text => {
            println!();
            print!("{}", render::render(&form.view()));
        }
        OutputFormat::Json => println!("{}", render::render_json(&form.view())?),
    }

    let exit_code = match form.lifecycle() {
        RequestLifecycle::Succeeded(_) => 0,
        RequestLifecycle::Failed(_) => 2,
        RequestLifecycle::Idle | RequestLifecycle::Pending => 1,
    };

    form.unmount();
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
