#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use tracing::info;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    use tailor::cli::{self, Args};
    use tailor::config::Config;
    use tailor::render::terminal::TerminalRenderer;
    use tailor::{Endpoints, HttpJobService, JobFormController};

    let args = Args::parse();

    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    let base_url = args.base_url.clone().unwrap_or_else(|| config.base_url.clone());
    let endpoints = Endpoints::parse(&base_url)
        .with_context(|| format!("Invalid backend URL '{base_url}'"))?;
    info!("Job service at {}", endpoints.base());

    let service = HttpJobService::with_timeout(endpoints.clone(), config.request_timeout)?;
    let renderer = TerminalRenderer::stdio(endpoints);
    let controller = JobFormController::new(service, renderer);

    let form = cli::load_form(&args)?;
    controller.set_mode(form.mode());
    controller.generate(form).await;

    if !args.once {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        cli::run_session(&controller, stdin, tokio::io::stdout()).await?;
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
