use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_appender::rolling;

use ponto::api::{AttendanceApi, client::HttpApi};
use ponto::capture::CaptureCoordinator;
use ponto::config::Config;
use ponto::device::{FileCamera, GeoAdapter, HttpGeocoder, StaticLocator};
use ponto::resolver::NextAction;
use ponto::session;
use ponto::workflow::AttendanceWorkflow;

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn credential(var: &str, label: &str) -> anyhow::Result<String> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => prompt(label).context("failed to read credentials"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "ponto.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!("Cliente de ponto iniciando...");

    let matricula = credential("MATRICULA", "Matrícula do funcionário")?;
    let senha = credential("SENHA", "Senha")?;

    let api: Arc<dyn AttendanceApi> = Arc::new(HttpApi::new(&config)?);

    let session = match session::login(api.as_ref(), &matricula, &senha).await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "login failed");
            println!("{}", e.user_message("Erro no login"));
            return Ok(());
        }
    };

    println!("Bem-vindo(a), {}", session.employee().nome);

    let mut workflow =
        AttendanceWorkflow::load(api.clone(), session, config.post_submit_route.clone()).await;

    match workflow.next_action() {
        NextAction::Exhausted => {
            println!("Entrada e saída já registradas hoje");
            return Ok(());
        }
        action => println!("Próximo registro: {}", action.display_type()),
    }

    let geocoder = HttpGeocoder::new(&config.geocoder_url)?;
    let coordinator = CaptureCoordinator::new(
        Arc::new(FileCamera::new(&config.photo_path)),
        GeoAdapter::new(
            Arc::new(StaticLocator::new(config.latitude, config.longitude)),
            Arc::new(geocoder),
        ),
        config.photo_quality,
    );

    let bundle = match coordinator.capture().await {
        Ok(bundle) => bundle,
        Err(e) => {
            warn!(error = %e, "capture failed");
            println!("{}", e.user_message("Falha na captura"));
            return Ok(());
        }
    };

    if let Some(address) = &bundle.address {
        println!("Local: {address}");
    }
    workflow.attach_bundle(bundle);

    if let Ok(motivo) = env::var("MOTIVO") {
        workflow.set_justify(true);
        workflow.set_motive(motivo);
    }

    match workflow.submit().await {
        Ok(outcome) => {
            println!("{}", outcome.message);
            if let Some(route) = outcome.navigate_to {
                info!(route, "post-submit navigation");
            }
        }
        Err(e) => {
            warn!(error = %e, "submission failed");
            println!("{}", e.user_message("Falha ao registrar presença"));
        }
    }

    Ok(())
}
