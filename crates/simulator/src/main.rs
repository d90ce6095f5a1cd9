//! # HVAC Simulator
//!
//! Gera uma frota sintética de equipamentos HVAC e emite telemetria de todos
//! eles a cada intervalo: sempre no console e, se `sink.url` estiver
//! configurada, também via POST para um coletor HTTP.
//!
//! ## Uso
//! ```bash
//! hvac_simulator                 # lê config.toml ao lado do executável
//! RUST_LOG=debug hvac_simulator  # logs detalhados
//! ```
//!
//! Encerra com status 0 ao atingir `max_cycles` ou com Ctrl+C.

mod fleet;
mod reporter;
mod sink;
mod telemetry;

use chrono::Utc;
use fleet::generate_fleet;
use hvac_core::config::AppConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use reporter::{Reporter, Termination};
use sink::{ConfiguredSink, NoopSink};
use tracing::{debug, error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let mut config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    // Campos inválidos voltam ao padrão individualmente
    for replaced in config.sanitize() {
        warn!("Configuração inválida, usando padrão: {replaced}");
    }

    let sim_cfg = &config.simulator;

    // ── Sink remoto ──
    let sink = match ConfiguredSink::from_config(&config.sink) {
        Ok(sink) => sink,
        Err(e) => {
            error!("Sink remoto indisponível ({e}). Envio remoto desabilitado.");
            ConfiguredSink::Disabled(NoopSink)
        }
    };

    // ── Frota ──
    let mut rng = match sim_cfg.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let fleet = generate_fleet(sim_cfg.fleet_size, Utc::now(), &mut rng);
    info!("Frota gerada: {} dispositivos", fleet.len());

    // ── Banner ──
    let cycles = sim_cfg
        .cycle_limit()
        .map_or_else(|| "ilimitado".to_string(), |n| n.to_string());
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ❄ HVAC SIMULATOR – ATIVO (Rust)");
    println!("══════════════════════════════════════════════");
    println!("  Frota:     {} dispositivos", fleet.len());
    println!("  Intervalo: {:.1}s", sim_cfg.interval().as_secs_f64());
    println!("  Ciclos:    {cycles}");
    println!("  Sink:      {sink}");
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    let mut reporter = Reporter::new(fleet, sink, std::io::stdout(), rng, sim_cfg);
    let termination = reporter.run_until(shutdown_signal()).await;

    debug!("Estado final: {:?}", reporter.state());
    let stats = reporter.stats();
    match termination {
        Termination::CycleLimit => info!("Limite de {} ciclos atingido", stats.cycles),
        Termination::Interrupted => info!("Interrompido pelo operador"),
    }
    info!(
        "Resumo: {} ciclos | {} leituras | {} entregues | {} falhas",
        stats.cycles, stats.readings, stats.delivered, stats.failed
    );
}

/// Completa no Ctrl+C. Se o sinal não puder ser escutado, nunca completa.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Não foi possível escutar Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
