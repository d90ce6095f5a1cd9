//! Loop de relatório – a cada tick percorre a frota em ordem, gera uma
//! leitura por dispositivo, imprime no console e entrega ao sink.
//!
//! Estados: `IdleWaiting` → `Reporting` → `IdleWaiting` … → `Terminated`.
//! Ciclos nunca se sobrepõem: cada entrega é aguardada antes do próximo
//! dispositivo.

use crate::sink::TelemetrySink;
use crate::telemetry::generate_reading;
use chrono::{SecondsFormat, Utc};
use hvac_core::config::SimulatorConfig;
use hvac_core::types::{Device, TelemetryReading};
use rand::rngs::StdRng;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Estado do loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    IdleWaiting,
    Reporting,
    Terminated,
}

/// Motivo do encerramento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Limite de ciclos atingido
    CycleLimit,
    /// Interrompido pelo operador
    Interrupted,
}

/// Contadores acumulados da execução.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ciclos completos
    pub cycles: u64,
    /// Leituras geradas (inclui ciclo interrompido)
    pub readings: u64,
    /// Entregas aceitas pelo sink
    pub delivered: u64,
    /// Entregas que falharam
    pub failed: u64,
}

/// Agendador dono da frota, do sink, do RNG e do contador de ciclos.
pub struct Reporter<S, W> {
    fleet: Vec<Device>,
    sink: S,
    console: W,
    rng: StdRng,
    period: Duration,
    cycle_limit: Option<u64>,
    state: ReporterState,
    stats: RunStats,
}

impl<S: TelemetrySink, W: Write> Reporter<S, W> {
    pub fn new(
        fleet: Vec<Device>,
        sink: S,
        console: W,
        rng: StdRng,
        config: &SimulatorConfig,
    ) -> Self {
        Self {
            fleet,
            sink,
            console,
            rng,
            period: config.interval(),
            cycle_limit: config.cycle_limit(),
            state: ReporterState::IdleWaiting,
            stats: RunStats::default(),
        }
    }

    pub fn state(&self) -> ReporterState {
        self.state
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn limit_reached(&self) -> bool {
        self.cycle_limit.is_some_and(|limit| self.stats.cycles >= limit)
    }

    /// Roda ciclos no período configurado até o limite (ou para sempre).
    ///
    /// Começa aguardando: o primeiro ciclo ocorre um período após a chamada.
    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.limit_reached() {
            ticker.tick().await;
            self.run_cycle().await;
        }
        self.state = ReporterState::Terminated;
    }

    /// Como [`run`](Self::run), mas encerra assim que `shutdown` completar,
    /// abandonando o ciclo em andamento.
    pub async fn run_until<F: Future<Output = ()>>(&mut self, shutdown: F) -> Termination {
        let termination = tokio::select! {
            _ = self.run() => Termination::CycleLimit,
            _ = shutdown => Termination::Interrupted,
        };
        self.state = ReporterState::Terminated;
        termination
    }

    /// Uma passada completa pela frota.
    pub async fn run_cycle(&mut self) {
        self.state = ReporterState::Reporting;
        let cycle = self.stats.cycles + 1;
        let (mut delivered, mut failed) = (0u64, 0u64);

        let header = format!(
            "═══ Ciclo {cycle} │ {} ═══",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        if let Err(e) = writeln!(self.console, "{header}") {
            warn!("Erro ao escrever no console: {e}");
        }

        for device in &self.fleet {
            let reading = generate_reading(device, Utc::now(), &mut self.rng);
            self.stats.readings += 1;

            if let Err(e) = print_reading(&mut self.console, device, &reading) {
                warn!("Erro ao escrever no console: {e}");
            }

            match self.sink.deliver(&reading).await {
                Ok(()) => {
                    delivered += 1;
                    self.stats.delivered += 1;
                }
                Err(e) => {
                    failed += 1;
                    self.stats.failed += 1;
                    warn!("Falha ao enviar telemetria de {}: {e}", device.name);
                }
            }
        }

        self.stats.cycles = cycle;
        self.state = ReporterState::IdleWaiting;
        info!(
            "Ciclo {cycle} concluído | {} leituras | {delivered} entregues | {failed} falhas",
            self.fleet.len()
        );
    }
}

fn print_reading<W: Write>(
    out: &mut W,
    device: &Device,
    reading: &TelemetryReading,
) -> io::Result<()> {
    let body = serde_json::to_string_pretty(reading).map_err(io::Error::other)?;
    writeln!(
        out,
        "▸ {} [{}] ({})",
        device.name,
        device.category.as_str(),
        device.id
    )?;
    writeln!(out, "{body}")
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
