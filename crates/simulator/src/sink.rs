//! Sinks remotos de telemetria.
//!
//! O loop de relatório só conhece [`TelemetrySink`]; "desabilitado" é o
//! [`NoopSink`]. Não há retry: uma falha é devolvida ao chamador, que registra
//! e segue para o próximo dispositivo.

use hvac_core::config::SinkConfig;
use hvac_core::types::TelemetryReading;
use reqwest::Url;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Erro de entrega a um sink remoto.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Falha na requisição HTTP: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Coletor retornou HTTP {0}")]
    HttpStatus(u16),

    #[error("URL de sink inválida: {0}")]
    InvalidUrl(String),
}

/// Destino de uma leitura de telemetria.
pub trait TelemetrySink {
    /// Entrega uma leitura. Uma única tentativa.
    fn deliver(&self, reading: &TelemetryReading) -> impl Future<Output = Result<(), SinkError>>;
}

// ──────────────────────────────────────────────
// Desabilitado
// ──────────────────────────────────────────────

/// Sink que descarta tudo (envio remoto desabilitado).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    async fn deliver(&self, _reading: &TelemetryReading) -> Result<(), SinkError> {
        Ok(())
    }
}

// ──────────────────────────────────────────────
// HTTP
// ──────────────────────────────────────────────

/// POST JSON de cada leitura para um coletor HTTP.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    url: Url,
}

impl HttpSink {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

impl TelemetrySink for HttpSink {
    async fn deliver(&self, reading: &TelemetryReading) -> Result<(), SinkError> {
        let response = self.client.post(self.url.clone()).json(reading).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::HttpStatus(status.as_u16()));
        }
        info!("Telemetria enviada: {} → HTTP {}", reading.device_name, status.as_u16());
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Seleção a partir da configuração
// ──────────────────────────────────────────────

/// Sink escolhido a partir de `sink.url`: vazia desabilita, `http(s)` faz POST.
#[derive(Debug)]
pub enum ConfiguredSink {
    Disabled(NoopSink),
    Http(HttpSink),
}

impl ConfiguredSink {
    pub fn from_config(config: &SinkConfig) -> Result<Self, SinkError> {
        let Some(raw) = config.url() else {
            return Ok(Self::Disabled(NoopSink));
        };
        let url = Url::parse(raw).map_err(|e| SinkError::InvalidUrl(format!("{raw} ({e})")))?;

        match url.scheme() {
            "http" | "https" => Ok(Self::Http(HttpSink::new(url, config.timeout())?)),
            other => Err(SinkError::InvalidUrl(format!("{raw} (esquema {other})"))),
        }
    }
}

impl TelemetrySink for ConfiguredSink {
    async fn deliver(&self, reading: &TelemetryReading) -> Result<(), SinkError> {
        match self {
            Self::Disabled(sink) => sink.deliver(reading).await,
            Self::Http(sink) => sink.deliver(reading).await,
        }
    }
}

impl fmt::Display for ConfiguredSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled(_) => write!(f, "desabilitado"),
            Self::Http(sink) => write!(f, "HTTP POST → {}", sink.url),
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
