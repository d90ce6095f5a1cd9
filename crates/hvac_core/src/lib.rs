//! # HVAC Core
//!
//! Crate compartilhada que define o modelo de dados da frota HVAC e a
//! configuração TOML do simulador.
//!
//! ## Módulos
//! - [`types`] – Dispositivo, leitura de telemetria e enumerações fixas
//! - [`config`] – Configuração unificada via TOML

pub mod types;
pub mod config;

// Re-exports convenientes
pub use types::{Device, TelemetryReading};
pub use config::{AppConfig, SimulatorConfig, SinkConfig};
