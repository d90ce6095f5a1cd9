//! Configuração do simulador via TOML.
//!
//! Os valores padrão reproduzem as constantes de fábrica: 100 dispositivos,
//! relatório a cada 60 s, 60 ciclos e nenhum sink remoto.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Intervalo mínimo aceito entre ciclos (ms).
pub const MIN_INTERVAL_MS: u64 = 100;
/// Intervalo máximo aceito entre ciclos (ms) – 24 h.
pub const MAX_INTERVAL_MS: u64 = 86_400_000;

/// Esquemas aceitos em `sink.url`.
const SINK_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Parâmetros da simulação.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Quantidade de dispositivos na frota
    pub fleet_size: usize,
    /// Intervalo entre ciclos de relatório (ms)
    pub interval_ms: u64,
    /// Máximo de ciclos (0 = sem limite)
    pub max_cycles: u64,
    /// Semente do gerador aleatório (0 = entropia do SO)
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            fleet_size: 100,
            interval_ms: 60_000,
            max_cycles: 60,
            seed: 0,
        }
    }
}

impl SimulatorConfig {
    /// Limite de ciclos, `None` quando ilimitado.
    pub fn cycle_limit(&self) -> Option<u64> {
        (self.max_cycles > 0).then_some(self.max_cycles)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Semente fixa, `None` para semear pela entropia do SO.
    pub fn seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}

/// Destino remoto da telemetria.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// URL do coletor HTTP(S) (vazio = desabilitado)
    pub url: String,
    /// Timeout por requisição HTTP (segundos)
    pub timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

impl SinkConfig {
    /// URL configurada, `None` quando o envio remoto está desabilitado.
    pub fn url(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulator: SimulatorConfig,
    pub sink: SinkConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Substitui cada campo inválido pelo seu padrão, mantendo os válidos.
    ///
    /// Retorna uma mensagem por campo substituído (valor rejeitado → padrão).
    pub fn sanitize(&mut self) -> Vec<String> {
        let sim_default = SimulatorConfig::default();
        let sink_default = SinkConfig::default();
        let mut replaced = Vec::new();

        if self.simulator.fleet_size == 0 {
            replaced.push(format!(
                "simulator.fleet_size = 0 → {}",
                sim_default.fleet_size
            ));
            self.simulator.fleet_size = sim_default.fleet_size;
        }
        if !interval_in_range(self.simulator.interval_ms) {
            replaced.push(format!(
                "simulator.interval_ms = {} → {}",
                self.simulator.interval_ms, sim_default.interval_ms
            ));
            self.simulator.interval_ms = sim_default.interval_ms;
        }
        if self.sink.timeout_secs == 0 {
            replaced.push(format!(
                "sink.timeout_secs = 0 → {}",
                sink_default.timeout_secs
            ));
            self.sink.timeout_secs = sink_default.timeout_secs;
        }
        if !sink_url_supported(&self.sink) {
            replaced.push(format!(
                "sink.url = {:?} → {:?} (envio remoto desabilitado)",
                self.sink.url, sink_default.url
            ));
            self.sink.url = sink_default.url;
        }

        replaced
    }
}

fn interval_in_range(interval_ms: u64) -> bool {
    (MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms)
}

/// URL vazia (desabilitado) ou com esquema HTTP(S).
fn sink_url_supported(sink: &SinkConfig) -> bool {
    sink.url().is_none_or(|url| {
        let lower = url.to_ascii_lowercase();
        SINK_SCHEMES.iter().any(|s| lower.starts_with(s))
    })
}
