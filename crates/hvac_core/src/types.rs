//! Definição de tipos/structs da frota e da telemetria HVAC.
//!
//! [`Device`] é gerado uma única vez por execução e nunca é alterado.
//! [`TelemetryReading`] é amostrado de novo a cada ciclo, sem memória do anterior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ──────────────────────────────────────────────
// Enumerações fixas
// ──────────────────────────────────────────────

/// Classe de equipamento HVAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    SplitSystem,
    PackagedUnit,
    HeatPump,
    Chiller,
    RooftopUnit,
    FanCoilUnit,
}

impl DeviceCategory {
    pub const ALL: [DeviceCategory; 6] = [
        DeviceCategory::SplitSystem,
        DeviceCategory::PackagedUnit,
        DeviceCategory::HeatPump,
        DeviceCategory::Chiller,
        DeviceCategory::RooftopUnit,
        DeviceCategory::FanCoilUnit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::SplitSystem => "Split System",
            DeviceCategory::PackagedUnit => "Packaged Unit",
            DeviceCategory::HeatPump => "Heat Pump",
            DeviceCategory::Chiller => "Chiller",
            DeviceCategory::RooftopUnit => "Rooftop Unit",
            DeviceCategory::FanCoilUnit => "Fan Coil Unit",
        }
    }
}

/// Fabricante do equipamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    Carrier,
    Trane,
    Daikin,
    Lennox,
    York,
    Rheem,
}

impl Manufacturer {
    pub const ALL: [Manufacturer; 6] = [
        Manufacturer::Carrier,
        Manufacturer::Trane,
        Manufacturer::Daikin,
        Manufacturer::Lennox,
        Manufacturer::York,
        Manufacturer::Rheem,
    ];
}

/// Modo de operação instantâneo de uma leitura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    Cooling,
    Heating,
    Idle,
}

impl OperatingMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, OperatingMode::Idle)
    }
}

/// Estado do filtro de ar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStatus {
    Ok,
    Replace,
}

/// Códigos de alarme emitidos pelo equipamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmCode {
    #[serde(rename = "HIGH_PRESSURE")]
    HighPressure,
}

// ──────────────────────────────────────────────
// Dispositivo
// ──────────────────────────────────────────────

/// Localização física do equipamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub building: u32,
    pub floor: u32,
    pub room: u32,
}

/// Especificação nominal do equipamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Capacidade de refrigeração (BTU/h)
    pub cooling_capacity_btu: u32,
    /// Eficiência sazonal (SEER)
    pub efficiency_seer: f64,
}

/// Equipamento simulado da frota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    pub category: DeviceCategory,
    pub manufacturer: Manufacturer,
    pub install_date: DateTime<Utc>,
    pub last_maintenance: DateTime<Utc>,
    pub location: Location,
    pub specification: Specification,
}

// ──────────────────────────────────────────────
// Leitura de telemetria
// ──────────────────────────────────────────────

/// Temperaturas (°C).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    /// Ar de retorno
    pub return_air: f64,
    /// Ar de insuflamento
    pub supply_air: f64,
    /// Externa
    pub outdoor: f64,
}

/// Pressões do circuito frigorífico (psi).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pressures {
    pub suction: f64,
    pub discharge: f64,
}

/// Grandezas elétricas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerReadings {
    /// Tensão (V)
    pub voltage: f64,
    /// Corrente (A)
    pub current: f64,
    /// Consumo (kW)
    pub consumption: f64,
}

/// Leitura completa de telemetria enviada aos sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReading {
    pub timestamp: DateTime<Utc>,
    pub device_id: Uuid,
    pub device_name: String,
    pub mode: OperatingMode,
    pub temperatures: Temperatures,
    pub pressures: Pressures,
    pub power: PowerReadings,
    /// Vazão de ar (CFM)
    pub airflow: f64,
    pub filter_status: FilterStatus,
    pub alarms: Vec<AlarmCode>,
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reading() -> TelemetryReading {
        TelemetryReading {
            timestamp: "2024-06-01T12:00:00Z".parse().unwrap(),
            device_id: Uuid::nil(),
            device_name: "HVAC-001".into(),
            mode: OperatingMode::Cooling,
            temperatures: Temperatures {
                return_air: 24.5,
                supply_air: 17.9,
                outdoor: 31.2,
            },
            pressures: Pressures {
                suction: 70.1,
                discharge: 210.4,
            },
            power: PowerReadings {
                voltage: 207.3,
                current: 14.8,
                consumption: 6.2,
            },
            airflow: 1850.0,
            filter_status: FilterStatus::Replace,
            alarms: vec![AlarmCode::HighPressure],
        }
    }

    #[test]
    fn reading_json_uses_nested_groups() {
        let json = serde_json::to_value(sample_reading()).unwrap();
        assert_eq!(json["mode"], "cooling");
        assert_eq!(json["filter_status"], "replace");
        assert_eq!(json["alarms"][0], "HIGH_PRESSURE");
        assert_eq!(json["temperatures"]["return_air"], 24.5);
        assert_eq!(json["pressures"]["discharge"], 210.4);
        assert_eq!(json["power"]["voltage"], 207.3);
        assert_eq!(json["device_name"], "HVAC-001");
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&DeviceCategory::RooftopUnit).unwrap();
        assert_eq!(json, "\"rooftop_unit\"");
        assert_eq!(DeviceCategory::RooftopUnit.as_str(), "Rooftop Unit");
    }

    #[test]
    fn only_idle_is_idle() {
        assert!(OperatingMode::Idle.is_idle());
        assert!(!OperatingMode::Cooling.is_idle());
        assert!(!OperatingMode::Heating.is_idle());
    }
}
