//! Gerador de telemetria – uma leitura independente por dispositivo e ciclo.
//!
//! Sub-modelos térmico, elétrico e de vazão são amostrados de forma
//! independente; nenhuma correlação é modelada entre eles nem entre ciclos.

use chrono::{DateTime, Utc};
use hvac_core::types::{
    AlarmCode, Device, FilterStatus, OperatingMode, PowerReadings, Pressures, TelemetryReading,
    Temperatures,
};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use std::ops::Range;
use std::sync::LazyLock;

/// Probabilidade de cada modo de operação.
pub const MODE_WEIGHTS: [(OperatingMode, f64); 3] = [
    (OperatingMode::Cooling, 0.70),
    (OperatingMode::Heating, 0.09),
    (OperatingMode::Idle, 0.21),
];

/// Probabilidade de filtro sinalizar troca.
pub const FILTER_REPLACE_PROBABILITY: f64 = 0.10;
/// Probabilidade de um alarme por leitura.
pub const ALARM_PROBABILITY: f64 = 0.05;

const RETURN_TEMP: Range<f64> = 20.0..30.0;
const SUPPLY_OFFSET: Range<f64> = 5.0..8.0;
const JITTER: Range<f64> = -1.0..1.0;
const OUTDOOR_TEMP: Range<f64> = 15.0..35.0;
const SUCTION_PSI: Range<f64> = 60.0..80.0;
const DISCHARGE_PSI: Range<f64> = 150.0..250.0;
const NOMINAL_VOLTAGE: f64 = 208.0;
const VOLTAGE_SWING: Range<f64> = -5.0..5.0;
const IDLE_CURRENT: Range<f64> = 2.0..5.0;
const IDLE_CONSUMPTION: Range<f64> = 0.5..1.5;
const RUNNING_CURRENT: Range<f64> = 10.0..25.0;
const RUNNING_CONSUMPTION: Range<f64> = 3.0..10.0;
const AIRFLOW_CFM: Range<f64> = 1000.0..3000.0;

static MODE_DISTRIBUTION: LazyLock<WeightedIndex<f64>> = LazyLock::new(|| {
    WeightedIndex::new(MODE_WEIGHTS.iter().map(|(_, w)| *w))
        .expect("pesos de modo são constantes válidas")
});

/// Sorteia o modo de operação segundo [`MODE_WEIGHTS`].
pub fn sample_mode<R: Rng + ?Sized>(rng: &mut R) -> OperatingMode {
    MODE_WEIGHTS[MODE_DISTRIBUTION.sample(rng)].0
}

/// Gera uma leitura para `device` com carimbo `now`.
pub fn generate_reading<R: Rng + ?Sized>(
    device: &Device,
    now: DateTime<Utc>,
    rng: &mut R,
) -> TelemetryReading {
    let mode = sample_mode(rng);

    // ── Térmico ──
    let base_return = rng.random_range(RETURN_TEMP);
    let base_supply = match mode {
        OperatingMode::Cooling => base_return - rng.random_range(SUPPLY_OFFSET),
        OperatingMode::Heating => base_return + rng.random_range(SUPPLY_OFFSET),
        OperatingMode::Idle => base_return,
    };
    let temperatures = Temperatures {
        return_air: base_return + rng.random_range(JITTER),
        supply_air: base_supply + rng.random_range(JITTER),
        outdoor: rng.random_range(OUTDOOR_TEMP),
    };

    let pressures = Pressures {
        suction: rng.random_range(SUCTION_PSI),
        discharge: rng.random_range(DISCHARGE_PSI),
    };

    // ── Elétrico ──
    let voltage = NOMINAL_VOLTAGE + rng.random_range(VOLTAGE_SWING);
    let (current, consumption) = if mode.is_idle() {
        (rng.random_range(IDLE_CURRENT), rng.random_range(IDLE_CONSUMPTION))
    } else {
        (rng.random_range(RUNNING_CURRENT), rng.random_range(RUNNING_CONSUMPTION))
    };

    let airflow = if mode.is_idle() {
        0.0
    } else {
        rng.random_range(AIRFLOW_CFM)
    };

    let filter_status = if rng.random_bool(FILTER_REPLACE_PROBABILITY) {
        FilterStatus::Replace
    } else {
        FilterStatus::Ok
    };

    let alarms = if rng.random_bool(ALARM_PROBABILITY) {
        vec![AlarmCode::HighPressure]
    } else {
        Vec::new()
    };

    TelemetryReading {
        timestamp: now,
        device_id: device.id,
        device_name: device.name.clone(),
        mode,
        temperatures,
        pressures,
        power: PowerReadings {
            voltage,
            current,
            consumption,
        },
        airflow,
        filter_status,
        alarms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::generate_fleet;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SAMPLES: usize = 20_000;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    fn sample(seed: u64) -> Vec<TelemetryReading> {
        let mut rng = StdRng::seed_from_u64(seed);
        let device = generate_fleet(1, now(), &mut rng).remove(0);
        (0..SAMPLES)
            .map(|_| generate_reading(&device, now(), &mut rng))
            .collect()
    }

    fn fraction(readings: &[TelemetryReading], pred: impl Fn(&TelemetryReading) -> bool) -> f64 {
        readings.iter().filter(|r| pred(r)).count() as f64 / readings.len() as f64
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = MODE_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reading_references_device() {
        let mut rng = StdRng::seed_from_u64(11);
        let device = generate_fleet(1, now(), &mut rng).remove(0);
        let reading = generate_reading(&device, now(), &mut rng);
        assert_eq!(reading.device_id, device.id);
        assert_eq!(reading.device_name, device.name);
        assert_eq!(reading.timestamp, now());
    }

    #[test]
    fn idle_readings_have_no_airflow_and_low_power() {
        for r in sample(1).iter().filter(|r| r.mode.is_idle()) {
            assert_eq!(r.airflow, 0.0);
            assert!(IDLE_CURRENT.contains(&r.power.current), "corrente {}", r.power.current);
            assert!(IDLE_CONSUMPTION.contains(&r.power.consumption));
            assert!((r.temperatures.supply_air - r.temperatures.return_air).abs() < 2.0);
        }
    }

    #[test]
    fn running_readings_use_running_ranges() {
        for r in sample(2).iter().filter(|r| !r.mode.is_idle()) {
            assert!(AIRFLOW_CFM.contains(&r.airflow));
            assert!(RUNNING_CURRENT.contains(&r.power.current));
            assert!(RUNNING_CONSUMPTION.contains(&r.power.consumption));
        }
    }

    #[test]
    fn supply_offset_follows_mode() {
        for r in sample(3) {
            let delta = r.temperatures.supply_air - r.temperatures.return_air;
            match r.mode {
                OperatingMode::Cooling => {
                    assert!(delta > -10.0 && delta < -3.0, "cooling Δ={delta}")
                }
                OperatingMode::Heating => {
                    assert!(delta > 3.0 && delta < 10.0, "heating Δ={delta}")
                }
                OperatingMode::Idle => assert!(delta > -2.0 && delta < 2.0, "idle Δ={delta}"),
            }
        }
    }

    #[test]
    fn independent_values_stay_in_range() {
        for r in sample(4) {
            assert!(r.temperatures.return_air >= 19.0 && r.temperatures.return_air < 31.0);
            assert!(OUTDOOR_TEMP.contains(&r.temperatures.outdoor));
            assert!(SUCTION_PSI.contains(&r.pressures.suction));
            assert!(DISCHARGE_PSI.contains(&r.pressures.discharge));
            assert!(r.power.voltage >= 203.0 && r.power.voltage < 213.0);
            assert!(r.alarms.len() <= 1);
        }
    }

    #[test]
    fn mode_frequencies_match_weights() {
        let readings = sample(5);
        let cooling = fraction(&readings, |r| r.mode == OperatingMode::Cooling);
        let heating = fraction(&readings, |r| r.mode == OperatingMode::Heating);
        let idle = fraction(&readings, |r| r.mode == OperatingMode::Idle);
        assert!((cooling - 0.70).abs() < 0.02, "cooling {cooling}");
        assert!((heating - 0.09).abs() < 0.015, "heating {heating}");
        assert!((idle - 0.21).abs() < 0.02, "idle {idle}");
    }

    #[test]
    fn filter_replace_about_ten_percent() {
        let replace = fraction(&sample(6), |r| r.filter_status == FilterStatus::Replace);
        assert!((replace - 0.10).abs() < 0.02, "replace {replace}");
    }

    #[test]
    fn alarms_about_five_percent() {
        let readings = sample(7);
        let alarmed = fraction(&readings, |r| !r.alarms.is_empty());
        assert!((alarmed - 0.05).abs() < 0.015, "alarmes {alarmed}");
        assert!(
            readings
                .iter()
                .flat_map(|r| &r.alarms)
                .all(|a| *a == AlarmCode::HighPressure)
        );
    }

    #[test]
    fn same_seed_same_readings() {
        assert_eq!(sample(8)[..50], sample(8)[..50]);
    }
}
