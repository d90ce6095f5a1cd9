//! Gerador da frota – executado uma única vez, antes do loop de relatório.

use chrono::{DateTime, TimeDelta, Utc};
use hvac_core::types::{Device, DeviceCategory, Location, Manufacturer, Specification};
use rand::{Rng, RngCore};
use std::collections::HashSet;
use uuid::{Builder, Uuid};

/// Idade máxima de instalação (5 anos, em dias).
pub const MAX_INSTALL_AGE_DAYS: i64 = 5 * 365;
/// Idade máxima da última manutenção (dias).
pub const MAX_MAINTENANCE_AGE_DAYS: i64 = 180;

const BUILDINGS: std::ops::RangeInclusive<u32> = 1..=10;
const FLOORS: std::ops::RangeInclusive<u32> = 1..=20;
const ROOMS: std::ops::RangeInclusive<u32> = 1..=50;
const CAPACITY_BTU: std::ops::RangeInclusive<u32> = 12_000..=120_000;
const SEER: std::ops::Range<f64> = 13.0..22.0;

/// Gera `count` dispositivos com identificadores distintos.
///
/// Todas as escolhas são uniformes sobre cada conjunto/intervalo.
/// Datas são recuadas a partir de `now`.
pub fn generate_fleet<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Device> {
    let mut fleet = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    for index in 0..count {
        let mut id = random_uuid(rng);
        // Colisão de UUID v4 é improvável, mas a unicidade é garantida aqui.
        while !seen.insert(id) {
            id = random_uuid(rng);
        }
        fleet.push(generate_device(index, id, now, rng));
    }
    fleet
}

/// Nome de exibição a partir do ordinal (base 0).
pub fn device_name(index: usize) -> String {
    format!("HVAC-{:03}", index + 1)
}

fn generate_device<R: Rng + ?Sized>(
    index: usize,
    id: Uuid,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Device {
    let install_date = backdate(now, MAX_INSTALL_AGE_DAYS, rng);
    let last_maintenance = backdate(now, MAX_MAINTENANCE_AGE_DAYS, rng).max(install_date);

    Device {
        id,
        name: device_name(index),
        category: pick(&DeviceCategory::ALL, rng),
        manufacturer: pick(&Manufacturer::ALL, rng),
        install_date,
        last_maintenance,
        location: Location {
            building: rng.random_range(BUILDINGS),
            floor: rng.random_range(FLOORS),
            room: rng.random_range(ROOMS),
        },
        specification: Specification {
            cooling_capacity_btu: rng.random_range(CAPACITY_BTU),
            efficiency_seer: rng.random_range(SEER),
        },
    }
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

fn backdate<R: Rng + ?Sized>(now: DateTime<Utc>, max_days: i64, rng: &mut R) -> DateTime<Utc> {
    let secs = rng.random_range(0..=max_days * 86_400);
    now - TimeDelta::seconds(secs)
}

fn pick<T: Copy, R: Rng + ?Sized>(options: &[T], rng: &mut R) -> T {
    options[rng.random_range(0..options.len())]
}
