//! Telemetry simulator.
//!
//! Synthesizes the same demo data the device firmware produces when no
//! inverter is attached: every instantaneous reading shares one slow sine
//! oscillation so the groups move together, and the energy counters creep
//! upward on an hourly time base with a modulo wraparound.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{
    BatteryReadings, ChargerReadings, InverterMode, InverterReadings, PvReadings, TelemetrySnapshot,
    TotalReadings,
};

/// Rated charge/discharge limits of the simulated inverter, in amps.
const MAX_CHARGE_CURRENT: u32 = 60;
const MAX_DISCHARGE_CURRENT: u32 = 60;

/// Current wall-clock time as fractional epoch seconds.
pub fn epoch_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Build the telemetry snapshot for the given instant.
///
/// Deterministic: equal `epoch_secs` and `uptime_secs` always yield an
/// identical snapshot. `uptime_secs` is the caller's seconds-since-start.
pub fn snapshot_at(epoch_secs: f64, uptime_secs: u64) -> TelemetrySnapshot {
    // Slow oscillation shared by every instantaneous reading, period ~188s.
    let variance = (epoch_secs / 30.0).sin() * 0.1;

    // Solar PV under partial sun; power is the actual V*I product.
    let pv_voltage = 85.0 + variance * 10.0;
    let pv_current = 4.5 + variance * 2.0;
    let pv_power = pv_voltage * pv_current;

    // Charger
    let charger_voltage = 54.2 + variance * 0.5;
    let charger_current = 8.2 + variance * 1.0;
    let charger_power = 445.0 + variance * 50.0;

    // Battery at mid state of charge
    let battery_voltage = 52.8 + variance * 0.3;
    let battery_current = 8.0 + variance * 1.5;
    let battery_power = 422.0 + variance * 40.0;
    let battery_soc = 65.0 + variance * 5.0;
    let battery_temp = 25.0 + variance * 2.0;

    // Inverter running off-grid with a partial load
    let ac_voltage = 220.0 + variance * 2.0;
    let ac_current = 2.5 + variance * 0.5;
    let ac_frequency = 50.0 + variance * 0.1;
    let ac_power = 550.0 + variance * 50.0;
    let load_percent = 27.5 + variance * 5.0;
    let dc_voltage = 52.8 + variance * 0.3;

    // Energy counters: sawtooth on an hourly time base so they keep climbing
    // during a dev session without overflowing.
    let time_hours = epoch_secs / 3600.0;
    let charger_accumulated = 12.5 + (time_hours * 0.1) % 5.0;
    let total_charged = 245.8 + (time_hours * 0.2) % 10.0;
    let total_discharged = 198.3 + (time_hours * 0.15) % 8.0;

    let device_temp = 42.0 + variance * 3.0;

    let mode = InverterMode::OffGrid;

    TelemetrySnapshot {
        charger: ChargerReadings {
            voltage: round_to(charger_voltage, 1),
            current: round_to(charger_current, 2),
            power: round_to(charger_power, 0),
            accumulated_power: round_to(charger_accumulated, 1),
        },
        pv: PvReadings {
            voltage: round_to(pv_voltage, 1),
            current: round_to(pv_current, 2),
            power: round_to(pv_power, 0),
        },
        battery: BatteryReadings {
            voltage: round_to(battery_voltage, 1),
            current: round_to(battery_current, 2),
            power: round_to(battery_power, 0),
            soc: round_to(battery_soc, 0),
            temperature: round_to(battery_temp, 1),
        },
        inverter: InverterReadings {
            mode: mode.label().to_string(),
            mode_id: mode.id(),
            ac_voltage: round_to(ac_voltage, 1),
            ac_current: round_to(ac_current, 2),
            ac_frequency: round_to(ac_frequency, 2),
            ac_power: round_to(ac_power, 0),
            load_percent: round_to(load_percent, 0),
            dc_voltage: round_to(dc_voltage, 1),
            max_charge_current: MAX_CHARGE_CURRENT,
            max_discharge_current: MAX_DISCHARGE_CURRENT,
            accumulated_power: round_to(total_discharged, 1),
        },
        totals: TotalReadings {
            total_charged: round_to(total_charged, 1),
            total_discharged: round_to(total_discharged, 1),
            device_temperature: round_to(device_temp, 1),
        },
        last_update: epoch_secs as i64,
        uptime: uptime_secs,
        modbus_error: false,
        demo_mode: true,
    }
}

/// Round to a fixed number of decimals, matching real-device resolution.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
