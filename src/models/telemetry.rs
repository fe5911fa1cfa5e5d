//! Telemetry snapshot types matching the device's `/api/sensors` contract.

use serde::{Deserialize, Serialize};

/// Operating modes reported by the inverter firmware (Modbus register 25201).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverterMode {
    PowerOn,
    Standby,
    Mains,
    OffGrid,
    Bypass,
    Charging,
    Fault,
}

impl InverterMode {
    /// Numeric mode id as reported by the device.
    pub fn id(self) -> u8 {
        match self {
            InverterMode::PowerOn => 0,
            InverterMode::Standby => 1,
            InverterMode::Mains => 2,
            InverterMode::OffGrid => 3,
            InverterMode::Bypass => 4,
            InverterMode::Charging => 5,
            InverterMode::Fault => 6,
        }
    }

    /// Human-readable label shown on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            InverterMode::PowerOn => "Power On",
            InverterMode::Standby => "Standby",
            InverterMode::Mains => "Mains",
            InverterMode::OffGrid => "Off-Grid",
            InverterMode::Bypass => "Bypass",
            InverterMode::Charging => "Charging",
            InverterMode::Fault => "Fault",
        }
    }
}

/// Battery charger readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerReadings {
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub accumulated_power: f64,
}

/// Solar array readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvReadings {
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

/// Battery bank readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryReadings {
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub soc: f64,
    pub temperature: f64,
}

/// Inverter output readings and rated limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterReadings {
    pub mode: String,
    pub mode_id: u8,
    pub ac_voltage: f64,
    pub ac_current: f64,
    pub ac_frequency: f64,
    pub ac_power: f64,
    pub load_percent: f64,
    pub dc_voltage: f64,
    pub max_charge_current: u32,
    pub max_discharge_current: u32,
    pub accumulated_power: f64,
}

/// Lifetime energy counters and device temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalReadings {
    pub total_charged: f64,
    pub total_discharged: f64,
    pub device_temperature: f64,
}

/// One point-in-time reading of every simulated sensor group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub charger: ChargerReadings,
    pub pv: PvReadings,
    pub battery: BatteryReadings,
    pub inverter: InverterReadings,
    pub totals: TotalReadings,
    /// Epoch seconds the snapshot was generated at.
    pub last_update: i64,
    /// Whole seconds since the process started.
    pub uptime: u64,
    pub modbus_error: bool,
    pub demo_mode: bool,
}
