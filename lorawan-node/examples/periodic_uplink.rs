//! Periodic uplink on the host
//!
//! Runs the starter flow against a simulated stack so the console output can
//! be checked without hardware:
//! - Validates and prints the active board preset
//! - Joins the simulated network
//! - Sends a sensor reading every uplink interval, scaled down to 1 s here
//!
//! Every third uplink gets a downlink, every fifth fails with an RX timeout.

use std::{io::Write as _, thread, time::Duration};

use embedded_hal::blocking::delay::DelayMs;
use lorawan_node::{
    config::{self, NodeConfig},
    console::Console,
    node::{LoRaWanStack, Payload, Starter},
    status::Status,
};

struct Stdout;

impl core::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        std::io::stdout()
            .write_all(s.as_bytes())
            .map_err(|_| core::fmt::Error)
    }
}

struct Sleep;

impl DelayMs<u32> for Sleep {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

struct SimulatedStack {
    uplinks: u32,
}

impl LoRaWanStack for SimulatedStack {
    fn begin_radio(&mut self) -> i16 {
        Status::Success.code()
    }

    fn begin_otaa(&mut self, _join_eui: u64, _dev_eui: u64, _nwk: &[u8; 16], _app: &[u8; 16]) -> i16 {
        Status::Success.code()
    }

    fn activate_otaa(&mut self) -> i16 {
        Status::NewSession.code()
    }

    fn send_receive(&mut self, _uplink: &[u8], _fport: u8, downlink: &mut Payload) -> i16 {
        self.uplinks += 1;
        if self.uplinks % 5 == 0 {
            return Status::RxTimeout.code();
        }
        if self.uplinks % 3 == 0 {
            downlink.extend_from_slice(&[0x01, 0x00, 0x3C]).ok();
            return 1;
        }
        0
    }
}

// Sensor data structure
#[derive(Default)]
struct SensorData {
    temperature: i16,
    humidity: u8,
    pressure: u16,
}

impl SensorData {
    fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..2].copy_from_slice(&self.temperature.to_be_bytes());
        bytes[2] = self.humidity;
        bytes[3..5].copy_from_slice(&self.pressure.to_be_bytes());
        bytes
    }
}

fn main() {
    let config = NodeConfig {
        uplink_interval: Duration::from_secs(1),
        ..config::ACTIVE
    };

    let mut console = Console::new(Stdout, Sleep);
    console.println(format_args!("Board: {}", config.board.name));
    console.println(format_args!("Band: {}", config.band));
    console.println(format_args!("Credentials: {:?}", config.credentials));
    console.println("JoinEUI / DevEUI:");
    console.array_dump(&config.credentials.join_eui_bytes());
    console.array_dump(&config.credentials.dev_eui_bytes());

    let mut node = Starter::new(SimulatedStack { uplinks: 0 }, console, config);
    node.setup();

    let mut sensor = SensorData::default();
    node.run(2, |payload| {
        sensor.temperature = sensor.temperature.wrapping_add(1);
        sensor.humidity = 60;
        sensor.pressure = 1013;
        payload.extend_from_slice(&sensor.to_bytes()).ok();
    });
}
