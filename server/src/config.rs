use std::path::PathBuf;

use clap::Parser;

use medifind_common::location::GeoLocation;

#[derive(Parser, Debug, Clone)]
#[command(name = "medifind-server", about = "MediFind medicine search and price alert server")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    /// HTTP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory of static frontend files served for non-API paths.
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Real-time events buffered per subscriber before it starts skipping.
    #[arg(long, env = "ALERT_CAPACITY", default_value_t = 64)]
    pub alert_capacity: usize,

    /// Latitude used to estimate distances when a caller gives no coordinates.
    #[arg(long, env = "REFERENCE_LAT", default_value_t = 12.9716, allow_negative_numbers = true)]
    pub reference_lat: f64,

    /// Longitude used to estimate distances when a caller gives no coordinates.
    #[arg(long, env = "REFERENCE_LNG", default_value_t = 77.5946, allow_negative_numbers = true)]
    pub reference_lng: f64,
}

impl Cli {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn reference_point(&self) -> GeoLocation {
        GeoLocation::new(self.reference_lat, self.reference_lng)
    }
}
