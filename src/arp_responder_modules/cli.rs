use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::capture::{
    CaptureOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SNAP_LEN, DEFAULT_WRITE_TIMEOUT_MS,
};

/// Answer ARP requests for one IPv4 address with a chosen MAC address
#[derive(Parser, Debug)]
#[command(name = "arp_responder", version, about, long_about = None)]
pub struct Args {
    /// Interface name
    #[arg(short, long, default_value = "eth0")]
    pub interface: String,

    /// IP address to answer for
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// MAC address to announce (defaults to the interface's own)
    #[arg(short, long)]
    pub mac: Option<String>,

    /// Append a JSON line per answered request to this file
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// How often the capture loop checks for shutdown, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_ms: u64,

    /// Give up on sending a reply after this many milliseconds
    #[arg(long, default_value_t = DEFAULT_WRITE_TIMEOUT_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub write_timeout_ms: u64,
}

impl Args {
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            snap_len: DEFAULT_SNAP_LEN,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            write_timeout: Duration::from_millis(self.write_timeout_ms),
        }
    }
}
