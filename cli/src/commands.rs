use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wlancollect")]
#[command(about = "WLAN device self-registration against a host inventory.")]
pub struct CommandLine {
    /// Address range to allocate from, in CIDR notation
    #[arg(long, default_value = "192.168.50.0/24")]
    pub range: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a MAC address as a new inventory host
    #[command(alias = "t")]
    Track {
        /// Hardware address in any common spelling
        mac: String,
        /// Name for the new host record
        name: String,
    },
    /// Show the next address the allocator would hand out
    #[command(alias = "a")]
    Allocate {
        /// Addresses to treat as already assigned
        #[arg(long, value_delimiter = ',')]
        in_use: Vec<std::net::Ipv4Addr>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
