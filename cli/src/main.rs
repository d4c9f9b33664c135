mod commands;
mod terminal;

use std::collections::HashSet;
use std::net::Ipv4Addr;

use colored::*;

use commands::{CommandLine, Commands};
use wlancollect_common::network::range::AddressRange;
use wlancollect_core::allocator;
use wlancollect_core::registration::RegistrationService;
use wlancollect_rpc::memory::{
    InventoryValidator, LogNotifier, MemoryHostStore, StaticRangeConfig, StaticTokenContext,
};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    match commands.command {
        Commands::Track { mac, name } => track(&commands.range, &mac, &name),
        Commands::Allocate { in_use } => allocate(&commands.range, in_use),
    }
}

/// Runs one registration against a fresh in-memory inventory and
/// prints the outcome tag plus the resulting records.
fn track(range: &str, mac: &str, name: &str) -> anyhow::Result<()> {
    let store = MemoryHostStore::new();
    let service = RegistrationService::new(
        Box::new(StaticTokenContext::anonymous()),
        Box::new(store.clone()),
        Box::new(StaticRangeConfig::with_range(range)),
        Box::new(InventoryValidator::new(store.clone())),
        Box::new(LogNotifier),
    );

    let outcome = service.track(mac, name);
    println!("{}", outcome.to_string().bold());

    for record in store.records() {
        println!(
            "{} {} {}",
            record.name.green(),
            record.ip,
            record.mac.dimmed()
        );
    }

    Ok(())
}

fn allocate(range: &str, in_use: Vec<Ipv4Addr>) -> anyhow::Result<()> {
    let range: AddressRange = range.parse()?;
    let in_use: HashSet<Ipv4Addr> = in_use.into_iter().collect();

    let addr = allocator::next_free_address(&range, &in_use)?;
    println!("{addr}");

    Ok(())
}
