//! CLI subcommand handlers
//!
//! Each command loads a network file, applies one edit or query and writes
//! the file back when it changed.

use std::path::Path;

use anyhow::{bail, Context, Result};
use netpath::{
    load_network, save_network, DeviceType, Network, NetpathConfig, NetpathError,
};

use crate::{config, output::OutputHandler};

fn output_for(config: &NetpathConfig) -> OutputHandler {
    OutputHandler::new(config.display.color, config.display.show_distances)
}

fn open(file: &Path) -> Result<Network> {
    load_network(file).with_context(|| format!("Failed to load network from {}", file.display()))
}

fn store(network: &Network, file: &Path) -> Result<()> {
    save_network(network, file)
        .with_context(|| format!("Failed to save network to {}", file.display()))
}

/// Create an empty network file
pub fn new_network(file: &Path, force: bool, config: &NetpathConfig) -> Result<()> {
    let output = output_for(config);

    if file.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            file.display()
        );
    }

    store(&Network::new(), file)?;
    output.print_success(&format!("Created empty network {}", file.display()));
    Ok(())
}

/// Add a device
pub fn add_device(
    file: &Path,
    device_type: &str,
    x: f64,
    y: f64,
    config: &NetpathConfig,
) -> Result<()> {
    let output = output_for(config);
    let mut network = open(file)?;

    let device_type: DeviceType = device_type.parse()?;
    let id = network.add_device(device_type, x, y);
    store(&network, file)?;

    if let Some(device) = network.device(id) {
        output.print_success(&format!("Added {}", device.label()));
    }
    Ok(())
}

/// Connect two devices by label
pub fn connect(file: &Path, a: &str, b: &str, config: &NetpathConfig) -> Result<()> {
    let output = output_for(config);
    let mut network = open(file)?;

    let a_id = network.device_by_label(a)?.id;
    let b_id = network.device_by_label(b)?.id;

    if a_id == b_id {
        output.print_warning("A device cannot be connected to itself");
        return Ok(());
    }

    if !network.add_connection(a_id, b_id)? {
        output.print_warning(&format!("{} and {} are already connected", a, b));
        return Ok(());
    }

    store(&network, file)?;
    output.print_success(&format!("Connected {} and {}", a, b));
    Ok(())
}

/// Remove the connection between two devices
pub fn disconnect(file: &Path, a: &str, b: &str, config: &NetpathConfig) -> Result<()> {
    let output = output_for(config);
    let mut network = open(file)?;

    let a_id = network.device_by_label(a)?.id;
    let b_id = network.device_by_label(b)?.id;

    if network.remove_connection(a_id, b_id) {
        store(&network, file)?;
        output.print_success(&format!("Disconnected {} and {}", a, b));
    } else {
        output.print_warning(&format!("{} and {} are not connected", a, b));
    }
    Ok(())
}

/// Remove a device and its connections
pub fn remove_device(file: &Path, label: &str, config: &NetpathConfig) -> Result<()> {
    let output = output_for(config);
    let mut network = open(file)?;

    let id = network.device_by_label(label)?.id;
    let dropped = network.connections().iter().filter(|c| c.touches(id)).count();
    network.remove_device(id);
    store(&network, file)?;

    output.print_success(&format!(
        "Removed {} and {} connection{}",
        label,
        dropped,
        if dropped == 1 { "" } else { "s" }
    ));
    Ok(())
}

/// Show devices and connections
pub fn show(file: &Path, config: &NetpathConfig) -> Result<()> {
    let output = output_for(config);
    let network = open(file)?;

    output.print_header(&format!("Network {}", file.display()));

    if network.device_count() == 0 {
        output.print_info("No devices. Add one with `netpath add`.");
        return Ok(());
    }

    let devices: Vec<_> = network
        .devices()
        .enumerate()
        .map(|(i, d)| {
            let links = network
                .connections()
                .iter()
                .filter(|c| c.touches(d.id))
                .count();
            (i, d.label(), d.x, d.y, links)
        })
        .collect();
    output.print_devices_table(&devices);

    output.print_header("Connections");
    if network.connections().is_empty() {
        output.print_info("No connections.");
        return Ok(());
    }

    let connections: Vec<_> = network
        .connections()
        .iter()
        .filter_map(|c| {
            let a = network.device(c.a)?.label();
            let b = network.device(c.b)?.label();
            let cost = network.link_cost(c, &config.costs)?;
            Some((a, b, cost))
        })
        .collect();
    output.print_connections_table(&connections);
    Ok(())
}

/// Find and print the least-cost path between two devices
pub fn find_path(
    file: &Path,
    from: &str,
    to: &str,
    all: bool,
    config: &NetpathConfig,
) -> Result<()> {
    let output = output_for(config);
    let network = open(file)?;

    let source = network.device_by_label(from)?.id;
    let target = network.device_by_label(to)?.id;

    output.print_header(&format!("Shortest path {} → {}", from, to));

    match network.find_route(source, target, &config.costs) {
        Ok(route) => {
            output.print_route(&network.route_labels(&route), route.total_cost);
        }
        Err(NetpathError::NoPath { .. }) => {
            output.print_warning("No path exists between selected devices!");
        }
        Err(e) => return Err(e.into()),
    }

    if all || output.show_distances {
        let paths = network.shortest_paths_from(source, &config.costs)?;
        let label_of = |id| network.device(id).map(|d| d.label());

        let rows: Vec<_> = network
            .devices()
            .map(|d| {
                (
                    d.label(),
                    paths.distance(&d.id).value(),
                    paths.predecessor(&d.id).and_then(|p| label_of(*p)),
                )
            })
            .collect();

        output.print_header(&format!("Distances from {}", from));
        output.print_distance_table(&rows);
    }

    Ok(())
}

/// Show current configuration
pub fn show_config(config: &NetpathConfig, path: &Path) -> Result<()> {
    let output = output_for(config);

    output.print_header("Configuration");
    println!("  Config file: {}", path.display());
    println!();

    for key in [
        "costs.pc_pc",
        "costs.pc_switch",
        "costs.pc_router",
        "costs.switch_switch",
        "costs.switch_router",
        "costs.router_router",
        "display.color",
        "display.show_distances",
    ] {
        if let Some(value) = config.get(key) {
            println!("  {:<24} {}", key, value);
        }
    }

    Ok(())
}

/// Set a configuration value from a "key=value" string
pub fn set_config(config: &mut NetpathConfig, path: &Path, kv: &str) -> Result<()> {
    let Some((key, value)) = kv.split_once('=') else {
        bail!("Expected key=value, got '{}'", kv);
    };

    config::set(config, path, key.trim(), value.trim())?;
    output_for(config).print_success(&format!("Set {} = {}", key.trim(), value.trim()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_config() -> NetpathConfig {
        let mut config = NetpathConfig::default();
        config.display.color = false;
        config
    }

    #[test]
    fn test_edit_session() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lab.json");
        let config = plain_config();

        new_network(&file, false, &config).unwrap();
        assert!(new_network(&file, false, &config).is_err());

        add_device(&file, "pc", 0.0, 0.0, &config).unwrap();
        add_device(&file, "switch", 100.0, 0.0, &config).unwrap();
        add_device(&file, "router", 200.0, 0.0, &config).unwrap();
        connect(&file, "PC 0", "Switch 0", &config).unwrap();
        connect(&file, "Switch 0", "Router 0", &config).unwrap();
        connect(&file, "Router 0", "Switch 0", &config).unwrap();

        let network = load_network(&file).unwrap();
        assert_eq!(network.device_count(), 3);
        assert_eq!(network.connections().len(), 2);

        find_path(&file, "PC 0", "Router 0", true, &config).unwrap();
        show(&file, &config).unwrap();

        disconnect(&file, "PC 0", "Switch 0", &config).unwrap();
        find_path(&file, "PC 0", "Router 0", false, &config).unwrap();

        remove_device(&file, "Switch 0", &config).unwrap();
        let network = load_network(&file).unwrap();
        assert_eq!(network.device_count(), 2);
        assert!(network.connections().is_empty());
    }

    #[test]
    fn test_unknown_device_label() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lab.json");
        let config = plain_config();

        new_network(&file, false, &config).unwrap();
        assert!(connect(&file, "PC 0", "PC 1", &config).is_err());
        assert!(add_device(&file, "hub", 0.0, 0.0, &config).is_err());
    }

    #[test]
    fn test_set_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = plain_config();

        set_config(&mut config, &path, "costs.pc_router = 4").unwrap();
        assert_eq!(config.costs.pc_router, 4.0);
        assert!(set_config(&mut config, &path, "costs.pc_router").is_err());
        show_config(&config, &path).unwrap();
    }
}
