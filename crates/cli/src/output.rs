//! Output formatting and terminal rendering
//!
//! Renders devices, connections and routes as colored text.

use colored::Colorize;

/// Format a cost without a trailing ".0" for whole numbers
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 && cost.abs() < 1e15 {
        format!("{}", cost as i64)
    } else {
        format!("{:.2}", cost)
    }
}

/// Output handler for terminal display
pub struct OutputHandler {
    pub show_distances: bool,
}

impl OutputHandler {
    pub fn new(color: bool, show_distances: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { show_distances }
    }

    /// Print a section header
    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    /// Print a success message
    pub fn print_success(&self, text: &str) {
        println!("{} {}", "✓".bright_green(), text.bright_white());
    }

    /// Print a warning message
    pub fn print_warning(&self, text: &str) {
        println!("{} {}", "⚠".bright_yellow(), text.yellow());
    }

    /// Print an info message
    pub fn print_info(&self, text: &str) {
        println!("{} {}", "ℹ".bright_blue(), text);
    }

    /// Print devices as a table of (index, label, x, y, link count)
    pub fn print_devices_table(&self, devices: &[(usize, String, f64, f64, usize)]) {
        println!(
            "  {:<5} {:<14} {:>8} {:>8} {:>6}",
            "#".dimmed(),
            "DEVICE".dimmed(),
            "X".dimmed(),
            "Y".dimmed(),
            "LINKS".dimmed()
        );

        for (index, label, x, y, links) in devices {
            println!(
                "  {:<5} {:<14} {:>8.1} {:>8.1} {:>6}",
                index,
                label.bright_white(),
                x,
                y,
                links
            );
        }
    }

    /// Print connections as (label, label, cost)
    pub fn print_connections_table(&self, connections: &[(String, String, f64)]) {
        for (a, b, cost) in connections {
            println!(
                "  {} {} {}  {}",
                a.bright_white(),
                "──".dimmed(),
                b.bright_white(),
                format!("cost {}", format_cost(*cost)).dimmed()
            );
        }
    }

    /// Print a route and its total cost
    pub fn print_route(&self, labels: &[String], total_cost: f64) {
        let arrow = format!(" {} ", "→".bright_cyan());
        let hops: Vec<String> = labels.iter().map(|l| l.bright_white().to_string()).collect();

        println!("  {}", hops.join(&arrow));
        println!();
        println!(
            "  {} {}  {} {}",
            "Path Cost:".dimmed(),
            format_cost(total_cost).bright_green().bold(),
            "Hops:".dimmed(),
            labels.len().saturating_sub(1)
        );
    }

    /// Print distances from a source as (label, distance, previous hop)
    pub fn print_distance_table(&self, rows: &[(String, Option<f64>, Option<String>)]) {
        println!(
            "  {:<14} {:>10}  {}",
            "DEVICE".dimmed(),
            "DISTANCE".dimmed(),
            "VIA".dimmed()
        );

        for (label, distance, via) in rows {
            let distance = match distance {
                Some(d) => format_cost(*d).normal(),
                None => "∞".dimmed(),
            };
            println!(
                "  {:<14} {:>10}  {}",
                label,
                distance,
                via.as_deref().unwrap_or("-").dimmed()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(7.0), "7");
        assert_eq!(format_cost(-2.0), "-2");
        assert_eq!(format_cost(2.5), "2.50");
    }
}
