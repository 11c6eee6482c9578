//! `fleetboard nodes` — inspect and manage fleet nodes.

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::domain::node::{Node, NodeSponsor, NodeUpdate};
use crate::domain::Stores;
use crate::format::format_bandwidth;

#[derive(Subcommand)]
pub enum NodeCommands {
    /// List all fleet nodes
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one node in full
    Show {
        /// Node id
        id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Update a node's settings
    Update {
        /// Node id
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New bandwidth limit in Mbps
        #[arg(long)]
        bandwidth: Option<f64>,
        /// Sponsor display name
        #[arg(long)]
        sponsor_name: Option<String>,
        /// Sponsor link
        #[arg(long)]
        sponsor_url: Option<String>,
        /// Sponsor banner image URL
        #[arg(long)]
        sponsor_banner: Option<String>,
    },
    /// Issue a new connection secret for a node
    ResetSecret {
        /// Node id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(base_url: Option<&str>, command: &NodeCommands) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(base_url, command))
}

async fn run_async(base_url: Option<&str>, command: &NodeCommands) -> Result<()> {
    let (_config, stores) = super::session(base_url)?;

    match command {
        NodeCommands::List { format } => {
            let nodes = fetch_list(&stores).await?;
            match format.as_str() {
                "json" => super::print_json(&nodes),
                _ => {
                    print_list(&nodes);
                    Ok(())
                }
            }
        }
        NodeCommands::Show { id, format } => {
            fetch_list(&stores).await?;
            let node = match stores.node.find_node(id).await {
                Some(node) => node,
                None => bail!("node '{}' not found in the fleet", id),
            };
            match format.as_str() {
                "json" => super::print_json(&node),
                _ => {
                    print_detail(&node);
                    Ok(())
                }
            }
        }
        NodeCommands::Update {
            id,
            name,
            bandwidth,
            sponsor_name,
            sponsor_url,
            sponsor_banner,
        } => {
            let sponsor = build_sponsor(
                sponsor_name.clone(),
                sponsor_url.clone(),
                sponsor_banner.clone(),
            )?;
            let update = NodeUpdate {
                name: name.clone(),
                bandwidth: *bandwidth,
                sponsor,
            };
            if update.is_empty() {
                bail!("nothing to update — pass at least one of --name, --bandwidth, --sponsor-*");
            }

            stores.node.update_node(id, &update).await?;

            println!("{} node {} updated", "ok".green().bold(), id.bold());
            if let Some(node) = stores.node.find_node(id).await {
                println!(
                    "   name: {}  bandwidth: {}",
                    node.name,
                    format_bandwidth(node.bandwidth)
                );
            }
            Ok(())
        }
        NodeCommands::ResetSecret { id, yes } => {
            if !*yes && !confirm_reset()? {
                println!("{}", "reset cancelled".yellow());
                return Ok(());
            }

            let secret = stores.node.reset_secret(id).await?;
            println!("{} secret reset for node {}", "ok".green().bold(), id.bold());
            println!("   new secret: {}", secret.yellow().bold());
            println!("   store it now — it cannot be shown again");
            Ok(())
        }
    }
}

/// Fetch through the store and surface its recorded error, if any.
async fn fetch_list(stores: &Stores) -> Result<Vec<Node>> {
    stores.node.fetch_nodes().await;
    if let Some(error) = stores.node.error().await {
        bail!("failed to fetch nodes: {}", error);
    }
    Ok(stores.node.nodes().await)
}

fn build_sponsor(
    name: Option<String>,
    url: Option<String>,
    banner: Option<String>,
) -> Result<Option<NodeSponsor>> {
    if name.is_none() && url.is_none() && banner.is_none() {
        return Ok(None);
    }
    match (name, url) {
        (Some(name), Some(url)) => Ok(Some(NodeSponsor {
            name,
            url,
            banner: banner.unwrap_or_default(),
        })),
        _ => bail!("sponsor updates need both --sponsor-name and --sponsor-url"),
    }
}

fn confirm_reset() -> Result<bool> {
    println!(
        "{}",
        "warning: resetting the secret disconnects the node until it is reconfigured".red()
    );
    print!("type 'RESET' to confirm: ");
    use std::io::Write;
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim() == "RESET")
}

fn print_list(nodes: &[Node]) {
    if nodes.is_empty() {
        println!("no nodes registered");
        return;
    }

    let latest = latest_version(nodes);

    println!(
        "{:<24} {:<8} {:>12} {:>12} {:>7}  {}",
        "NAME".bold(),
        "STATUS".bold(),
        "LIMIT".bold(),
        "MEASURED".bold(),
        "TRUST".bold(),
        "VERSION".bold()
    );
    for node in nodes {
        // Pad before coloring so ANSI escapes don't break column widths
        let status = if node.is_banned {
            format!("{:<8}", "banned").red().bold().to_string()
        } else if node.is_enabled {
            format!("{:<8}", "online").green().to_string()
        } else {
            format!("{:<8}", "offline").red().to_string()
        };

        let version = match (&latest, semver::Version::parse(&node.version)) {
            (Some(latest), Ok(v)) if v < *latest => {
                format!("{} {}", node.version, "(outdated)".yellow())
            }
            _ => node.version.clone(),
        };

        println!(
            "{:<24} {} {:>12} {:>12} {:>7}  {}",
            node.name,
            status,
            format_bandwidth(node.bandwidth),
            format_bandwidth(node.measure_bandwidth),
            node.trust,
            version
        );
    }

    println!();
    println!("{} nodes", nodes.len());
}

fn print_detail(node: &Node) {
    println!("{}", format!("═══ {} ═══", node.name).cyan().bold());
    println!("  Id:            {}", node.id);
    if let Some(ref legacy) = node.legacy_id {
        println!("  Legacy id:     {}", legacy);
    }
    println!("  Owner:         {}", node.user);
    println!("  Version:       {}", node.version);
    println!(
        "  Status:        {}",
        if node.is_banned {
            "banned".red().bold().to_string()
        } else if node.is_enabled {
            "online".green().to_string()
        } else {
            "offline".red().to_string()
        }
    );
    if let Some(ref reason) = node.down_reason {
        println!("  Down reason:   {}", reason);
    }
    if let Some(ref reason) = node.ban_reason {
        println!("  Ban reason:    {}", reason.red());
    }
    println!("  Trust:         {}", node.trust);
    println!(
        "  Full size:     {}",
        if node.full_size { "yes" } else { "no" }
    );
    println!(
        "  Fast enable:   {}",
        if node.no_fast_enable { "off" } else { "on" }
    );

    println!();
    println!("{}", "── Capacity ──".yellow());
    println!("  Limit:         {}", format_bandwidth(node.bandwidth));
    println!(
        "  Measured:      {}",
        format_bandwidth(node.measure_bandwidth)
    );
    if !node.shards.is_empty() {
        println!("  Shards:        {}", node.shards.join(", "));
    }

    println!();
    println!("{}", "── Endpoint ──".yellow());
    println!(
        "  Address:       {}://{}:{}",
        node.endpoint.proto, node.endpoint.host, node.endpoint.port
    );
    println!(
        "  BYOC:          {}",
        if node.endpoint.byoc { "yes" } else { "no" }
    );
    if let Some(ref flavor) = node.flavor {
        println!("  Runtime:       {}", flavor.runtime);
        println!("  Storage:       {}", flavor.storage);
    }

    if let Some(ref sponsor) = node.sponsor {
        println!();
        println!("{}", "── Sponsor ──".yellow());
        println!("  Name:          {}", sponsor.name);
        println!("  Link:          {}", sponsor.url);
    }

    println!();
    println!("{}", "── Timeline ──".yellow());
    println!("  Registered:    {}", node.created_at.to_rfc3339());
    println!("  Updated:       {}", node.updated_at.to_rfc3339());
    println!("  Up since:      {}", node.uptime.to_rfc3339());
    if let Some(ref downtime) = node.downtime {
        println!("  Down since:    {}", downtime.to_rfc3339());
    }
    println!("  Last activity: {}", node.last_activity.to_rfc3339());
}

fn latest_version(nodes: &[Node]) -> Option<semver::Version> {
    nodes
        .iter()
        .filter_map(|n| semver::Version::parse(&n.version).ok())
        .max()
}
