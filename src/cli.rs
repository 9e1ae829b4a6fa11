use crate::app::dto::{SearchResponse, StatsResponse};
use crate::app::engine::TreeEngine;
use crate::domain::document::write_tree;
use anyhow::{Context as _, Result};
use std::io::Write as _;

pub fn display_stats(engine: &TreeEngine, json: bool) -> Result<()> {
    let result = engine.stats()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    print_stats(&result);
    Ok(())
}

fn print_stats(stats: &StatsResponse) {
    if let Some(source) = &stats.source {
        println!("Document: {}", source);
    }
    println!("{}", "=".repeat(60));
    println!("  Nodes:        {}", stats.node_count);
    println!("  Edges:        {}", stats.edge_count);
    println!("  Roots:        {}", stats.roots.join(", "));
    println!("  Shared nodes: {}", stats.shared_node_count);
    println!("  Acyclic:      {}", if stats.is_acyclic { "yes" } else { "no" });

    let Some(root) = &stats.primary_root else {
        return;
    };
    println!("\nBelow root '{}':", root);
    match &stats.tree {
        Some(tree) => {
            println!("  Distinct nodes: {:>8}", tree.distinct_nodes);
            println!("  Unfolded size:  {:>8}", tree.unfolded_size);
            println!("  Height:         {:>8}", tree.height);
            println!("  Leaves:         {:>8}", tree.leaf_count);
            println!("  Max degree:     {:>8}", tree.max_degree);
        }
        None => println!("  (cycle reachable, not a tree)"),
    }
}

pub fn search_names(
    engine: &TreeEngine,
    pattern: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let result = engine.search(pattern, limit)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    print_search(&result, limit);
    Ok(())
}

fn print_search(result: &SearchResponse, limit: Option<usize>) {
    println!("Searching for labels matching: \"{}\"", result.pattern);
    println!("{}", "=".repeat(80));
    println!("Found {} matching node(s)\n", result.total_matches);

    if let Some(lim) = limit.filter(|&lim| result.total_matches > lim) {
        println!("Showing first {}:\n", lim);
    }

    for (i, item) in result.items.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, item.id, item.name);
        println!(
            "   parents: {}, children: {}",
            item.parent_count, item.degree
        );
    }
}

pub fn display_tree(engine: &TreeEngine, root: Option<&str>) -> Result<()> {
    print!("{}", engine.render(root)?);
    Ok(())
}

pub fn export_tree(engine: &TreeEngine, root: Option<&str>) -> Result<()> {
    let tree = engine.export(root)?;
    let mut stdout = std::io::stdout().lock();
    write_tree(&mut stdout, &tree).context("Failed to write tree document")?;
    writeln!(stdout)?;
    Ok(())
}
