// Colored terminal output for enrichment results, matches and shortlists.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;

use crate::leads::models::{EnrichedDataset, EnrichedLead, LeadDataset, LeadPriority};
use crate::scoring::matcher::TenderMatch;
use crate::scoring::outreach::{Shortlist, ShortlistEntry};
use crate::scoring::signal::BuyingSignal;
use crate::tenders::export::TenderExport;

/// Display the enrichment counters.
pub fn display_enrichment_summary(dataset: &EnrichedDataset) {
    println!("\n{}", "=== Enrichment Summary ===".bold());
    println!("  Total leads:                 {}", dataset.total_leads);
    println!("  Matched with tender data:    {}", dataset.matched_with_tenderned);
    println!("  Enriched with buying signal: {}", dataset.enriched_with_signals);
}

/// Display what a registry import produced, with the top `limit` leads.
pub fn display_registry_summary(dataset: &LeadDataset, limit: usize) {
    let count = |tier: LeadPriority| {
        dataset
            .leads
            .iter()
            .filter(|l| LeadPriority::from_score(l.lead_score) == tier)
            .count()
    };

    println!("\n{}", "=== Registry Import ===".bold());
    println!("  Algorithms:    {}", dataset.total_algorithms);
    println!("  Organizations: {}", dataset.total_leads);
    println!("  Hot leads:     {}", count(LeadPriority::Hot));
    println!("  Warm leads:    {}", count(LeadPriority::Warm));

    if dataset.leads.is_empty() {
        return;
    }
    println!();
    println!(
        "  {:>4}  {:<40} {:<10} {:>5} {:>5}  {:<7}",
        "Rank".dimmed(),
        "Organization".dimmed(),
        "Type".dimmed(),
        "Algos".dimmed(),
        "Score".dimmed(),
        "Tier".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());
    for (i, lead) in dataset.leads.iter().take(limit).enumerate() {
        println!(
            "  {:>4}. {:<40} {:<10} {:>5} {:>5}  {:<7}",
            i + 1,
            super::truncate_chars(&lead.name, 37),
            lead.registry.org_type.as_deref().unwrap_or("-"),
            lead.registry.algorithm_count(),
            lead.lead_score,
            colorize_priority(LeadPriority::from_score(lead.lead_score)),
        );
    }
}

/// Display the top `limit` leads with their score change and tender counts.
pub fn display_top_leads(leads: &[EnrichedLead], limit: usize) {
    if leads.is_empty() {
        println!("No leads to show.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Top {} Leads ===", limit.min(leads.len())).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<40} {:>5} {:>5}  {:<7} {:>6} {:>4} {:>4}",
        "Rank".dimmed(),
        "Organization".dimmed(),
        "Score".dimmed(),
        "Was".dimmed(),
        "Tier".dimmed(),
        "Signal".dimmed(),
        "AI".dimmed(),
        "Gov".dimmed(),
    );
    println!("  {}", "-".repeat(84).dimmed());

    for (i, lead) in leads.iter().take(limit).enumerate() {
        let priority = LeadPriority::from_score(lead.lead_score);
        let signal = if lead.buying_signal > 0 {
            lead.buying_signal.to_string().red().bold()
        } else {
            "-".dimmed()
        };
        println!(
            "  {:>4}. {:<40} {:>5} {:>5}  {:<7} {:>6} {:>4} {:>4}",
            i + 1,
            super::truncate_chars(&lead.name, 37),
            lead.lead_score,
            lead.lead_score_original,
            colorize_priority(priority),
            signal,
            lead.tender_ai,
            lead.tender_governance,
        );
    }
}

/// Display how a single lead name resolves against the tender profiles.
pub fn display_match(
    lead_name: &str,
    found: Option<&TenderMatch<'_>>,
    signal: Option<&BuyingSignal>,
) {
    println!("\n{}", format!("=== Tender match for {lead_name} ===").bold());

    let Some(found) = found else {
        println!("  {}", "No tender profile matches this name.".yellow());
        return;
    };

    let profile = found.profile;
    println!("  Profile:      {} ({})", profile.original, found.key.dimmed());
    println!("  Matched via:  {} test", found.path.as_str());
    println!("  Match score:  {}", found.score);
    println!(
        "  Tenders:      {} total, {} AI, {} governance, {} ICT",
        profile.total, profile.ai, profile.governance, profile.ict
    );
    if profile.recent_years.is_empty() {
        println!("  Recent years: none");
    } else {
        let years: Vec<&str> = profile.recent_years.iter().map(String::as_str).collect();
        println!("  Recent years: {}", years.join(", "));
    }

    if let Some(signal) = signal {
        let gate = if signal.materialized {
            "passes".green().to_string()
        } else {
            "below threshold (tender fields dropped)".yellow().to_string()
        };
        println!(
            "  Buying signal: {} (base {}, recency bonus {})",
            signal.value.to_string().bold(),
            signal.base,
            if signal.recent_activity { "yes" } else { "no" },
        );
        println!("  Gate:         {gate}");
    }
}

/// Display the quick-win and strategic shortlists.
pub fn display_shortlist(shortlist: &Shortlist, total_leads: usize) {
    println!(
        "\nBased on {} viable leads out of {} organizations",
        shortlist.viable, total_leads
    );
    display_shortlist_table(
        &format!("=== Quick Wins ({}) ===", shortlist.quick_wins.len()),
        &shortlist.quick_wins,
    );
    display_shortlist_table(
        &format!("=== Strategic Targets ({}) ===", shortlist.strategic_targets.len()),
        &shortlist.strategic_targets,
    );
}

fn display_shortlist_table(title: &str, entries: &[ShortlistEntry]) {
    println!("\n{}", title.bold());
    println!(
        "  {:<3} {:<40} {:<12} {:>6} {:>7} {:<5} {:>6}",
        "#".dimmed(),
        "Organization".dimmed(),
        "Type".dimmed(),
        "Algos".dimmed(),
        "Impact".dimmed(),
        "IAMA".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(84).dimmed());

    for (i, entry) in entries.iter().enumerate() {
        let attrs = &entry.lead.registry;
        let iama = if attrs.has_iama() {
            "yes".normal()
        } else {
            "no".red()
        };
        println!(
            "  {:<3} {:<40} {:<12} {:>6} {:>7} {:<5} {:>6}",
            i + 1,
            super::truncate_chars(&entry.lead.name, 37),
            super::truncate_chars(attrs.org_type.as_deref().unwrap_or("-"), 10),
            attrs.algorithm_count(),
            attrs.impactful_count(),
            iama,
            entry.outreach_score,
        );
    }
}

/// Display the strict tender export counters.
pub fn display_export_summary(export: &TenderExport) {
    let stats = &export.stats;
    println!("\n{}", "=== Tender Export ===".bold());
    println!("  Relevant tenders:     {}", stats.total);
    println!("  AI-related:           {}", stats.ai);
    println!("  Governance-related:   {}", stats.governance);
    println!("  ICT-related:          {}", stats.ict);
    println!("  Unique organizations: {}", stats.organizations);
    if let (Some(first), Some(last)) = (stats.years.first(), stats.years.last()) {
        println!("  Year range:           {first} - {last}");
    }
}

/// Colorize a priority tier.
fn colorize_priority(priority: LeadPriority) -> colored::ColoredString {
    let label = priority.as_str();
    match priority {
        LeadPriority::Hot => label.red().bold(),
        LeadPriority::Warm => label.yellow(),
        LeadPriority::Medium => label.normal(),
        LeadPriority::Low => label.dimmed(),
    }
}
