//! Terminal rendering for lookups and rent checks.
//!
//! Lookups print as a fixed-width table capped at a row limit; a verdict
//! prints as a vertical card with the unit's situation and the legal limits.

use encadrement_core::{
    Evaluation, Field, FieldValue, RegulationRecord, Tier, Verdict, furnishing_label,
};

// ── Unique values ──

pub fn print_values(field: Field, values: &[FieldValue]) {
    println!("{} ({} values)", field, values.len());
    for value in values {
        println!("  {value}");
    }
}

// ── Lookup table ──

/// Print at most `limit` records, noting how many were left out.
pub fn print_records(records: &[&RegulationRecord], limit: usize) {
    let total = records.len();
    println!(
        "{} record{}",
        total,
        if total == 1 { "" } else { "s" }
    );
    if total == 0 {
        println!("No regulation band matches these criteria.");
        return;
    }

    println!(
        "{:<6} {:<26} {:>6} {:<11} {:<12} {:>8} {:>8} {:>8}",
        "year", "district", "rooms", "furnishing", "era", "min", "ref", "max"
    );
    for record in records.iter().take(limit) {
        println!(
            "{:<6} {:<26} {:>6} {:<11} {:<12} {:>8.1} {:>8.1} {:>8.1}",
            record.year,
            truncate(&record.district, 26),
            record.room_count,
            furnishing_label(record.furnished),
            record.era,
            record.min_rate,
            record.ref_rate,
            record.max_rate,
        );
    }
    if total > limit {
        println!("... showing first {limit} of {total}");
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let head: String = s.chars().take(width - 3).collect();
        format!("{head}...")
    }
}

// ── Verdict card ──

pub fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Evaluated(evaluation) => print_evaluation(evaluation),
        Verdict::NotFound { key } => {
            println!("No regulation band found for {key}.");
        }
    }
}

fn print_evaluation(e: &Evaluation) {
    println!("=== {} ===", e.tier);
    println!("{}", headline(e.tier));
    println!();

    println!("Unit");
    println!("  {:<26} {}", "band", e.key);
    println!("  {:<26} {:.2} €/month", "rent", e.monthly_rent);
    println!("  {:<26} {:.2} m²", "surface", e.surface_area);
    println!("  {:<26} {:.2} €/m²", "rent per m²", e.rent_per_m2);
    println!();

    println!("Legal limits");
    print_limit("floor", e.rates.min, e.monthly.min);
    print_limit("reference", e.rates.reference, e.monthly.reference);
    print_limit("ceiling", e.rates.max, e.monthly.max);
}

fn print_limit(label: &str, per_m2: f64, monthly: f64) {
    println!("  {:<26} {:.2} €/m² = {:.2} €/month", label, per_m2, monthly);
}

fn headline(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => "Excellent: the rent is at or below the regulated floor.",
        Tier::Good => "Good price: the rent is at or below the reference rent.",
        Tier::Acceptable => "Within the ceiling, but above the reference rent: there is room to negotiate.",
        Tier::OverCeiling => "The rent exceeds the legal ceiling.",
    }
}
