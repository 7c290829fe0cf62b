//! Pattern 1: Faceted Builder
//! Example: One person, built through an address facet and a job facet
//!
//! Run with: cargo run --bin p1_faceted_builder

use colored::Colorize;
use fluent_builders::faceted::{Person, PersonBuilder, PersonFacets};
use fluent_builders::logging;

fn main() {
    if let Err(err) = logging::init_tracing() {
        eprintln!("{} {err}", "tracing disabled:".yellow());
    }

    println!("{}", "=== Faceted Builder ===".bold());
    // Usage: works() and lives() switch facets; any facet can finalize.
    let person: Person = PersonBuilder::new()
        .works()
        .as_a("IT Specialist")
        .at("McDonalds")
        .earning(12500)
        .lives()
        .in_city("Eindhoven")
        .at("Stratumseind")
        .with_postcode("5611PB")
        .into();

    println!("Built person: {}", person.to_string().green());

    println!("\n{}", "=== Switching Back and Forth ===".bold());
    let person = PersonBuilder::new()
        .lives()
        .in_city("Delft")
        .works()
        .at("Acme")
        .lives()
        .at("Main St")
        .works()
        .as_a("Engineer")
        .build();

    println!("Built person: {}", person.to_string().green());
    println!("Nothing set earlier was lost: city = {}", person.city.cyan());

    println!("\n{}", "=== Compile-Time Safety ===".bold());
    println!("A facet is consumed when you switch away from it:");
    println!("  let job = PersonBuilder::new().works();");
    println!("  let address = job.lives();");
    println!("  job.earning(10);");
    println!("    -> ERROR: use of moved value: `job`");
}
