//! Pattern 3: Functional Builder
//! Example: Deferred operations replayed on every build()
//!
//! Run with: cargo run --bin p3_functional_builder

use colored::Colorize;
use fluent_builders::functional::{Builder, FunctionalBuilder, PersonBuilder, PersonBuilderExt};
use fluent_builders::logging;

#[derive(Debug, Default)]
struct Playlist {
    title: String,
    tracks: Vec<String>,
}

fn main() {
    if let Err(err) = logging::init_tracing() {
        eprintln!("{} {err}", "tracing disabled:".yellow());
    }

    println!("{}", "=== Functional Builder ===".bold());
    // Usage: called() is inherent, works_as() comes from an extension trait.
    let builder = PersonBuilder::new().called("Sarah").works_as("Developer");
    let person = builder.build();
    println!("Built person: {}", person.to_string().green());

    println!("\n{}", "=== Building Twice ===".bold());
    let mut first = builder.build();
    let second = builder.build();
    first.name.push_str(" (edited)");
    println!("first:  {}", first.to_string().cyan());
    println!("second: {}", second.to_string().cyan());
    println!("Recorded operations: {}", builder.operations().len());

    println!("\n{}", "=== Branching a Configured Builder ===".bold());
    let base = PersonBuilder::new().called("Alex");
    let tester = base.clone().works_as("Tester").build();
    let manager = base.works_as("Manager").build();
    println!("{}\n{}", tester.to_string().green(), manager.to_string().green());

    println!("\n{}", "=== Any Default Type ===".bold());
    let playlist = Builder::<Playlist>::new()
        .apply(|p| p.title = "Road Trip".to_string())
        .apply(|p| p.tracks.push("Intro".to_string()))
        .apply(|p| p.tracks.push("Outro".to_string()))
        .build();
    println!("{:#?}", playlist);
}
