//! Pattern 2: Self-Typed Recursive Builder
//! Example: Layered builder traits that always return the concrete builder
//!
//! Run with: cargo run --bin p2_recursive_builder

use chrono::NaiveDate;
use colored::Colorize;
use fluent_builders::logging;
use fluent_builders::recursive::{
    BirthDateOnlyBuilder, Person, PersonAddressBuilder, PersonBirthDateBuilder, PersonBuilder,
    PersonInfoBuilder, PersonJobBuilder,
};

fn main() {
    if let Err(err) = logging::init_tracing() {
        eprintln!("{} {err}", "tracing disabled:".yellow());
    }

    let Some(born) = NaiveDate::from_ymd_opt(1985, 3, 14) else {
        eprintln!("{}", "invalid sample date".red());
        return;
    };

    println!("{}", "=== Every Layer, Any Order ===".bold());
    // Usage: called() lives on the lowest layer, lives_in() on the highest.
    let me = Person::builder()
        .called("Dmitri")
        .works_as_a("Quant")
        .born(born)
        .lives_in("Eindhoven")
        .build();
    println!("Built person: {}", me.to_string().green());

    let reversed = Person::builder()
        .lives_in("Eindhoven")
        .born(born)
        .works_as_a("Quant")
        .called("Dmitri")
        .build();
    println!("Same person, reversed chain: {}", (me == reversed).to_string().cyan());

    println!("\n{}", "=== A Shallower Builder ===".bold());
    let partial = BirthDateOnlyBuilder::new()
        .born(born)
        .called("Sarah")
        .works_as_a("Developer")
        .build();
    println!("Built person: {}", partial.to_string().green());

    println!("\n{}", "=== Compile-Time Safety ===".bold());
    println!("  BirthDateOnlyBuilder::new().lives_in(\"Delft\")");
    println!("    -> ERROR: the trait `PersonAddressBuilder` is not implemented");
    println!("  impl PersonJobBuilder for X {{}}  // without PersonInfoBuilder");
    println!("    -> ERROR: the trait bound `X: PersonInfoBuilder` is not satisfied");
}
