//! Pattern 4: Stepwise Builder
//! Example: Typestate wizard with a per-car-type wheel size rule
//!
//! Run with: cargo run --bin p4_stepwise_builder [rules.toml]

use std::env;
use std::path::Path;

use colored::Colorize;
use fluent_builders::logging;
use fluent_builders::stepwise::{
    BuildCar, CarBuilder, CarType, SpecifyCarType, SpecifyWheelSize, WheelSizeRules,
};

fn main() {
    if let Err(err) = logging::init_tracing() {
        eprintln!("{} {err}", "tracing disabled:".yellow());
    }

    let rules = match env::args().nth(1) {
        Some(path) => match WheelSizeRules::from_path(Path::new(&path)) {
            Ok(rules) => rules,
            Err(err) => {
                eprintln!("{} {err}", "✗".red());
                std::process::exit(1);
            }
        },
        None => WheelSizeRules::default(),
    };

    println!("{}", "=== Stepwise Builder ===".bold());
    for car_type in CarType::ALL {
        if let Some(range) = rules.range_for(car_type) {
            println!("{car_type}: wheels {range}");
        }
    }

    println!("\n{}", "=== Valid Wizard Runs ===".bold());
    for (car_type, size) in [(CarType::CrossOver, 18), (CarType::Sedan, 16)] {
        match CarBuilder::with_rules(rules.clone())
            .of_type(car_type)
            .with_wheels(size)
        {
            Ok(stage) => println!("{} {}", "✓".green(), stage.build()),
            Err(err) => println!("{} {err}", "✗".red()),
        }
    }

    println!("\n{}", "=== Rejected Wheel Sizes ===".bold());
    for (car_type, size) in [(CarType::CrossOver, 5), (CarType::Sedan, 18)] {
        match CarBuilder::with_rules(rules.clone())
            .of_type(car_type)
            .with_wheels(size)
        {
            Ok(stage) => println!("{} unexpected: {}", "?".yellow(), stage.build()),
            Err(err) => println!("{} {err}", "✗".red()),
        }
    }

    println!("\n{}", "=== Compile-Time Safety ===".bold());
    println!("  CarBuilder::create().with_wheels(18)");
    println!("    -> ERROR: no method `with_wheels` before `of_type`");
    println!("  CarBuilder::create().of_type(CarType::Sedan).build()");
    println!("    -> ERROR: no method `build` before `with_wheels`");
}
