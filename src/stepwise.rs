//! Stepwise (wizard) builder.
//!
//! Construction is a fixed sequence: pick the car type, pick the wheel size,
//! build. Each step hands back a value that only exposes the next step, so a
//! skipped or repeated step is a compile error. The concrete stage types are
//! private; callers only ever see `impl SpecifyCarType`, the trait's `Next`
//! stages, and finally [`Car`].
//!
//! The wheel size is the one runtime check: its legal range depends on the
//! car type chosen in the previous step and comes from a [`WheelSizeRules`]
//! table.
//!
//! ```
//! use fluent_builders::stepwise::{BuildCar, CarBuilder, CarType, SpecifyCarType, SpecifyWheelSize};
//!
//! let car = CarBuilder::create()
//!     .of_type(CarType::CrossOver)
//!     .with_wheels(18)?
//!     .build();
//! assert_eq!(car.wheel_size, 18);
//! # Ok::<(), fluent_builders::ValidationError>(())
//! ```
//!
//! Wheels cannot be chosen before the type:
//!
//! ```compile_fail
//! use fluent_builders::stepwise::{CarBuilder, SpecifyWheelSize};
//!
//! let _ = CarBuilder::create().with_wheels(18);
//! ```
//!
//! The car cannot be built before the wheels are chosen:
//!
//! ```compile_fail
//! use fluent_builders::stepwise::{BuildCar, CarBuilder, CarType, SpecifyCarType};
//!
//! let _ = CarBuilder::create().of_type(CarType::Sedan).build();
//! ```
//!
//! And no step can be taken twice:
//!
//! ```compile_fail
//! use fluent_builders::stepwise::{CarBuilder, CarType, SpecifyCarType};
//!
//! let _ = CarBuilder::create().of_type(CarType::Sedan).of_type(CarType::CrossOver);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ValidationError};

// =============================================================================
// Target
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CarType {
    #[default]
    Sedan,
    CrossOver,
}

impl CarType {
    pub const ALL: [CarType; 2] = [CarType::Sedan, CarType::CrossOver];
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarType::Sedan => write!(f, "Sedan"),
            CarType::CrossOver => write!(f, "CrossOver"),
        }
    }
}

impl FromStr for CarType {
    type Err = ConfigError;

    /// Accepts `sedan`, `crossover`, `cross_over` and `cross-over` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "sedan" => Ok(CarType::Sedan),
            "crossover" => Ok(CarType::CrossOver),
            _ => Err(ConfigError::UnknownCarType {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Car {
    pub car_type: CarType,
    pub wheel_size: u32,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car_type: {}, wheel_size: {}", self.car_type, self.wheel_size)
    }
}

// =============================================================================
// Wheel size rule table
// =============================================================================

/// Inclusive range of wheel sizes.
///
/// Not checked on construction: an inverted range (`min > max`) contains no
/// size at all. It is rejected only when added to a table through
/// [`WheelSizeRules::with_rule`] or loaded from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WheelRange {
    pub min: u32,
    pub max: u32,
}

impl WheelRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, size: u32) -> bool {
        (self.min..=self.max).contains(&size)
    }
}

impl fmt::Display for WheelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRules {
    wheel_sizes: HashMap<String, WheelRange>,
}

/// Allowed wheel sizes per car type.
///
/// The default table is Sedan `[15, 17]` and CrossOver `[17, 20]`. A table
/// can also be read from TOML:
///
/// ```toml
/// [wheel_sizes]
/// sedan = { min = 15, max = 17 }
/// cross_over = { min = 17, max = 20 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelSizeRules {
    ranges: HashMap<CarType, WheelRange>,
}

impl Default for WheelSizeRules {
    fn default() -> Self {
        let ranges = HashMap::from([
            (CarType::Sedan, WheelRange::new(15, 17)),
            (CarType::CrossOver, WheelRange::new(17, 20)),
        ]);
        Self { ranges }
    }
}

impl WheelSizeRules {
    /// A table with no rules; every wheel size is rejected until one is added.
    pub fn empty() -> Self {
        Self {
            ranges: HashMap::new(),
        }
    }

    /// Add or replace the rule for one car type.
    pub fn with_rule(mut self, car_type: CarType, range: WheelRange) -> Result<Self, ConfigError> {
        if range.min > range.max {
            return Err(ConfigError::InvertedRange {
                car_type,
                min: range.min,
                max: range.max,
            });
        }
        self.ranges.insert(car_type, range);
        Ok(self)
    }

    pub fn range_for(&self, car_type: CarType) -> Option<WheelRange> {
        self.ranges.get(&car_type).copied()
    }

    /// Parse a table and require a rule for every [`CarType`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawRules = toml::from_str(content)?;

        let mut rules = Self::empty();
        for (name, range) in raw.wheel_sizes {
            let car_type: CarType = name.parse()?;
            // Several spellings map to one car type; map order must not pick a winner.
            if rules.ranges.contains_key(&car_type) {
                return Err(ConfigError::DuplicateRule { car_type });
            }
            rules = rules.with_rule(car_type, range)?;
        }

        if let Some(car_type) = CarType::ALL
            .into_iter()
            .find(|car_type| !rules.ranges.contains_key(car_type))
        {
            return Err(ConfigError::MissingRule { car_type });
        }

        debug!(rules = rules.ranges.len(), "wheel size rules loaded");
        Ok(rules)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

// =============================================================================
// Stage protocol
// =============================================================================

#[must_use = "a car is only produced once every step is taken and `build()` is called"]
pub trait SpecifyCarType {
    type Next: SpecifyWheelSize;

    fn of_type(self, car_type: CarType) -> Self::Next;
}

#[must_use = "a car is only produced once every step is taken and `build()` is called"]
pub trait SpecifyWheelSize {
    type Next: BuildCar;

    /// Fails when `size` is outside the range allowed for the chosen type.
    /// The partially built car is dropped with the error.
    fn with_wheels(self, size: u32) -> Result<Self::Next, ValidationError>;
}

#[must_use = "a car is only produced once `build()` is called"]
pub trait BuildCar {
    fn build(self) -> Car;
}

/// Entry point for the wizard.
pub struct CarBuilder;

impl CarBuilder {
    /// Start a wizard with the default [`WheelSizeRules`].
    pub fn create() -> impl SpecifyCarType {
        Self::with_rules(WheelSizeRules::default())
    }

    pub fn with_rules(rules: WheelSizeRules) -> impl SpecifyCarType {
        stage::Wizard::<stage::Empty>::start(rules)
    }
}

// Not re-exported: the stage types are an implementation detail behind the
// protocol traits.
mod stage {
    use std::marker::PhantomData;

    use tracing::{debug, warn};

    use super::{BuildCar, Car, CarType, SpecifyCarType, SpecifyWheelSize, WheelSizeRules};
    use crate::error::ValidationError;

    pub struct Empty;
    pub struct TypeChosen;
    pub struct SizeChosen;

    pub struct Wizard<Stage> {
        car: Car,
        rules: WheelSizeRules,
        _stage: PhantomData<Stage>,
    }

    impl<Stage> Wizard<Stage> {
        fn advance<Next>(self) -> Wizard<Next> {
            Wizard {
                car: self.car,
                rules: self.rules,
                _stage: PhantomData,
            }
        }
    }

    impl Wizard<Empty> {
        pub fn start(rules: WheelSizeRules) -> Self {
            Wizard {
                car: Car::default(),
                rules,
                _stage: PhantomData,
            }
        }
    }

    impl SpecifyCarType for Wizard<Empty> {
        type Next = Wizard<TypeChosen>;

        fn of_type(mut self, car_type: CarType) -> Self::Next {
            debug!(%car_type, "car type chosen");
            self.car.car_type = car_type;
            self.advance()
        }
    }

    impl SpecifyWheelSize for Wizard<TypeChosen> {
        type Next = Wizard<SizeChosen>;

        fn with_wheels(mut self, size: u32) -> Result<Self::Next, ValidationError> {
            let car_type = self.car.car_type;

            let Some(allowed) = self.rules.range_for(car_type) else {
                warn!(%car_type, size, "no wheel size rule for car type");
                return Err(ValidationError::no_rule(car_type, size));
            };

            if !allowed.contains(size) {
                warn!(%car_type, size, %allowed, "wheel size rejected");
                return Err(ValidationError::wheel_size(car_type, size, allowed));
            }

            debug!(%car_type, size, "wheel size chosen");
            self.car.wheel_size = size;
            Ok(self.advance())
        }
    }

    impl BuildCar for Wizard<SizeChosen> {
        fn build(self) -> Car {
            debug!(car = %self.car, "car built");
            self.car
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_crossover_within_range() {
        let car = CarBuilder::create()
            .of_type(CarType::CrossOver)
            .with_wheels(18)
            .unwrap()
            .build();

        assert_eq!(car.car_type, CarType::CrossOver);
        assert_eq!(car.wheel_size, 18);
    }

    #[test]
    fn test_crossover_rejects_small_wheels() {
        let err = CarBuilder::create()
            .of_type(CarType::CrossOver)
            .with_wheels(5)
            .err()
            .unwrap();

        assert_eq!(
            err,
            ValidationError::WheelSize {
                car_type: CarType::CrossOver,
                size: 5,
                allowed: WheelRange::new(17, 20),
            }
        );
    }

    #[test]
    fn test_sedan_scenario() {
        let car = CarBuilder::create()
            .of_type(CarType::Sedan)
            .with_wheels(16)
            .unwrap()
            .build();
        assert_eq!(car.wheel_size, 16);

        let err = CarBuilder::create()
            .of_type(CarType::Sedan)
            .with_wheels(18)
            .err()
            .unwrap();
        assert_eq!(err.car_type(), CarType::Sedan);
        assert!(err.to_string().contains("[15, 17]"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        for (car_type, size) in [
            (CarType::Sedan, 15),
            (CarType::Sedan, 17),
            (CarType::CrossOver, 17),
            (CarType::CrossOver, 20),
        ] {
            let result = CarBuilder::create().of_type(car_type).with_wheels(size);
            assert!(result.is_ok(), "{car_type} should accept {size}");
        }

        for (car_type, size) in [
            (CarType::Sedan, 14),
            (CarType::Sedan, 18),
            (CarType::CrossOver, 16),
            (CarType::CrossOver, 21),
        ] {
            let result = CarBuilder::create().of_type(car_type).with_wheels(size);
            assert!(result.is_err(), "{car_type} should reject {size}");
        }
    }

    #[test]
    fn test_custom_rules() {
        let rules = WheelSizeRules::default()
            .with_rule(CarType::Sedan, WheelRange::new(13, 14))
            .unwrap();

        let car = CarBuilder::with_rules(rules)
            .of_type(CarType::Sedan)
            .with_wheels(13)
            .unwrap()
            .build();
        assert_eq!(car.wheel_size, 13);
    }

    #[test]
    fn test_missing_rule_is_validation_error() {
        let rules = WheelSizeRules::empty()
            .with_rule(CarType::Sedan, WheelRange::new(15, 17))
            .unwrap();

        let err = CarBuilder::with_rules(rules)
            .of_type(CarType::CrossOver)
            .with_wheels(18)
            .err()
            .unwrap();
        assert_eq!(err, ValidationError::no_rule(CarType::CrossOver, 18));
    }

    #[test]
    fn test_inverted_rule_rejected() {
        let result = WheelSizeRules::empty().with_rule(CarType::Sedan, WheelRange::new(20, 10));
        assert!(matches!(
            result,
            Err(ConfigError::InvertedRange { min: 20, max: 10, .. })
        ));
    }

    #[test]
    fn test_car_type_from_str() {
        assert_eq!("sedan".parse::<CarType>().unwrap(), CarType::Sedan);
        assert_eq!("Cross_Over".parse::<CarType>().unwrap(), CarType::CrossOver);
        assert_eq!("cross-over".parse::<CarType>().unwrap(), CarType::CrossOver);
        assert!("truck".parse::<CarType>().is_err());
    }

    #[test]
    fn test_rules_from_toml() {
        let rules = WheelSizeRules::from_toml_str(
            r#"
            [wheel_sizes]
            sedan = { min = 14, max = 16 }
            cross_over = { min = 18, max = 22 }
            "#,
        )
        .unwrap();

        assert_eq!(rules.range_for(CarType::Sedan), Some(WheelRange::new(14, 16)));
        assert_eq!(rules.range_for(CarType::CrossOver), Some(WheelRange::new(18, 22)));
    }

    #[test]
    fn test_rules_from_toml_requires_every_car_type() {
        let result = WheelSizeRules::from_toml_str(
            r#"
            [wheel_sizes]
            sedan = { min = 15, max = 17 }
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::MissingRule {
                car_type: CarType::CrossOver
            })
        ));
    }

    #[test]
    fn test_rules_from_toml_rejects_duplicate_alias() {
        let content = r#"
            [wheel_sizes]
            sedan = { min = 15, max = 17 }
            crossover = { min = 17, max = 20 }
            cross_over = { min = 1, max = 2 }
            "#;

        // Repeated loads must agree, whatever order the keys come back in.
        for _ in 0..50 {
            let result = WheelSizeRules::from_toml_str(content);
            assert!(matches!(
                result,
                Err(ConfigError::DuplicateRule {
                    car_type: CarType::CrossOver
                })
            ));
        }
    }

    #[test]
    fn test_inverted_range_contains_nothing_until_checked() {
        let inverted = WheelRange::new(20, 10);
        assert!((0..=30).all(|size| !inverted.contains(size)));
        assert!(WheelSizeRules::default()
            .with_rule(CarType::CrossOver, inverted)
            .is_err());
    }

    #[test]
    fn test_rules_from_toml_rejects_unknown_type() {
        let result = WheelSizeRules::from_toml_str(
            r#"
            [wheel_sizes]
            sedan = { min = 15, max = 17 }
            cross_over = { min = 17, max = 20 }
            truck = { min = 19, max = 24 }
            "#,
        );
        assert!(matches!(result, Err(ConfigError::UnknownCarType { name }) if name == "truck"));
    }

    #[test]
    fn test_rules_from_toml_parse_error() {
        let result = WheelSizeRules::from_toml_str("wheel_sizes = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rules_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[wheel_sizes]").unwrap();
        writeln!(file, "sedan = {{ min = 15, max = 17 }}").unwrap();
        writeln!(file, "crossover = {{ min = 17, max = 20 }}").unwrap();

        let rules = WheelSizeRules::from_path(file.path()).unwrap();
        assert_eq!(rules, WheelSizeRules::default());
    }

    #[test]
    fn test_rules_from_missing_path() {
        let result = WheelSizeRules::from_path(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_car_display() {
        let car = Car {
            car_type: CarType::CrossOver,
            wheel_size: 19,
        };
        assert_eq!(car.to_string(), "car_type: CrossOver, wheel_size: 19");
    }
}
