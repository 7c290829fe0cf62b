//! Self-typed recursive builder.
//!
//! Each layer is a trait that adds one setter and requires the layer beneath
//! it as a supertrait. Setters return `Self`, which is always the concrete
//! builder the caller holds, so a setter declared on the lowest layer still
//! hands back something that can call setters from every layer above it.
//!
//! A new capability is a new trait stacked on the current top layer; the
//! existing layers and builders stay untouched. A concrete builder opts into
//! the layers it wants with empty `impl` blocks.
//!
//! ```
//! use chrono::NaiveDate;
//! use fluent_builders::recursive::{
//!     Person, PersonAddressBuilder, PersonBirthDateBuilder, PersonBuilder, PersonInfoBuilder,
//!     PersonJobBuilder,
//! };
//!
//! let me = Person::builder()
//!     .called("Dmitri")
//!     .works_as_a("Quant")
//!     .born(NaiveDate::from_ymd_opt(1985, 3, 14).unwrap())
//!     .lives_in("Eindhoven")
//!     .build();
//!
//! assert_eq!(me.address, "Eindhoven");
//! ```
//!
//! A builder that stops at the birth-date layer has no `lives_in`:
//!
//! ```compile_fail
//! use fluent_builders::recursive::{BirthDateOnlyBuilder, PersonAddressBuilder, PersonInfoBuilder};
//!
//! let _ = BirthDateOnlyBuilder::new().called("Dmitri").lives_in("Eindhoven");
//! ```
//!
//! A layer cannot be adopted without the layers beneath it:
//!
//! ```compile_fail
//! use fluent_builders::recursive::{Person, PersonBuilder, PersonJobBuilder};
//!
//! struct Skipper(Person);
//!
//! impl PersonBuilder for Skipper {
//!     fn person_mut(&mut self) -> &mut Person { &mut self.0 }
//!     fn into_person(self) -> Person { self.0 }
//! }
//!
//! // missing `impl PersonInfoBuilder for Skipper {}`
//! impl PersonJobBuilder for Skipper {}
//! ```

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub position: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
}

impl Person {
    /// Start a builder that has every layer available.
    pub fn builder() -> Builder {
        Builder {
            person: Person::default(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let born = self
            .date_of_birth
            .map(|date| date.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        write!(
            f,
            "name: {}, position: {}, date_of_birth: {}, address: {}",
            self.name, self.position, born, self.address
        )
    }
}

// =============================================================================
// Layers
// =============================================================================

/// Base layer: owns the person and finalizes it.
pub trait PersonBuilder: Sized {
    /// For concrete builders and new layers, not for chaining: use the setters.
    fn person_mut(&mut self) -> &mut Person;

    fn into_person(self) -> Person;

    fn build(self) -> Person {
        let person = self.into_person();
        debug!(name = %person.name, "recursive person built");
        person
    }
}

pub trait PersonInfoBuilder: PersonBuilder {
    fn called(mut self, name: impl Into<String>) -> Self {
        self.person_mut().name = name.into();
        self
    }
}

pub trait PersonJobBuilder: PersonInfoBuilder {
    fn works_as_a(mut self, position: impl Into<String>) -> Self {
        self.person_mut().position = position.into();
        self
    }
}

pub trait PersonBirthDateBuilder: PersonJobBuilder {
    fn born(mut self, date_of_birth: NaiveDate) -> Self {
        self.person_mut().date_of_birth = Some(date_of_birth);
        self
    }
}

pub trait PersonAddressBuilder: PersonBirthDateBuilder {
    fn lives_in(mut self, address: impl Into<String>) -> Self {
        self.person_mut().address = address.into();
        self
    }
}

// =============================================================================
// Concrete builders
// =============================================================================

/// The full builder returned by [`Person::builder`].
#[derive(Debug)]
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct Builder {
    person: Person,
}

impl PersonBuilder for Builder {
    fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    fn into_person(self) -> Person {
        self.person
    }
}

impl PersonInfoBuilder for Builder {}
impl PersonJobBuilder for Builder {}
impl PersonBirthDateBuilder for Builder {}
impl PersonAddressBuilder for Builder {}

impl From<Builder> for Person {
    fn from(builder: Builder) -> Self {
        builder.build()
    }
}

/// A shallower builder that stops at the birth-date layer.
#[derive(Debug, Default)]
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct BirthDateOnlyBuilder {
    person: Person,
}

impl BirthDateOnlyBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonBuilder for BirthDateOnlyBuilder {
    fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    fn into_person(self) -> Person {
        self.person
    }
}

impl PersonInfoBuilder for BirthDateOnlyBuilder {}
impl PersonJobBuilder for BirthDateOnlyBuilder {}
impl PersonBirthDateBuilder for BirthDateOnlyBuilder {}
