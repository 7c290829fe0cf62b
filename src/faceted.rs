//! Faceted builder: one root builder, several facets, one shared `Person`.
//!
//! Each facet owns a cohesive subset of the fields (where someone lives,
//! where someone works). Switching facets moves the in-progress person into
//! the next facet; the previous handle is consumed, so there is never more
//! than one live handle to the same target.
//!
//! ```
//! use fluent_builders::faceted::{Person, PersonBuilder, PersonFacets};
//!
//! let person: Person = PersonBuilder::new()
//!     .works()
//!     .at("Acme")
//!     .as_a("Engineer")
//!     .earning(1000)
//!     .lives()
//!     .at("Main St")
//!     .into();
//!
//! assert_eq!(person.company_name, "Acme");
//! assert_eq!(person.street_address, "Main St");
//! ```
//!
//! A facet handle cannot be reused after switching away from it:
//!
//! ```compile_fail
//! use fluent_builders::faceted::{PersonBuilder, PersonFacets};
//!
//! let job = PersonBuilder::new().works().at("Acme");
//! let _address = job.lives();
//! let _stale = job.earning(10);
//! ```

use std::fmt;

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    // address
    pub street_address: String,
    pub postcode: String,
    pub city: String,

    // employment
    pub company_name: String,
    pub position: String,
    pub annual_income: u32,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "street_address: {}, postcode: {}, city: {}, company_name: {}, position: {}, annual_income: {}",
            self.street_address,
            self.postcode,
            self.city,
            self.company_name,
            self.position,
            self.annual_income
        )
    }
}

/* ============================================================
 * Root builder and the shared facet protocol
 * ============================================================
 */

#[derive(Debug, Default)]
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct PersonBuilder {
    person: Person,
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Operations shared by the root builder and every facet.
///
/// Implementors only say how to hand back the root; switching facets and
/// finalizing come for free.
pub trait PersonFacets: Sized {
    /// For implementors of new facets, not for chaining: use the facet setters.
    fn into_root(self) -> PersonBuilder;

    fn works(self) -> PersonJobBuilder {
        PersonJobBuilder {
            root: self.into_root(),
        }
    }

    fn lives(self) -> PersonAddressBuilder {
        PersonAddressBuilder {
            root: self.into_root(),
        }
    }

    fn build(self) -> Person {
        let person = self.into_root().person;
        debug!(company = %person.company_name, city = %person.city, "faceted person built");
        person
    }
}

impl PersonFacets for PersonBuilder {
    fn into_root(self) -> PersonBuilder {
        self
    }
}

/* ============================================================
 * Address facet
 * ============================================================
 */

#[derive(Debug)]
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct PersonAddressBuilder {
    root: PersonBuilder,
}

impl PersonAddressBuilder {
    pub fn at(mut self, street_address: impl Into<String>) -> Self {
        self.root.person.street_address = street_address.into();
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.root.person.postcode = postcode.into();
        self
    }

    pub fn in_city(mut self, city: impl Into<String>) -> Self {
        self.root.person.city = city.into();
        self
    }
}

impl PersonFacets for PersonAddressBuilder {
    fn into_root(self) -> PersonBuilder {
        self.root
    }
}

/* ============================================================
 * Employment facet
 * ============================================================
 */

#[derive(Debug)]
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct PersonJobBuilder {
    root: PersonBuilder,
}

impl PersonJobBuilder {
    pub fn at(mut self, company_name: impl Into<String>) -> Self {
        self.root.person.company_name = company_name.into();
        self
    }

    pub fn as_a(mut self, position: impl Into<String>) -> Self {
        self.root.person.position = position.into();
        self
    }

    pub fn earning(mut self, annual_income: u32) -> Self {
        self.root.person.annual_income = annual_income;
        self
    }
}

impl PersonFacets for PersonJobBuilder {
    fn into_root(self) -> PersonBuilder {
        self.root
    }
}

// Every facet finalizes the same way, so `let p: Person = facet.into()` works
// wherever `build()` does.
macro_rules! impl_into_person {
    ($($builder:ty),* $(,)?) => {
        $(
            impl From<$builder> for Person {
                fn from(builder: $builder) -> Self {
                    builder.build()
                }
            }
        )*
    };
}

impl_into_person!(PersonBuilder, PersonAddressBuilder, PersonJobBuilder);
