//! Functional (deferred) builder.
//!
//! Nothing is mutated while the chain is being written. Each call records an
//! operation; [`FunctionalBuilder::build`] folds the recorded operations over
//! a fresh `Default` value. `build` borrows the builder, so it can be called
//! again and every call yields a new, independent value.
//!
//! New setters are added from outside with extension traits, see
//! [`PersonBuilderExt`].
//!
//! ```
//! use fluent_builders::functional::{FunctionalBuilder, PersonBuilder, PersonBuilderExt};
//!
//! let builder = PersonBuilder::new().called("Sarah").works_as("Developer");
//! let first = builder.build();
//! let second = builder.build();
//!
//! assert_eq!(first, second);
//! assert_eq!(first.position, "Developer");
//! ```
//!
//! Operations are reference counted without locking, so a builder never
//! crosses a thread boundary:
//!
//! ```compile_fail
//! use fluent_builders::functional::PersonBuilder;
//!
//! fn assert_send<T: Send>() {}
//! assert_send::<PersonBuilder>();
//! ```

use std::fmt;
use std::rc::Rc;

use tracing::trace;

/// A deferred step: takes the value built so far and returns the next one.
pub type Operation<T> = Rc<dyn Fn(T) -> T>;

/// Ordered list of deferred operations.
pub struct Operations<T> {
    ops: Vec<Operation<T>>,
}

impl<T> Operations<T> {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn push(&mut self, op: impl Fn(T) -> T + 'static) {
        self.ops.push(Rc::new(op));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Run every operation once, in the order recorded, starting from
    /// `T::default()`.
    pub fn replay(&self) -> T
    where
        T: Default,
    {
        self.ops.iter().fold(T::default(), |subject, op| op(subject))
    }
}

impl<T> Default for Operations<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Cloning shares the recorded closures; appending to a clone never touches
// the original list.
impl<T> Clone for Operations<T> {
    fn clone(&self) -> Self {
        Self {
            ops: self.ops.clone(),
        }
    }
}

impl<T> fmt::Debug for Operations<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operations").field("len", &self.ops.len()).finish()
    }
}

/* ============================================================
 * The builder protocol
 * ============================================================
 */

/// Self-typed functional builder: every recording method returns the
/// implementing builder, so inherent and extension setters chain freely.
pub trait FunctionalBuilder: Sized {
    type Subject: Default;

    fn operations(&self) -> &Operations<Self::Subject>;

    fn operations_mut(&mut self) -> &mut Operations<Self::Subject>;

    /// Record an in-place mutation.
    fn apply(self, action: impl Fn(&mut Self::Subject) + 'static) -> Self {
        self.map(move |mut subject| {
            action(&mut subject);
            subject
        })
    }

    /// Record a by-value transformation.
    fn map(mut self, op: impl Fn(Self::Subject) -> Self::Subject + 'static) -> Self {
        self.operations_mut().push(op);
        self
    }

    fn build(&self) -> Self::Subject {
        let operations = self.operations();
        trace!(operations = operations.len(), "replaying deferred operations");
        operations.replay()
    }
}

/// Ready-made functional builder for any `Default` type.
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct Builder<T> {
    operations: Operations<T>,
}

impl<T> Builder<T> {
    pub fn new() -> Self {
        Self {
            operations: Operations::new(),
        }
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self {
            operations: self.operations.clone(),
        }
    }
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("operations", &self.operations)
            .finish()
    }
}

impl<T: Default> FunctionalBuilder for Builder<T> {
    type Subject = T;

    fn operations(&self) -> &Operations<T> {
        &self.operations
    }

    fn operations_mut(&mut self) -> &mut Operations<T> {
        &mut self.operations
    }
}

/* ============================================================
 * Person example
 * ============================================================
 */

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub position: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name: {}, position: {}", self.name, self.position)
    }
}

#[derive(Debug, Clone, Default)]
#[must_use = "builders do nothing unless finalized with `build()`"]
pub struct PersonBuilder {
    operations: Operations<Person>,
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn called(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.apply(move |person| person.name = name.clone())
    }
}

impl FunctionalBuilder for PersonBuilder {
    type Subject = Person;

    fn operations(&self) -> &Operations<Person> {
        &self.operations
    }

    fn operations_mut(&mut self) -> &mut Operations<Person> {
        &mut self.operations
    }
}

/// Setters added without touching [`PersonBuilder`]; available on any
/// functional builder of [`Person`].
pub trait PersonBuilderExt: FunctionalBuilder<Subject = Person> {
    fn works_as(self, position: impl Into<String>) -> Self {
        let position = position.into();
        self.apply(move |person| person.position = position.clone())
    }
}

impl<B: FunctionalBuilder<Subject = Person>> PersonBuilderExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    #[test]
    fn test_called_and_extension_chain() {
        let person = PersonBuilder::new()
            .called("Sarah")
            .works_as("Developer")
            .build();

        assert_eq!(person.name, "Sarah");
        assert_eq!(person.position, "Developer");
    }

    #[test]
    fn test_build_twice_gives_independent_values() {
        let builder = PersonBuilder::new().called("Sarah").works_as("Developer");

        let mut first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);

        first.name.push_str(" Connor");
        assert_eq!(second.name, "Sarah");
        assert_eq!(builder.build().name, "Sarah");
        assert_eq!(builder.operations().len(), 2);
    }

    #[test]
    fn test_nothing_runs_until_build() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let builder = PersonBuilder::new().apply(move |_| counter.set(counter.get() + 1));

        assert_eq!(runs.get(), 0);
        let _ = builder.build();
        assert_eq!(runs.get(), 1);
        let _ = builder.build();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_operations_replay_in_append_order() {
        let log = Builder::<Vec<&'static str>>::new()
            .apply(|v| v.push("first"))
            .map(|mut v| {
                v.push("second");
                v
            })
            .apply(|v| v.push("third"))
            .build();

        assert_eq!(log, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_later_operation_wins_on_same_field() {
        let person = PersonBuilder::new().called("Old").called("New").build();
        assert_eq!(person.name, "New");
    }

    #[test]
    fn test_clone_branches_without_affecting_original() {
        let base = PersonBuilder::new().called("Sarah");
        let developer = base.clone().works_as("Developer");
        let manager = base.clone().works_as("Manager");

        assert_eq!(base.build().position, "");
        assert_eq!(developer.build().position, "Developer");
        assert_eq!(manager.build().position, "Manager");
        assert_eq!(base.operations().len(), 1);
    }

    #[test]
    fn test_extension_works_on_generic_builder() {
        let person = Builder::<Person>::new().works_as("Quant").build();
        assert_eq!(person.position, "Quant");
    }

    #[test]
    fn test_empty_builder_yields_default() {
        let builder = PersonBuilder::new();
        assert!(builder.operations().is_empty());
        assert_eq!(builder.build(), Person::default());
    }

    proptest! {
        #[test]
        fn test_replay_is_repeatable(names in prop::collection::vec("[a-z]{1,8}", 0..16)) {
            let builder = names
                .iter()
                .cloned()
                .fold(PersonBuilder::new(), |b, name| b.called(name));

            let first = builder.build();
            let second = builder.build();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.name, names.last().cloned().unwrap_or_default());
            prop_assert_eq!(builder.operations().len(), names.len());
        }
    }
}
