//! The interface the core consumes from the unit-identification/conversion
//! collaborator. The core never does unit arithmetic itself - it only asks
//! the provider to recognise tokens and to move values to and from a
//! measure's base unit.

use crate::number::Number;

/// A resolved unit of measurement, as reported by a [UnitProvider]. This is
/// an owned value - nodes hold their own copy so that cloning a tree never
/// shares state with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    name: String,
    display: String,
    measures: String,
    base: bool,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        display: impl Into<String>,
        measures: impl Into<String>,
        base: bool,
    ) -> Unit {
        Unit {
            name: name.into(),
            display: display.into(),
            measures: measures.into(),
            base,
        }
    }

    /// The unit's canonical name, e.g. `kilogram`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shortest prefix display form, e.g. `kg`. Used when re-rendering a
    /// tree to text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The measure this unit belongs to, e.g. `mass`. Units with the same
    /// measure are mutually convertible; the solver uses this as the
    /// compatibility key across an equation's two sides.
    pub fn measures(&self) -> &str {
        &self.measures
    }

    /// Whether this is the canonical unit of its measure.
    pub fn is_base(&self) -> bool {
        self.base
    }
}

/// The unit service's interface.
pub trait UnitProvider {
    /// Recognises a token as a unit, including derived/composite spellings
    /// such as `km/h` when the provider understands them.
    fn identify(&self, token: &str) -> Option<Unit>;

    /// Converts `value` in `unit` to the measure's base unit, returning the
    /// converted value and the base unit itself.
    fn base_value(&self, value: Number, unit: &Unit) -> Option<(Number, Unit)>;

    /// Converts `value` from the measure's base unit back into `unit`.
    fn derived_value(&self, value: Number, unit: &Unit) -> Option<Number>;
}

/// A provider which recognises nothing. Parsing with this gives plain
/// unit-free arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUnits;

impl UnitProvider for NullUnits {
    fn identify(&self, _token: &str) -> Option<Unit> {
        None
    }

    fn base_value(&self, _value: Number, _unit: &Unit) -> Option<(Number, Unit)> {
        None
    }

    fn derived_value(&self, _value: Number, _unit: &Unit) -> Option<Number> {
        None
    }
}
