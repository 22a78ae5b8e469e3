//! Values that the engine derives unless the user locks them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A value the engine either recomputes every run or leaves untouched.
///
/// `Computed` values are overwritten on every calculation. `Locked` values
/// carry a manually entered amount that the engine must never overwrite.
///
/// # Example
///
/// ```
/// use jmu_payroll::models::Overridable;
/// use rust_decimal::Decimal;
///
/// let computed = Overridable::Computed(Decimal::ZERO);
/// assert_eq!(computed.resolve(|| Decimal::TEN).value(), Decimal::TEN);
///
/// let locked = Overridable::Locked(Decimal::ONE);
/// assert_eq!(locked.resolve(|| Decimal::TEN).value(), Decimal::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Overridable {
    /// Derived by the engine on each run.
    Computed(Decimal),
    /// Entered manually; preserved across runs.
    Locked(Decimal),
}

impl Default for Overridable {
    fn default() -> Self {
        Overridable::Computed(Decimal::ZERO)
    }
}

impl Overridable {
    /// Returns the current value regardless of mode.
    pub fn value(&self) -> Decimal {
        match self {
            Overridable::Computed(value) | Overridable::Locked(value) => *value,
        }
    }

    /// Returns true if the value was entered manually.
    pub fn is_locked(&self) -> bool {
        matches!(self, Overridable::Locked(_))
    }

    /// Recomputes a computed value; locked values are returned unchanged.
    pub fn resolve(self, compute: impl FnOnce() -> Decimal) -> Self {
        match self {
            Overridable::Locked(value) => Overridable::Locked(value),
            Overridable::Computed(_) => Overridable::Computed(compute()),
        }
    }

    /// Recomputes a computed value only when `condition` holds for its
    /// current value; otherwise the value is returned unchanged.
    pub fn resolve_if(
        self,
        condition: impl FnOnce(Decimal) -> bool,
        compute: impl FnOnce() -> Decimal,
    ) -> Self {
        match self {
            Overridable::Computed(value) if condition(value) => Overridable::Computed(compute()),
            other => other,
        }
    }
}
