//! Quantity stepper component.
//!
//! Renders decrement / value / increment for a cart line. The control owns
//! the bounds: every value it submits is already inside `[min, max]`.

/// Quantity stepper bounded by available stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityControl {
    pub value: u32,
    pub min: u32,
    pub max: u32,
    /// Nothing can be chosen when the product is out of stock.
    pub disabled: bool,
}

impl QuantityControl {
    /// Smallest quantity a line can hold.
    pub const MIN: u32 = 1;

    /// Control for a line with `available_stock` units left.
    ///
    /// Out-of-stock lines keep a bound of 1 so the range stays non-empty,
    /// and the whole control is disabled.
    #[must_use]
    pub fn for_stock(quantity: u32, available_stock: u32) -> Self {
        let max = available_stock.max(Self::MIN);
        Self {
            value: quantity.clamp(Self::MIN, max),
            min: Self::MIN,
            max,
            disabled: available_stock == 0,
        }
    }

    /// Bring a requested quantity inside the control's bounds.
    #[must_use]
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(self.min, self.max)
    }

    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        !self.disabled && self.value > self.min
    }

    #[must_use]
    pub const fn can_increment(&self) -> bool {
        !self.disabled && self.value < self.max
    }

    /// Value submitted by the decrement button.
    #[must_use]
    pub fn decrement_value(&self) -> u32 {
        self.clamp(self.value.saturating_sub(1))
    }

    /// Value submitted by the increment button.
    #[must_use]
    pub fn increment_value(&self) -> u32 {
        self.clamp(self.value.saturating_add(1))
    }
}
