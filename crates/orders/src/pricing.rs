use rust_decimal::Decimal;

use storage::MenuItem;

/// Sum of `price * quantity` over the resolved lines, in exact decimal
/// arithmetic. An empty set totals zero.
pub fn compute_total(lines: &[(MenuItem, u32)]) -> Decimal {
    lines
        .iter()
        .map(|(item, quantity)| item.price * Decimal::from(*quantity))
        .sum()
}
