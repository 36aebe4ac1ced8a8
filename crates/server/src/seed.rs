use rust_decimal::Decimal;
use storage::{MenuRepository, Result};
use tracing::info;

/// Seed the menu with its initial items. The order flow treats the menu as
/// read-only reference data, so this runs once at startup and is a no-op on
/// a store that already has a menu.
pub async fn seed_menu(menu: &dyn MenuRepository) -> Result<()> {
    if !menu.list().await?.is_empty() {
        info!("menu already present, skipping seed");
        return Ok(());
    }

    let items = [
        ("Margherita pizza", Decimal::new(1890, 0)),
        ("Prosciutto pizza", Decimal::new(2290, 0)),
        ("Bolognese spaghetti", Decimal::new(2090, 0)),
        ("Caesar salad", Decimal::new(1690, 0)),
        ("Tiramisu", Decimal::new(950, 0)),
        ("Lemonade", Decimal::new(500, 0)),
    ];

    for (name, price) in items {
        let item = menu.insert_item(name, price).await?;
        info!(id = item.id, name, "seeded menu item");
    }

    Ok(())
}
