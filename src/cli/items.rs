use clap::Args;
use storefront_cart::{
    cart::Cart, catalog::Catalog, config::CartConfig, products::ProductId, storage::FileStorage,
};

use super::{ensure_saved, print_line};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog product id
    product_id: String,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Product id of the line to remove
    product_id: String,
}

#[derive(Debug, Args)]
pub(crate) struct SetQuantityArgs {
    /// Product id of the line to change
    product_id: String,

    /// New quantity
    quantity: u32,
}

pub(crate) fn add(
    config: &CartConfig,
    cart: &mut Cart<FileStorage>,
    args: &AddArgs,
) -> Result<(), String> {
    let catalog = Catalog::from_path(&config.catalog)
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let id = ProductId::from(args.product_id.as_str());

    let Some(product) = catalog.get(&id) else {
        return Err(format!("unknown product {id}"));
    };

    cart.add_item(product);
    ensure_saved(cart)?;

    let quantity = cart.get(&id).map_or(0, |item| item.quantity().get());

    print_line(&format!("added {} (quantity {quantity})", product.name))
}

pub(crate) fn remove(cart: &mut Cart<FileStorage>, args: &RemoveArgs) -> Result<(), String> {
    let id = ProductId::from(args.product_id.as_str());

    if cart.get(&id).is_none() {
        return print_line(&format!("{id} is not in the cart"));
    }

    cart.remove_item(&id);
    ensure_saved(cart)?;

    print_line(&format!("removed {id}"))
}

pub(crate) fn set_quantity(
    cart: &mut Cart<FileStorage>,
    args: &SetQuantityArgs,
) -> Result<(), String> {
    let id = ProductId::from(args.product_id.as_str());

    if cart.get(&id).is_none() {
        return Err(format!("{id} is not in the cart"));
    }

    cart.set_quantity(&id, args.quantity);
    ensure_saved(cart)?;

    if args.quantity == 0 {
        print_line(&format!("removed {id}"))
    } else {
        print_line(&format!("{id} quantity set to {}", args.quantity))
    }
}

pub(crate) fn clear(cart: &mut Cart<FileStorage>) -> Result<(), String> {
    cart.clear();
    ensure_saved(cart)?;

    print_line("cart cleared")
}
