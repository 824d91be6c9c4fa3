//! Interactive catalog demo: load a JSON catalog, print the listing, then
//! walk products through the guarded price-change protocol.

use std::io::IsTerminal;

use anyhow::Context;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use lavka_catalog::{Category, CatalogRegistry, PriceChange, TracingHook, parse_confirmation};
use lavka_loader::load_catalog;

fn main() -> anyhow::Result<()> {
    lavka_observability::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        tracing::warn!("no catalog path given; using data/catalog.json");
        "data/catalog.json".to_string()
    });

    let mut registry = CatalogRegistry::new();
    registry.attach_hook(Box::new(TracingHook));

    let mut categories = load_catalog(&path, &mut registry)
        .with_context(|| format!("loading catalog from {path}"))?;

    for category in &categories {
        println!("{category}");
        if !category.products().is_empty() {
            println!("{}", category.product_lines());
        }
        println!("Средняя цена: {:.2} руб.", category.average_price());
        println!();
    }
    println!(
        "Всего категорий: {}, товаров добавлено: {}",
        registry.category_count(),
        registry.unique_products()
    );

    if std::io::stdin().is_terminal() {
        reprice_session(&mut categories)?;
    } else {
        tracing::info!("stdin is not a terminal; skipping the interactive session");
    }

    Ok(())
}

/// Repeatedly lets the user pick a product and propose a price. Lowering a
/// price solicits one line of confirmation; `y` (any case) approves, anything
/// else declines.
fn reprice_session(categories: &mut [Category]) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    loop {
        let mut labels: Vec<String> = Vec::new();
        let mut slots: Vec<(usize, usize)> = Vec::new();
        for (category_index, category) in categories.iter().enumerate() {
            for (product_index, product) in category.iter().enumerate() {
                labels.push(format!("{} / {}", category.name(), product));
                slots.push((category_index, product_index));
            }
        }
        labels.push("Выход".to_string());

        let choice = Select::with_theme(&theme)
            .with_prompt("Выберите товар")
            .items(&labels)
            .default(0)
            .interact()?;
        if choice == slots.len() {
            return Ok(());
        }

        let proposed: f64 = Input::with_theme(&theme)
            .with_prompt("Новая цена, руб.")
            .interact()?;

        let (category_index, product_index) = slots[choice];
        let product = categories[category_index]
            .product_mut(product_index)
            .context("selected product is out of range")?;

        match product.request_price_change(proposed) {
            PriceChange::Applied { previous, current } => {
                println!("Цена изменена: {previous} -> {current} руб.");
            }
            PriceChange::Rejected { proposed } => {
                println!("Предложение {proposed} отклонено: цена должна быть положительной");
            }
            PriceChange::AwaitingConfirmation(pending) => {
                let answer: String = Input::with_theme(&theme)
                    .with_prompt(format!(
                        "Понизить цену с {} до {}? (y/n)",
                        pending.current(),
                        pending.proposed()
                    ))
                    .allow_empty(true)
                    .interact()?;
                let approved = parse_confirmation(&answer);
                match product.confirm_price_change(pending, approved)? {
                    PriceChange::Applied { previous, current } => {
                        println!("Цена изменена: {previous} -> {current} руб.");
                    }
                    PriceChange::Declined { retained } => {
                        println!("Цена не изменена: {retained} руб.");
                    }
                    other => unreachable!("confirmation resolves to Applied or Declined: {other:?}"),
                }
            }
            PriceChange::Declined { .. } => {
                unreachable!("a price request never resolves to Declined")
            }
        }
    }
}
