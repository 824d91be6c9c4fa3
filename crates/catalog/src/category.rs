//! Category aggregate: an insertion-ordered, exclusively owned product list.

use core::fmt;

use lavka_core::{CatalogError, CatalogResult};
use serde::Serialize;

use crate::product::Product;
use crate::registry::CatalogRegistry;

/// A named group of products.
///
/// The category owns its products outright. Membership changes only through
/// [`Category::new`] and [`Category::add_product`], the two paths that keep
/// the [`CatalogRegistry`] counters in step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    name: String,
    description: String,
    products: Vec<Product>,
}

impl Category {
    /// Creates a category taking ownership of the initial product list.
    ///
    /// Bumps the registry's category counter by one and its lifetime product
    /// counter by the list length (an empty list still counts the category).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        products: Vec<Product>,
        registry: &mut CatalogRegistry,
    ) -> Self {
        let category = Self {
            name: name.into(),
            description: description.into(),
            products,
        };
        registry.record_category(&category.name, category.products.len());
        category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Owned products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Mutable access to one product, for running its price protocol.
    pub fn product_mut(&mut self, index: usize) -> Option<&mut Product> {
        self.products.get_mut(index)
    }

    /// Appends a product and bumps the lifetime product counter.
    ///
    /// A zero-quantity product is rejected with [`CatalogError::Validation`];
    /// the list and the counters stay untouched.
    pub fn add_product(
        &mut self,
        product: Product,
        registry: &mut CatalogRegistry,
    ) -> CatalogResult<()> {
        if product.quantity() == 0 {
            return Err(CatalogError::validation(
                "Товар с нулевым количеством не может быть добавлен",
            ));
        }
        let product_name = product.name().to_string();
        let quantity = product.quantity();
        self.products.push(product);
        registry.record_product_added(&self.name, &product_name, quantity);
        Ok(())
    }

    /// One [`Product`] display line per owned product, storage order, joined
    /// with `\n`.
    pub fn product_lines(&self) -> String {
        self.products
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Live sum of unit quantities over the owned products.
    ///
    /// Distinct from the registry's lifetime counter: this reflects current
    /// stock, not how many products ever entered the catalog.
    pub fn total_unit_count(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.quantity())).sum()
    }

    /// Arithmetic mean of the owned unit prices; `0.0` for an empty category.
    pub fn average_price(&self) -> f64 {
        if self.products.is_empty() {
            return 0.0;
        }
        let total: f64 = self.products.iter().map(Product::price).sum();
        total / self.products.len() as f64
    }

    pub fn iter(&self) -> ProductsIter<'_> {
        ProductsIter {
            inner: self.products.iter(),
        }
    }
}

impl fmt::Display for Category {
    /// `<name>, количество продуктов: <total units> шт.`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, количество продуктов: {} шт.",
            self.name,
            self.total_unit_count()
        )
    }
}

/// Forward-only pass over a category's products, in insertion order.
#[derive(Debug, Clone)]
pub struct ProductsIter<'a> {
    inner: core::slice::Iter<'a, Product>,
}

impl<'a> Iterator for ProductsIter<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ProductsIter<'_> {}

impl<'a> IntoIterator for &'a Category {
    type Item = &'a Product;
    type IntoIter = ProductsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{PriceChange, ProductDraft, new_product};

    fn pasta(registry: &mut CatalogRegistry) -> Category {
        Category::new(
            "Паста",
            "Изделия из теста",
            vec![
                Product::new("спагетти", "из твёрдых сортов пшеницы", 50.0, 20),
                Product::new("перья", "гнезда", 60.0, 15),
            ],
            registry,
        )
    }

    #[test]
    fn construction_counts_category_and_initial_products() {
        let mut registry = CatalogRegistry::new();
        let _pasta = pasta(&mut registry);
        let _cereal = Category::new(
            "Крупы",
            "Зерно",
            vec![
                Product::new("гречка", "ядрица", 90.0, 30),
                Product::new("рис", "круглозерный", 80.0, 25),
            ],
            &mut registry,
        );
        assert_eq!(registry.category_count(), 2);
        assert_eq!(registry.unique_products(), 4);
    }

    #[test]
    fn empty_category_counts_itself_but_no_products() {
        let mut registry = CatalogRegistry::new();
        let empty = Category::new("Пустая", "", Vec::new(), &mut registry);
        assert_eq!(registry.category_count(), 1);
        assert_eq!(registry.unique_products(), 0);
        assert_eq!(empty.total_unit_count(), 0);
        assert_eq!(empty.average_price(), 0.0);
        assert_eq!(empty.product_lines(), "");
    }

    #[test]
    fn add_product_appends_and_bumps_the_lifetime_counter() {
        let mut registry = CatalogRegistry::new();
        let mut category = pasta(&mut registry);
        category
            .add_product(Product::new("фузилли", "спираль", 75.0, 12), &mut registry)
            .unwrap();
        assert_eq!(category.products().len(), 3);
        assert_eq!(category.products()[2].name(), "фузилли");
        assert_eq!(registry.unique_products(), 3);
    }

    #[test]
    fn add_product_rejects_zero_quantity_and_leaves_state_untouched() {
        let mut registry = CatalogRegistry::new();
        let mut category = pasta(&mut registry);
        let err = category
            .add_product(Product::new("фузилли", "", 75.0, 0), &mut registry)
            .unwrap_err();
        match err {
            CatalogError::Validation(_) => {}
            _ => panic!("Expected Validation error for zero quantity"),
        }
        assert_eq!(category.products().len(), 2);
        assert_eq!(registry.unique_products(), 2);
    }

    #[test]
    fn product_lines_lists_every_product_in_storage_order() {
        let mut registry = CatalogRegistry::new();
        let category = pasta(&mut registry);
        assert_eq!(
            category.product_lines(),
            "спагетти, 50.0 руб. Остаток: 20 шт.\nперья, 60.0 руб. Остаток: 15 шт."
        );
    }

    #[test]
    fn display_reports_total_units_not_product_count() {
        let mut registry = CatalogRegistry::new();
        let category = pasta(&mut registry);
        assert_eq!(category.to_string(), "Паста, количество продуктов: 35 шт.");
    }

    #[test]
    fn average_price_is_the_mean_of_unit_prices() {
        let mut registry = CatalogRegistry::new();
        let category = pasta(&mut registry);
        assert_eq!(category.average_price(), 55.0);
    }

    #[test]
    fn iteration_follows_insertion_order_and_restarts_per_call() {
        let mut registry = CatalogRegistry::new();
        let category = pasta(&mut registry);
        let first: Vec<&str> = category.iter().map(Product::name).collect();
        assert_eq!(first, ["спагетти", "перья"]);
        let second: Vec<&str> = (&category).into_iter().map(Product::name).collect();
        assert_eq!(first, second);
        assert_eq!(category.iter().len(), 2);
    }

    #[test]
    fn product_mut_runs_the_price_protocol_in_place() {
        let mut registry = CatalogRegistry::new();
        let mut category = pasta(&mut registry);
        let product = category.product_mut(0).unwrap();
        let outcome = product.request_price_change(65.0);
        assert_eq!(
            outcome,
            PriceChange::Applied {
                previous: 50.0,
                current: 65.0
            }
        );
        assert_eq!(category.products()[0].price(), 65.0);
        assert!(category.product_mut(5).is_none());
    }

    #[test]
    fn factory_merge_inside_a_category_is_visible_through_the_listing() {
        let mut registry = CatalogRegistry::new();
        let mut category = Category::new(
            "Паста",
            "",
            vec![Product::new("спагетти", "", 50.0, 20)],
            &mut registry,
        );
        {
            let products = &mut category.products;
            new_product(ProductDraft::base("спагетти", "", 45.0, 5), products).unwrap();
        }
        assert_eq!(
            category.product_lines(),
            "спагетти, 50.0 руб. Остаток: 25 шт."
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Step {
            NewCategory(u8),
            AddProduct(u16),
        }

        fn step() -> impl Strategy<Value = Step> {
            prop_oneof![
                (0u8..5).prop_map(Step::NewCategory),
                any::<u16>().prop_map(Step::AddProduct),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: counters only ever grow, by exactly the amount recorded.
            #[test]
            fn counters_are_monotonic_over_any_interleaving(
                steps in proptest::collection::vec(step(), 0..40),
            ) {
                let mut registry = CatalogRegistry::new();
                let mut categories: Vec<Category> = Vec::new();
                let mut expected_categories = 0u64;
                let mut expected_products = 0u64;
                for step in steps {
                    match step {
                        Step::NewCategory(initial) => {
                            let products: Vec<Product> = (0..initial)
                                .map(|i| Product::new(format!("товар {i}"), "", 10.0, 1))
                                .collect();
                            expected_categories += 1;
                            expected_products += u64::from(initial);
                            categories.push(Category::new(
                                "категория",
                                "",
                                products,
                                &mut registry,
                            ));
                        }
                        Step::AddProduct(seed) => {
                            if let Some(category) = categories.last_mut() {
                                category
                                    .add_product(
                                        Product::new(format!("добавка {seed}"), "", 5.0, 1),
                                        &mut registry,
                                    )
                                    .unwrap();
                                expected_products += 1;
                            }
                        }
                    }
                    prop_assert_eq!(registry.category_count(), expected_categories);
                    prop_assert_eq!(registry.unique_products(), expected_products);
                }
            }
        }
    }
}
