//! Property-based tests for document pricing and assembly trees.

use maintenance_hub::{
    models::{AssemblyArticle, AssemblyFolder, AssemblyNode},
    services::{
        assembly,
        pricing::{compute_totals, PriceLine, Priced},
    },
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|milli| Decimal::new(milli, 3))
}

fn percentage_strategy() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        (0i64..=10_000).prop_map(|basis| Some(Decimal::new(basis, 2))),
    ]
}

fn tax_strategy() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        Just(Some(Decimal::ZERO)),
        Just(Some(Decimal::new(4, 0))),
        Just(Some(Decimal::new(10, 0))),
        Just(Some(Decimal::new(2100, 2))),
    ]
}

fn line_strategy() -> impl Strategy<Value = PriceLine> {
    (
        quantity_strategy(),
        money_strategy(),
        percentage_strategy(),
        tax_strategy(),
    )
        .prop_map(|(quantity, unit_price, discount, tax_percentage)| PriceLine {
            quantity,
            unit_price,
            discount,
            tax_percentage,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn line_total_is_never_negative(line in line_strategy()) {
        prop_assert!(line.line_total() >= Decimal::ZERO);
        prop_assert!(line.line_total() <= line.quantity * line.unit_price);
    }

    #[test]
    fn brackets_partition_the_totals(lines in prop::collection::vec(line_strategy(), 0..20)) {
        let totals = compute_totals(lines.iter());

        let bases: Decimal = totals.brackets.iter().map(|b| b.taxable_base).sum();
        let taxes: Decimal = totals.brackets.iter().map(|b| b.tax_amount).sum();
        let line_totals: Decimal = lines.iter().map(|l| l.line_total()).sum();

        prop_assert_eq!(bases, totals.subtotal);
        prop_assert_eq!(bases, line_totals);
        prop_assert_eq!(taxes, totals.total - totals.subtotal);
        prop_assert_eq!(totals.discount_total, totals.gross - totals.subtotal);
    }

    #[test]
    fn brackets_are_unique_and_ascending(lines in prop::collection::vec(line_strategy(), 1..20)) {
        let totals = compute_totals(lines.iter());
        let keys: Vec<Decimal> = totals.brackets.iter().map(|b| b.tax_percentage).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn recomputing_is_idempotent(lines in prop::collection::vec(line_strategy(), 0..20)) {
        prop_assert_eq!(compute_totals(lines.iter()), compute_totals(lines.iter()));
    }
}

fn article_node(quantity: Decimal, unit_price: Decimal) -> AssemblyNode {
    AssemblyNode::Article(AssemblyArticle {
        id: Uuid::new_v4(),
        article_id: None,
        code: None,
        description: "Part".into(),
        quantity,
        unit_price,
        discount: None,
        tax_percentage: None,
    })
}

/// Trees up to four levels deep with folder multipliers of 1..=3.
fn tree_strategy() -> impl Strategy<Value = Vec<AssemblyNode>> {
    let leaf = (quantity_strategy(), money_strategy())
        .prop_map(|(q, p)| article_node(q, p));
    let node = leaf.prop_recursive(4, 48, 6, |inner| {
        (1i64..=3, prop::collection::vec(inner, 0..6)).prop_map(|(quantity, children)| {
            AssemblyNode::Folder(AssemblyFolder {
                id: Uuid::new_v4(),
                description: "Group".into(),
                quantity: Decimal::from(quantity),
                children,
            })
        })
    });
    prop::collection::vec(node, 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn counts_match_flattened_walk(tree in tree_strategy()) {
        let counts = assembly::count_nodes(&tree);
        let flat = assembly::flatten(&tree);
        prop_assert_eq!(counts.folders + counts.articles, flat.len());
    }

    #[test]
    fn tree_total_equals_priced_lines(tree in tree_strategy()) {
        let total = assembly::tree_total(&tree);
        let from_lines = compute_totals(assembly::price_lines(&tree)).subtotal;
        prop_assert_eq!(total, from_lines);
    }
}
