//! Canonical ordering of named section records.
//!
//! Editors can rearrange groups freely, but some layouts depend on a fixed
//! sequence (the feature grid's tall and wide cards, the numbered process
//! steps). Records are re-ranked by their anchor name against a constant
//! table. Names missing from the table follow the ranked ones in their
//! original relative order, and duplicates are kept.

/// Canonical order of the feature cards.
pub const FEATURE_ORDER: &[&str] = &[
    "satisfaccion",
    "pago",
    "soluciones",
    "gestion",
    "servicio",
    "entrega",
];

/// Canonical order of the process steps.
pub const STEP_ORDER: &[&str] = &["paso1", "paso2", "paso3", "paso4", "paso5"];

/// Grid placement and tint of a feature card, keyed by name.
pub const FEATURE_LAYOUT: &[(&str, &str)] = &[
    ("satisfaccion", "card card--tall"),
    ("pago", "card card--wide"),
    ("gestion", "card card--blue"),
    ("servicio", "card card--blue"),
];

/// Class of a feature card without a layout entry.
pub const DEFAULT_CARD_CLASS: &str = "card";

/// A record tagged with the anchor name of the block it came from.
pub trait Named {
    fn name(&self) -> &str;
}

/// Re-order `items` by the rank of their name in `order`.
///
/// The sort is stable: items sharing a rank, and all unranked items, keep
/// their relative input order.
pub fn order_by_name<T: Named>(mut items: Vec<T>, order: &[&str]) -> Vec<T> {
    items.sort_by_key(|item| {
        order
            .iter()
            .position(|name| *name == item.name())
            .unwrap_or(order.len())
    });
    items
}

/// CSS classes of a feature card.
pub fn card_class(name: &str) -> &'static str {
    FEATURE_LAYOUT
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, class)| *class)
        .unwrap_or(DEFAULT_CARD_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, u8);

    impl Named for Item {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.0).collect()
    }

    #[test]
    fn ranks_by_table() {
        let items = vec![Item("c", 0), Item("a", 0), Item("b", 0)];
        let ordered = order_by_name(items, &["a", "b", "c"]);
        assert_eq!(names(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_names_follow_in_input_order() {
        let items = vec![Item("d", 0), Item("c", 0), Item("z", 0), Item("a", 0), Item("b", 0)];
        let ordered = order_by_name(items, &["a", "b", "c"]);
        assert_eq!(names(&ordered), vec!["a", "b", "c", "d", "z"]);
    }

    #[test]
    fn duplicates_are_kept_stably() {
        let items = vec![Item("b", 1), Item("a", 1), Item("b", 2), Item("", 1)];
        let ordered = order_by_name(items, &["a", "b"]);
        assert_eq!(
            ordered,
            vec![Item("a", 1), Item("b", 1), Item("b", 2), Item("", 1)]
        );
    }

    #[test]
    fn step_table_orders_numbered_steps() {
        let items = vec![Item("paso3", 0), Item("paso1", 0), Item("paso2", 0)];
        let ordered = order_by_name(items, STEP_ORDER);
        assert_eq!(names(&ordered), vec!["paso1", "paso2", "paso3"]);
    }

    #[test]
    fn card_classes() {
        assert_eq!(card_class("satisfaccion"), "card card--tall");
        assert_eq!(card_class("pago"), "card card--wide");
        assert_eq!(card_class("servicio"), "card card--blue");
        assert_eq!(card_class("entrega"), "card");
    }
}
