use crate::etl::Transformation;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Name,
    Modified,
    Size,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Name, SortOrder::Modified, SortOrder::Size];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Name => "Name",
            SortOrder::Modified => "Last modified",
            SortOrder::Size => "Size",
        }
    }
}

/// Returns the list re-ordered for display. The input is left untouched and
/// ties keep their original order.
pub fn sorted(transformations: &[Transformation], order: SortOrder) -> Vec<&Transformation> {
    let mut view: Vec<&Transformation> = transformations.iter().collect();
    match order {
        SortOrder::Name => view.sort_by(|a, b| a.name.cmp(&b.name)),
        // newest first, unknown timestamps last
        SortOrder::Modified => view.sort_by(|a, b| match (a.modified, b.modified) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortOrder::Size => view.sort_by(|a, b| b.size.cmp(&a.size)),
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t(name: &str, day: Option<u32>, size: u64) -> Transformation {
        Transformation {
            name: name.to_string(),
            path: format!("/etl/{name}"),
            modified: day.map(|d| Utc.with_ymd_and_hms(2025, 5, d, 0, 0, 0).unwrap()),
            size,
        }
    }

    fn names(view: &[&Transformation]) -> Vec<String> {
        view.iter().map(|t| t.name.clone()).collect()
    }

    fn sample() -> Vec<Transformation> {
        vec![
            t("ventas.ktr", Some(3), 200),
            t("clientes.ktr", None, 900),
            t("stock.ktr", Some(10), 200),
            t("Zonas.ktr", Some(1), 50),
        ]
    }

    #[test]
    fn sorts_by_name_lexicographically() {
        let list = sample();
        assert_eq!(
            names(&sorted(&list, SortOrder::Name)),
            ["Zonas.ktr", "clientes.ktr", "stock.ktr", "ventas.ktr"]
        );
    }

    #[test]
    fn sorts_by_modified_newest_first_with_unknown_last() {
        let list = sample();
        assert_eq!(
            names(&sorted(&list, SortOrder::Modified)),
            ["stock.ktr", "ventas.ktr", "Zonas.ktr", "clientes.ktr"]
        );
    }

    #[test]
    fn sorts_by_size_descending_and_stable() {
        let list = sample();
        let view = sorted(&list, SortOrder::Size);
        let sizes: Vec<u64> = view.iter().map(|t| t.size).collect();
        assert_eq!(sizes, [900, 200, 200, 50]);
        // equal sizes keep input order
        assert_eq!(names(&view)[1..3], ["ventas.ktr", "stock.ktr"]);
    }

    #[test]
    fn sorting_does_not_touch_the_loaded_list() {
        let list = sample();
        let before = list.clone();
        let _ = sorted(&list, SortOrder::Size);
        let _ = sorted(&list, SortOrder::Modified);
        assert_eq!(list, before);
    }
}
