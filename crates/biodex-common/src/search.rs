//! Species search over already-fetched records.

use crate::entities::Species;

/// Case-insensitive substring match on scientific name, common name or
/// description. A blank query keeps every record in its original order.
pub fn filter_species<'a>(species: &'a [Species], query: &str) -> Vec<&'a Species> {
    if query.trim().is_empty() {
        return species.iter().collect();
    }
    let needle = query.to_lowercase();
    species.iter().filter(|s| matches(s, &needle)).collect()
}

fn matches(s: &Species, needle: &str) -> bool {
    let contains = |field: Option<&str>| {
        field.is_some_and(|text| text.to_lowercase().contains(needle))
    };
    contains(Some(&s.scientific_name))
        || contains(s.common_name.as_deref())
        || contains(s.description.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Kingdom;
    use uuid::Uuid;

    fn species(id: i64, sci: &str, common: Option<&str>, desc: Option<&str>) -> Species {
        Species {
            id,
            scientific_name: sci.into(),
            common_name: common.map(Into::into),
            kingdom: Kingdom::Animalia,
            total_population: None,
            image: None,
            description: desc.map(Into::into),
            endangered: false,
            author: Uuid::nil(),
        }
    }

    fn catalogue() -> Vec<Species> {
        vec![
            species(1, "Panthera leo", Some("Lion"), Some("Large cat of the savanna")),
            species(2, "Cavia porcellus", Some("Guinea pig"), None),
            species(3, "Quercus robur", None, Some("English oak, a deciduous tree")),
        ]
    }

    fn ids(found: Vec<&Species>) -> Vec<i64> {
        found.into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let all = catalogue();
        assert_eq!(ids(filter_species(&all, "")), vec![1, 2, 3]);
        assert_eq!(ids(filter_species(&all, "   ")), vec![1, 2, 3]);
    }

    #[test]
    fn test_matches_each_field_case_insensitively() {
        let all = catalogue();
        assert_eq!(ids(filter_species(&all, "PANTHERA")), vec![1]);
        assert_eq!(ids(filter_species(&all, "guinea")), vec![2]);
        assert_eq!(ids(filter_species(&all, "Oak")), vec![3]);
    }

    #[test]
    fn test_substring_spanning_records() {
        let all = catalogue();
        // "us" appears in "Cavia porcellus" and "Quercus robur"
        assert_eq!(ids(filter_species(&all, "us")), vec![2, 3]);
    }

    #[test]
    fn test_absent_fields_never_match() {
        let all = catalogue();
        assert!(filter_species(&all, "zebra").is_empty());
    }
}
