pub mod criteria;

pub use criteria::{FilterCriteria, FilterUpdate};

use std::collections::BTreeSet;

use crate::common::KolRecord;

/// One active restriction, resolved once per [`apply`] call
enum Predicate<'c> {
    Search(String),
    Countries(&'c BTreeSet<String>),
    ExpertiseAreas(&'c BTreeSet<String>),
    MinPublications(u64),
    MaxPublications(u64),
}

impl Predicate<'_> {
    fn matches(&self, record: &KolRecord) -> bool {
        match self {
            Predicate::Search(needle) => {
                record.name.to_lowercase().contains(needle.as_str())
                    || record.affiliation.to_lowercase().contains(needle.as_str())
            }
            Predicate::Countries(set) => set.contains(&record.country),
            Predicate::ExpertiseAreas(set) => set.contains(&record.expertise_area),
            Predicate::MinPublications(min) => record.publications_count >= *min,
            Predicate::MaxPublications(max) => record.publications_count <= *max,
        }
    }
}

/// Only criteria that actually restrict something become predicates
fn active_predicates(criteria: &FilterCriteria) -> Vec<Predicate<'_>> {
    let mut predicates = Vec::new();
    if !criteria.search_term.is_empty() {
        predicates.push(Predicate::Search(criteria.search_term.to_lowercase()));
    }
    if !criteria.countries.is_empty() {
        predicates.push(Predicate::Countries(&criteria.countries));
    }
    if !criteria.expertise_areas.is_empty() {
        predicates.push(Predicate::ExpertiseAreas(&criteria.expertise_areas));
    }
    if let Some(min) = criteria.min_publications {
        predicates.push(Predicate::MinPublications(min));
    }
    if let Some(max) = criteria.max_publications {
        predicates.push(Predicate::MaxPublications(max));
    }
    predicates
}

/// Return the records satisfying every active criterion, in input order.
///
/// Contradictory publication bounds yield an empty result.
pub fn apply(records: &[KolRecord], criteria: &FilterCriteria) -> Vec<KolRecord> {
    let predicates = active_predicates(criteria);
    if predicates.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| predicates.iter().all(|p| p.matches(record)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::tests::{kol, scenario_records};

    fn named(id: &str, name: &str, affiliation: &str) -> KolRecord {
        KolRecord {
            name: name.to_string(),
            affiliation: affiliation.to_string(),
            ..kol(id, "US", "Dermatology", 1, 1)
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let records = scenario_records();
        assert_eq!(apply(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_affiliation() {
        let records = vec![
            named("1", "Dr. Michael Chen", "Stanford University"),
            named("2", "Prof. Anna Weber", "Charité Berlin"),
            named("3", "Dr. Luis Ortega", "Hospital Clínic"),
        ];
        let mut criteria = FilterCriteria::default();

        criteria.search_term = "CHEN".to_string();
        let ids: Vec<String> = apply(&records, &criteria).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1"]);

        criteria.search_term = "berlin".to_string();
        let ids: Vec<String> = apply(&records, &criteria).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_country_and_area_sets() {
        let records = scenario_records();
        let mut criteria = FilterCriteria::default();
        criteria.countries.insert("US".to_string());
        assert_eq!(apply(&records, &criteria).len(), 2);

        criteria.expertise_areas.insert("Immunology".to_string());
        assert!(apply(&records, &criteria).is_empty());

        criteria.countries.insert("FR".to_string());
        let filtered = apply(&records, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "3");
    }

    #[test]
    fn test_publication_bounds_are_inclusive() {
        let records = scenario_records();
        let mut criteria = FilterCriteria::default();
        criteria.min_publications = Some(15);
        criteria.max_publications = Some(25);
        let ids: Vec<String> = apply(&records, &criteria).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_contradictory_bounds_yield_empty() {
        let records = scenario_records();
        let mut criteria = FilterCriteria::default();
        criteria.min_publications = Some(20);
        criteria.max_publications = Some(10);
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn test_adding_restriction_never_grows_result() {
        let records = scenario_records();
        let mut criteria = FilterCriteria::default();
        let before = apply(&records, &criteria).len();

        criteria.countries.insert("US".to_string());
        let after_country = apply(&records, &criteria).len();
        assert!(after_country <= before);

        criteria.min_publications = Some(10);
        let after_min = apply(&records, &criteria).len();
        assert!(after_min <= after_country);

        criteria.search_term = "dr.".to_string();
        assert!(apply(&records, &criteria).len() <= after_min);
    }
}
