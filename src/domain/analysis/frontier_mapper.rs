//! Frontier Mapper - recovers the combinations that attain each frontier point.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{BestAchievers, CombinationTable, FrontierSet};
use crate::domain::foundation::canonical_bits;

/// Joins a frontier back onto the combination table.
pub struct FrontierMapper;

impl FrontierMapper {
    /// Returns every combination that attains a frontier point.
    ///
    /// # Algorithm
    /// For dims `d1..dk`, the first `k-1` projected values form the join key
    /// and `dk` is the ranking dimension. Each key maps to the largest `dk`
    /// among frontier points with that key; a combination is kept when its
    /// key matches and its `dk` equals that maximum.
    ///
    /// # Edge Cases
    /// - Full projections: no ranking dimension, returns `None`
    /// - Ties: every combination with the winning values is returned, not
    ///   just the frontier point's representative
    pub fn map_back(frontier: &FrontierSet, table: &CombinationTable) -> Option<BestAchievers> {
        let ranking_dimension = frontier.key.ranking_dimension()?.to_string();
        let indices = frontier.indices();
        let (ranking_index, join_indices) = indices.split_last()?;

        let mut best_by_key: HashMap<Vec<u64>, f64> = HashMap::with_capacity(frontier.len());
        for point in &frontier.points {
            let (ranking, prefix) = match point.values.split_last() {
                Some(split) => split,
                None => continue,
            };
            best_by_key
                .entry(canonical_bits(prefix))
                .and_modify(|best| {
                    if *ranking > *best {
                        *best = *ranking;
                    }
                })
                .or_insert(*ranking);
        }

        let first_index = indices[0];
        let mut combinations: Vec<_> = table
            .combinations()
            .iter()
            .filter(|c| {
                let prefix = c.stats.project(join_indices);
                best_by_key
                    .get(&canonical_bits(&prefix))
                    .map_or(false, |best| c.stats.values()[*ranking_index] == *best)
            })
            .cloned()
            .collect();

        combinations.sort_by(|a, b| {
            a.stats.values()[first_index]
                .partial_cmp(&b.stats.values()[first_index])
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });

        Some(BestAchievers {
            key: frontier.key.clone(),
            ranking_dimension,
            combinations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{DominanceFilter, ProjectionKey};
    use crate::domain::catalog::{CatalogSet, PartCatalog};
    use crate::domain::foundation::{AttributeSchema, CancellationToken, Slot};

    fn schema() -> AttributeSchema {
        AttributeSchema::new(vec!["Speed", "Weight", "Handling"]).unwrap()
    }

    fn catalog(slot: Slot, parts: &[(&str, [f64; 3])]) -> PartCatalog {
        let mut builder = PartCatalog::builder(slot, schema());
        for (name, values) in parts {
            builder = builder.part(*name, values.to_vec());
        }
        builder.build().unwrap()
    }

    /// Four combinations, two of which tie exactly on (Speed, Weight).
    fn table() -> CombinationTable {
        let set = CatalogSet::new(
            catalog(
                Slot::Character,
                &[("Mario", [2.0, 3.0, 0.0]), ("Peach", [1.0, 1.0, 5.0])],
            ),
            catalog(Slot::Kart, &[("Standard Kart", [0.0, 0.0, 0.0])]),
            catalog(
                Slot::Wheel,
                &[("Standard", [0.0, 0.0, 1.0]), ("Roller", [0.0, 0.0, 2.0])],
            ),
            catalog(Slot::Glider, &[("Super Glider", [0.0, 0.0, 0.0])]),
        )
        .unwrap();
        CombinationTable::generate(&set).unwrap()
    }

    fn frontier(table: &CombinationTable, key: ProjectionKey) -> FrontierSet {
        DominanceFilter::frontier(table, &key, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn tied_combinations_are_all_returned() {
        let table = table();
        let frontier = frontier(&table, ProjectionKey::pair("Speed", "Weight"));

        // Mario+Standard and Mario+Roller both project to (2, 3).
        assert_eq!(frontier.len(), 1);
        let best = FrontierMapper::map_back(&frontier, &table).unwrap();
        let labels: Vec<_> = best.combinations.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Mario_Standard Kart_Standard_Super Glider",
                "Mario_Standard Kart_Roller_Super Glider",
            ]
        );
        assert_eq!(best.ranking_dimension, "Weight");
    }

    #[test]
    fn only_maximal_ranking_value_is_kept() {
        let table = table();
        let frontier = frontier(&table, ProjectionKey::triple("Speed", "Weight", "Handling"));
        let best = FrontierMapper::map_back(&frontier, &table).unwrap();

        // Mario+Standard (2,3,1) loses to Mario+Roller (2,3,2) on Handling.
        let labels: Vec<_> = best.combinations.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Peach_Standard Kart_Roller_Super Glider",
                "Mario_Standard Kart_Roller_Super Glider",
            ]
        );
    }

    #[test]
    fn achievers_are_sorted_by_first_dimension() {
        let table = table();
        let frontier = frontier(&table, ProjectionKey::pair("Handling", "Speed"));
        let best = FrontierMapper::map_back(&frontier, &table).unwrap();

        let firsts: Vec<f64> = best
            .combinations
            .iter()
            .map(|c| c.stats.values()[2])
            .collect();
        let mut sorted = firsts.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(firsts, sorted);
    }

    #[test]
    fn every_achiever_matches_a_frontier_point() {
        let table = table();
        let frontier = frontier(&table, ProjectionKey::triple("Weight", "Handling", "Speed"));
        let best = FrontierMapper::map_back(&frontier, &table).unwrap();

        assert!(!best.is_empty());
        for combination in &best.combinations {
            let projected = combination.stats.project(frontier.indices());
            assert!(frontier.contains_values(&projected));
        }
    }

    #[test]
    fn full_projection_has_no_map_back() {
        let table = table();
        let frontier = frontier(
            &table,
            ProjectionKey::full(vec!["Speed", "Weight", "Handling"]),
        );
        assert!(FrontierMapper::map_back(&frontier, &table).is_none());
    }
}
