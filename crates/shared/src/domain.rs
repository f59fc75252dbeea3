use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

// Cluster labels are assigned by the backend and carry no ordering.
id_newtype!(ClusterId);

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ranked hit returned by the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntity {
    pub rank: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub score: f64,
    pub cluster: ClusterId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrderViolation {
    /// `rank` at `index` is not greater than the rank before it.
    OutOfOrder { index: usize, rank: u32 },
    Duplicate { index: usize, rank: u32 },
}

/// Reports the first place where `results` stops being strictly ascending by rank.
pub fn check_rank_order(results: &[ResultEntity]) -> Option<RankOrderViolation> {
    results
        .windows(2)
        .enumerate()
        .find_map(|(index, pair)| {
            let (prev, next) = (pair[0].rank, pair[1].rank);
            if next == prev {
                Some(RankOrderViolation::Duplicate {
                    index: index + 1,
                    rank: next,
                })
            } else if next < prev {
                Some(RankOrderViolation::OutOfOrder {
                    index: index + 1,
                    rank: next,
                })
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(rank: u32) -> ResultEntity {
        ResultEntity {
            rank,
            title: format!("title {rank}"),
            description: String::new(),
            score: 0.5,
            cluster: ClusterId(0),
        }
    }

    #[test]
    fn non_contiguous_ascending_ranks_are_accepted() {
        let results = vec![entity(1), entity(4), entity(9)];
        assert_eq!(check_rank_order(&results), None);
        assert_eq!(check_rank_order(&[]), None);
    }

    #[test]
    fn reports_duplicate_and_descending_ranks() {
        assert_eq!(
            check_rank_order(&[entity(1), entity(2), entity(2)]),
            Some(RankOrderViolation::Duplicate { index: 2, rank: 2 })
        );
        assert_eq!(
            check_rank_order(&[entity(3), entity(1)]),
            Some(RankOrderViolation::OutOfOrder { index: 1, rank: 1 })
        );
    }

    #[test]
    fn decodes_wire_entity_with_missing_description() {
        let entity: ResultEntity = serde_json::from_str(
            r#"{"rank":2,"title":"Rates hold","score":0.4,"cluster":7}"#,
        )
        .expect("decode entity");
        assert_eq!(entity.description, "");
        assert_eq!(entity.cluster, ClusterId(7));
    }

    #[test]
    fn encodes_fields_in_wire_order() {
        let encoded = serde_json::to_string(&ResultEntity {
            rank: 1,
            title: "Markets rally".into(),
            description: "...".into(),
            score: 0.92,
            cluster: ClusterId(3),
        })
        .expect("encode entity");
        assert_eq!(
            encoded,
            r#"{"rank":1,"title":"Markets rally","description":"...","score":0.92,"cluster":3}"#
        );
    }
}
