//! Similarity matching of properties against a lead's embedding.
//!
//! Candidates are rows with an embedding that satisfy every set predicate of
//! a [`MatchFilter`]. They are ranked by ascending cosine distance, equal
//! distances keeping storage order, and reported with
//! `similarity = 1 - distance`.
//!
//! A zero vector on either side has no direction. Such candidates score
//! `0.0` and rank after every candidate with a defined similarity.

use domain_embeddings::{cosine_similarity, encode_vector};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DbErr, EntityTrait, FromQueryResult, Order, QueryFilter, QueryOrder,
    QueryResult, QuerySelect, Select,
};

use crate::entity;
use crate::error::{PropertyError, PropertyResult};
use crate::models::{MatchFilter, MatchedProperty, Property};

/// Result size when the caller asks for zero or fewer rows.
pub const DEFAULT_MATCH_LIMIT: u64 = 10;

/// Largest result a single match request returns.
pub const MAX_MATCH_LIMIT: u64 = 100;

pub fn effective_limit(requested: Option<i64>) -> u64 {
    match requested {
        Some(limit) if limit > 0 => (limit as u64).min(MAX_MATCH_LIMIT),
        _ => DEFAULT_MATCH_LIMIT,
    }
}

/// AND of the set predicates of `filter`.
pub fn filter_condition(filter: &MatchFilter) -> Condition {
    use entity::Column;

    Condition::all()
        .add_option(filter.status.map(|s| Column::Status.eq(s.to_string())))
        .add_option(filter.min_price.map(|p| Column::Price.gte(p)))
        .add_option(filter.max_price.map(|p| Column::Price.lte(p)))
        .add_option(filter.property_type.map(|t| Column::PropertyType.eq(t.to_string())))
        .add_option(filter.min_rooms.map(|r| Column::Rooms.gte(r)))
        .add_option(filter.max_rooms.map(|r| Column::Rooms.lte(r)))
}

/// pgvector top-K query with a `similarity` column.
///
/// pgvector yields NaN distance for a zero vector. NaN sorts after every
/// number in Postgres, and the projection turns it into `0.0`.
pub fn match_query(embedding: &[f32], filter: &MatchFilter, limit: u64) -> Select<entity::Entity> {
    let vector = encode_vector(embedding);

    entity::Entity::find()
        .filter(entity::Column::Embedding.is_not_null())
        .filter(filter_condition(filter))
        .column_as(
            Expr::cust_with_values(
                r#"COALESCE(NULLIF(1 - ("properties"."embedding" <=> ?::vector), 'NaN'), 0)"#,
                [vector.clone()],
            ),
            "similarity",
        )
        .order_by(
            Expr::cust_with_values(r#""properties"."embedding" <=> ?::vector"#, [vector]),
            Order::Asc,
        )
        .limit(limit)
}

/// Row of [`match_query`]: the entity columns plus `similarity`.
#[derive(Debug)]
pub struct MatchRow {
    pub model: entity::Model,
    pub similarity: f64,
}

impl FromQueryResult for MatchRow {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            model: entity::Model::from_query_result(res, pre)?,
            similarity: res.try_get(pre, "similarity")?,
        })
    }
}

impl From<MatchRow> for MatchedProperty {
    fn from(row: MatchRow) -> Self {
        Self {
            property: row.model.into(),
            similarity: row.similarity,
        }
    }
}

fn is_zero(vector: &[f32]) -> bool {
    vector.iter().all(|v| *v == 0.0)
}

/// Ranks `candidates`, given in storage order, the way [`match_query`]
/// does in Postgres.
///
/// A stored vector whose dimension differs from the query fails the whole
/// match, mirroring pgvector.
pub fn rank<'a>(
    query: &[f32],
    candidates: impl IntoIterator<Item = &'a Property>,
    filter: &MatchFilter,
    limit: u64,
) -> PropertyResult<Vec<MatchedProperty>> {
    let query_is_zero = is_zero(query);
    let mut scored = Vec::new();

    for property in candidates {
        let Some(embedding) = property.embedding.as_deref() else {
            continue;
        };
        if !filter.matches(property) {
            continue;
        }

        let similarity = cosine_similarity(query, embedding).ok_or_else(|| {
            PropertyError::Storage(format!(
                "different vector dimensions {} and {}",
                query.len(),
                embedding.len()
            ))
        })?;
        let undefined = query_is_zero || is_zero(embedding);

        scored.push((
            undefined,
            MatchedProperty {
                property: property.clone(),
                similarity: if undefined { 0.0 } else { similarity },
            },
        ));
    }

    // sort_by is stable, so ties keep storage order
    scored.sort_by(|(a_undefined, a), (b_undefined, b)| {
        a_undefined
            .cmp(b_undefined)
            .then(b.similarity.total_cmp(&a.similarity))
    });
    scored.truncate(limit as usize);

    Ok(scored.into_iter().map(|(_, matched)| matched).collect())
}
