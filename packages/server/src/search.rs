use std::cmp::Ordering;

use dashmap::DashMap;
use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;

use crate::models::product::ProductSummary;
use crate::repository;

/// In-process name index over active products.
///
/// Derived from the relational store: handlers refresh an entry after the
/// owning transaction commits, and [`ProductIndex::rebuild`] reloads it at startup.
#[derive(Default)]
pub struct ProductIndex {
    docs: DashMap<i32, IndexedProduct>,
}

struct IndexedProduct {
    name_lower: String,
    summary: ProductSummary,
}

impl ProductIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn upsert(&self, summary: ProductSummary) {
        self.docs.insert(
            summary.id,
            IndexedProduct {
                name_lower: summary.name.to_lowercase(),
                summary,
            },
        );
    }

    pub fn remove(&self, product_id: i32) {
        self.docs.remove(&product_id);
    }

    /// Case-insensitive substring search on the product name.
    ///
    /// Results are ordered exact match first, then prefix matches, then by
    /// earliest match position and shorter names; ties go to the newest product.
    pub fn search(&self, keyword: &str) -> Vec<ProductSummary> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(Relevance, ProductSummary)> = self
            .docs
            .iter()
            .filter_map(|entry| {
                let doc = entry.value();
                doc.name_lower.find(&needle).map(|pos| {
                    let relevance = Relevance {
                        exact: doc.name_lower == needle,
                        position: pos,
                        len: doc.name_lower.len(),
                    };
                    (relevance, doc.summary.clone())
                })
            })
            .collect();

        hits.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| b.id.cmp(&a.id)));
        hits.into_iter().map(|(_, summary)| summary).collect()
    }

    /// Replace the index contents with every active product in the store.
    pub async fn rebuild<C: ConnectionTrait>(&self, conn: &C) -> Result<(), DbErr> {
        let products = repository::product::active_summaries(conn).await?;
        self.docs.clear();
        for summary in products {
            self.upsert(summary);
        }
        info!("Indexed {} products", self.docs.len());
        Ok(())
    }
}

#[derive(PartialEq, Eq)]
struct Relevance {
    exact: bool,
    position: usize,
    len: usize,
}

impl Ord for Relevance {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .exact
            .cmp(&self.exact)
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| self.len.cmp(&other.len))
    }
}

impl PartialOrd for Relevance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
