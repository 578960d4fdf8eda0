//! Search orchestration: coarse store retrieval plus in-memory reranking.

use serde::{Deserialize, Serialize};

use crate::document::CandidateRecord;
use crate::error::{Result, TimkiemError};
use crate::level::FuzzyLevel;
use crate::query::{QueryOptions, build_predicate};
use crate::rank::{ScoredResult, score_and_filter};
use crate::store::{DocumentStore, FindOptions, Predicate, SortDirection};
use crate::suggest::suggest;

/// How many candidates to over-fetch per requested suggestion. Suggestions
/// mine words out of whole field values, so the batch must be wider than the
/// final list.
const SUGGESTION_FETCH_FACTOR: u64 = 10;

/// Options shared by the orchestrator's search operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Caller-supplied predicate, AND-combined with the fuzzy predicate and
    /// otherwise passed through untouched.
    pub additional_filter: Predicate,
    /// Fields to project on fetched records; `None` keeps whole records.
    pub select: Option<Vec<String>>,
    /// Store-side sort keys.
    pub sort: Vec<(String, SortDirection)>,
    /// Store-side skip (plain `search` only; pagination computes its own).
    pub skip: Option<u64>,
    /// Store-side limit (plain `search` only).
    pub limit: Option<u64>,
    /// Relation expansion spec, passed through to the store adapter.
    pub populate: Option<String>,
    /// Fuzzy level preset name; unrecognized names resolve to NORMAL.
    pub fuzzy_level: String,
    /// Match case exactly.
    pub case_sensitive: bool,
    /// Fold Vietnamese diacritics for matching and scoring.
    pub fold_accents: bool,
}

impl SearchOptions {
    /// Default options: NORMAL level, case-insensitive, accent folding on.
    pub fn new() -> Self {
        SearchOptions {
            fold_accents: true,
            ..Default::default()
        }
    }
}

/// A page request; both values are clamped to at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    /// Records per page.
    pub limit: usize,
}

impl PageRequest {
    /// Create a page request.
    pub fn new(page: usize, limit: usize) -> Self {
        PageRequest { page, limit }
    }

    fn clamped(self) -> (usize, usize) {
        (self.page.max(1), self.limit.max(1))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest { page: 1, limit: 10 }
    }
}

/// One entry of a paginated result page.
///
/// Pages are ranked for non-blank terms and raw otherwise; the union keeps
/// the two shapes explicit instead of smuggling fake scores onto unranked
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageItem {
    /// A ranked entry with its relevance score.
    Scored(ScoredResult),
    /// A raw record from a blank-term page.
    Unranked(CandidateRecord),
}

impl PageItem {
    /// The underlying record, ranked or not.
    pub fn record(&self) -> &CandidateRecord {
        match self {
            PageItem::Scored(scored) => &scored.record,
            PageItem::Unranked(record) => record,
        }
    }

    /// The relevance score, if this entry was ranked.
    pub fn relevance_score(&self) -> Option<f64> {
        match self {
            PageItem::Scored(scored) => Some(scored.relevance_score),
            PageItem::Unranked(_) => None,
        }
    }
}

/// A page of results with pagination metadata.
///
/// `total` and `total_pages` are computed from the unranked store predicate,
/// so for ranked searches they are upper bounds on the true fuzzy match
/// count: the coarse predicate cannot express edit distance and the rerank
/// pass may drop candidates after the count was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult {
    /// The entries of this page, in rank (or store) order.
    pub items: Vec<PageItem>,
    /// Total records matching the unranked predicate.
    pub total: u64,
    /// 1-based page number served.
    pub page: usize,
    /// Requested page size.
    pub limit: usize,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

/// The fuzzy search orchestrator.
///
/// Composes the query builder, document store, relevance ranker, and
/// suggestion generator. Holds no mutable state of its own; every operation
/// computes fresh from store contents.
#[derive(Debug)]
pub struct FuzzySearcher<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> FuzzySearcher<S> {
    /// Create a searcher over the given store.
    pub fn new(store: S) -> Self {
        FuzzySearcher { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Count records matching the coarse predicate for `term` over `fields`,
    /// AND-combined with `additional_filter`.
    ///
    /// No ranking is applied: the count reflects the store predicate, which
    /// over-approximates true fuzzy matching. A blank term (or empty field
    /// list) degrades to counting `additional_filter` alone rather than
    /// failing. Store failures propagate; this helper never degrades to 0.
    pub async fn count(
        &self,
        term: &str,
        fields: &[String],
        additional_filter: &Predicate,
    ) -> Result<u64> {
        let predicate = Predicate::and(vec![
            self.fuzzy_predicate(term, fields, &SearchOptions::new()),
            additional_filter.clone(),
        ]);
        tracing::debug!(term, "fuzzy count");
        self.store.count_documents(&predicate).await
    }

    /// Ranked single-batch search.
    ///
    /// Fetches candidates via the coarse predicate with the caller's
    /// projection/sort/skip/limit/populate passed through, then reranks with
    /// the selected fuzzy level's threshold. A blank term skips ranking and
    /// returns the fetched batch in store order with a neutral score of 1.0
    /// and no matched field.
    pub async fn search(
        &self,
        term: &str,
        fields: &[String],
        options: &SearchOptions,
    ) -> Result<Vec<ScoredResult>> {
        let term = term.trim();
        self.check_fields(term, fields)?;

        let predicate = Predicate::and(vec![
            self.fuzzy_predicate(term, fields, options),
            options.additional_filter.clone(),
        ]);
        let find = self.find_options(options, options.skip, options.limit);
        let candidates = self.store.find(&predicate, &find).await?;
        tracing::debug!(term, candidates = candidates.len(), "fuzzy search");

        if term.is_empty() {
            return Ok(candidates
                .into_iter()
                .map(|record| ScoredResult {
                    record,
                    relevance_score: 1.0,
                    matched_field: None,
                })
                .collect());
        }

        let level = FuzzyLevel::by_name(&options.fuzzy_level);
        Ok(score_and_filter(
            candidates,
            term,
            fields,
            level.threshold,
            options.fold_accents,
        ))
    }

    /// Ranked paginated search.
    ///
    /// Issues the page `find` and the unranked `count_documents` call
    /// concurrently; neither depends on the other. For a blank term the raw
    /// store page is returned unranked, with totals computed from
    /// `additional_filter` alone.
    pub async fn search_paginated(
        &self,
        term: &str,
        fields: &[String],
        options: &SearchOptions,
        page_request: PageRequest,
    ) -> Result<PaginatedResult> {
        let term = term.trim();
        self.check_fields(term, fields)?;
        let (page, limit) = page_request.clamped();

        let predicate = Predicate::and(vec![
            self.fuzzy_predicate(term, fields, options),
            options.additional_filter.clone(),
        ]);
        let skip = ((page - 1) * limit) as u64;
        let find = self.find_options(options, Some(skip), Some(limit as u64));

        let (candidates, total) = futures::try_join!(
            self.store.find(&predicate, &find),
            self.store.count_documents(&predicate),
        )?;
        tracing::debug!(
            term,
            page,
            candidates = candidates.len(),
            total,
            "fuzzy paginated search"
        );

        let items = if term.is_empty() {
            candidates.into_iter().map(PageItem::Unranked).collect()
        } else {
            let level = FuzzyLevel::by_name(&options.fuzzy_level);
            score_and_filter(candidates, term, fields, level.threshold, options.fold_accents)
                .into_iter()
                .map(PageItem::Scored)
                .collect()
        };

        Ok(PaginatedResult {
            items,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit as u64),
        })
    }

    /// Standalone suggestion list for `term` over `fields`.
    ///
    /// Fetches a bounded candidate batch via the coarse predicate and mines
    /// it for matching values and words. A blank term yields an empty list.
    pub async fn suggestions(
        &self,
        term: &str,
        fields: &[String],
        options: &SearchOptions,
        limit: usize,
    ) -> Result<Vec<String>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.check_fields(term, fields)?;

        let predicate = Predicate::and(vec![
            self.fuzzy_predicate(term, fields, options),
            options.additional_filter.clone(),
        ]);
        let fetch = (limit.max(1) as u64) * SUGGESTION_FETCH_FACTOR;
        let find = FindOptions::new().limit(fetch);
        let candidates = self.store.find(&predicate, &find).await?;
        tracing::debug!(term, candidates = candidates.len(), "fuzzy suggestions");

        Ok(suggest(&candidates, term, fields, limit))
    }

    fn fuzzy_predicate(
        &self,
        term: &str,
        fields: &[String],
        options: &SearchOptions,
    ) -> Predicate {
        build_predicate(
            term,
            fields,
            &QueryOptions {
                case_sensitive: options.case_sensitive,
                fold_accents: options.fold_accents,
                exact_match: false,
            },
        )
    }

    fn find_options(
        &self,
        options: &SearchOptions,
        skip: Option<u64>,
        limit: Option<u64>,
    ) -> FindOptions {
        FindOptions {
            select: options.select.clone(),
            sort: options.sort.clone(),
            skip,
            limit,
            populate: options.populate.clone(),
        }
    }

    /// A ranked operation over no fields cannot score anything; fail fast
    /// instead of silently returning the whole collection.
    fn check_fields(&self, term: &str, fields: &[String]) -> Result<()> {
        if !term.is_empty() && fields.is_empty() {
            return Err(TimkiemError::invalid_input(
                "fuzzy search requires at least one target field",
            ));
        }
        Ok(())
    }
}
