//! Per-lead enrichment: search, match, extract, competitor lookup.
//!
//! Leads are processed strictly one after another. Nothing that goes wrong
//! for a single lead stops the batch; the lead is passed through with empty
//! enrichment and recorded in the failure log.

use std::io::Write;

use leadmap_core::{
    build_search_query, clean_company_name, enrichment_for, is_open_24_hours, is_operational,
    maps_link_for, websites_match, AppConfig, Candidate, EnrichedLead, Lead, LeadOutcome,
};
use leadmap_places::{PlacesClient, PlacesError, SearchRequest};

use crate::failure_log::FailureLog;

/// Maximum number of candidates examined per lead.
pub(crate) const CANDIDATE_BUDGET: u8 = 3;

/// Tunables for the searcher and competitor finder.
#[derive(Debug, Clone)]
pub(crate) struct EnrichSettings {
    pub search_region: String,
    pub competitor_radius_meters: f64,
    pub competitor_max_results: u8,
}

impl EnrichSettings {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            search_region: config.search_region.clone(),
            competitor_radius_meters: config.competitor_radius_meters,
            competitor_max_results: config.competitor_max_results,
        }
    }
}

/// Result of enriching one lead. `competitor_error` is set when the lead
/// matched but the competitor lookup failed.
pub(crate) struct LeadResult {
    pub enriched: EnrichedLead,
    pub competitor_error: Option<String>,
}

/// Counters logged at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub total: usize,
    pub matched: usize,
    pub competitors_found: usize,
    pub no_candidates: usize,
    pub no_match: usize,
    pub api_errors: usize,
    pub missing_company: usize,
}

impl RunSummary {
    fn observe(&mut self, enriched: &EnrichedLead) {
        self.total += 1;
        match enriched.outcome {
            LeadOutcome::Matched { .. } => {
                self.matched += 1;
                if enriched.enrichment.competitor_name.is_some() {
                    self.competitors_found += 1;
                }
            }
            LeadOutcome::NoCandidates => self.no_candidates += 1,
            LeadOutcome::NoMatch { .. } => self.no_match += 1,
            LeadOutcome::ApiError(_) => self.api_errors += 1,
            LeadOutcome::MissingCompany => self.missing_company += 1,
        }
    }
}

pub(crate) struct Enricher<'a> {
    client: &'a PlacesClient,
    settings: EnrichSettings,
}

impl<'a> Enricher<'a> {
    pub(crate) fn new(client: &'a PlacesClient, settings: EnrichSettings) -> Self {
        Self { client, settings }
    }

    /// Runs the full search → match → extract → competitor pipeline for one lead.
    ///
    /// Issues one text search for the lead and, only on a match, one
    /// competitor search. At most [`CANDIDATE_BUDGET`] candidates are examined.
    pub(crate) async fn enrich(&self, lead: Lead) -> LeadResult {
        if lead.company.is_empty() {
            tracing::warn!(row = lead.row, "skipping search: company name is empty");
            return unmatched(lead, LeadOutcome::MissingCompany);
        }
        if lead.website.is_empty() {
            tracing::warn!(
                row = lead.row,
                company = %lead.company,
                "lead has no website; no candidate can match"
            );
        }

        let query = build_search_query(
            &clean_company_name(&lead.company),
            lead.location.as_deref(),
            &self.settings.search_region,
        );
        let request = SearchRequest::new(query, CANDIDATE_BUDGET);

        let candidates = match self.client.search_text(&request).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(row = lead.row, company = %lead.company, error = %e, "places search failed");
                return unmatched(lead, LeadOutcome::ApiError(e.to_string()));
            }
        };

        if candidates.is_empty() {
            tracing::warn!(row = lead.row, company = %lead.company, query = %request.query, "no places found");
            return unmatched(lead, LeadOutcome::NoCandidates);
        }

        let budget = usize::from(CANDIDATE_BUDGET);
        let examined = candidates.len().min(budget);
        let found = candidates
            .iter()
            .take(budget)
            .enumerate()
            .find(|(_, c)| websites_match(&lead.website, c.website.as_deref()));

        let Some((candidate_index, matched)) = found else {
            tracing::warn!(
                row = lead.row,
                company = %lead.company,
                website = %lead.website,
                examined,
                "no candidate website matched"
            );
            return unmatched(lead, LeadOutcome::NoMatch { examined });
        };

        tracing::info!(
            row = lead.row,
            company = %lead.company,
            place = %matched.name,
            candidate = candidate_index + 1,
            "matched place"
        );

        let mut enrichment = enrichment_for(matched);
        let mut competitor_error = None;
        match self.find_competitor(matched).await {
            Ok(Some(competitor)) => {
                tracing::debug!(row = lead.row, competitor = %competitor.name, "found 24-hour competitor");
                enrichment.competitor_maps_link = maps_link_for(&competitor);
                enrichment.competitor_name = Some(competitor.name);
            }
            Ok(None) => {
                tracing::debug!(row = lead.row, "no 24-hour competitor found");
            }
            Err(e) => {
                tracing::warn!(row = lead.row, company = %lead.company, error = %e, "competitor search failed");
                competitor_error = Some(e.to_string());
            }
        }

        LeadResult {
            enriched: EnrichedLead {
                lead,
                enrichment,
                outcome: LeadOutcome::Matched { candidate_index },
            },
            competitor_error,
        }
    }

    /// Searches the matched place's category near its location and returns
    /// the first other named, operational place that is open 24 hours.
    ///
    /// Without a category there is nothing to search for and no request is made.
    async fn find_competitor(&self, matched: &Candidate) -> Result<Option<Candidate>, PlacesError> {
        let Some(category) = matched.category.as_deref().filter(|c| !c.is_empty()) else {
            return Ok(None);
        };

        let mut request = SearchRequest::new(
            format!("{category} open 24 hours"),
            self.settings.competitor_max_results,
        );
        if let Some(center) = matched.location {
            request = request.biased_to(center, self.settings.competitor_radius_meters);
        }

        let results = self.client.search_text(&request).await?;
        Ok(results.into_iter().find(|c| {
            c.place_id != matched.place_id
                && !c.name.trim().is_empty()
                && is_operational(c)
                && c.opening_hours.as_ref().is_some_and(is_open_24_hours)
        }))
    }
}

fn unmatched(lead: Lead, outcome: LeadOutcome) -> LeadResult {
    LeadResult {
        enriched: EnrichedLead::unmatched(lead, outcome),
        competitor_error: None,
    }
}

/// Enriches every lead in order, recording failures as they happen.
///
/// Always returns exactly one [`EnrichedLead`] per input lead, in input order.
pub(crate) async fn enrich_all<W: Write>(
    enricher: &Enricher<'_>,
    leads: Vec<Lead>,
    failures: &mut FailureLog<W>,
) -> (Vec<EnrichedLead>, RunSummary) {
    let total = leads.len();
    let mut summary = RunSummary::default();
    let mut out = Vec::with_capacity(total);

    for (i, lead) in leads.into_iter().enumerate() {
        tracing::info!(row = lead.row, company = %lead.company, "processing lead {}/{total}", i + 1);

        let LeadResult {
            enriched,
            competitor_error,
        } = enricher.enrich(lead).await;

        if !enriched.outcome.is_matched() {
            let reason = if enriched.lead.website.is_empty()
                && matches!(
                    enriched.outcome,
                    LeadOutcome::NoMatch { .. } | LeadOutcome::NoCandidates
                ) {
                format!("{}; lead has no website", enriched.outcome)
            } else {
                enriched.outcome.to_string()
            };
            failures.record(&enriched.lead, &reason);
        }
        if let Some(error) = competitor_error {
            failures.record(
                &enriched.lead,
                &format!("competitor lookup failed: {error}"),
            );
        }

        summary.observe(&enriched);
        out.push(enriched);
    }

    (out, summary)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
