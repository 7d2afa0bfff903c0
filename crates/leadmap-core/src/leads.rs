//! Domain types shared by the places client and the enrichment pipeline.

/// Names of the columns appended to every output row, in output order.
pub const ENRICHMENT_COLUMNS: [&str; 6] = [
    "maps_link",
    "closing_time",
    "weekend_open",
    "category",
    "competitor_name",
    "competitor_maps_link",
];

/// One input row representing a company to enrich.
///
/// `record` holds every original column verbatim; `company`, `website` and
/// `location` are views extracted from it for searching and matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    pub company: String,
    pub website: String,
    /// City, falling back to state, when the input carries either column.
    pub location: Option<String>,
    pub record: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// A point in the week. `day` is 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DayTime {
    #[must_use]
    pub fn new(day: u8, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }
}

/// An opening interval. A missing `close` means the place never closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub open: DayTime,
    pub close: Option<DayTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningHours {
    pub periods: Vec<Period>,
}

/// A single places-search result considered for matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub place_id: String,
    pub name: String,
    pub website: Option<String>,
    pub maps_link: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub category: Option<String>,
    pub location: Option<LatLng>,
    /// `OPERATIONAL`, `CLOSED_TEMPORARILY` or `CLOSED_PERMANENTLY`, when known.
    pub business_status: Option<String>,
}

/// The six enrichment fields appended to a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub maps_link: Option<String>,
    pub closing_time: Option<String>,
    pub weekend_open: Option<bool>,
    pub category: Option<String>,
    pub competitor_name: Option<String>,
    pub competitor_maps_link: Option<String>,
}

impl Enrichment {
    /// Renders the fields in [`ENRICHMENT_COLUMNS`] order; absent values are empty.
    #[must_use]
    pub fn columns(&self) -> [String; 6] {
        let weekend = match self.weekend_open {
            Some(true) => "Yes".to_string(),
            Some(false) => "No".to_string(),
            None => String::new(),
        };
        [
            self.maps_link.clone().unwrap_or_default(),
            self.closing_time.clone().unwrap_or_default(),
            weekend,
            self.category.clone().unwrap_or_default(),
            self.competitor_name.clone().unwrap_or_default(),
            self.competitor_maps_link.clone().unwrap_or_default(),
        ]
    }
}

/// How a lead's enrichment attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    /// Candidate at `candidate_index` (0-based) matched the lead's website.
    Matched { candidate_index: usize },
    NoCandidates,
    NoMatch { examined: usize },
    ApiError(String),
    MissingCompany,
}

impl LeadOutcome {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, LeadOutcome::Matched { .. })
    }
}

impl std::fmt::Display for LeadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadOutcome::Matched { candidate_index } => {
                write!(f, "matched candidate {}", candidate_index + 1)
            }
            LeadOutcome::NoCandidates => write!(f, "no places found"),
            LeadOutcome::NoMatch { examined } => {
                write!(f, "no website match among {examined} candidates")
            }
            LeadOutcome::ApiError(message) => write!(f, "search failed: {message}"),
            LeadOutcome::MissingCompany => write!(f, "company name is empty"),
        }
    }
}

/// A lead plus whatever enrichment the pipeline produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedLead {
    pub lead: Lead,
    pub enrichment: Enrichment,
    pub outcome: LeadOutcome,
}

impl EnrichedLead {
    #[must_use]
    pub fn unmatched(lead: Lead, outcome: LeadOutcome) -> Self {
        Self {
            lead,
            enrichment: Enrichment::default(),
            outcome,
        }
    }

    /// Original columns followed by the enrichment columns.
    #[must_use]
    pub fn output_record(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lead.record.len() + ENRICHMENT_COLUMNS.len());
        out.extend(self.lead.record.iter().cloned());
        out.extend(self.enrichment.columns());
        out
    }
}
