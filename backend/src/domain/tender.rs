//! Pricing tenders and the offer prices submitted against them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{OfferPriceId, PricingTenderId, ProjectId, UserId};

/// Maximum length of an offer price title, in characters.
pub const OFFER_TITLE_MAX: usize = 200;
/// Maximum length of offer price notes, in characters.
pub const OFFER_NOTES_MAX: usize = 2000;

/// A request for prices issued by a project's consultant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTender {
    pub id: PricingTenderId,
    pub project_id: ProjectId,
    pub owner: UserId,
    pub title: String,
}

impl PricingTender {
    /// True when `user` owns this tender.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }
}

/// Validation errors for offer price fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferPriceValidationError {
    #[error("offer title must not be empty")]
    EmptyTitle,
    #[error("offer title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("offer amount must not be negative")]
    NegativeAmount,
    #[error("offer notes must be at most {max} characters")]
    NotesTooLong { max: usize },
}

fn validate_title(raw: &str) -> Result<String, OfferPriceValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(OfferPriceValidationError::EmptyTitle);
    }
    if title.chars().count() > OFFER_TITLE_MAX {
        return Err(OfferPriceValidationError::TitleTooLong {
            max: OFFER_TITLE_MAX,
        });
    }
    Ok(title.to_owned())
}

fn validate_amount(amount: i64) -> Result<i64, OfferPriceValidationError> {
    if amount < 0 {
        return Err(OfferPriceValidationError::NegativeAmount);
    }
    Ok(amount)
}

fn validate_notes(raw: Option<String>) -> Result<Option<String>, OfferPriceValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let notes = raw.trim();
    if notes.is_empty() {
        return Ok(None);
    }
    if notes.chars().count() > OFFER_NOTES_MAX {
        return Err(OfferPriceValidationError::NotesTooLong {
            max: OFFER_NOTES_MAX,
        });
    }
    Ok(Some(notes.to_owned()))
}

/// Caller-supplied fields for a new offer price.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfferPriceDraft {
    pub title: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub notes: Option<String>,
}

/// Partial update of an offer price. Empty notes clear the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfferPricePatch {
    pub title: Option<String>,
    pub amount: Option<i64>,
    pub notes: Option<String>,
}

/// A price offered against a tender.
///
/// ## Invariants
/// - `title` is trimmed and non-empty.
/// - `amount` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPrice {
    id: OfferPriceId,
    tender_id: PricingTenderId,
    title: String,
    amount: i64,
    notes: Option<String>,
    submitted_by: UserId,
    date_created: DateTime<Utc>,
}

impl OfferPrice {
    /// Build an offer price submitted by `submitted_by` on `tender_id`.
    pub fn create(
        id: OfferPriceId,
        tender_id: PricingTenderId,
        submitted_by: UserId,
        draft: OfferPriceDraft,
        date_created: DateTime<Utc>,
    ) -> Result<Self, OfferPriceValidationError> {
        Ok(Self {
            id,
            tender_id,
            title: validate_title(&draft.title)?,
            amount: validate_amount(draft.amount)?,
            notes: validate_notes(draft.notes)?,
            submitted_by,
            date_created,
        })
    }

    /// Return a copy with `patch` applied.
    pub fn patched(&self, patch: OfferPricePatch) -> Result<Self, OfferPriceValidationError> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = validate_title(&title)?;
        }
        if let Some(amount) = patch.amount {
            next.amount = validate_amount(amount)?;
        }
        if patch.notes.is_some() {
            next.notes = validate_notes(patch.notes)?;
        }
        Ok(next)
    }

    /// Offer price identifier.
    pub fn id(&self) -> OfferPriceId {
        self.id
    }

    /// Tender the offer answers.
    pub fn tender_id(&self) -> PricingTenderId {
        self.tender_id
    }

    /// Trimmed offer title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Amount in minor currency units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Optional notes from the contractor.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Account that submitted the offer.
    pub fn submitted_by(&self) -> UserId {
        self.submitted_by
    }

    /// Submission timestamp.
    pub fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }
}

/// Errors raised while parsing offer price list filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferPriceFilterError {
    #[error("{field} must be a date formatted as YYYY-MM-DD")]
    InvalidDate { field: &'static str },
    #[error("start_date must not be after end_date")]
    InvertedRange,
}

impl OfferPriceFilterError {
    /// Name of the offending query parameter.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { field } => field,
            Self::InvertedRange => "start_date",
        }
    }
}

/// Optional narrowing applied when a tender owner lists offer prices.
///
/// Date bounds are inclusive on the calendar day of `date_created` (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OfferPriceFilter {
    title: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

fn parse_date(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, OfferPriceFilterError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| OfferPriceFilterError::InvalidDate { field }),
    }
}

impl OfferPriceFilter {
    /// Parse raw query parameters.
    ///
    /// # Examples
    /// ```
    /// use kunooz::domain::OfferPriceFilter;
    ///
    /// let filter = OfferPriceFilter::parse(Some("steel"), Some("2024-01-01"), None)
    ///     .expect("valid filter");
    /// assert_eq!(filter.title(), Some("steel"));
    /// assert!(OfferPriceFilter::parse(None, Some("01/02/2024"), None).is_err());
    /// ```
    pub fn parse(
        title: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, OfferPriceFilterError> {
        let start_date = parse_date(start_date, "start_date")?;
        let end_date = parse_date(end_date, "end_date")?;
        if let (Some(start), Some(end)) = (start_date, end_date)
            && start > end
        {
            return Err(OfferPriceFilterError::InvertedRange);
        }
        let title = title
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            title,
            start_date,
            end_date,
        })
    }

    /// Case-insensitive title fragment.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// First included day.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Last included day.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Evaluate the filter against a single offer price.
    pub fn matches(&self, offer: &OfferPrice) -> bool {
        let day = offer.date_created().date_naive();
        let title_ok = self.title.as_ref().is_none_or(|needle| {
            offer
                .title()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let start_ok = self.start_date.is_none_or(|start| day >= start);
        let end_ok = self.end_date.is_none_or(|end| day <= end);
        title_ok && start_ok && end_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn offer() -> OfferPrice {
        OfferPrice::create(
            OfferPriceId::random(),
            PricingTenderId::random(),
            UserId::random(),
            OfferPriceDraft {
                title: "Steel Beams".to_owned(),
                amount: 125_000,
                notes: None,
            },
            Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 0)
                .single()
                .expect("valid timestamp"),
        )
        .expect("valid offer")
    }

    #[rstest]
    fn negative_amounts_are_rejected() {
        let result = OfferPrice::create(
            OfferPriceId::random(),
            PricingTenderId::random(),
            UserId::random(),
            OfferPriceDraft {
                title: "Cement".to_owned(),
                amount: -1,
                notes: None,
            },
            Utc::now(),
        );
        assert_eq!(result, Err(OfferPriceValidationError::NegativeAmount));
    }

    #[rstest]
    fn patch_keeps_submitter(offer: OfferPrice) {
        let patched = offer
            .patched(OfferPricePatch {
                amount: Some(99),
                ..OfferPricePatch::default()
            })
            .expect("valid patch");
        assert_eq!(patched.amount(), 99);
        assert_eq!(patched.submitted_by(), offer.submitted_by());
        assert_eq!(patched.title(), offer.title());
    }

    #[rstest]
    #[case(Some("steel"), None, None, true)]
    #[case(Some("BEAM"), None, None, true)]
    #[case(Some("cement"), None, None, false)]
    #[case(None, Some("2024-03-15"), Some("2024-03-15"), true)]
    #[case(None, Some("2024-03-16"), None, false)]
    #[case(None, None, Some("2024-03-14"), false)]
    fn filter_matches(
        offer: OfferPrice,
        #[case] title: Option<&str>,
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
        #[case] expected: bool,
    ) {
        let filter = OfferPriceFilter::parse(title, start, end).expect("valid filter");
        assert_eq!(filter.matches(&offer), expected);
    }

    #[rstest]
    #[case(Some("2024-13-01"), None, OfferPriceFilterError::InvalidDate { field: "start_date" })]
    #[case(None, Some("yesterday"), OfferPriceFilterError::InvalidDate { field: "end_date" })]
    #[case(Some("2024-02-02"), Some("2024-02-01"), OfferPriceFilterError::InvertedRange)]
    fn filter_rejects_bad_dates(
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
        #[case] expected: OfferPriceFilterError,
    ) {
        assert_eq!(OfferPriceFilter::parse(None, start, end), Err(expected));
    }

    #[rstest]
    fn blank_filter_values_are_ignored() {
        let filter = OfferPriceFilter::parse(Some("  "), Some(""), None).expect("valid filter");
        assert_eq!(filter, OfferPriceFilter::default());
    }
}
