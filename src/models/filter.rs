//! Query-parameter filtering for promotion listings.
//!
//! At most one filter applies per request, selected by fixed precedence:
//! name, validity, category, start date, end date, product id.

use chrono::NaiveDate;
use serde::Deserialize;

use super::promotion::{Category, DataValidationError, Promotion};

/// Raw query parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPromotionsParams {
    pub name: Option<String>,
    pub validity: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub product_id: Option<String>,
}

/// The single predicate a listing request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionFilter {
    All,
    Name(String),
    Validity(bool),
    Category(Category),
    StartDate(NaiveDate),
    EndDate(NaiveDate),
    ProductId(i32),
}

impl ListPromotionsParams {
    /// Selects the filter to apply. A present-but-empty parameter counts as
    /// absent; with no usable parameter the result is [`PromotionFilter::All`].
    pub fn resolve(&self) -> Result<PromotionFilter, DataValidationError> {
        if let Some(name) = present(&self.name) {
            return Ok(PromotionFilter::Name(name.to_string()));
        }
        if let Some(validity) = present(&self.validity) {
            return Ok(PromotionFilter::Validity(parse_truthy(validity)));
        }
        if let Some(category) = present(&self.category) {
            return Ok(PromotionFilter::Category(Category::parse(category)?));
        }
        if let Some(raw) = present(&self.start_date) {
            return Ok(PromotionFilter::StartDate(parse_date(raw)?));
        }
        if let Some(raw) = present(&self.end_date) {
            return Ok(PromotionFilter::EndDate(parse_date(raw)?));
        }
        if let Some(raw) = present(&self.product_id) {
            let product_id =
                raw.parse::<i32>()
                    .map_err(|_| DataValidationError::InvalidType {
                        field: "product_id",
                        expected: "int",
                    })?;
            return Ok(PromotionFilter::ProductId(product_id));
        }
        Ok(PromotionFilter::All)
    }
}

impl PromotionFilter {
    /// Predicate form of the filter, used by the in-memory store.
    pub fn matches(&self, promotion: &Promotion) -> bool {
        match self {
            PromotionFilter::All => true,
            PromotionFilter::Name(name) => promotion.name == *name,
            PromotionFilter::Validity(validity) => promotion.validity == *validity,
            PromotionFilter::Category(category) => promotion.category == *category,
            PromotionFilter::StartDate(date) => promotion.start_date == *date,
            PromotionFilter::EndDate(date) => promotion.end_date == *date,
            PromotionFilter::ProductId(product_id) => promotion.product_id == *product_id,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.is_empty())
}

/// `"true"`, `"1"` and `"yes"` (any case) are valid; everything else is false.
fn parse_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

fn parse_date(raw: &str) -> Result<NaiveDate, DataValidationError> {
    raw.parse::<NaiveDate>()
        .map_err(|_| DataValidationError::UnparseableDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        name: Option<&str>,
        validity: Option<&str>,
        category: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        product_id: Option<&str>,
    ) -> ListPromotionsParams {
        ListPromotionsParams {
            name: name.map(String::from),
            validity: validity.map(String::from),
            category: category.map(String::from),
            start_date: start_date.map(String::from),
            end_date: end_date.map(String::from),
            product_id: product_id.map(String::from),
        }
    }

    #[test]
    fn no_parameters_resolves_to_all() {
        let resolved = ListPromotionsParams::default().resolve().unwrap();
        assert_eq!(resolved, PromotionFilter::All);
    }

    #[test]
    fn name_takes_precedence_over_everything_else() {
        let resolved = params(
            Some("Summer"),
            Some("true"),
            Some("UNKNOWN"),
            Some("2025-06-01"),
            Some("2025-06-30"),
            Some("1"),
        )
        .resolve()
        .unwrap();
        assert_eq!(resolved, PromotionFilter::Name("Summer".into()));
    }

    #[test]
    fn precedence_falls_through_in_declared_order() {
        let resolved = params(None, Some("yes"), Some("UNKNOWN"), None, None, Some("3"))
            .resolve()
            .unwrap();
        assert_eq!(resolved, PromotionFilter::Validity(true));

        let resolved = params(None, None, Some("buy_x_get_y_free"), None, None, Some("3"))
            .resolve()
            .unwrap();
        assert_eq!(resolved, PromotionFilter::Category(Category::BuyXGetYFree));

        let resolved = params(None, None, None, Some("2025-06-01"), Some("2025-06-30"), None)
            .resolve()
            .unwrap();
        assert_eq!(
            resolved,
            PromotionFilter::StartDate(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        );
    }

    #[test]
    fn empty_values_are_treated_as_absent() {
        let resolved = params(Some(""), Some(""), None, None, None, Some("9"))
            .resolve()
            .unwrap();
        assert_eq!(resolved, PromotionFilter::ProductId(9));
    }

    #[test]
    fn validity_accepts_truthy_strings_only() {
        for truthy in ["true", "TRUE", "1", "Yes"] {
            let resolved = params(None, Some(truthy), None, None, None, None)
                .resolve()
                .unwrap();
            assert_eq!(resolved, PromotionFilter::Validity(true));
        }
        let resolved = params(None, Some("false"), None, None, None, None)
            .resolve()
            .unwrap();
        assert_eq!(resolved, PromotionFilter::Validity(false));

        let resolved = params(None, Some("banana"), None, None, None, None)
            .resolve()
            .unwrap();
        assert_eq!(resolved, PromotionFilter::Validity(false));
    }

    #[test]
    fn unknown_category_is_an_error_not_an_empty_result() {
        let result = params(None, None, Some("MYSTERY"), None, None, None).resolve();
        assert_eq!(
            result,
            Err(DataValidationError::InvalidCategory("MYSTERY".into()))
        );
    }

    #[test]
    fn bad_dates_and_product_ids_are_errors() {
        let result = params(None, None, None, Some("soon"), None, None).resolve();
        assert_eq!(result, Err(DataValidationError::UnparseableDate("soon".into())));

        let result = params(None, None, None, None, None, Some("twelve")).resolve();
        assert_eq!(
            result,
            Err(DataValidationError::InvalidType {
                field: "product_id",
                expected: "int"
            })
        );
    }

    #[test]
    fn matches_compares_the_selected_field() {
        let mut promotion = Promotion::new();
        promotion.name = "Summer".into();
        promotion.product_id = 4;
        promotion.validity = true;

        assert!(PromotionFilter::Name("Summer".into()).matches(&promotion));
        assert!(!PromotionFilter::Name("Winter".into()).matches(&promotion));
        assert!(PromotionFilter::Validity(true).matches(&promotion));
        assert!(PromotionFilter::ProductId(4).matches(&promotion));
        assert!(PromotionFilter::All.matches(&promotion));
    }
}
