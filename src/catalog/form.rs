//! Submitted angle fields and how they map onto records.
//!
//! Every value arrives as text. Creation copies fields as given; updates only
//! take fields that are present and non-empty, everything else keeps the
//! stored value.

use angle_catalog_common::numbers::coerce_number;
use angle_catalog_common::{BorderRadius, Error, Result};
use angle_catalog_db::models::Angle;

/// Raw text fields of an angle submission, keyed by their form names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AngleForm {
    /// `angle_name`
    pub name: Option<String>,
    /// `angledescription`
    pub description: Option<String>,
    pub border_radius: Option<String>,
    pub price: Option<String>,
    pub discount_option: Option<String>,
    pub discounted_percentage: Option<String>,
    pub discounted_price: Option<String>,
    pub vat_amount: Option<String>,
    pub status: Option<String>,
}

impl AngleForm {
    /// Record a form field. Returns `false` for field names the form does
    /// not know, which callers ignore.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "angle_name" => &mut self.name,
            "angledescription" => &mut self.description,
            "border_radius" => &mut self.border_radius,
            "price" => &mut self.price,
            "discount_option" => &mut self.discount_option,
            "discounted_percentage" => &mut self.discounted_percentage,
            "discounted_price" => &mut self.discounted_price,
            "vat_amount" => &mut self.vat_amount,
            "status" => &mut self.status,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Build a new record from the submitted fields.
    ///
    /// An absent `border_radius` gives an empty list; blank numeric fields
    /// are stored as unset.
    pub fn into_new_angle(self) -> Result<Angle> {
        let mut angle = Angle::new();
        angle.name = self.name;
        angle.description = self.description;
        angle.border_radius = self
            .border_radius
            .as_deref()
            .map(BorderRadius::parse)
            .unwrap_or_default();
        angle.price = optional_number("price", self.price.as_deref())?;
        angle.discount_option = self.discount_option;
        angle.discounted_percentage =
            optional_number("discounted_percentage", self.discounted_percentage.as_deref())?;
        angle.discounted_price =
            optional_number("discounted_price", self.discounted_price.as_deref())?;
        angle.vat_amount = optional_number("vat_amount", self.vat_amount.as_deref())?;
        angle.status = self.status;
        Ok(angle)
    }

    /// Merge the submitted fields over an existing record.
    ///
    /// A field replaces the stored value only when it is present and not
    /// empty. Text is not trimmed, and `"0"` counts as a value.
    pub fn apply_to(self, angle: &mut Angle) -> Result<()> {
        if let Some(name) = non_empty(self.name) {
            angle.name = Some(name);
        }
        if let Some(description) = non_empty(self.description) {
            angle.description = Some(description);
        }
        if let Some(radius) = non_empty(self.border_radius) {
            angle.border_radius = BorderRadius::parse(&radius);
        }
        if let Some(price) = non_empty(self.price) {
            angle.price = Some(number("price", &price)?);
        }
        if let Some(option) = non_empty(self.discount_option) {
            angle.discount_option = Some(option);
        }
        if let Some(pct) = non_empty(self.discounted_percentage) {
            angle.discounted_percentage = Some(number("discounted_percentage", &pct)?);
        }
        if let Some(price) = non_empty(self.discounted_price) {
            angle.discounted_price = Some(number("discounted_price", &price)?);
        }
        if let Some(vat) = non_empty(self.vat_amount) {
            angle.vat_amount = Some(number("vat_amount", &vat)?);
        }
        if let Some(status) = non_empty(self.status) {
            angle.status = Some(status);
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn number(field: &str, text: &str) -> Result<f64> {
    let value = coerce_number(text);
    if value.is_nan() {
        return Err(Error::invalid_input(format!(
            "{} is not a number: {:?}",
            field, text
        )));
    }
    Ok(value)
}

fn optional_number(field: &str, text: Option<&str>) -> Result<Option<f64>> {
    match text {
        Some(t) if !t.trim().is_empty() => number(field, t).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> AngleForm {
        let mut form = AngleForm::default();
        for (field, value) in [
            ("angle_name", "Round"),
            ("angledescription", "Soft corner"),
            ("border_radius", "8,2,8"),
            ("price", "100"),
            ("discount_option", "percentage"),
            ("discounted_percentage", "10"),
            ("discounted_price", "90"),
            ("vat_amount", "15"),
            ("status", "available"),
        ] {
            assert!(form.set(field, value.to_string()));
        }
        form
    }

    #[test]
    fn test_set_ignores_unknown_fields() {
        let mut form = AngleForm::default();
        assert!(!form.set("Angle_name", "x".to_string()));
        assert!(!form.set("avatarAngle", "x".to_string()));
        assert_eq!(form, AngleForm::default());
    }

    #[test]
    fn test_into_new_angle_maps_every_field() {
        let angle = full_form().into_new_angle().unwrap();
        assert_eq!(angle.name.as_deref(), Some("Round"));
        assert_eq!(angle.description.as_deref(), Some("Soft corner"));
        assert_eq!(angle.border_radius.values(), &[2.0, 8.0]);
        assert_eq!(angle.price, Some(100.0));
        assert_eq!(angle.discount_option.as_deref(), Some("percentage"));
        assert_eq!(angle.discounted_percentage, Some(10.0));
        assert_eq!(angle.discounted_price, Some(90.0));
        assert_eq!(angle.vat_amount, Some(15.0));
        assert_eq!(angle.status.as_deref(), Some("available"));
        assert!(angle.avatar_angle.is_none());
    }

    #[test]
    fn test_into_new_angle_without_fields() {
        let angle = AngleForm::default().into_new_angle().unwrap();
        assert!(angle.name.is_none());
        assert!(angle.border_radius.is_empty());
        assert!(angle.price.is_none());
    }

    #[test]
    fn test_into_new_angle_blank_number_is_unset() {
        let mut form = AngleForm::default();
        form.set("price", " ".to_string());
        assert!(form.into_new_angle().unwrap().price.is_none());
    }

    #[test]
    fn test_into_new_angle_rejects_non_numeric_price() {
        let mut form = AngleForm::default();
        form.set("price", "cheap".to_string());
        let err = form.into_new_angle().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_non_numeric_border_radius_is_coerced_not_rejected() {
        let mut form = AngleForm::default();
        form.set("border_radius", "4,wide".to_string());
        let angle = form.into_new_angle().unwrap();
        assert_eq!(angle.border_radius.len(), 2);
        assert!(angle.border_radius.values()[1].is_nan());
    }

    #[test]
    fn test_apply_to_replaces_present_fields() {
        let mut angle = full_form().into_new_angle().unwrap();

        let mut patch = AngleForm::default();
        patch.set("angle_name", "Sharp".to_string());
        patch.set("price", "250.5".to_string());
        patch.set("border_radius", "1,0".to_string());
        patch.apply_to(&mut angle).unwrap();

        assert_eq!(angle.name.as_deref(), Some("Sharp"));
        assert_eq!(angle.price, Some(250.5));
        assert_eq!(angle.border_radius.values(), &[0.0, 1.0]);
        // untouched
        assert_eq!(angle.description.as_deref(), Some("Soft corner"));
        assert_eq!(angle.status.as_deref(), Some("available"));
    }

    #[test]
    fn test_apply_to_empty_strings_keep_previous_values() {
        let mut angle = full_form().into_new_angle().unwrap();
        let before = angle.clone();

        let mut patch = AngleForm::default();
        for field in [
            "angle_name",
            "angledescription",
            "border_radius",
            "price",
            "discount_option",
            "discounted_percentage",
            "discounted_price",
            "vat_amount",
            "status",
        ] {
            patch.set(field, String::new());
        }
        patch.apply_to(&mut angle).unwrap();

        assert_eq!(angle, before);
    }

    #[test]
    fn test_apply_to_zero_text_replaces() {
        let mut angle = full_form().into_new_angle().unwrap();

        let mut patch = AngleForm::default();
        patch.set("price", "0".to_string());
        patch.apply_to(&mut angle).unwrap();

        assert_eq!(angle.price, Some(0.0));
    }

    #[test]
    fn test_apply_to_rejects_non_numeric_vat() {
        let mut angle = full_form().into_new_angle().unwrap();

        let mut patch = AngleForm::default();
        patch.set("vat_amount", "n/a".to_string());
        assert!(patch.apply_to(&mut angle).is_err());
    }
}
