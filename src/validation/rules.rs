// Validation chains for every route that accepts input.
use once_cell::sync::Lazy;

use super::{FieldRule, ValidationChain};

pub const CHARSET_MESSAGE: &str =
    "One of the special characters entered is not allowed. \nOnly / - , . ( ) and : are allowed.";

/// Punctuation allowed in article names and brands, besides letters and digits
const TEXT_PUNCTUATION: &str = " -,.():";

const TRUE_FALSE: &[&str] = &["true", "false"];

fn article_text(field: &'static str, length_message: &'static str) -> FieldRule {
    FieldRule::body(field)
        .optional()
        .charset(TEXT_PUNCTUATION, CHARSET_MESSAGE)
        .trim()
        .length(1, Some(50), length_message)
        .escape()
}

fn article_name() -> FieldRule {
    article_text("name", "The name must be between 1 and 50 characters.")
}

fn article_brand() -> FieldRule {
    article_text("brand", "The brand must be between 1 and 50 characters.")
}

fn article_id() -> FieldRule {
    FieldRule::param("id")
        .int("The id value must be a number.")
        .not_empty("The id is required.")
}

/// POST /api/article
pub static CREATE_ARTICLE: Lazy<ValidationChain> = Lazy::new(|| {
    ValidationChain::new(vec![
        article_name(),
        FieldRule::body("name").not_empty("The name is required."),
        article_brand(),
        FieldRule::body("brand").not_empty("The brand is required."),
    ])
});

/// GET /api/article
pub static LIST_ARTICLES: Lazy<ValidationChain> = Lazy::new(|| {
    ValidationChain::new(vec![
        FieldRule::query("page").optional().int("Page must be a number"),
        FieldRule::query("order").optional().uppercase().one_of(
            &["ASC", "DESC"],
            "No valid value was provided for the search, use ASC or DESC",
        ),
        FieldRule::query("name")
            .optional()
            .length(0, Some(10), "The name can have a maximum of 10 characters."),
        FieldRule::query("exact")
            .optional()
            .lowercase()
            .one_of(TRUE_FALSE, "The exact value must be true or false."),
        FieldRule::query("active")
            .optional()
            .lowercase()
            .one_of(TRUE_FALSE, "The active value must be true or false."),
    ])
});

/// PUT /api/article/:id
pub static UPDATE_ARTICLE: Lazy<ValidationChain> =
    Lazy::new(|| ValidationChain::new(vec![article_id(), article_name(), article_brand()]));

/// DELETE /api/article/:id
pub static ARTICLE_BY_ID: Lazy<ValidationChain> =
    Lazy::new(|| ValidationChain::new(vec![article_id()]));

/// POST /api/user
pub static REGISTER_USER: Lazy<ValidationChain> = Lazy::new(|| {
    ValidationChain::new(vec![
        FieldRule::body("username")
            .optional()
            .trim()
            .charset("", "The username can only contain letters and numbers.")
            .length(3, Some(30), "The username must be between 3 and 30 characters."),
        FieldRule::body("username").not_empty("The username is required."),
        FieldRule::body("password")
            .optional()
            .length(6, Some(100), "The password must be between 6 and 100 characters."),
        FieldRule::body("password").not_empty("The password is required."),
        article_text("name", "The name must be between 1 and 50 characters."),
        FieldRule::body("name").not_empty("The name is required."),
        article_text("lastname", "The lastname must be between 1 and 50 characters."),
        FieldRule::body("lastname").not_empty("The lastname is required."),
        FieldRule::body("dni")
            .optional()
            .trim()
            .charset("", "The dni can only contain letters and numbers.")
            .length(1, Some(20), "The dni must be between 1 and 20 characters."),
        FieldRule::body("dni").not_empty("The dni is required."),
    ])
});

/// POST /api/auth/login
pub static LOGIN: Lazy<ValidationChain> = Lazy::new(|| {
    ValidationChain::new(vec![
        FieldRule::body("username").trim().not_empty("The username is required."),
        FieldRule::body("password").not_empty("The password is required."),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Location, RequestInput, Violation};
    use serde_json::json;
    use std::collections::HashMap;

    fn pairs(violations: &[Violation]) -> Vec<(&str, &str)> {
        violations
            .iter()
            .map(|v| (v.field.as_str(), v.message.as_str()))
            .collect()
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn create_on_empty_body_requires_name_then_brand() {
        let errors = CREATE_ARTICLE
            .run(&RequestInput::new().with_body(json!({})))
            .unwrap_err();
        assert_eq!(
            pairs(&errors),
            vec![("name", "The name is required."), ("brand", "The brand is required.")]
        );
    }

    #[test]
    fn create_with_overlong_symbols_reports_charset_then_length() {
        let stars = "*".repeat(60);
        let errors = CREATE_ARTICLE
            .run(&RequestInput::new().with_body(json!({ "name": stars, "brand": stars })))
            .unwrap_err();
        assert_eq!(
            pairs(&errors),
            vec![
                ("name", CHARSET_MESSAGE),
                ("name", "The name must be between 1 and 50 characters."),
                ("brand", CHARSET_MESSAGE),
                ("brand", "The brand must be between 1 and 50 characters."),
            ]
        );
    }

    #[test]
    fn create_with_overlong_valid_text_reports_only_length() {
        let long = "a".repeat(51);
        let errors = CREATE_ARTICLE
            .run(&RequestInput::new().with_body(json!({ "name": long, "brand": "Bic" })))
            .unwrap_err();
        assert_eq!(pairs(&errors), vec![("name", "The name must be between 1 and 50 characters.")]);
    }

    #[test]
    fn create_with_blank_name_fails_all_name_checks() {
        let errors = CREATE_ARTICLE
            .run(&RequestInput::new().with_body(json!({ "name": "   ", "brand": "Bic" })))
            .unwrap_err();
        assert_eq!(
            pairs(&errors),
            vec![
                ("name", CHARSET_MESSAGE),
                ("name", "The name must be between 1 and 50 characters."),
                ("name", "The name is required."),
            ]
        );
    }

    #[test]
    fn create_trims_and_accepts_allowed_punctuation() {
        let validated = CREATE_ARTICLE
            .run(&RequestInput::new().with_body(json!({
                "name": "  Pen (blue), 0.7: fine-point ",
                "brand": "Pilot"
            })))
            .unwrap();
        assert_eq!(validated.body("name"), Some("Pen (blue), 0.7: fine-point"));
        assert_eq!(validated.body("brand"), Some("Pilot"));
    }

    #[test]
    fn list_reports_every_bad_query_value_in_order() {
        let input = RequestInput::new().with_query(query(&[
            ("order", "asx"),
            ("page", "a"),
            ("active", "verdadero"),
            ("exact", "falso"),
            ("name", "un nombre largo"),
        ]));
        let errors = LIST_ARTICLES.run(&input).unwrap_err();
        assert_eq!(
            pairs(&errors),
            vec![
                ("page", "Page must be a number"),
                ("order", "No valid value was provided for the search, use ASC or DESC"),
                ("name", "The name can have a maximum of 10 characters."),
                ("exact", "The exact value must be true or false."),
                ("active", "The active value must be true or false."),
            ]
        );
        assert!(errors.iter().all(|v| v.location == Location::Query));
    }

    #[test]
    fn list_folds_case_of_enum_values() {
        let input = RequestInput::new().with_query(query(&[
            ("order", "desc"),
            ("exact", "TRUE"),
            ("active", "False"),
        ]));
        let validated = LIST_ARTICLES.run(&input).unwrap();
        assert_eq!(validated.query("order"), Some("DESC"));
        assert_eq!(validated.query("exact"), Some("true"));
        assert_eq!(validated.query("active"), Some("false"));
    }

    #[test]
    fn non_numeric_id_is_a_single_violation() {
        let errors = ARTICLE_BY_ID
            .run(&RequestInput::new().with_param("id", "a"))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "The id value must be a number.");
        assert_eq!(errors[0].field, "id");
        assert_eq!(errors[0].value.as_deref(), Some("a"));
    }

    #[test]
    fn update_accepts_partial_body() {
        let validated = UPDATE_ARTICLE
            .run(&RequestInput::new().with_param("id", "2").with_body(json!({ "name": "Updated name" })))
            .unwrap();
        assert_eq!(validated.param("id"), Some("2"));
        assert_eq!(validated.body("name"), Some("Updated name"));
        assert_eq!(validated.body("brand"), None);
    }

    #[test]
    fn register_requires_every_field() {
        let errors = REGISTER_USER
            .run(&RequestInput::new().with_body(json!({})))
            .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "password", "name", "lastname", "dni"]);
    }

    #[test]
    fn login_requires_credentials() {
        let errors = LOGIN
            .run(&RequestInput::new().with_body(json!({ "username": "  " })))
            .unwrap_err();
        assert_eq!(
            pairs(&errors),
            vec![("username", "The username is required."), ("password", "The password is required.")]
        );
    }
}
