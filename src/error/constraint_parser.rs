use std::sync::OnceLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Constraints declared by the migrations are recognised by name first, so the
/// resulting errors use the same entity and field names as the rest of the
/// API. Anything else falls back to pattern matching on the message text.
pub struct ConstraintParser;

/// Constraint names created by the migrations, mapped to (entity, field).
const KNOWN_CONSTRAINTS: &[(&str, &str, &str)] = &[
    ("users_login_key", "user", "login"),
    ("restaurants_cuisine_id_fkey", "cuisine", "id"),
    ("addresses_restaurant_id_key", "address", "restaurant_id"),
    ("addresses_restaurant_id_fkey", "restaurant", "id"),
    ("reviews_user_id_fkey", "user", "id"),
    ("reviews_restaurant_id_fkey", "restaurant", "id"),
    ("reviews_stars_check", "review", "stars"),
];

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        // The patterns are literals; a failure here is a programming error.
        Self {
            // "Key (login)=(bob)" and the expression-index form "Key (lower((login)::text))=(bob)"
            key_value: Regex::new(r"Key \((?:lower\(\()?([A-Za-z_]+)(?:\)::text\))?\)=\(([^)]*)\)")
                .expect("valid key/value pattern"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("valid table pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Looks up a constraint created by the migrations.
    pub fn known_constraint(constraint_name: &str) -> Option<(String, String)> {
        KNOWN_CONSTRAINTS
            .iter()
            .find(|(name, _, _)| *name == constraint_name)
            .map(|(_, entity, field)| (entity.to_string(), field.to_string()))
    }

    /// Parses a unique constraint violation into (entity, field, value).
    ///
    /// # Examples
    /// ```ignore
    /// let message = "duplicate key value violates unique constraint \"users_login_key\"\nDETAIL: Key (lower((login)::text))=(alice) already exists.";
    /// let result = ConstraintParser::parse_unique_violation(message, Some("users_login_key"));
    /// assert_eq!(result, Some(("user".into(), "login".into(), "alice".into())));
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let value = Self::extract_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::resolve_constraint_name) {
            return Some((entity, field, value.unwrap_or_else(|| "duplicate_value".to_string())));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .map(|t| Self::singular(&t))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not null constraint violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .map(|t| Self::singular(&t))
            .or_else(|| constraint_name.and_then(Self::resolve_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into (referenced entity, field, value).
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let value = Self::extract_value_from_message(message)
            .unwrap_or_else(|| "invalid_reference".to_string());

        if let Some((entity, field)) = constraint_name.and_then(Self::resolve_constraint_name) {
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .map(|t| Self::singular(&t))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a check constraint violation into (entity, field).
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(found) = constraint_name.and_then(Self::resolve_constraint_name) {
            return Some(found);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .map(|t| Self::singular(&t))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    fn resolve_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        Self::known_constraint(constraint_name).or_else(|| Self::parse_constraint_name(constraint_name))
    }

    /// Parses conventional PostgreSQL constraint names.
    ///
    /// - "users_login_key" -> ("user", "login")
    /// - "reviews_user_id_fkey" -> ("review", "user_id")
    /// - "reviews_stars_check" -> ("review", "stars")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = ["_key", "_fkey", "_check", "_idx"]
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (table, field) = stem.split_once('_')?;
        if table.is_empty() || field.is_empty() {
            return None;
        }
        Some((Self::singular(table), field.to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts "Key (field)=(value)" pairs, including keys on `lower(column)`.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }

    pub fn extract_value_from_message(message: &str) -> Option<String> {
        Self::extract_key_value_from_message(message).map(|(_, value)| value)
    }

    // Table names are plural; error payloads name the entity.
    fn singular(table: &str) -> String {
        table.strip_suffix('s').unwrap_or(table).to_string()
    }
}
