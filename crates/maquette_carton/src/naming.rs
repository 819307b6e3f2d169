//! Naming convention utilities for component and property names.
//!
//! This module provides centralized utilities for:
//! - Case conversion (PascalCase, camelCase, snake_case, kebab-case)
//! - First-character capitalization

use compact_str::CompactString;

// =============================================================================
// Case Conversion
// =============================================================================

/// Convert kebab-case, snake_case or camelCase to PascalCase
///
/// # Examples
/// ```
/// use maquette_carton::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("my-component"), "MyComponent");
/// assert_eq!(to_pascal_case("myComponent"), "MyComponent");
/// assert_eq!(to_pascal_case("MyComponent"), "MyComponent");
/// ```
pub fn to_pascal_case(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if is_separator(c) {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert kebab-case, snake_case or PascalCase to camelCase
///
/// # Examples
/// ```
/// use maquette_carton::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("my-prop"), "myProp");
/// assert_eq!(to_camel_case("MyProp"), "myProp");
/// ```
pub fn to_camel_case(s: &str) -> CompactString {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => {
            let mut result = CompactString::with_capacity(pascal.len());
            result.push(first.to_ascii_lowercase());
            result.push_str(chars.as_str());
            result
        }
        None => pascal,
    }
}

/// Convert camelCase, PascalCase or kebab-case to snake_case
///
/// # Examples
/// ```
/// use maquette_carton::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("firstName"), "first_name");
/// assert_eq!(to_snake_case("UserCard"), "user_card");
/// ```
#[inline]
pub fn to_snake_case(s: &str) -> CompactString {
    delimit(s, '_')
}

/// Convert camelCase, PascalCase or snake_case to kebab-case
///
/// # Examples
/// ```
/// use maquette_carton::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("firstName"), "first-name");
/// assert_eq!(to_kebab_case("user_card"), "user-card");
/// ```
#[inline]
pub fn to_kebab_case(s: &str) -> CompactString {
    delimit(s, '-')
}

/// Upper-case the first character, leaving the rest untouched
///
/// # Examples
/// ```
/// use maquette_carton::naming::capitalize;
///
/// assert_eq!(capitalize("name"), "Name");
/// assert_eq!(capitalize("first_name"), "First_name");
/// ```
pub fn capitalize(s: &str) -> CompactString {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut result = CompactString::with_capacity(s.len());
            result.push(first.to_ascii_uppercase());
            result.push_str(chars.as_str());
            result
        }
        None => CompactString::default(),
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | ' ')
}

fn delimit(s: &str, delimiter: char) -> CompactString {
    let mut result = CompactString::with_capacity(s.len() + 4);
    let mut prev_lower_or_digit = false;

    for c in s.chars() {
        if is_separator(c) {
            if !result.is_empty() && !result.ends_with(delimiter) {
                result.push(delimiter);
            }
            prev_lower_or_digit = false;
            continue;
        }

        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                result.push(delimiter);
            }
            result.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            result.push(c);
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }

    result
}

// =============================================================================
// Tests
// =============================================================================
