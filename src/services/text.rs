//! Text normalization and keyword matching
//!
//! Upstream data mixes Spanish and English, with or without accents. All
//! matching goes through [`normalize`] and the keyword tables below, so new
//! spellings are added here as data.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Status prefix of canceled jobs ("Cancelado", "Cancelled", "Canceled")
pub const CANCELED_PREFIXES: &[&str] = &["cancel"];

/// Service-type prefixes of deliveries to a client
pub const DELIVERY_PREFIXES: &[&str] = &["entrega", "delivery"];

/// Service-type prefixes of pickups at a client
pub const PICKUP_PREFIXES: &[&str] = &["recogido", "recogida", "pickup", "pick up"];

/// Phrases meaning the unit is taken back to a warehouse
pub const TO_WAREHOUSE_PHRASES: &[&str] = &["to whse", "llevar a whse", "to warehouse"];

/// Service-type prefixes of relocations between sites
pub const RELOCATION_PREFIXES: &[&str] = &["relocalizacion", "relocation"];

/// Terms identifying one of our warehouses in free text
pub const WAREHOUSE_KEYWORDS: &[&str] = &["whse", "warehouse", "almacen", "bayamon"];

/// Truck type terms of trailers
pub const TRAILER_KEYWORDS: &[&str] = &["remolque", "trailer"];

/// Truck type terms of articulating crane trucks
pub const CRANE_KEYWORDS: &[&str] = &["fingger", "finger", "knuckle", "grua"];

/// Lowercase, strip diacritics and surrounding whitespace
pub fn normalize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

pub fn starts_with_any(normalized: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| normalized.starts_with(p))
}

pub fn contains_any(normalized: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| normalized.contains(t))
}
