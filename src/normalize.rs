//! Text normalization for fuzzy comparison.
//!
//! Comparison happens in a canonical form: lower-cased, with Vietnamese
//! diacritics folded to their base Latin letter. Only the Latin-script
//! Vietnamese alphabet is folded; every other character passes through
//! unchanged. General Unicode normalization is out of scope.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Diacritic families of the Vietnamese alphabet, each mapped to its base
/// letter. Covers both cases so folding can be applied case-preservingly.
static FOLD_TABLE: &[(&str, char)] = &[
    ("àáạảãâầấậẩẫăằắặẳẵ", 'a'),
    ("ÀÁẠẢÃÂẦẤẬẨẪĂẰẮẶẲẴ", 'A'),
    ("èéẹẻẽêềếệểễ", 'e'),
    ("ÈÉẸẺẼÊỀẾỆỂỄ", 'E'),
    ("ìíịỉĩ", 'i'),
    ("ÌÍỊỈĨ", 'I'),
    ("òóọỏõôồốộổỗơờớợởỡ", 'o'),
    ("ÒÓỌỎÕÔỒỐỘỔỖƠỜỚỢỞỠ", 'O'),
    ("ùúụủũưừứựửữ", 'u'),
    ("ÙÚỤỦŨƯỪỨỰỬỮ", 'U'),
    ("ỳýỵỷỹ", 'y'),
    ("ỲÝỴỶỸ", 'Y'),
    ("đ", 'd'),
    ("Đ", 'D'),
];

lazy_static! {
    static ref FOLD_MAP: HashMap<char, char> = {
        let mut map = HashMap::new();
        for (family, base) in FOLD_TABLE {
            for ch in family.chars() {
                map.insert(ch, *base);
            }
        }
        map
    };
}

/// Fold Vietnamese diacritics to their base letters, preserving case.
///
/// Used by the query builder to derive the accent-folded pattern variant
/// without disturbing case-sensitive matching.
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|ch| FOLD_MAP.get(&ch).copied().unwrap_or(ch))
        .collect()
}

/// Normalize text into the canonical comparison form.
///
/// Lower-cases the input; when `fold_accents` is true, additionally folds
/// Vietnamese diacritics. Idempotent and infallible; empty input yields
/// empty output.
pub fn normalize(text: &str, fold_accents: bool) -> String {
    let lowered = text.to_lowercase();
    if fold_accents {
        fold_diacritics(&lowered)
    } else {
        lowered
    }
}
