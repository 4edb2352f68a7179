// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// First letter upper case, the rest lower case: `"IKKE BESTÅET"` → `"Ikke bestået"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => s!(),
    }
}

/// Escape an identity key into a file stem. Injective: `%` and every byte
/// outside `[A-Za-z0-9._-]` become `%XX`, so distinct keys never share a file.
pub fn file_stem(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Remove a trailing label colon: `"Point( ECTS ):"` → `"Point( ECTS )"`.
pub fn strip_label(s: &str) -> String {
    normalize_ws(s).trim_end_matches(':').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  Matematik \n 1\t"), "Matematik 1");
    }

    #[test]
    fn capitalize_variants() {
        assert_eq!(capitalize("BESTÅET"), "Bestået");
        assert_eq!(capitalize("ikke bestået"), "Ikke bestået");
        assert_eq!(capitalize("-3"), "-3");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn file_stem_is_injective_on_separators() {
        assert_eq!(file_stem("DTU|E18|course|01005"), "DTU%7CE18%7Ccourse%7C01005");
        assert_ne!(file_stem("a|b"), file_stem("a%7Cb"));
        assert_eq!(file_stem("year>course"), "year%3Ecourse");
    }

    #[test]
    fn label_colon_stripped() {
        assert_eq!(strip_label(" Responsible: "), "Responsible");
        assert_eq!(strip_label("Language"), "Language");
    }
}
