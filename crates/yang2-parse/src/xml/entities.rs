//! XML entity decoding for the YIN reader (spec.md §4.1, "XML reader").

use yang2_base::{ErrorKind, Result, YangError};

/// Decodes the five predefined XML entities and numeric character references
/// (`&#NNN;`, `&#xHHHH;`). YIN documents carry no DTD, so no other entity
/// names are legal.
pub fn decode(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '&' {
            out.push(c);
            continue;
        }
        let mut entity = String::new();
        loop {
            match chars.next() {
                Some(';') => break,
                Some(ch) => entity.push(ch),
                None => return Err(YangError::new(ErrorKind::Syntax, "unterminated entity reference")),
            }
        }
        out.push(resolve_entity(&entity)?);
    }
    Ok(out)
}

fn resolve_entity(entity: &str) -> Result<char> {
    match entity {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "amp" => Ok('&'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ if entity.starts_with("#x") || entity.starts_with("#X") => {
            let code = u32::from_str_radix(&entity[2..], 16).map_err(|_| YangError::new(ErrorKind::Syntax, format!("invalid hexadecimal character reference '&{};'", entity)))?;
            char::from_u32(code).ok_or_else(|| YangError::new(ErrorKind::Syntax, format!("'&{};' is not a valid character", entity)))
        }
        _ if entity.starts_with('#') => {
            let code = entity[1..].parse::<u32>().map_err(|_| YangError::new(ErrorKind::Syntax, format!("invalid character reference '&{};'", entity)))?;
            char::from_u32(code).ok_or_else(|| YangError::new(ErrorKind::Syntax, format!("'&{};' is not a valid character", entity)))
        }
        _ => Err(YangError::new(ErrorKind::Syntax, format!("unknown entity '&{};'", entity))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_predefined_entities() {
        assert_eq!(decode("a &lt;b&gt; c &amp; &quot;d&quot; &apos;e&apos;").unwrap(), "a <b> c & \"d\" 'e'");
    }

    #[test]
    fn decodes_numeric_character_references() {
        assert_eq!(decode("&#65;&#x42;").unwrap(), "AB");
    }

    #[test]
    fn rejects_unknown_entity() {
        let err = decode("&bogus;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }
}
