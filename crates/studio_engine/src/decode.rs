use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page is not valid {encoding}")]
    Malformed { encoding: String },
}

/// Decodes a page body: BOM, then the Content-Type charset, then plain UTF-8,
/// then whatever chardetng guesses.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(DecodedHtml {
            html: text.to_string(),
            encoding_label: UTF_8.name().to_string(),
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_detection() {
        // "Vidéo" in latin-1.
        let bytes = b"<p>Vid\xe9o</p>";
        let decoded = decode_html(bytes, Some("text/html; Charset=\"ISO-8859-1\"")).unwrap();
        assert_eq!(decoded.html, "<p>Vidéo</p>");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn utf8_without_header_is_taken_as_is() {
        let decoded = decode_html("<p>Traitement arrêté.</p>".as_bytes(), None).unwrap();
        assert_eq!(decoded.html, "<p>Traitement arrêté.</p>");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn malformed_body_for_declared_charset_is_an_error() {
        let err = decode_html(b"ok \xc3", Some("text/html; charset=utf-8")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                encoding: "UTF-8".to_string()
            }
        );
    }
}
