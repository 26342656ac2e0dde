use base64::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
  #[error("image payload is empty")]
  Empty,
  #[error("data URL is not base64 encoded")]
  NotBase64DataUrl,
  #[error("invalid base64: {0}")]
  Base64(#[from] base64::DecodeError),
}

pub fn split_data_url(payload: &str) -> Option<(&str, &str)> {
  let rest = payload.strip_prefix("data:")?;
  let (header, data) = rest.split_once(',')?;
  let mime = header.split(';').next().unwrap_or("");
  Some((mime, data))
}

pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, PayloadError> {
  let payload = payload.trim();
  if payload.is_empty() {
    return Err(PayloadError::Empty);
  }

  let data = match payload.strip_prefix("data:") {
    Some(rest) => {
      let (header, data) = rest.split_once(',').ok_or(PayloadError::NotBase64DataUrl)?;
      if !header.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(PayloadError::NotBase64DataUrl);
      }
      data
    }
    None => payload,
  };

  let cleaned: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
  if cleaned.is_empty() {
    return Err(PayloadError::Empty);
  }
  Ok(base64::engine::general_purpose::STANDARD.decode(cleaned)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_raw_base64() {
    assert_eq!(decode_image_payload("aGVsbG8=").expect("decode"), b"hello");
  }

  #[test]
  fn decodes_data_url() {
    let bytes = decode_image_payload("data:image/jpeg;base64,aGVsbG8=").expect("decode");
    assert_eq!(bytes, b"hello");
  }

  #[test]
  fn tolerates_line_wrapped_base64() {
    let bytes = decode_image_payload("  aGVs\nbG8=\n").expect("decode");
    assert_eq!(bytes, b"hello");
  }

  #[test]
  fn rejects_empty_and_plain_data_urls() {
    assert!(matches!(decode_image_payload("   "), Err(PayloadError::Empty)));
    assert!(matches!(decode_image_payload("data:image/png;base64,"), Err(PayloadError::Empty)));
    assert!(matches!(
      decode_image_payload("data:text/plain,hello"),
      Err(PayloadError::NotBase64DataUrl)
    ));
  }

  #[test]
  fn rejects_invalid_base64() {
    assert!(matches!(decode_image_payload("!!!"), Err(PayloadError::Base64(_))));
  }

  #[test]
  fn splits_data_url_mime() {
    assert_eq!(split_data_url("data:image/png;base64,abc"), Some(("image/png", "abc")));
    assert_eq!(split_data_url("abc"), None);
  }
}
