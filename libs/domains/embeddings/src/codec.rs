//! `[v0,v1,...]` text form accepted and produced by pgvector.

use crate::error::VectorParseError;

/// Renders `vector` as `[v0,v1,...]`.
///
/// Each component uses the shortest decimal text that parses back to the
/// same `f32`, so `decode_vector(&encode_vector(v)) == v` for finite input.
pub fn encode_vector(vector: &[f32]) -> String {
    let mut out = String::with_capacity(vector.len() * 12 + 2);
    out.push('[');
    for (i, value) in vector.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
    out.push(']');
    out
}

/// Parses the text form back into a vector.
///
/// Both brackets are required. Surrounding whitespace and whitespace around
/// each element are ignored. An empty body (`[]`) yields an empty vector.
pub fn decode_vector(text: &str) -> Result<Vec<f32>, VectorParseError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| VectorParseError::Unbracketed(trimmed.to_string()))?
        .trim();

    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<f32>().map_err(|e| VectorParseError::Element {
                index,
                token: token.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vector_encodes_as_brackets() {
        assert_eq!(encode_vector(&[]), "[]");
        assert_eq!(decode_vector("[]").unwrap(), Vec::<f32>::new());
        assert_eq!(decode_vector("[  ]").unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn test_encode_has_no_padding() {
        assert_eq!(encode_vector(&[1.0, 0.5, -2.25]), "[1,0.5,-2.25]");
    }

    #[test]
    fn test_round_trip_preserves_f32_values() {
        let vector = vec![0.1_f32, -0.333_333_34, 1e-7, 12345.678, f32::MIN_POSITIVE, 0.0];
        assert_eq!(decode_vector(&encode_vector(&vector)).unwrap(), vector);
    }

    #[test]
    fn test_round_trip_narrowed_model_output() {
        let from_model: Vec<f64> = (0..384).map(|i| (i as f64 * 0.017).sin() / 3.0).collect();
        let stored: Vec<f32> = from_model.iter().map(|v| *v as f32).collect();

        let decoded = decode_vector(&encode_vector(&stored)).unwrap();
        assert_eq!(decoded.len(), 384);
        assert_eq!(decoded, stored);
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(
            decode_vector(" [ 0.1 , 0.2,0.3 ] ").unwrap(),
            vec![0.1_f32, 0.2, 0.3]
        );
    }

    #[test]
    fn test_decode_reports_offending_index() {
        let err = decode_vector("[0.1,x,0.3]").unwrap_err();
        assert!(err.to_string().contains("element 1"));
        assert!(matches!(
            err,
            VectorParseError::Element { index: 1, ref token, .. } if token == "x"
        ));
    }

    #[test]
    fn test_decode_rejects_empty_element() {
        let err = decode_vector("[0.1,,0.3]").unwrap_err();
        assert!(matches!(err, VectorParseError::Element { index: 1, .. }));
    }

    #[test]
    fn test_decode_requires_both_brackets() {
        for text in ["0.1,0.2", "[0.1,0.2", "0.1,0.2]", "", "  "] {
            let err = decode_vector(text).unwrap_err();
            assert!(
                matches!(err, VectorParseError::Unbracketed(_)),
                "{text:?} decoded as {err:?}"
            );
        }
    }
}
