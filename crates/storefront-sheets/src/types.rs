//! Wire types for the values API and the order script endpoint.

use serde::Deserialize;

/// Response of `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// `values` is omitted entirely when the range holds no data, and trailing
/// empty cells of a row are omitted too, so rows may be ragged. Cells are
/// kept as raw JSON because unformatted renders return numbers and booleans.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// Rows with every cell rendered as text.
    #[must_use]
    pub fn into_text_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Response of the order script endpoint.
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_means_no_rows() {
        let body = r#"{"range":"Sheet1!A2:F1000","majorDimension":"ROWS"}"#;
        let range: ValueRange = serde_json::from_str(body).unwrap();
        assert_eq!(range.major_dimension.as_deref(), Some("ROWS"));
        assert!(range.into_text_rows().is_empty());
    }

    #[test]
    fn non_string_cells_render_as_text() {
        let body = r#"{"values":[["Wheel", null, "a,b", 1250.5, true]]}"#;
        let range: ValueRange = serde_json::from_str(body).unwrap();
        assert_eq!(
            range.into_text_rows(),
            vec![vec!["Wheel", "", "a,b", "1250.5", "true"]]
        );
    }

    #[test]
    fn order_response_error_is_optional() {
        let ok: OrderResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.success);
        assert!(ok.error.is_none());
        let failed: OrderResponse =
            serde_json::from_str(r#"{"success":false,"error":"locked"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("locked"));
    }
}
