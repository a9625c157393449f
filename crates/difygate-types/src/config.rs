//! Configuration presence report shown by the client's info view.

use serde::{Deserialize, Serialize};

/// Which credentials are configured in the client's environment.
///
/// Holds booleans only. Secret values never enter this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStatus {
    pub backend_url: String,
    pub dify_api_key: bool,
    pub aws_access_key_id: bool,
    pub aws_secret_access_key: bool,
}

impl ConfigStatus {
    /// `(variable, display value)` rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("BACKEND_URL", self.backend_url.clone()),
            ("DIFY_API_KEY", presence(self.dify_api_key)),
            ("AWS_ACCESS_KEY_ID", presence(self.aws_access_key_id)),
            ("AWS_SECRET_ACCESS_KEY", presence(self.aws_secret_access_key)),
        ]
    }
}

fn presence(configured: bool) -> String {
    let label = if configured { "configured" } else { "not configured" };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_never_expose_values() {
        let status = ConfigStatus {
            backend_url: "http://localhost:5000".to_string(),
            dify_api_key: true,
            aws_access_key_id: false,
            aws_secret_access_key: true,
        };
        let rows = status.rows();
        assert_eq!(rows[0], ("BACKEND_URL", "http://localhost:5000".to_string()));
        assert_eq!(rows[1], ("DIFY_API_KEY", "configured".to_string()));
        assert_eq!(rows[2], ("AWS_ACCESS_KEY_ID", "not configured".to_string()));
        assert_eq!(rows[3].1, "configured");
    }
}
