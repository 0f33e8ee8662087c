use serde::{Deserialize, Serialize};

/// Letterhead block printed on estimates and invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyDetails {
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub email: String,
    pub contact: String,
    pub gstin: String,
}

impl Default for CompanyDetails {
    fn default() -> Self {
        Self {
            name: "Bhagya Groups".into(),
            address1: "Beeramguda, Hyderabad".into(),
            address2: "Telangana, India".into(),
            email: "bhagyagroups@gmail.com".into(),
            contact: "+91-XXXXXXXXXX".into(),
            gstin: "YOUR_GSTIN_HERE".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// The settings document. The same shape is cached locally so the next
/// launch can find the repository without a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub company_details: CompanyDetails,
    pub logo_base64: Option<String>,
    pub watermark_base64: Option<String>,
    pub invoice_prefix: String,
    pub github_token: String,
    pub github_repo: String,
    pub theme: Theme,
    pub low_stock_threshold: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            company_details: CompanyDetails::default(),
            logo_base64: None,
            watermark_base64: None,
            invoice_prefix: "INV/BG/".into(),
            github_token: String::new(),
            github_repo: String::new(),
            theme: Theme::Light,
            low_stock_threshold: 10,
        }
    }
}

impl AppSettings {
    /// Both repository coordinates are present; the remote store can be
    /// constructed.
    pub fn is_repo_configured(&self) -> bool {
        !self.github_token.is_empty() && !self.github_repo.is_empty()
    }
}
