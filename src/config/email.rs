//! Email configuration and the department destination directory

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::Department;

/// Outbound mail configuration (HTTP mail API)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Mail API key
    #[serde(default)]
    pub api_key: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL_API_KEY"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@complaintcompass.example".to_string()
}

fn default_from_name() -> String {
    "Complaint Compass".to_string()
}

/// Destination address for every department in the routing taxonomy.
///
/// Every key has a required entry; `general` doubles as the universal
/// default for unroutable complaints.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentDirectory {
    #[serde(default = "default_railway_email")]
    pub railway: String,
    #[serde(default = "default_delhi_police_email")]
    pub delhi_police: String,
    #[serde(default = "default_income_tax_email")]
    pub income_tax: String,
    #[serde(default = "default_delhi_traffic_email")]
    pub delhi_traffic: String,
    #[serde(default = "default_general_email")]
    pub general: String,
}

impl DepartmentDirectory {
    /// Destination address for a department.
    pub fn email_for(&self, department: Department) -> &str {
        match department {
            Department::Railway => &self.railway,
            Department::DelhiPolice => &self.delhi_police,
            Department::IncomeTax => &self.income_tax,
            Department::DelhiTraffic => &self.delhi_traffic,
            Department::General => &self.general,
        }
    }

    /// Validate the directory
    pub fn validate(&self) -> Result<(), ValidationError> {
        for department in Department::ALL {
            if !self.email_for(department).contains('@') {
                return Err(ValidationError::InvalidDepartmentEmail(department.as_key()));
            }
        }
        Ok(())
    }
}

impl Default for DepartmentDirectory {
    fn default() -> Self {
        Self {
            railway: default_railway_email(),
            delhi_police: default_delhi_police_email(),
            income_tax: default_income_tax_email(),
            delhi_traffic: default_delhi_traffic_email(),
            general: default_general_email(),
        }
    }
}

fn default_railway_email() -> String {
    "railway.complaints@indianrailways.gov.in".to_string()
}

fn default_delhi_police_email() -> String {
    "complaints@delhipolice.gov.in".to_string()
}

fn default_income_tax_email() -> String {
    "complaints@incometax.gov.in".to_string()
}

fn default_delhi_traffic_email() -> String {
    "traffic.complaints@delhipolice.gov.in".to_string()
}

fn default_general_email() -> String {
    "general@example.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header() {
        let config = EmailConfig {
            from_email: "support@example.com".to_string(),
            from_name: "Support Team".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "Support Team <support@example.com>");
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = EmailConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_from_email() {
        let config = EmailConfig {
            api_key: "key".to_string(),
            from_email: "invalid-email".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_directory_covers_every_department() {
        let directory = DepartmentDirectory::default();
        for department in Department::ALL {
            assert!(directory.email_for(department).contains('@'));
        }
        assert!(directory.validate().is_ok());
    }

    #[test]
    fn test_directory_rejects_bad_address() {
        let directory = DepartmentDirectory {
            income_tax: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            directory.validate(),
            Err(ValidationError::InvalidDepartmentEmail("income_tax"))
        ));
    }
}
