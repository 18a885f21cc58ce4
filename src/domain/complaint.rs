//! The submission-ready complaint package.
//!
//! Derived on demand from a session plus classifier/composer output;
//! never persisted separately.

use serde::{Deserialize, Serialize};

use super::department::Department;
use super::fields::{ComplaintFields, FieldKey};
use super::timestamp::Timestamp;

const DIVIDER: &str =
    "----------------------------------------------------------------";

/// Everything a department needs to act on a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintPackage {
    pub fields: ComplaintFields,
    pub department: Department,
    pub department_email: String,
    pub ai_summary: String,
    pub user_advice: String,
}

impl ComplaintPackage {
    /// Mail subject for the outbound submission.
    pub fn subject(&self) -> String {
        format!(
            "New Complaint - {} - Priority Review",
            self.department.display_name()
        )
    }

    /// Plain-text mail body: submission metadata, the AI analysis, the
    /// structured fields ("Not provided" for absent ones), and a routing
    /// notice.
    pub fn format_email_body(&self, user_email: &str, submitted_at: Timestamp) -> String {
        let mut body = String::new();

        body.push_str(&format!(
            "NEW COMPLAINT - {}\n{DIVIDER}\n\n",
            self.department.display_name().to_uppercase()
        ));
        body.push_str(&format!("Submitted: {submitted_at}\n"));
        body.push_str(&format!("Complainant: {user_email}\n"));
        body.push_str(&format!(
            "Contact: {}\n\n",
            self.fields.get(FieldKey::Contact).unwrap_or("Not provided")
        ));

        body.push_str(&format!(
            "{DIVIDER}\nAI-GENERATED ANALYSIS & RECOMMENDATIONS:\n\n{}\n\n",
            self.ai_summary
        ));

        body.push_str(&format!("{DIVIDER}\nCOMPLAINT DETAILS:\n\n"));
        for key in FieldKey::ALL {
            body.push_str(&format!(
                "{}:\n   {}\n\n",
                key.display_label(),
                self.fields.get(key).unwrap_or("Not provided")
            ));
        }

        body.push_str(&format!(
            "{DIVIDER}\nIMPORTANT:\n\
             This complaint has been automatically classified and routed to your department.\n\
             Please review and take appropriate action within the standard response timeframe.\n\
             \n\
             A copy of this complaint has been sent to: {user_email}\n"
        ));

        body
    }
}
