//! Curriculum vitae record.

use serde::{Deserialize, Serialize};

/// A CV submitted by a platform user.
///
/// Optional sections are stored (and echoed back) as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cv {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    /// Free text, unlike the closed skill set of events.
    #[serde(default)]
    pub skills: Option<String>,
}
