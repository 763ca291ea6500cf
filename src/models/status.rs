use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Received,
    Built,
    Sent,
    Failed,
}

impl Display for DispatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DispatchStatus::Received => write!(f, "received"),
            DispatchStatus::Built => write!(f, "built"),
            DispatchStatus::Sent => write!(f, "sent"),
            DispatchStatus::Failed => write!(f, "failed"),
        }
    }
}
