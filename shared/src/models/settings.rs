use serde::{Deserialize, Serialize};

/// What the server tells the page about itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub model: String,
}
