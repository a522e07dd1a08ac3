use serde::{Deserialize, Serialize};

/// A catalog category. Names are unique ignoring case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
