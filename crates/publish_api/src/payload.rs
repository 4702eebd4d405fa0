use serde::{Deserialize, Serialize};

/// Fixed ancestor page every published page is created under.
pub const ANCESTOR_PAGE_ID: &str = "3564306438";

/// Canonical request payload for the content resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub space: SpaceRef,
    pub ancestors: Vec<AncestorRef>,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRef {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBody {
    pub storage: StorageBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBody {
    pub value: String,
    pub representation: String,
}

impl PageRequest {
    /// Builds a page-creation payload under the fixed ancestor.
    pub fn page(
        title: impl Into<String>,
        space_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: "page".to_string(),
            title: title.into(),
            space: SpaceRef {
                key: space_key.into(),
            },
            ancestors: vec![AncestorRef {
                id: ANCESTOR_PAGE_ID.to_string(),
            }],
            body: PageBody {
                storage: StorageBody {
                    value: value.into(),
                    representation: "storage".to_string(),
                },
            },
        }
    }
}
