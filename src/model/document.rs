use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Action, Id, PageDataArchitectureState};

pub const DOCUMENT_TYPE: &str = "powerhouse/page-data-architecture";
pub const FILE_EXTENSION: &str = ".pharch";

/// A page data architecture document: current state plus the log of every
/// operation that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDataArchitectureDocument {
    pub header: DocumentHeader,
    /// State the operation log starts from
    pub initial_state: PageDataArchitectureState,
    pub state: PageDataArchitectureState,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    pub id: Id,
    pub name: String,
    pub document_type: String,
    pub created_at_utc_iso: String, // ISO 8601 string
    pub last_modified_at_utc_iso: String, // ISO 8601 string
    /// Number of operations applied since creation
    pub revision: u64,
}

/// An applied action as recorded in the operation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub index: u64,
    pub timestamp_utc_iso: String,
    pub action: Action,
    /// Hex SHA-256 of the state after this operation
    pub hash: String,
}

/// Document creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    /// Optional ID - generated when not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default)]
    pub name: String,
    /// Starting state; empty when not provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<PageDataArchitectureState>,
}

/// Summary used in listings, without state or log
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: Id,
    pub name: String,
    pub revision: u64,
    pub endpoints_count: usize,
    pub last_modified_at_utc_iso: String,
}

impl PageDataArchitectureDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_state(generate_id(), name, PageDataArchitectureState::default())
    }

    pub fn with_state(
        id: Id,
        name: impl Into<String>,
        initial_state: PageDataArchitectureState,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            header: DocumentHeader {
                id,
                name: name.into(),
                document_type: DOCUMENT_TYPE.to_string(),
                created_at_utc_iso: now.clone(),
                last_modified_at_utc_iso: now,
                revision: 0,
            },
            state: initial_state.clone(),
            initial_state,
            operations: Vec::new(),
        }
    }

    pub fn from_request(request: NewDocument) -> Self {
        Self::with_state(
            request.id.unwrap_or_else(generate_id),
            request.name,
            request.initial_state.unwrap_or_default(),
        )
    }

    pub fn id(&self) -> &Id {
        &self.header.id
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.header.id.clone(),
            name: self.header.name.clone(),
            revision: self.header.revision,
            endpoints_count: self.state.endpoints.len(),
            last_modified_at_utc_iso: self.header.last_modified_at_utc_iso.clone(),
        }
    }

    /// Update modification time to now
    pub fn touch(&mut self) {
        self.header.last_modified_at_utc_iso = chrono::Utc::now().to_rfc3339();
    }

    /// Hash of the canonical JSON form of a state
    pub fn state_hash(state: &PageDataArchitectureState) -> anyhow::Result<String> {
        use sha2::{Digest, Sha256};

        let serialized = serde_json::to_vec(state)?;
        let mut hasher = Sha256::new();
        hasher.update(&serialized);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Serialize to the `.pharch` file format (gzip-compressed JSON)
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let serialized = serde_json::to_vec(self)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&serialized)?;
        Ok(encoder.finish()?)
    }

    /// Load from `.pharch` bytes; plain JSON is accepted as well
    pub fn from_bytes(data: &[u8]) -> anyhow::Result<Self> {
        use flate2::read::GzDecoder;
        use std::io::Read;

        // Check if data is gzip-compressed by looking for gzip magic bytes (1f 8b)
        let json = if data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b {
            let mut decoder = GzDecoder::new(data);
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            decompressed
        } else {
            data.to_vec()
        };

        let document: Self = serde_json::from_slice(&json)?;
        if document.header.document_type != DOCUMENT_TYPE {
            anyhow::bail!(
                "unexpected document type '{}', expected '{}'",
                document.header.document_type,
                DOCUMENT_TYPE
            );
        }
        Ok(document)
    }
}
