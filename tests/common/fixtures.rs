//! Test fixtures and data factories

use supplies_rs::core::models::{CandidateDocument, SchoolDraft, VendorDraft};
use uuid::Uuid;

/// Builds CSV documents row by row
#[derive(Debug, Clone)]
pub struct CsvBuilder {
    lines: Vec<String>,
}

impl CsvBuilder {
    pub fn with_header(header: &[&str]) -> Self {
        Self {
            lines: vec![header.join(",")],
        }
    }

    pub fn schools() -> Self {
        Self::with_header(&["Name", "State", "District"])
    }

    pub fn contacts() -> Self {
        Self::with_header(&["Name", "Email", "Phone", "Role", "Organization"])
    }

    pub fn products() -> Self {
        Self::with_header(&["Name", "Category", "Price", "Description"])
    }

    pub fn vendors() -> Self {
        Self::with_header(&["Name", "ContactPerson", "Email", "Phone", "Address"])
    }

    /// Append a row; cells containing commas or quotes are quoted
    pub fn row(mut self, cells: &[&str]) -> Self {
        let line = cells
            .iter()
            .map(|cell| {
                if cell.contains([',', '"', '\n']) {
                    format!("\"{}\"", cell.replace('"', "\"\""))
                } else {
                    cell.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        self.lines.push(line);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content.into_bytes()
    }
}

pub fn school(name: &str) -> CandidateDocument {
    CandidateDocument::School(SchoolDraft {
        name: Some(name.to_string()),
        state: Some("Kerala".to_string()),
        district: Some("Ernakulam".to_string()),
    })
}

pub fn vendor(name: &str, email: &str) -> CandidateDocument {
    CandidateDocument::Vendor(VendorDraft {
        name: Some(name.to_string()),
        contact_person: Some("Ravi".to_string()),
        email: Some(email.to_string()),
        phone: Some("+91 98470 00000".to_string()),
        address: None,
    })
}

/// A hand-assembled `multipart/form-data` body
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: format!("----supplies-test-{}", Uuid::new_v4().simple()),
            body: Vec::new(),
        }
    }

    pub fn file(mut self, field: &str, filename: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                self.boundary, field, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, field, value
            )
            .as_bytes(),
        );
        self
    }

    /// `(content type header value, body)`
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
