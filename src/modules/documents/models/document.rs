use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The seven printable document kinds.
///
/// Each kind numbers its documents `{PREFIX}-{year}-{zero-padded id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    SalesNote,
    PaymentReceipt,
    Invoice,
    /// Berita acara serah terima, the handover report
    Bast,
    PurchaseOrder,
    TaxInvoice,
    ProformaInvoice,
}

impl DocumentType {
    pub fn prefix(self) -> &'static str {
        match self {
            DocumentType::SalesNote => "SN",
            DocumentType::PaymentReceipt => "PR",
            DocumentType::Invoice => "INV",
            DocumentType::Bast => "BAST",
            DocumentType::PurchaseOrder => "PO",
            DocumentType::TaxInvoice => "TAX",
            DocumentType::ProformaInvoice => "PI",
        }
    }

    /// Heading printed at the top of the rendered document
    pub fn title(self) -> &'static str {
        match self {
            DocumentType::SalesNote => "SALES NOTE",
            DocumentType::PaymentReceipt => "PAYMENT RECEIPT",
            DocumentType::Invoice => "INVOICE",
            DocumentType::Bast => "BAST",
            DocumentType::PurchaseOrder => "PURCHASE ORDER",
            DocumentType::TaxInvoice => "TAX INVOICE",
            DocumentType::ProformaInvoice => "PROFORMA INVOICE",
        }
    }

    /// `{PREFIX}-{year}-{id:04}`; the id is the document row's own identity
    pub fn format_number(self, year: i32, id: i64) -> String {
        format!("{}-{}-{:04}", self.prefix(), year, id)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentType::SalesNote => "sales_note",
            DocumentType::PaymentReceipt => "payment_receipt",
            DocumentType::Invoice => "invoice",
            DocumentType::Bast => "bast",
            DocumentType::PurchaseOrder => "purchase_order",
            DocumentType::TaxInvoice => "tax_invoice",
            DocumentType::ProformaInvoice => "proforma_invoice",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sales_note" => Ok(DocumentType::SalesNote),
            "payment_receipt" => Ok(DocumentType::PaymentReceipt),
            "invoice" => Ok(DocumentType::Invoice),
            "bast" => Ok(DocumentType::Bast),
            "purchase_order" => Ok(DocumentType::PurchaseOrder),
            "tax_invoice" => Ok(DocumentType::TaxInvoice),
            "proforma_invoice" => Ok(DocumentType::ProformaInvoice),
            _ => Err(format!("Invalid document type: {}", s)),
        }
    }
}

/// A rendered document.
///
/// Immutable once created: regenerating produces a new row with a new
/// number, the old copy stays untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: i64,
    pub transaction_id: i64,
    pub document_type: DocumentType,
    pub document_number: String,
    pub document_date: NaiveDate,
    pub recipient_name: Option<String>,
    pub custom_notes: Option<String>,
    pub html_content: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for generating a document
#[derive(Debug, Deserialize)]
pub struct GenerateDocumentRequest {
    pub document_type: DocumentType,
    /// Defaults to today
    #[serde(default)]
    pub document_date: Option<NaiveDate>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub custom_notes: Option<String>,
}

/// Document metadata ready to be persisted; number and html are produced
/// once the row id is known
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub transaction_id: i64,
    pub document_type: DocumentType,
    pub document_date: NaiveDate,
    pub recipient_name: Option<String>,
    pub custom_notes: Option<String>,
}
