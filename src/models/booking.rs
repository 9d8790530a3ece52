use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::branch::BranchId;
use super::lenient::scalar_to_string;
use super::service::{ProblemCode, ServiceSelection};
use crate::client::constants::{INITIAL_STATUS, ORIGIN_TAG};

/// Working state of the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BookingDraft {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub document: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub notes: String,
    pub branch_id: Option<BranchId>,
    pub branch_name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: ServiceSelection,
}

impl BookingDraft {
    /// A fresh draft that stays on the same branch.
    pub fn keeping_branch(&self) -> Self {
        BookingDraft {
            branch_id: self.branch_id.clone(),
            branch_name: self.branch_name.clone(),
            ..BookingDraft::default()
        }
    }
}

/// Free-text edits from the widget. Branch, date and time have their own
/// operations because they drive the calendar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftPatch {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub document: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
    pub service: Option<ServiceSelection>,
}

impl DraftPatch {
    pub fn apply(self, draft: &mut BookingDraft) {
        let fields = [
            (self.customer_name, &mut draft.customer_name),
            (self.phone, &mut draft.phone),
            (self.email, &mut draft.email),
            (self.document, &mut draft.document),
            (self.street, &mut draft.street),
            (self.city, &mut draft.city),
            (self.postal_code, &mut draft.postal_code),
            (self.notes, &mut draft.notes),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(service) = self.service {
            draft.service = service;
        }
    }
}

/// Body of `POST /turnos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingPayload {
    #[serde(rename = "U_custmrName")]
    pub customer_name: String,
    #[serde(rename = "U_City")]
    pub city: String,
    #[serde(rename = "U_Street")]
    pub street: String,
    #[serde(rename = "U_Telephone")]
    pub phone: String,
    #[serde(rename = "U_Email")]
    pub email: String,
    #[serde(rename = "U_dni")]
    pub document: String,
    #[serde(rename = "U_descrption")]
    pub notes: String,
    #[serde(rename = "U_TipoOrigen")]
    pub origin: &'static str,
    #[serde(rename = "U_BPLId")]
    pub branch_id: BranchId,
    #[serde(rename = "U_BPLName")]
    pub branch_name: String,
    #[serde(rename = "U_problemTyp")]
    pub problem_type: ProblemCode,
    #[serde(rename = "U_ProSubType")]
    pub problem_subtype: ProblemCode,
    #[serde(rename = "U_State")]
    pub state: &'static str,
    #[serde(rename = "U_Fecha")]
    pub date: String,
    #[serde(rename = "U_StartTime")]
    pub start_time: String,
    #[serde(rename = "ZipCode")]
    pub postal_code: String,
}

impl BookingPayload {
    /// Builds the submission from a draft that already passed validation.
    /// Name, street, city and email go out trimmed and upper-cased.
    pub fn from_draft(draft: &BookingDraft) -> Self {
        let codes = draft.service.codes();

        BookingPayload {
            customer_name: shout(&draft.customer_name),
            city: shout(&draft.city),
            street: shout(&draft.street),
            phone: draft.phone.clone(),
            email: shout(&draft.email),
            document: draft.document.clone(),
            notes: draft.notes.clone(),
            origin: ORIGIN_TAG,
            branch_id: draft.branch_id.clone().unwrap_or_default(),
            branch_name: draft.branch_name.clone(),
            problem_type: codes.category,
            problem_subtype: codes.subcategory,
            state: INITIAL_STATUS,
            date: draft.date.clone().unwrap_or_default(),
            start_time: draft.time.clone().unwrap_or_default(),
            postal_code: draft.postal_code.clone(),
        }
    }
}

fn shout(value: &str) -> String {
    value.trim().to_uppercase()
}

/// A booking the backend accepted: the submitted payload with the server's
/// answer layered on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub date: String,
    pub start_time: String,
    pub details: Map<String, Value>,
}

impl Confirmation {
    pub fn merge(payload: &BookingPayload, response: Value) -> Self {
        let mut details = match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };

        match response {
            Value::Object(extra) => details.extend(extra),
            other => {
                details.insert("apiMessage".to_string(), other);
            }
        }

        let field = |name: &str, fallback: &str| {
            details
                .get(name)
                .and_then(scalar_to_string)
                .unwrap_or_else(|| fallback.to_string())
        };
        let date = field("U_Fecha", &payload.date);
        let start_time = field("U_StartTime", &payload.start_time);

        Confirmation {
            date,
            start_time,
            details,
        }
    }
}
