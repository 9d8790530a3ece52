use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::booking::BookingDraft;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-záéíóúÁÉÍÓÚñÑ\s]+$").expect("name pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:11|[2368][0-9])[0-9]{8}$").expect("phone pattern"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern")
});
static DOCUMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7,8}$").expect("document pattern"));
static POSTAL_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("postal code pattern"));

/// Form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerName,
    Phone,
    Email,
    Document,
    PostalCode,
    Branch,
    Date,
    Time,
    Service,
}

/// First failing rule per field, with the message to show next to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    #[cfg(test)]
    fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn check(&mut self, field: Field, failure: Option<&'static str>) {
        if let Some(message) = failure {
            self.0.insert(field, message);
        }
    }
}

/// A text rule set, checked in order: required, length, pattern.
struct TextRule {
    required: &'static str,
    length: Option<(usize, usize, &'static str)>,
    pattern: &'static Lazy<Regex>,
    invalid: &'static str,
}

impl TextRule {
    fn check(&self, value: &str) -> Option<&'static str> {
        if value.is_empty() {
            return Some(self.required);
        }
        if let Some((min, max, message)) = self.length {
            let len = value.chars().count();
            if len < min || len > max {
                return Some(message);
            }
        }
        if !self.pattern.is_match(value) {
            return Some(self.invalid);
        }
        None
    }
}

static NAME: TextRule = TextRule {
    required: "El nombre es obligatorio",
    length: Some((3, usize::MAX, "El nombre debe tener al menos 3 caracteres")),
    pattern: &NAME_PATTERN,
    invalid: "El nombre solo debe contener letras",
};

static PHONE: TextRule = TextRule {
    required: "El teléfono es obligatorio",
    length: Some((10, 10, "El teléfono debe tener 10 dígitos")),
    pattern: &PHONE_PATTERN,
    invalid: "Ingrese un número válido (ej: 3812345678)",
};

static EMAIL: TextRule = TextRule {
    required: "El email es obligatorio",
    length: None,
    pattern: &EMAIL_PATTERN,
    invalid: "Ingrese un email válido",
};

static DOCUMENT: TextRule = TextRule {
    required: "El DNI es obligatorio",
    length: Some((7, 8, "El DNI debe tener entre 7 y 8 dígitos")),
    pattern: &DOCUMENT_PATTERN,
    invalid: "Ingrese un DNI válido (7-8 dígitos sin puntos)",
};

static POSTAL_CODE: TextRule = TextRule {
    required: "El código postal es obligatorio",
    length: None,
    pattern: &POSTAL_CODE_PATTERN,
    invalid: "Ingrese un código postal válido (4 dígitos)",
};

fn selected(present: bool, message: &'static str) -> Option<&'static str> {
    (!present).then_some(message)
}

/// Checks every rule of the booking form. Street, city and notes are free text.
pub fn validate(draft: &BookingDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    errors.check(Field::CustomerName, NAME.check(&draft.customer_name));
    errors.check(Field::Phone, PHONE.check(&draft.phone));
    errors.check(Field::Email, EMAIL.check(&draft.email));
    errors.check(Field::Document, DOCUMENT.check(&draft.document));
    errors.check(Field::PostalCode, POSTAL_CODE.check(&draft.postal_code));
    errors.check(
        Field::Branch,
        selected(draft.branch_id.is_some(), "Seleccione una sucursal"),
    );
    errors.check(
        Field::Date,
        selected(draft.date.as_deref().is_some_and(|d| !d.is_empty()), "Seleccione una fecha"),
    );
    errors.check(
        Field::Time,
        selected(draft.time.as_deref().is_some_and(|t| !t.is_empty()), "Seleccione un horario"),
    );
    errors.check(
        Field::Service,
        selected(!draft.service.is_empty(), "Seleccione un tipo de servicio"),
    );

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::branch::BranchId;
    use crate::models::service::ServiceSelection;

    fn valid_draft() -> BookingDraft {
        BookingDraft {
            customer_name: "maría lópez".into(),
            phone: "3812345678".into(),
            email: "maria@example.com".into(),
            document: "12345678".into(),
            postal_code: "4000".into(),
            branch_id: Some(BranchId::new("1")),
            branch_name: "Main".into(),
            date: Some("2024-05-01".into()),
            time: Some("10:00".into()),
            ..BookingDraft::default()
        }
    }

    #[test]
    fn complete_draft_passes() {
        assert_eq!(validate(&valid_draft()), Ok(()));
    }

    #[test]
    fn names_accept_spanish_letters_only() {
        assert_eq!(NAME.check("maría lópez"), None);
        assert_eq!(NAME.check("Ñandú Peña"), None);
        assert_eq!(NAME.check("John123"), Some("El nombre solo debe contener letras"));
        assert_eq!(NAME.check("Al"), Some("El nombre debe tener al menos 3 caracteres"));
        assert_eq!(NAME.check(""), Some("El nombre es obligatorio"));
    }

    #[test]
    fn accented_names_count_characters_not_bytes() {
        assert_eq!(NAME.check("Íñó"), None);
        assert!(NAME.check("Íñ").is_some());
    }

    #[test]
    fn phones_follow_area_code_patterns() {
        assert_eq!(PHONE.check("3812345678"), None);
        assert_eq!(PHONE.check("1145678901"), None);
        assert_eq!(PHONE.check("2211234567"), None);
        assert_eq!(
            PHONE.check("1234567890"),
            Some("Ingrese un número válido (ej: 3812345678)")
        );
        assert_eq!(PHONE.check("4812345678"), Some("Ingrese un número válido (ej: 3812345678)"));
        assert_eq!(PHONE.check("381234567"), Some("El teléfono debe tener 10 dígitos"));
        assert_eq!(PHONE.check("38123456789"), Some("El teléfono debe tener 10 dígitos"));
    }

    #[test]
    fn email_is_case_insensitive() {
        assert_eq!(EMAIL.check("MARIA@EXAMPLE.COM"), None);
        assert_eq!(EMAIL.check("maria.lopez+bici@mail.com.ar"), None);
        assert_eq!(EMAIL.check("maria@example"), Some("Ingrese un email válido"));
        assert_eq!(EMAIL.check("maria example.com"), Some("Ingrese un email válido"));
    }

    #[test]
    fn documents_are_seven_or_eight_digits() {
        assert_eq!(DOCUMENT.check("1234567"), None);
        assert_eq!(DOCUMENT.check("12345678"), None);
        assert_eq!(DOCUMENT.check("123456"), Some("El DNI debe tener entre 7 y 8 dígitos"));
        assert_eq!(
            DOCUMENT.check("12.345.6"),
            Some("Ingrese un DNI válido (7-8 dígitos sin puntos)")
        );
    }

    #[test]
    fn postal_code_is_four_digits() {
        assert_eq!(POSTAL_CODE.check("4000"), None);
        assert!(POSTAL_CODE.check("40000").is_some());
        assert!(POSTAL_CODE.check("T4000").is_some());
        assert_eq!(POSTAL_CODE.check(""), Some("El código postal es obligatorio"));
    }

    #[test]
    fn street_and_city_are_optional() {
        let draft = BookingDraft {
            street: String::new(),
            city: String::new(),
            ..valid_draft()
        };
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn missing_selections_are_reported() {
        let draft = BookingDraft {
            branch_id: None,
            date: None,
            time: Some(String::new()),
            service: ServiceSelection::Other(String::new()),
            ..valid_draft()
        };

        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Branch), Some("Seleccione una sucursal"));
        assert_eq!(errors.get(Field::Date), Some("Seleccione una fecha"));
        assert_eq!(errors.get(Field::Time), Some("Seleccione un horario"));
        assert_eq!(errors.get(Field::Service), Some("Seleccione un tipo de servicio"));
    }

    #[test]
    fn unknown_service_label_is_not_a_validation_failure() {
        let draft = BookingDraft {
            service: ServiceSelection::from_label("Pintura"),
            ..valid_draft()
        };
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn errors_serialize_by_field_name() {
        let draft = BookingDraft {
            phone: "123".into(),
            ..valid_draft()
        };
        let errors = validate(&draft).unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"phone": "El teléfono debe tener 10 dígitos"})
        );
    }
}
