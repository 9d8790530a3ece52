use serde::Serialize;

pub const BRANCHES_FAILED: &str = "No se pudieron cargar las sucursales";
pub const NO_BRANCHES: &str = "No hay sucursales disponibles";
pub const NO_DATES: &str = "No hay fechas disponibles para la sucursal seleccionada.";
pub const DATES_FAILED: &str = "Error cargando fechas disponibles. Intente nuevamente.";
pub const BOOKING_EXISTS: &str = "Ya existe un turno para este DNI en la fecha seleccionada";
pub const BOOKING_CREATED: &str = "Reserva creada correctamente";
pub const BOOKING_FAILED: &str = "Error al crear la reserva. Intente nuevamente.";
pub const FORM_INVALID: &str = "Revise los campos marcados";
pub const BOOKING_IN_FLIGHT: &str = "La reserva se está enviando";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the customer. Never blocks the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
