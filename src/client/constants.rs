// remote booking backend endpoints
pub const BRANCHES_PATH: &str = "sucursalesClient";
pub const CALENDAR_PATH: &str = "getShiftPerMonth";
pub const BOOKING_EXISTS_PATH: &str = "getShiftExist";
pub const BOOKINGS_PATH: &str = "turnos";

// query parameters
pub const BRANCH_PARAM: &str = "BPLId";
pub const DOCUMENT_PARAM: &str = "U_dni";
pub const DATE_PARAM: &str = "U_Fecha";

// fixed values on every submitted booking
pub const ORIGIN_TAG: &str = "BIKES";
pub const INITIAL_STATUS: &str = "Pendiente";
