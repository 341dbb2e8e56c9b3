//! Route paths.

pub const GET_HEALTH: &str = "/health";

pub const APPOINTMENT_OPTIONS: &str = "/appointmentOptions";
pub const APPOINTMENT_OPTIONS_V2: &str = "/v2/appointmentOptions";
pub const APPOINTMENT_SPECIALTY: &str = "/appointmentSpecialty";

pub const BOOKINGS: &str = "/bookings";
pub const BOOKINGS_ID: &str = "/bookings/{id}";

pub const JWT: &str = "/jwt";

pub const USERS: &str = "/users";
/// Shared by `GET` (path segment is an email) and `PUT` (path segment is an id).
pub const USERS_ADMIN_KEY: &str = "/users/admin/{key}";

pub const DOCTORS: &str = "/doctors";
pub const DOCTORS_ID: &str = "/doctors/{id}";

pub const CONTACT: &str = "/contact";
pub const PAYMENTS: &str = "/payments";
