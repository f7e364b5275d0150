// handlers/public - endpoints without authentication:
// service info, login, employee self-service and read-only reference data.
pub mod auth;
pub mod catalog;
pub mod employees;
pub mod system;
