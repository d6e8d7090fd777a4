pub mod attendance;
pub mod employee;

pub use attendance::{AttendanceRecord, EvidenceBundle, GeoFix, RecordType};
pub use employee::Employee;
