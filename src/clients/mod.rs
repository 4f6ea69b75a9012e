/// The `Login` and `ClassChartsClient` traits
pub mod traits;

/// Parent accounts: email and password, one or more pupils
pub mod parent;

/// Student accounts: student code and date of birth
pub mod student;
