pub use crate::{
    credentials::{Credentials, SessionToken},
    id::{ObjectId, SessionId, UserId},
    time::Timestamp,
    validate::{Validate, ValidateError},
};
