//! HTTP status codes as a typed enum.
//!
//! The codes this service emits. Use [`Status`] anywhere a status code is
//! accepted: `Response::status()`, `Response::builder().status()`, or as a
//! bare handler return value. The unit tests also play a fake provider, so a
//! few provider-side codes exist in test builds only.
//!
//! ```rust
//! use precis::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::InternalServerError)
//!     .json(br#"{"error":"boom"}"#.to_vec());
//! ```

/// HTTP status codes produced by precis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    NoContent,           // 204
    BadRequest,          // 400
    #[cfg(test)]
    Unauthorized,        // 401
    NotFound,            // 404
    MethodNotAllowed,    // 405
    #[cfg(test)]
    TooManyRequests,     // 429
    InternalServerError, // 500
    #[cfg(test)]
    ServiceUnavailable,  // 503
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NoContent           => 204,
            Status::BadRequest          => 400,
            #[cfg(test)]
            Status::Unauthorized        => 401,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            #[cfg(test)]
            Status::TooManyRequests     => 429,
            Status::InternalServerError => 500,
            #[cfg(test)]
            Status::ServiceUnavailable  => 503,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        // Every variant maps to a registered code.
        http::StatusCode::from_u16(s.into()).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}
