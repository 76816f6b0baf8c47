mod url;

pub use url::{
    ErrorResponse, HealthResponse, InfoQuery, InfoResponse, ShortenRequest, ShortenResponse,
};
