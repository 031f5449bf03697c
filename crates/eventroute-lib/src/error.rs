use thiserror::Error;

/// Convenient result alias for the eventroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an anchor mode string is neither `arrival` nor `departure`.
    #[error("anchor mode must be 'arrival' or 'departure', got '{mode}'")]
    InvalidAnchorMode { mode: String },

    /// Raised when a timezone name is not present in the IANA database.
    #[error("unknown timezone: '{name}'")]
    UnknownTimezone { name: String },

    /// Raised when a timestamp cannot be represented as a calendar instant.
    #[error("timestamp {instant_ms} ms is out of the representable range")]
    TimestampOutOfRange { instant_ms: i64 },

    /// Raised when an offset lookup produced an out-of-range UTC offset.
    #[error("UTC offset of {seconds} seconds is out of range")]
    InvalidUtcOffset { seconds: i32 },

    /// Raised when a required provider credential variable is unset.
    #[error("missing routing provider credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    /// Raised when the routing provider returned a non-success status.
    #[error("routing provider returned status {status}: {details}")]
    ProviderResponse { status: u16, details: String },

    /// Raised when a successful provider response contained no route.
    #[error("routing provider response contained no route")]
    EmptyRoute,

    /// Raised when provider route figures fail validation.
    #[error("invalid route summary: {message}")]
    InvalidRouteSummary { message: String },

    /// Raised when the geocoder returned no match for an address.
    #[error("address was not recognized: '{address}'")]
    AddressNotRecognized { address: String },

    /// Raised when a geocoder response carried unparsable coordinates.
    #[error("malformed geocoder response: {message}")]
    MalformedGeocodeResponse { message: String },

    /// Raised when building a marker map from an empty coordinate list.
    #[error("cannot build a marker map from an empty coordinate list")]
    EmptyMarkerList,

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
