use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Network request failed or the booking site answered with a hard error
    NetworkError(String),
    /// Failed to extract an expected field from an HTML response
    ParseError(String),
    /// Invalid URL format
    UrlError(String),
    /// A date string did not match the site's strict dd-mm-yyyy format
    DateFormatError { value: String, detail: String },
    /// Office name was never registered with the finder
    UnknownOffice(String),
    /// Phone number has no messaging-gateway API key registered
    MissingApiKey(String),
    /// Invalid input or configuration value
    InvalidInput(String),
    /// IO operation failed
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NetworkError(msg) => write!(f, "Network error: {msg}"),
            AppError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AppError::UrlError(msg) => write!(f, "Invalid URL: {msg}"),
            AppError::DateFormatError { value, detail } => {
                write!(f, "Date '{value}' is not in dd-mm-yyyy format: {detail}")
            }
            AppError::UnknownOffice(name) => write!(f, "Invalid office name: {name}"),
            AppError::MissingApiKey(phone) => {
                write!(f, "No API key registered for {phone}")
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn test_date_format_error_display() {
        let err = AppError::DateFormatError {
            value: "2023-11-18".to_string(),
            detail: "input is out of range".to_string(),
        };

        let error_msg = err.to_string();
        assert!(error_msg.contains("2023-11-18"));
        assert!(error_msg.contains("dd-mm-yyyy"));
    }

    #[test]
    fn test_network_error_display() {
        let err = AppError::NetworkError("Connection timeout".to_string());
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("Connection timeout"));
    }

    #[test]
    fn test_unknown_office_display() {
        let err = AppError::UnknownOffice("Kadikoy".to_string());
        assert!(err.to_string().contains("Invalid office name"));
        assert!(err.to_string().contains("Kadikoy"));
    }

    #[test]
    fn test_missing_api_key_display() {
        let err = AppError::MissingApiKey("+905551112233".to_string());
        assert!(err.to_string().contains("No API key"));
        assert!(err.to_string().contains("+905551112233"));
    }

    #[test]
    fn test_invalid_input_error_display() {
        let err = AppError::InvalidInput("Not a number".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_app_error_implements_error_trait() {
        use std::error::Error;
        let err: Box<dyn Error> = Box::new(AppError::NetworkError("test".to_string()));
        assert!(!err.to_string().is_empty());
    }
}
