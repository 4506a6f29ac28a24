use crate::utils::error::{Result, VidiqError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Trims a keyword and rejects it when nothing is left.
pub fn validate_keyword(keyword: &str) -> Result<&str> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(VidiqError::input("Keyword cannot be empty"));
    }
    Ok(trimmed)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(VidiqError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(VidiqError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(VidiqError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(VidiqError::input(format!("{} cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(VidiqError::input(format!(
            "{} contains null bytes: {:?}",
            field_name, path
        )));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(VidiqError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VidiqError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so test for containment instead of exclusion.
    if !(value >= min && value <= max) {
        return Err(VidiqError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_ascending(field_name: &str, values: &[f64]) -> Result<()> {
    let ordered = values.iter().all(|v| v.is_finite())
        && values.windows(2).all(|pair| pair[0] < pair[1]);
    if !ordered {
        return Err(VidiqError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", values),
            reason: "Values must be finite and strictly ascending".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_keyword() {
        assert_eq!(validate_keyword("  youtube SEO ").unwrap(), "youtube SEO");
        for blank in ["", " ", "\t\n", "   \r\n  "] {
            let err = validate_keyword(blank).unwrap_err();
            assert!(matches!(err, VidiqError::InputError { .. }));
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://api.vidiq.com").is_ok());
        assert!(validate_url("base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", "exports/cats.csv").is_ok());
        assert!(validate_path("output", "").is_err());
        assert!(validate_path("output", "bad\0path").is_err());
        assert!(matches!(
            validate_path("output_dir", "  "),
            Err(VidiqError::InputError { .. })
        ));
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("delay_seconds", 1.0, 0.0, 3600.0).is_ok());
        assert!(validate_range("delay_seconds", -0.5, 0.0, 3600.0).is_err());
        assert!(validate_range("delay_seconds", f64::NAN, 0.0, 3600.0).is_err());
    }

    #[test]
    fn test_validate_ascending() {
        assert!(validate_ascending("thresholds", &[20.0, 40.0, 60.0, 80.0]).is_ok());
        assert!(validate_ascending("thresholds", &[20.0, 20.0, 60.0, 80.0]).is_err());
        assert!(validate_ascending("thresholds", &[80.0, 60.0, 40.0, 20.0]).is_err());
        assert!(validate_ascending("thresholds", &[20.0, f64::INFINITY]).is_err());
    }
}
