//! Complaint coordinates and "get directions" deep links.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Latitude and longitude must be provided together")]
    Incomplete,
    #[error("Invalid coordinate: {0}")]
    InvalidNumber(String),
    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl Coordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Result<Self, LocationError> {
        if latitude.abs() > Decimal::from(90) {
            return Err(LocationError::LatitudeOutOfRange);
        }
        if longitude.abs() > Decimal::from(180) {
            return Err(LocationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse optional form values. Blank counts as absent; both or neither.
    pub fn parse(
        latitude: Option<&str>,
        longitude: Option<&str>,
    ) -> Result<Option<Self>, LocationError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        match (present(latitude), present(longitude)) {
            (None, None) => Ok(None),
            (Some(lat), Some(lng)) => {
                let lat = parse_decimal(lat)?;
                let lng = parse_decimal(lng)?;
                Self::new(lat, lng).map(Some)
            }
            _ => Err(LocationError::Incomplete),
        }
    }

    fn pair(&self) -> String {
        format!("{},{}", self.latitude.normalize(), self.longitude.normalize())
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, LocationError> {
    Decimal::from_str(raw).map_err(|_| LocationError::InvalidNumber(raw.to_string()))
}

/// Which maps app the directions link should open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Apple,
    Web,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Android") {
            Platform::Android
        } else if ["iPhone", "iPad", "iPod", "Macintosh"]
            .iter()
            .any(|device| user_agent.contains(device))
        {
            Platform::Apple
        } else {
            Platform::Web
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Apple => "apple",
            Platform::Web => "web",
        }
    }
}

pub fn directions_url(coordinates: &Coordinates, platform: Platform) -> String {
    let pair = coordinates.pair();
    match platform {
        Platform::Android => format!("google.navigation:q={}", pair),
        Platform::Apple => format!("maps://maps.apple.com/?daddr={}", pair),
        Platform::Web => format!(
            "https://www.google.com/maps/dir/?api=1&destination={}",
            pair
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_both_or_neither() {
        assert_eq!(Coordinates::parse(None, None), Ok(None));
        assert_eq!(Coordinates::parse(Some(" "), Some("")), Ok(None));
        assert_eq!(
            Coordinates::parse(Some("-6.2"), None),
            Err(LocationError::Incomplete)
        );
        assert_eq!(
            Coordinates::parse(None, Some("106.8")),
            Err(LocationError::Incomplete)
        );

        let coords = Coordinates::parse(Some("-6.200000"), Some("106.816666"))
            .unwrap()
            .unwrap();
        assert_eq!(coords.latitude, Decimal::from_str("-6.2").unwrap());

        let padded = Coordinates::parse(Some(" -6.2 "), Some(" 106.8\n"))
            .unwrap()
            .unwrap();
        assert_eq!(padded.longitude, Decimal::from_str("106.8").unwrap());
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_garbage() {
        assert_eq!(
            Coordinates::parse(Some("90.5"), Some("0")),
            Err(LocationError::LatitudeOutOfRange)
        );
        assert_eq!(
            Coordinates::parse(Some("0"), Some("-180.01")),
            Err(LocationError::LongitudeOutOfRange)
        );
        assert!(Coordinates::parse(Some("-90"), Some("180")).is_ok());
        assert!(matches!(
            Coordinates::parse(Some("north"), Some("1")),
            Err(LocationError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_platform_from_user_agent() {
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36";
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)";
        let windows = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

        assert_eq!(Platform::from_user_agent(android), Platform::Android);
        assert_eq!(Platform::from_user_agent(iphone), Platform::Apple);
        assert_eq!(Platform::from_user_agent(mac), Platform::Apple);
        assert_eq!(Platform::from_user_agent(windows), Platform::Web);
        assert_eq!(Platform::from_user_agent(""), Platform::Web);
    }

    #[test]
    fn test_directions_url() {
        let coords = Coordinates::parse(Some("-6.200000"), Some("106.816666"))
            .unwrap()
            .unwrap();

        assert_eq!(
            directions_url(&coords, Platform::Android),
            "google.navigation:q=-6.2,106.816666"
        );
        assert_eq!(
            directions_url(&coords, Platform::Apple),
            "maps://maps.apple.com/?daddr=-6.2,106.816666"
        );
        assert_eq!(
            directions_url(&coords, Platform::Web),
            "https://www.google.com/maps/dir/?api=1&destination=-6.2,106.816666"
        );
    }
}
