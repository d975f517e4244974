use serde::Serialize;

/// Name of the forecast function offered to the model.
pub const TOOL_NAME: &str = "get_weather";

/// Canned forecast returned as a tool result.
///
/// Field order here is the wire order of the serialized payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub tool: String,
    pub location: String,
    pub date: Option<String>,
    pub units: String,
    pub summary: String,
    pub temperature: f64,
    pub precipitation_chance: f64,
}

/// Look up the demo forecast for a location. Deterministic, never fails.
///
/// The location is matched case-insensitively against a fixed table and
/// echoed back in the caller's original spelling; unknown locations get a
/// neutral fallback rather than an error. Units normalize to exactly "C"
/// or "F", and only "F" converts the temperature.
pub fn get_weather(location: &str, date: Option<&str>, units: &str) -> WeatherReport {
    let (summary, temp_c, precipitation_chance) = match location.trim().to_lowercase().as_str() {
        "san francisco" => ("cool and breezy", 16.0, 0.1),
        "new york" => ("variable clouds", 22.0, 0.3),
        "london" => ("light rain", 14.0, 0.6),
        "tokyo" => ("humid and warm", 27.0, 0.4),
        _ => ("unknown (demo stub)", 20.0, 0.2),
    };

    let fahrenheit = units.trim().to_uppercase() == "F";
    let temperature: f64 = if fahrenheit {
        temp_c * 9.0 / 5.0 + 32.0
    } else {
        temp_c
    };

    WeatherReport {
        tool: TOOL_NAME.to_string(),
        location: location.to_string(),
        date: date.map(str::to_string),
        units: if fahrenheit { "F" } else { "C" }.to_string(),
        summary: summary.to_string(),
        temperature: (temperature * 10.0).round() / 10.0,
        precipitation_chance,
    }
}
