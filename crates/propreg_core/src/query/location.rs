/// Parsed `country[,city]` location expression.
///
/// The split keeps trailing empty segments: `"Poland,"` has a blank city,
/// while `"Poland"` has none. Segments past the second are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFilter {
    pub country: String,
    /// `None` when the expression had no comma.
    pub city: Option<String>,
}

impl LocationFilter {
    pub fn parse(expr: &str) -> Self {
        let mut segments = expr.split(',').map(str::trim);
        Self {
            country: segments.next().unwrap_or_default().to_string(),
            city: segments.next().map(str::to_string),
        }
    }
}
