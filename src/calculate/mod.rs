//! Statistics calculation engine.
//!
//! - Kill/death ratios
//! - Match aggregation into team and role buckets
//! - Side-by-side comparison series for charts

mod aggregator;
mod comparison;

pub use aggregator::*;
pub use comparison::*;

/// Kills per death, treating zero deaths as one.
pub fn kdr_ratio(kills: u64, deaths: u64) -> f64 {
    kills as f64 / deaths.max(1) as f64
}

/// KDR formatted to two decimal places.
pub fn format_kdr(kills: u64, deaths: u64) -> String {
    format!("{:.2}", kdr_ratio(kills, deaths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdr_ratio() {
        assert_eq!(kdr_ratio(10, 0), 10.0);
        assert_eq!(kdr_ratio(7, 2), 3.5);
        assert_eq!(kdr_ratio(0, 5), 0.0);
    }

    #[test]
    fn test_format_kdr() {
        assert_eq!(format_kdr(10, 0), "10.00");
        assert_eq!(format_kdr(7, 2), "3.50");
        assert_eq!(format_kdr(2, 3), "0.67");
        assert_eq!(format_kdr(0, 0), "0.00");
        assert_eq!(format_kdr(123, 1), "123.00");
    }
}
