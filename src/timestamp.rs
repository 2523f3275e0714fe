use chrono::{Datelike, Local, Timelike};

/// Current local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
pub fn now() -> String {
    format(&Local::now())
}

/// Every field is zero-padded to a minimum width of two, the year included.
pub fn format<T: Datelike + Timelike>(t: &T) -> String {
    format!(
        "{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn pads_single_digit_fields() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(format(&t), "2024-03-07 09:05:01");
    }

    #[test]
    fn year_keeps_all_its_digits() {
        let t = NaiveDate::from_ymd_opt(12345, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(format(&t), "12345-12-31 23:59:59");

        let early = NaiveDate::from_ymd_opt(7, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format(&early), "07-01-01 00:00:00");
    }

    #[test]
    fn now_has_fixed_shape() {
        let s = now();
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
    }
}
