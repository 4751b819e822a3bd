use crate::Rule;
use crate::rules::time::{rules_dates, rules_ranges, rules_relative, rules_times};

pub fn get() -> Vec<Rule> {
    vec![
        // dates
        rules_dates::rule_relative_day(),
        rules_dates::rule_day_after_before(),
        rules_dates::rule_weekday(),
        rules_dates::rule_shifted_weekday(),
        rules_dates::rule_month_day(),
        rules_dates::rule_day_month(),
        rules_dates::rule_iso_date(),
        rules_dates::rule_slash_date(),
        rules_dates::rule_on_date(),
        // clock times
        rules_times::rule_clock_time(),
        rules_times::rule_hour_meridiem(),
        rules_times::rule_clock_meridiem(),
        rules_times::rule_noon_midnight(),
        rules_times::rule_oclock(),
        rules_times::rule_at_time(),
        rules_times::rule_now(),
        rules_times::rule_date_time(),
        rules_times::rule_time_date(),
        // relative
        rules_relative::rule_duration(),
        rules_relative::rule_single_unit_duration(),
        rules_relative::rule_half_hour(),
        rules_relative::rule_in_duration(),
        rules_relative::rule_duration_ago(),
        rules_relative::rule_duration_later(),
        rules_relative::rule_period(),
        // ranges
        rules_ranges::rule_from_date_to_date(),
        rules_ranges::rule_date_to_date(),
        rules_ranges::rule_between_dates(),
        rules_ranges::rule_from_time_to_time(),
        rules_ranges::rule_time_to_time(),
        rules_ranges::rule_between_times(),
        rules_ranges::rule_date_bound(),
        rules_ranges::rule_time_bound(),
    ]
}
