use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical unit name and, for currencies, the ISO 4217 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInfo {
    pub unit: &'static str,
    pub iso: Option<&'static str>,
}

const fn unit(unit: &'static str) -> UnitInfo {
    UnitInfo { unit, iso: None }
}

const fn money(unit: &'static str, iso: &'static str) -> UnitInfo {
    UnitInfo { unit, iso: Some(iso) }
}

pub static AGE_UNITS: Lazy<HashMap<&'static str, UnitInfo>> = Lazy::new(|| {
    HashMap::from([
        ("year", unit("Year")),
        ("years", unit("Year")),
        ("yr", unit("Year")),
        ("yrs", unit("Year")),
        ("month", unit("Month")),
        ("months", unit("Month")),
        ("week", unit("Week")),
        ("weeks", unit("Week")),
        ("day", unit("Day")),
        ("days", unit("Day")),
    ])
});

pub static CURRENCY_WORDS: Lazy<HashMap<&'static str, UnitInfo>> = Lazy::new(|| {
    HashMap::from([
        ("dollar", money("Dollar", "USD")),
        ("dollars", money("Dollar", "USD")),
        ("buck", money("Dollar", "USD")),
        ("bucks", money("Dollar", "USD")),
        ("us dollar", money("United States dollar", "USD")),
        ("us dollars", money("United States dollar", "USD")),
        ("usd", money("United States dollar", "USD")),
        ("canadian dollar", money("Canadian dollar", "CAD")),
        ("canadian dollars", money("Canadian dollar", "CAD")),
        ("cad", money("Canadian dollar", "CAD")),
        ("australian dollar", money("Australian dollar", "AUD")),
        ("australian dollars", money("Australian dollar", "AUD")),
        ("aud", money("Australian dollar", "AUD")),
        ("cent", unit("Cent")),
        ("cents", unit("Cent")),
        ("penny", unit("Penny")),
        ("pennies", unit("Penny")),
        ("euro", money("Euro", "EUR")),
        ("euros", money("Euro", "EUR")),
        ("eur", money("Euro", "EUR")),
        ("pound sterling", money("British pound", "GBP")),
        ("pounds sterling", money("British pound", "GBP")),
        ("british pound", money("British pound", "GBP")),
        ("british pounds", money("British pound", "GBP")),
        ("gbp", money("British pound", "GBP")),
        ("yen", money("Japanese yen", "JPY")),
        ("jpy", money("Japanese yen", "JPY")),
        ("yuan", money("Chinese yuan", "CNY")),
        ("renminbi", money("Chinese yuan", "CNY")),
        ("cny", money("Chinese yuan", "CNY")),
        ("rupee", money("Indian rupee", "INR")),
        ("rupees", money("Indian rupee", "INR")),
        ("inr", money("Indian rupee", "INR")),
        ("swiss franc", money("Swiss franc", "CHF")),
        ("swiss francs", money("Swiss franc", "CHF")),
        ("chf", money("Swiss franc", "CHF")),
        ("peso", money("Mexican peso", "MXN")),
        ("pesos", money("Mexican peso", "MXN")),
    ])
});

pub static CURRENCY_SYMBOLS: Lazy<HashMap<&'static str, UnitInfo>> = Lazy::new(|| {
    HashMap::from([
        ("$", money("Dollar", "USD")),
        ("us$", money("United States dollar", "USD")),
        ("c$", money("Canadian dollar", "CAD")),
        ("a$", money("Australian dollar", "AUD")),
        ("€", money("Euro", "EUR")),
        ("£", money("British pound", "GBP")),
        ("¥", money("Japanese yen", "JPY")),
    ])
});

pub static MEASURE_UNITS: Lazy<HashMap<&'static str, UnitInfo>> = Lazy::new(|| {
    HashMap::from([
        // length
        ("mile", unit("Mile")),
        ("miles", unit("Mile")),
        ("mi", unit("Mile")),
        ("kilometer", unit("Kilometer")),
        ("kilometers", unit("Kilometer")),
        ("kilometre", unit("Kilometer")),
        ("kilometres", unit("Kilometer")),
        ("km", unit("Kilometer")),
        ("meter", unit("Meter")),
        ("meters", unit("Meter")),
        ("metre", unit("Meter")),
        ("metres", unit("Meter")),
        ("m", unit("Meter")),
        ("centimeter", unit("Centimeter")),
        ("centimeters", unit("Centimeter")),
        ("centimetre", unit("Centimeter")),
        ("centimetres", unit("Centimeter")),
        ("cm", unit("Centimeter")),
        ("millimeter", unit("Millimeter")),
        ("millimeters", unit("Millimeter")),
        ("millimetre", unit("Millimeter")),
        ("millimetres", unit("Millimeter")),
        ("mm", unit("Millimeter")),
        ("foot", unit("Foot")),
        ("feet", unit("Foot")),
        ("ft", unit("Foot")),
        ("inch", unit("Inch")),
        ("inches", unit("Inch")),
        ("yard", unit("Yard")),
        ("yards", unit("Yard")),
        ("yd", unit("Yard")),
        // weight
        ("kilogram", unit("Kilogram")),
        ("kilograms", unit("Kilogram")),
        ("kilo", unit("Kilogram")),
        ("kilos", unit("Kilogram")),
        ("kg", unit("Kilogram")),
        ("gram", unit("Gram")),
        ("grams", unit("Gram")),
        ("g", unit("Gram")),
        ("pound", unit("Pound")),
        ("pounds", unit("Pound")),
        ("lb", unit("Pound")),
        ("lbs", unit("Pound")),
        ("ounce", unit("Ounce")),
        ("ounces", unit("Ounce")),
        ("oz", unit("Ounce")),
        ("ton", unit("Ton")),
        ("tons", unit("Ton")),
        ("tonne", unit("Metric ton")),
        ("tonnes", unit("Metric ton")),
        // volume
        ("liter", unit("Liter")),
        ("liters", unit("Liter")),
        ("litre", unit("Liter")),
        ("litres", unit("Liter")),
        ("l", unit("Liter")),
        ("milliliter", unit("Milliliter")),
        ("milliliters", unit("Milliliter")),
        ("millilitre", unit("Milliliter")),
        ("millilitres", unit("Milliliter")),
        ("ml", unit("Milliliter")),
        ("gallon", unit("Gallon")),
        ("gallons", unit("Gallon")),
        ("gal", unit("Gallon")),
        // speed
        ("mph", unit("Mile per hour")),
        ("miles per hour", unit("Mile per hour")),
        ("km/h", unit("Kilometer per hour")),
        ("kilometers per hour", unit("Kilometer per hour")),
        // information
        ("byte", unit("Byte")),
        ("bytes", unit("Byte")),
        ("kilobyte", unit("Kilobyte")),
        ("kilobytes", unit("Kilobyte")),
        ("kb", unit("Kilobyte")),
        ("megabyte", unit("Megabyte")),
        ("megabytes", unit("Megabyte")),
        ("mb", unit("Megabyte")),
        ("gigabyte", unit("Gigabyte")),
        ("gigabytes", unit("Gigabyte")),
        ("gb", unit("Gigabyte")),
        ("terabyte", unit("Terabyte")),
        ("terabytes", unit("Terabyte")),
        ("tb", unit("Terabyte")),
    ])
});

pub static TEMPERATURE_UNITS: Lazy<HashMap<&'static str, UnitInfo>> = Lazy::new(|| {
    HashMap::from([
        ("celsius", unit("C")),
        ("centigrade", unit("C")),
        ("c", unit("C")),
        ("fahrenheit", unit("F")),
        ("f", unit("F")),
        ("kelvin", unit("K")),
        ("k", unit("K")),
    ])
});

/// Look `word` up in `table` after collapsing inner whitespace.
pub fn lookup(table: &HashMap<&'static str, UnitInfo>, word: &str) -> Option<UnitInfo> {
    let normalized = word.split_whitespace().collect::<Vec<_>>().join(" ");
    table.get(normalized.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_collapses_whitespace() {
        let info = lookup(&CURRENCY_WORDS, "pounds   sterling").map(|u| u.iso);
        assert_eq!(info, Some(Some("GBP")));
        assert_eq!(lookup(&MEASURE_UNITS, "miles").map(|u| u.unit), Some("Mile"));
        assert_eq!(lookup(&MEASURE_UNITS, "parsecs"), None);
    }
}
