use web_sys::js_sys::Number;

/// The whole number a counter shows for an animated value. Anything that is
/// not finite shows as zero.
pub fn counter_value(value: f64) -> f64 {
    if value.is_finite() {
        value.floor()
    } else {
        0.0
    }
}

/// Counter text grouped the way the browser groups numbers for `lang`.
pub fn counter_text(value: f64, lang: &str) -> String {
    Number::from(counter_value(value)).to_locale_string(lang).into()
}
