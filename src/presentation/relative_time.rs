use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describe `then` relative to `now` ("hace 3 horas", "en 2 días").
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    let future = seconds < 0;
    let elapsed = seconds.abs();

    if elapsed < MINUTE {
        let phrase = if future { "en un momento" } else { "hace un momento" };
        return phrase.to_string();
    }

    let phrase = match elapsed {
        s if s < HOUR => amount(s / MINUTE, "minuto", "minutos"),
        s if s < DAY => amount(s / HOUR, "hora", "horas"),
        s if s < MONTH => amount(s / DAY, "día", "días"),
        s if s < YEAR => amount(s / MONTH, "mes", "meses"),
        s => amount(s / YEAR, "año", "años"),
    };

    if future {
        format!("en {phrase}")
    } else {
        format!("hace {phrase}")
    }
}

fn amount(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}
